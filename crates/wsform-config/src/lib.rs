//! Configuration parsing for wsform
//!
//! This crate handles parsing of:
//! - Global configuration (`~/.config/wsform/config.toml`)
//! - Form label overrides and the locally configured namespace list

mod error;
mod global;

pub use error::*;
pub use global::*;
