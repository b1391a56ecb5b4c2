//! Core logic for the wsform create-workspace form
//!
//! This crate provides:
//! - Option building for the namespace and devfile selectors
//! - Form state value objects driven by explicit events
//! - The initializer that fetches both option sources concurrently

mod error;
mod form;
mod init;
mod selection;

pub use error::*;
pub use form::*;
pub use init::*;
pub use selection::*;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
