//! Builds selector option sets from fetched entities

use serde::Serialize;
use wsform_sources::{DevfileTemplateInfo, NamespaceInfo};

/// Items backing a single-choice selector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayOptionSet {
    pub options: Vec<String>,
    /// Always one of `options` when set
    pub default: Option<String>,
    pub disabled: bool,
}

impl DisplayOptionSet {
    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn contains(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Sorted namespace labels with the default namespace preselected.
///
/// The default is the first namespace flagged as default, or the first
/// namespace in input order when none is flagged. A single option disables
/// the selector since there is nothing to choose.
pub fn build_namespace_options(namespaces: &[NamespaceInfo]) -> DisplayOptionSet {
    let default = namespaces
        .iter()
        .find(|ns| ns.is_default())
        .or_else(|| namespaces.first())
        .map(|ns| ns.display_label().to_string());

    let mut options: Vec<String> = namespaces
        .iter()
        .map(|ns| ns.display_label().to_string())
        .collect();
    options.sort();

    DisplayOptionSet {
        disabled: options.len() == 1,
        options,
        default,
    }
}

/// Devfile labels in registry order, no default and never disabled
pub fn build_devfile_options(devfiles: &[DevfileTemplateInfo]) -> DisplayOptionSet {
    DisplayOptionSet {
        options: devfiles.iter().map(|d| d.display_name.clone()).collect(),
        default: None,
        disabled: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns(name: &str) -> NamespaceInfo {
        NamespaceInfo::new(name)
    }

    #[test]
    fn test_namespace_options_sorted() {
        let set = build_namespace_options(&[ns("zeta"), ns("alpha"), ns("mid")]);
        assert_eq!(set.options, vec!["alpha", "mid", "zeta"]);
        assert!(set.options.windows(2).all(|w| w[0] <= w[1]));
        assert!(!set.disabled);
    }

    #[test]
    fn test_flagged_default_wins_regardless_of_position() {
        let set = build_namespace_options(&[ns("b"), ns("c"), ns("a").as_default()]);
        assert_eq!(set.default.as_deref(), Some("a"));

        let set = build_namespace_options(&[ns("b").as_default(), ns("c"), ns("a")]);
        assert_eq!(set.default.as_deref(), Some("b"));
    }

    #[test]
    fn test_first_flagged_default_is_kept() {
        let set = build_namespace_options(&[ns("x"), ns("y").as_default(), ns("z").as_default()]);
        assert_eq!(set.default.as_deref(), Some("y"));
    }

    #[test]
    fn test_unflagged_default_is_first_in_input_order() {
        let set = build_namespace_options(&[ns("zeta"), ns("alpha")]);
        // first in input, not first after sorting
        assert_eq!(set.default.as_deref(), Some("zeta"));
        assert_eq!(set.options[0], "alpha");
        assert!(set.contains("zeta"));
    }

    #[test]
    fn test_default_uses_display_name() {
        let set = build_namespace_options(&[
            ns("user-che").with_display_name("My Namespace").as_default(),
            ns("other"),
        ]);
        assert_eq!(set.default.as_deref(), Some("My Namespace"));
        assert_eq!(set.options, vec!["My Namespace", "other"]);
    }

    #[test]
    fn test_empty_namespaces() {
        let set = build_namespace_options(&[]);
        assert!(set.is_empty());
        assert!(!set.disabled);
        assert_eq!(set.default, None);
    }

    #[test]
    fn test_single_namespace_disables_selector() {
        let set = build_namespace_options(&[ns("only")]);
        assert!(set.disabled);
        assert_eq!(set.default.as_deref(), Some("only"));
    }

    #[test]
    fn test_duplicate_labels_are_kept() {
        let set = build_namespace_options(&[ns("a"), ns("dup").with_display_name("a")]);
        assert_eq!(set.options, vec!["a", "a"]);
        assert!(!set.disabled);
    }

    #[test]
    fn test_devfile_options_keep_order_without_default() {
        let devfiles = [
            DevfileTemplateInfo::new("Python"),
            DevfileTemplateInfo::new("Go"),
            DevfileTemplateInfo::new("Apache Camel"),
        ];
        let set = build_devfile_options(&devfiles);
        assert_eq!(set.options, vec!["Python", "Go", "Apache Camel"]);
        assert_eq!(set.default, None);
        assert!(!set.disabled);
    }

    #[test]
    fn test_single_devfile_is_not_disabled() {
        let set = build_devfile_options(&[DevfileTemplateInfo::new("Only")]);
        assert_eq!(set.len(), 1);
        assert!(!set.disabled);
    }
}
