//! Rule Settings
//!
//! Raw settings as read from configuration files, and the validated,
//! immutable [`RuleConfig`] the engine runs with.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

use crate::rule::category::Category;

pub const DEFAULT_REQUIRED_ORDER: [Category; 13] = [
    Category::Module,
    Category::Include,
    Category::Enum,
    Category::Constant,
    Category::Association,
    Category::Validation,
    Category::Scope,
    Category::Attribute,
    Category::Callback,
    Category::Misc,
    Category::Constructor,
    Category::ClassMethod,
    Category::InstanceMethod,
];

pub const DEFAULT_REQUIRED_COMMENTS: [(Category, &str); 9] = [
    (Category::Association, "# Relationships"),
    (Category::Attribute, "# Attributes"),
    (Category::Callback, "# Callbacks"),
    (Category::Constant, "# Constants"),
    (Category::Enum, "# Enums"),
    (Category::Include, "# Includes"),
    (Category::Module, "# Modules"),
    (Category::Scope, "# Scopes"),
    (Category::Validation, "# Validations"),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown 'required_order' model element: {0}")]
    UnknownOrderElement(String),
    #[error("Unknown 'required_comments' model element: {0}")]
    UnknownCommentElement(String),
}

/// Settings as written in a configuration file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RuleSettings {
    pub required_order: Option<Vec<String>>,
    pub required_comments: Option<BTreeMap<String, String>>,
    pub misc_method_names: Option<Vec<String>>,
}

impl RuleSettings {
    /// Layer `overrides` on top of `self`, key by key
    pub fn merge(self, overrides: RuleSettings) -> RuleSettings {
        RuleSettings {
            required_order: overrides.required_order.or(self.required_order),
            required_comments: overrides.required_comments.or(self.required_comments),
            misc_method_names: overrides.misc_method_names.or(self.misc_method_names),
        }
    }
}

/// Validated rule configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RuleConfig {
    required_order: Vec<Category>,
    required_comments: BTreeMap<Category, String>,
    misc_method_names: HashSet<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_REQUIRED_ORDER,
            DEFAULT_REQUIRED_COMMENTS
                .iter()
                .map(|&(category, text)| (category, text.to_string())),
            Vec::<String>::new(),
        )
    }
}

impl RuleConfig {
    pub fn new<S: Into<String>>(
        required_order: impl IntoIterator<Item = Category>,
        required_comments: impl IntoIterator<Item = (Category, String)>,
        misc_method_names: impl IntoIterator<Item = S>,
    ) -> Self {
        let mut order = Vec::new();
        for category in required_order {
            if order.contains(&category) {
                log::warn!("'required_order' lists '{category}' more than once, keeping the first");
                continue;
            }
            order.push(category);
        }

        Self {
            required_order: order,
            required_comments: required_comments.into_iter().collect(),
            misc_method_names: misc_method_names
                .into_iter()
                .map(|name| {
                    let name: String = name.into();
                    name.trim_start_matches(':').to_string()
                })
                .collect(),
        }
    }

    /// Validate raw settings; missing keys fall back to the defaults
    pub fn from_settings(settings: &RuleSettings) -> Result<Self, ConfigError> {
        let defaults = RuleConfig::default();

        let required_order = match &settings.required_order {
            Some(names) => names
                .iter()
                .map(|name| {
                    name.parse::<Category>()
                        .map_err(|_| ConfigError::UnknownOrderElement(name.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => defaults.required_order,
        };

        let required_comments = match &settings.required_comments {
            Some(comments) => comments
                .iter()
                .map(|(name, text)| {
                    name.parse::<Category>()
                        .map(|category| (category, text.clone()))
                        .map_err(|_| ConfigError::UnknownCommentElement(name.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => defaults.required_comments.into_iter().collect(),
        };

        let misc_method_names = settings.misc_method_names.clone().unwrap_or_default();

        Ok(Self::new(required_order, required_comments, misc_method_names))
    }

    pub fn required_order(&self) -> &[Category] {
        &self.required_order
    }

    /// Position of `category` in the required order
    pub fn order_index(&self, category: Category) -> Option<usize> {
        self.required_order.iter().position(|&c| c == category)
    }

    pub fn required_comment(&self, category: Category) -> Option<&str> {
        self.required_comments.get(&category).map(String::as_str)
    }

    pub fn is_misc_method(&self, name: &str) -> bool {
        self.misc_method_names.contains(name)
    }

    pub fn misc_method_names(&self) -> &HashSet<String> {
        &self.misc_method_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RuleConfig::default();
        assert_eq!(config.required_order(), &DEFAULT_REQUIRED_ORDER);
        assert_eq!(
            config.required_comment(Category::Association),
            Some("# Relationships")
        );
        assert_eq!(config.required_comment(Category::InstanceMethod), None);
        assert!(!config.is_misc_method("serialize"));
    }

    #[test]
    fn test_from_settings_overrides_per_key() {
        let settings = RuleSettings {
            required_order: Some(vec!["association".to_string(), "scope".to_string()]),
            required_comments: None,
            misc_method_names: Some(vec![":serialize".to_string()]),
        };

        let config = RuleConfig::from_settings(&settings).expect("valid settings");
        assert_eq!(
            config.required_order(),
            &[Category::Association, Category::Scope]
        );
        assert_eq!(config.required_comment(Category::Scope), Some("# Scopes"));
        assert!(config.is_misc_method("serialize"));
    }

    #[test]
    fn test_unknown_order_element_is_fatal() {
        let settings = RuleSettings {
            required_order: Some(vec!["association".to_string(), "widgets".to_string()]),
            ..Default::default()
        };

        let err = RuleConfig::from_settings(&settings).unwrap_err();
        assert_eq!(err, ConfigError::UnknownOrderElement("widgets".to_string()));
        assert_eq!(
            err.to_string(),
            "Unknown 'required_order' model element: widgets"
        );
    }

    #[test]
    fn test_unknown_comment_element_is_fatal() {
        let mut comments = BTreeMap::new();
        comments.insert("relationships".to_string(), "# Relationships".to_string());
        let settings = RuleSettings {
            required_comments: Some(comments),
            ..Default::default()
        };

        assert_eq!(
            RuleConfig::from_settings(&settings),
            Err(ConfigError::UnknownCommentElement(
                "relationships".to_string()
            ))
        );
    }

    #[test]
    fn test_duplicate_order_entries_collapse() {
        let config = RuleConfig::new(
            [Category::Scope, Category::Association, Category::Scope],
            Vec::new(),
            Vec::<String>::new(),
        );
        assert_eq!(
            config.required_order(),
            &[Category::Scope, Category::Association]
        );
        assert_eq!(config.order_index(Category::Association), Some(1));
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let base = RuleSettings {
            misc_method_names: Some(vec!["serialize".to_string()]),
            required_order: Some(vec!["scope".to_string()]),
            ..Default::default()
        };
        let overrides = RuleSettings {
            required_order: Some(vec!["association".to_string()]),
            ..Default::default()
        };

        let merged = base.merge(overrides);
        assert_eq!(merged.required_order, Some(vec!["association".to_string()]));
        assert_eq!(merged.misc_method_names, Some(vec!["serialize".to_string()]));
    }
}
