//! Model element categories

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Kind of declaration a model class body is organised by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Module,
    Include,
    Enum,
    Constant,
    Association,
    Validation,
    Scope,
    Attribute,
    Callback,
    Misc,
    Constructor,
    ClassMethod,
    InstanceMethod,
}

impl Category {
    pub const ALL: [Category; 13] = [
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

    /// Name used in configuration files and messages
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Module => "module",
            Category::Include => "include",
            Category::Enum => "enum",
            Category::Constant => "constant",
            Category::Association => "association",
            Category::Validation => "validation",
            Category::Scope => "scope",
            Category::Attribute => "attribute",
            Category::Callback => "callback",
            Category::Misc => "misc",
            Category::Constructor => "constructor",
            Category::ClassMethod => "class_method",
            Category::InstanceMethod => "instance_method",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches(':');
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
