//! Arguments for each Leiningen plugin command
//!
//! Every field is optional; `None` means the flag or argument is left off the
//! command line entirely.

use std::fmt;

use serde::{Deserialize, Serialize};

use lein_tasks_core::types::Environment;

/// Whether a formatter only reports problems or rewrites files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatMode {
    /// Report files that are not formatted
    #[default]
    Check,
    /// Rewrite files in place
    Fix,
}

impl FormatMode {
    /// The subcommand argument for this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Fix => "fix",
        }
    }

    /// `Fix` when `fix` is set, `Check` otherwise
    pub fn from_fix(fix: bool) -> Self {
        if fix {
            Self::Fix
        } else {
            Self::Check
        }
    }
}

impl fmt::Display for FormatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `lein eastwood`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EastwoodArgs {
    /// Eastwood options map, passed verbatim
    pub config: Option<String>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

/// `lein check`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckArgs {
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

/// `lein kibit`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KibitArgs {
    pub replace: Option<bool>,
    pub interactive: Option<bool>,
    pub reporter: Option<String>,
    pub paths: Option<Vec<String>>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

/// `lein cljfmt`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CljfmtArgs {
    pub mode: Option<FormatMode>,
    pub paths: Option<Vec<String>>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

/// `lein bikeshed`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BikeshedArgs {
    pub show_help: Option<bool>,
    pub verbose: Option<bool>,
    pub maximum_line_length: Option<u32>,
    pub long_lines: Option<bool>,
    pub trailing_whitespace: Option<bool>,
    pub trailing_blank_lines: Option<bool>,
    pub var_redefs: Option<bool>,
    pub docstrings: Option<bool>,
    pub name_collisions: Option<bool>,
    pub exclude_profiles: Option<Vec<String>>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

/// `lein cljstyle`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CljstyleArgs {
    pub mode: Option<FormatMode>,
    pub paths: Option<Vec<String>>,
}

/// `lein uberjar`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UberjarArgs {
    pub main_namespace: Option<String>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

/// `lein release`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseArgs {
    /// Version component to bump (e.g., ":minor")
    pub level: Option<String>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

/// `lein run`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    pub main_function: Option<String>,
    pub arguments: Option<Vec<String>>,
    /// Wrap each argument in double quotes
    pub quote_arguments: Option<bool>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

/// `lein eftest`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EftestArgs {
    pub only: Option<String>,
    pub test_selectors: Option<Vec<String>>,
    pub namespaces: Option<Vec<String>>,
    pub files: Option<Vec<String>>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mode_from_fix() {
        assert_eq!(FormatMode::from_fix(true), FormatMode::Fix);
        assert_eq!(FormatMode::from_fix(false), FormatMode::Check);
        assert_eq!(FormatMode::default(), FormatMode::Check);
    }

    #[test]
    fn test_format_mode_serde() {
        let mode: FormatMode = serde_json::from_str("\"fix\"").unwrap();
        assert_eq!(mode, FormatMode::Fix);
        assert_eq!(serde_json::to_string(&FormatMode::Check).unwrap(), "\"check\"");
        assert!(serde_json::from_str::<FormatMode>("\"reformat\"").is_err());
    }
}
