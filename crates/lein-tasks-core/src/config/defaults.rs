//! Default build file names

/// Default build file name (TOML)
pub const DEFAULT_BUILD_FILE_TOML: &str = "lein-tasks.toml";

/// Default build file name (YAML)
pub const DEFAULT_BUILD_FILE_YAML: &str = "lein-tasks.yaml";

/// Get list of build file names to search for, in order of preference
pub fn build_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_BUILD_FILE_TOML,
        DEFAULT_BUILD_FILE_YAML,
        "lein-tasks.yml",
        ".lein-tasks.toml",
    ]
}

/// Starter build file written by `lein-tasks init`-style tooling and used in docs
pub const DEFAULT_BUILD_FILE_TEMPLATE: &str = r#"# lein-tasks build file

[installation]
version = "2.9.1"

[[task_sets]]
namespace = "library"
kind = "checks"

[[tasks]]
namespace = "library"
kind = "test"
[tasks.options]
type = "unit"
"#;
