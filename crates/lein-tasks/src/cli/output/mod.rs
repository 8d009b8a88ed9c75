//! Output formatting utilities

use console::style;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("→").blue(), message);
}

/// Style a task name
pub fn task_name(name: &str) -> String {
    style(name).cyan().to_string()
}

/// Style a description or other secondary text
pub fn dim(text: &str) -> String {
    style(text).dim().to_string()
}
