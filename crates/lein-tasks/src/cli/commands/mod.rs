//! CLI commands

mod completions;
mod init;
mod list;
mod plan;
mod run;

pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use plan::PlanCommand;
pub use run::RunCommand;
