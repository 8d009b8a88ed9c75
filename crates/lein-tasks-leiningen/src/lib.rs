//! lein-tasks leiningen - command runner for Leiningen plugins
//!
//! Each task kind maps onto one Leiningen plugin command. This crate renders
//! those commands and runs them, either as real child processes ([`LeinCli`])
//! or against an in-memory recorder ([`RecordingLeiningen`]).

pub mod args;
pub mod cli;
pub mod command;
pub mod recording;
pub mod traits;

pub use args::{
    BikeshedArgs, CheckArgs, CljfmtArgs, CljstyleArgs, EastwoodArgs, EftestArgs, FormatMode,
    KibitArgs, ReleaseArgs, RunArgs, UberjarArgs,
};
pub use cli::{LeinCli, LeinConfiguration};
pub use command::{CommandLine, LeinCall};
pub use recording::RecordingLeiningen;
pub use traits::Leiningen;
