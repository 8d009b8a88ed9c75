//! Task kinds
//!
//! Each kind wraps one Leiningen command, except `check`, which only groups
//! the other checks.

use crate::definition::TaskKind;

pub mod build;
pub mod check;
pub mod format;
pub mod idiomise;
pub mod lint;
pub mod optimise;
pub mod pedantise;
pub mod release;
pub mod start;
pub mod style;

pub use build::{BuildOptions, BuildTask};
pub use check::{CheckOptions, CheckTask};
pub use format::{FormatOptions, FormatTask};
pub use idiomise::{IdiomiseOptions, IdiomiseTask};
pub use lint::{LintOptions, LintTask};
pub use optimise::{OptimiseOptions, OptimiseTask};
pub use pedantise::{PedantiseOptions, PedantiseTask};
pub use release::{ReleaseOptions, ReleaseTask};
pub use start::{StartOptions, StartTask};
pub use style::{StyleOptions, StyleTask};
pub use test::{TestOptions, TestTask};

/// Kind names accepted in build files
pub const TASK_KINDS: &[&str] = &[
    LintTask::KIND,
    OptimiseTask::KIND,
    IdiomiseTask::KIND,
    FormatTask::KIND,
    PedantiseTask::KIND,
    StyleTask::KIND,
    BuildTask::KIND,
    ReleaseTask::KIND,
    StartTask::KIND,
    TestTask::KIND,
    CheckTask::KIND,
];
