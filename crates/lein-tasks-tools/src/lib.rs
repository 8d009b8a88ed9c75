//! lein-tasks tools - vendored dependency installation
//!
//! Registers a `clean` / `download` / `install` / `ensure` task family for a
//! single-file dependency, with a pluggable check for whether the installed
//! copy is usable.

pub mod dependency;
pub mod fetch;

pub use dependency::{
    ArtifactType, DependencyInstaller, DependencyLayout, DependencyOptions, DependencyTaskSet,
    DependencyTasks, VERSION_PLACEHOLDER,
};
pub use fetch::{BinaryMissing, Downloader, HttpDownloader, NeedsFetch};
