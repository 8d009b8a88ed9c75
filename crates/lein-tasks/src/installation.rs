//! Leiningen installation tasks
//!
//! Vendors a pinned `lein` script into the project and hands back the runner
//! configuration pointing at it.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info};

use lein_tasks_core::error::{ConfigError, Result};
use lein_tasks_graph::TaskGraph;
use lein_tasks_leiningen::{LeinCli, LeinConfiguration, Leiningen};
use lein_tasks_tools::{
    ArtifactType, DependencyInstaller, DependencyLayout, DependencyOptions, DependencyTaskSet,
    DependencyTasks, Downloader, HttpDownloader, NeedsFetch,
};

pub const DEFAULT_NAMESPACE: &str = "leiningen";
pub const DEFAULT_VERSION: &str = "2.9.1";
pub const DEPENDENCY: &str = "lein";
pub const URI_TEMPLATE: &str =
    "https://raw.githubusercontent.com/technomancy/leiningen/{version}/bin/lein";
pub const FILE_NAME_TEMPLATE: &str = "lein";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallationOptions {
    pub namespace: Option<String>,
    /// Release tag to fetch; a full or partial version such as `2.9.1` or `2.9`
    pub version: Option<String>,
    /// Install directory; defaults to `vendor/leiningen` under the working directory
    pub path: Option<PathBuf>,
}

/// Accept full or partial versions (`2.9.1`, `2.9`, `2.9.1-SNAPSHOT`) but not
/// ranges or names like `latest`
fn validate_version(version: &str) -> Result<()> {
    let invalid = |message: String| ConfigError::InvalidValue {
        field: "version".to_string(),
        message: format!("'{}' is not a version: {}", version, message),
    };

    if !version.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid("expected it to start with a digit".to_string()).into());
    }
    semver::Comparator::parse(version).map_err(|e| invalid(e.to_string()))?;
    Ok(())
}

/// Reports a fetch is needed unless the installed `lein` reports the pinned version
#[derive(Debug, Clone)]
pub struct LeinVersionCheck {
    version: String,
    pattern: Regex,
}

impl LeinVersionCheck {
    pub fn new(version: &str) -> Result<Self> {
        let pattern = Regex::new(&regex::escape(version)).map_err(|e| {
            ConfigError::InvalidValue {
                field: "version".to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Self {
            version: version.to_string(),
            pattern,
        })
    }

    /// Whether the binary at `binary` is present and reports the pinned version
    pub fn is_installed(&self, binary: &Path) -> bool {
        if !binary.is_file() {
            debug!(binary = %binary.display(), "lein not installed");
            return false;
        }

        let output = match Command::new(binary).arg("-version").output() {
            Ok(output) => output,
            Err(e) => {
                debug!(binary = %binary.display(), error = %e, "cannot run lein");
                return false;
            }
        };
        if !output.status.success() {
            debug!(code = ?output.status.code(), "lein -version failed");
            return false;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let first_line = stdout.lines().next().unwrap_or_default();
        let matches = self.pattern.is_match(first_line);
        debug!(reported = first_line, expected = %self.version, matches, "checked lein version");
        matches
    }
}

impl NeedsFetch for LeinVersionCheck {
    fn needs_fetch(&self, layout: &DependencyLayout) -> bool {
        !self.is_installed(&layout.path.join(&layout.binary_directory).join(DEPENDENCY))
    }
}

/// Handle on the installation tasks defined for one namespace
#[derive(Clone)]
pub struct InstallationTasks {
    pub namespace: String,
    pub version: String,
    pub path: PathBuf,
    pub binary_path: PathBuf,
    pub configuration: LeinConfiguration,
    pub tasks: DependencyTasks,
    installer: Arc<DependencyInstaller>,
}

impl InstallationTasks {
    /// Define `clean`, `download`, `install` and `ensure` for Leiningen
    pub fn define(
        graph: &mut TaskGraph,
        options: InstallationOptions,
        downloader: Arc<dyn Downloader>,
    ) -> Result<Self> {
        let namespace = options
            .namespace
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        let version = options
            .version
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());
        validate_version(&version)?;
        let path = match options.path {
            Some(path) => path,
            None => std::env::current_dir()?.join("vendor").join("leiningen"),
        };
        let binary_path = path.join("bin").join(DEPENDENCY);

        info!(
            namespace = %namespace,
            version = %version,
            path = %path.display(),
            "defining leiningen installation tasks"
        );

        let dependency_options =
            DependencyOptions::new(namespace.as_str(), DEPENDENCY, version.as_str(), path.as_path())
                .with_artifact_type(ArtifactType::Uncompressed)
                .with_uri_template(URI_TEMPLATE)
                .with_file_name_template(FILE_NAME_TEMPLATE)
                .with_needs_fetch(Arc::new(LeinVersionCheck::new(&version)?))
                .with_downloader(downloader);
        let (tasks, installer) = DependencyTaskSet::define(graph, dependency_options)?;

        Ok(Self {
            namespace,
            version,
            configuration: LeinConfiguration::new(binary_path.clone()),
            path,
            binary_path,
            tasks,
            installer,
        })
    }

    /// A runner that uses the installed binary
    pub fn leiningen(&self) -> LeinCli {
        LeinCli::new(self.configuration.clone())
    }

    /// The installed-binary runner, shareable across task definitions
    pub fn runner(&self) -> Arc<dyn Leiningen> {
        Arc::new(self.leiningen())
    }

    pub fn installer(&self) -> &DependencyInstaller {
        &self.installer
    }
}

impl std::fmt::Debug for InstallationTasks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallationTasks")
            .field("namespace", &self.namespace)
            .field("version", &self.version)
            .field("path", &self.path)
            .field("binary_path", &self.binary_path)
            .field("tasks", &self.tasks)
            .finish()
    }
}

/// Define the Leiningen installation tasks, downloading over HTTP
pub fn define_installation_tasks(
    graph: &mut TaskGraph,
    options: InstallationOptions,
) -> Result<InstallationTasks> {
    InstallationTasks::define(graph, options, Arc::new(HttpDownloader))
}
