//! Task family that vendors a single-file dependency into the project

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, instrument};
use url::Url;

use lein_tasks_core::error::{ConfigError, ExecutionError, Result};
use lein_tasks_graph::{action, TaskGraph, TaskRegistration};

use crate::fetch::{BinaryMissing, Downloader, HttpDownloader, NeedsFetch};

/// Placeholder replaced with the dependency version in templates
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// How a downloaded distribution becomes an installed binary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArtifactType {
    /// The download is the binary itself
    #[default]
    Uncompressed,
}

/// Where a dependency lives on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyLayout {
    /// Root install directory
    pub path: PathBuf,
    /// Directory under `path` the binary is installed into
    pub binary_directory: String,
    /// File name of the downloaded distribution and installed binary
    pub file_name: String,
    /// Version being installed
    pub version: String,
    pub artifact_type: ArtifactType,
}

impl DependencyLayout {
    /// Where downloads are written
    pub fn dist_directory(&self) -> PathBuf {
        self.path.join("dist")
    }

    /// The downloaded distribution file
    pub fn dist_path(&self) -> PathBuf {
        self.dist_directory().join(&self.file_name)
    }

    /// The installed binary
    pub fn binary_path(&self) -> PathBuf {
        self.path.join(&self.binary_directory).join(&self.file_name)
    }
}

/// Options for [`DependencyTaskSet::define`]
#[derive(Clone)]
pub struct DependencyOptions {
    /// Namespace the tasks are registered under
    pub namespace: String,
    /// Human-readable dependency name (e.g., "lein")
    pub dependency: String,
    pub version: String,
    /// Root install directory
    pub path: PathBuf,
    pub artifact_type: ArtifactType,
    /// Download URI, with `{version}` substituted
    pub uri_template: String,
    /// Distribution file name, with `{version}` substituted
    pub file_name_template: String,
    pub binary_directory: String,
    pub needs_fetch: Arc<dyn NeedsFetch>,
    pub downloader: Arc<dyn Downloader>,
}

impl DependencyOptions {
    /// Options with the given identity and the default predicate and downloader
    pub fn new(
        namespace: impl Into<String>,
        dependency: impl Into<String>,
        version: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        let dependency = dependency.into();
        Self {
            namespace: namespace.into(),
            file_name_template: dependency.clone(),
            dependency,
            version: version.into(),
            path: path.into(),
            artifact_type: ArtifactType::default(),
            uri_template: String::new(),
            binary_directory: "bin".to_string(),
            needs_fetch: Arc::new(BinaryMissing),
            downloader: Arc::new(HttpDownloader),
        }
    }

    pub fn with_uri_template(mut self, template: impl Into<String>) -> Self {
        self.uri_template = template.into();
        self
    }

    pub fn with_file_name_template(mut self, template: impl Into<String>) -> Self {
        self.file_name_template = template.into();
        self
    }

    pub fn with_artifact_type(mut self, artifact_type: ArtifactType) -> Self {
        self.artifact_type = artifact_type;
        self
    }

    pub fn with_needs_fetch(mut self, needs_fetch: Arc<dyn NeedsFetch>) -> Self {
        self.needs_fetch = needs_fetch;
        self
    }

    pub fn with_downloader(mut self, downloader: Arc<dyn Downloader>) -> Self {
        self.downloader = downloader;
        self
    }
}

impl fmt::Debug for DependencyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyOptions")
            .field("namespace", &self.namespace)
            .field("dependency", &self.dependency)
            .field("version", &self.version)
            .field("path", &self.path)
            .field("artifact_type", &self.artifact_type)
            .field("uri_template", &self.uri_template)
            .field("file_name_template", &self.file_name_template)
            .field("binary_directory", &self.binary_directory)
            .finish()
    }
}

fn render(template: &str, version: &str) -> String {
    template.replace(VERSION_PLACEHOLDER, version)
}

/// Frozen installer behind the `clean`, `download`, `install` and `ensure` tasks
pub struct DependencyInstaller {
    dependency: String,
    uri: Url,
    layout: DependencyLayout,
    needs_fetch: Arc<dyn NeedsFetch>,
    downloader: Arc<dyn Downloader>,
}

impl DependencyInstaller {
    /// Resolve templates and validate the download URI
    pub fn new(options: &DependencyOptions) -> Result<Self> {
        let rendered = render(&options.uri_template, &options.version);
        let uri = Url::parse(&rendered).map_err(|e| ConfigError::InvalidValue {
            field: "uri_template".to_string(),
            message: format!("'{}' is not a valid URI: {}", rendered, e),
        })?;

        Ok(Self {
            dependency: options.dependency.clone(),
            uri,
            layout: DependencyLayout {
                path: options.path.clone(),
                binary_directory: options.binary_directory.clone(),
                file_name: render(&options.file_name_template, &options.version),
                version: options.version.clone(),
                artifact_type: options.artifact_type,
            },
            needs_fetch: options.needs_fetch.clone(),
            downloader: options.downloader.clone(),
        })
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn layout(&self) -> &DependencyLayout {
        &self.layout
    }

    /// Remove the install directory
    pub fn clean(&self) -> Result<()> {
        if self.layout.path.exists() {
            info!(dependency = %self.dependency, path = %self.layout.path.display(), "cleaning");
            fs::remove_dir_all(&self.layout.path)?;
        }
        Ok(())
    }

    /// Fetch the distribution into the dist directory
    pub fn download(&self) -> Result<()> {
        fs::create_dir_all(self.layout.dist_directory())?;
        self.downloader.download(&self.uri, &self.layout.dist_path())
    }

    /// Put the downloaded distribution in place as the binary
    pub fn install(&self) -> Result<()> {
        let source = self.layout.dist_path();
        let target = self.layout.binary_path();
        if !source.is_file() {
            return Err(ExecutionError::InstallFailed(format!(
                "{} has not been downloaded to {}",
                self.dependency,
                source.display()
            ))
            .into());
        }

        match self.layout.artifact_type {
            ArtifactType::Uncompressed => {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(&source, &target)?;
                make_executable(&target)?;
            }
        }

        info!(dependency = %self.dependency, binary = %target.display(), "installed");
        Ok(())
    }

    /// Clean, download and install when the predicate reports a fetch is needed
    #[instrument(skip(self), fields(dependency = %self.dependency))]
    pub fn ensure(&self) -> Result<()> {
        if !self.needs_fetch.needs_fetch(&self.layout) {
            debug!(version = %self.layout.version, "already installed");
            return Ok(());
        }

        self.clean()?;
        self.download()?;
        self.install()
    }
}

#[cfg(unix)]
fn make_executable(path: &std::path::Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o755);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn make_executable(_path: &std::path::Path) -> std::io::Result<()> {
    Ok(())
}

/// Names of the registered installer tasks, qualified by namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyTasks {
    pub clean: String,
    pub download: String,
    pub install: String,
    pub ensure: String,
}

/// Registers the installer task family
pub struct DependencyTaskSet;

impl DependencyTaskSet {
    /// Register `clean`, `download`, `install` and `ensure` under `options.namespace`
    pub fn define(
        graph: &mut TaskGraph,
        options: DependencyOptions,
    ) -> Result<(DependencyTasks, Arc<DependencyInstaller>)> {
        let installer = Arc::new(DependencyInstaller::new(&options)?);
        let dependency = options.dependency.clone();

        let tasks = graph.namespace(&options.namespace, |g| {
            let qualify = |name: &str| g.current_scope().qualify(name).to_string();
            let tasks = DependencyTasks {
                clean: qualify("clean"),
                download: qualify("download"),
                install: qualify("install"),
                ensure: qualify("ensure"),
            };

            let clean = installer.clone();
            g.register(
                TaskRegistration::new("clean")
                    .with_description(format!("Clean vendored {}", dependency))
                    .with_action(action(move |_| clean.clean())),
            );

            let download = installer.clone();
            g.register(
                TaskRegistration::new("download")
                    .with_description(format!("Download {} distribution", dependency))
                    .with_action(action(move |_| download.download())),
            );

            let install = installer.clone();
            g.register(
                TaskRegistration::new("install")
                    .with_description(format!("Install {}", dependency))
                    .with_action(action(move |_| install.install())),
            );

            let ensure = installer.clone();
            g.register(
                TaskRegistration::new("ensure")
                    .with_description(format!("Ensure {} present", dependency))
                    .with_action(action(move |_| ensure.ensure())),
            );

            tasks
        });

        Ok((tasks, installer))
    }
}
