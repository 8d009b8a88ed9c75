//! Deciding whether a dependency must be fetched, and fetching it

use std::fs;
use std::path::Path;

use tracing::{debug, info};
use url::Url;

use lein_tasks_core::error::{ExecutionError, Result};

use crate::dependency::DependencyLayout;

/// Decides whether `ensure` needs to (re)install a dependency
pub trait NeedsFetch: Send + Sync {
    /// True when the dependency is absent or unusable
    fn needs_fetch(&self, layout: &DependencyLayout) -> bool;
}

impl<F> NeedsFetch for F
where
    F: Fn(&DependencyLayout) -> bool + Send + Sync,
{
    fn needs_fetch(&self, layout: &DependencyLayout) -> bool {
        self(layout)
    }
}

/// Fetch whenever the installed binary is missing
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryMissing;

impl NeedsFetch for BinaryMissing {
    fn needs_fetch(&self, layout: &DependencyLayout) -> bool {
        !layout.binary_path().is_file()
    }
}

/// Retrieves a distribution into a local file
pub trait Downloader: Send + Sync {
    /// Fetch `uri` and write the body to `destination`
    fn download(&self, uri: &Url, destination: &Path) -> Result<()>;
}

/// Downloads over HTTP(S) with a blocking client
#[derive(Debug, Clone, Default)]
pub struct HttpDownloader;

impl Downloader for HttpDownloader {
    fn download(&self, uri: &Url, destination: &Path) -> Result<()> {
        let failed = |reason: String| ExecutionError::DownloadFailed {
            uri: uri.to_string(),
            reason,
        };

        info!(uri = %uri, destination = %destination.display(), "downloading");
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("lein-tasks/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| failed(e.to_string()))?;

        let response = client
            .get(uri.clone())
            .send()
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("HTTP {}", status)).into());
        }

        let body = response.bytes().map_err(|e| failed(e.to_string()))?;
        debug!(bytes = body.len(), "download complete");
        fs::write(destination, &body)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::ArtifactType;

    fn layout(path: &Path) -> DependencyLayout {
        DependencyLayout {
            path: path.to_path_buf(),
            binary_directory: "bin".to_string(),
            file_name: "lein".to_string(),
            version: "2.9.1".to_string(),
            artifact_type: ArtifactType::Uncompressed,
        }
    }

    #[test]
    fn test_binary_missing() {
        let temp = tempfile::TempDir::new().unwrap();
        let layout = layout(temp.path());
        assert!(BinaryMissing.needs_fetch(&layout));

        fs::create_dir_all(temp.path().join("bin")).unwrap();
        fs::write(temp.path().join("bin/lein"), "#!/bin/sh\n").unwrap();
        assert!(!BinaryMissing.needs_fetch(&layout));
    }

    #[test]
    fn test_closure_predicate() {
        let temp = tempfile::TempDir::new().unwrap();
        let never = |_: &DependencyLayout| false;
        assert!(!never.needs_fetch(&layout(temp.path())));
    }
}
