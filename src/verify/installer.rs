//! Upgrade installation through the npm client

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::manifest::types::DependencyKind;
use crate::version::error::InstallError;
use crate::version::registries::npm_cli::npm_command;

/// Installs a batch of `name@version` tokens
#[async_trait::async_trait]
pub trait Installer: Send + Sync {
    /// Install space-separated `package_ids` into the given dependency group,
    /// returning the installer's textual output
    async fn install(
        &self,
        kind: DependencyKind,
        package_ids: &str,
    ) -> Result<String, InstallError>;
}

/// Runs `npm i` (or `npm i -D`) in the project directory
#[derive(Debug, Clone)]
pub struct NpmInstaller {
    dir: PathBuf,
}

impl NpmInstaller {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    fn install_args(kind: DependencyKind, package_ids: &str) -> Vec<&str> {
        let mut args = vec!["i"];
        if kind == DependencyKind::Dev {
            args.push("-D");
        }
        args.extend(package_ids.split_whitespace());
        args
    }
}

#[async_trait::async_trait]
impl Installer for NpmInstaller {
    async fn install(
        &self,
        kind: DependencyKind,
        package_ids: &str,
    ) -> Result<String, InstallError> {
        let args = Self::install_args(kind, package_ids);
        let command = format!("npm {}", args.join(" "));
        debug!("Running `{}` in {}", command, self.dir.display());

        let output = npm_command()
            .args(&args)
            .current_dir(&self.dir)
            .output()
            .await
            .map_err(|source| InstallError::Spawn { kind, source })?;

        if !output.status.success() {
            return Err(InstallError::Failed {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!("Installed {} dependencies: {}", kind, package_ids);
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
