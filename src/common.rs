use std::{
    env,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};
use log::{debug, info};

pub const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");
pub const PROJECT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable to override the config directory.
///
/// Lets an installer image ship its settings next to the installer itself,
/// and lets tests point the config at a scratch directory.
///
/// Example:
///   export INSTALLER_DIALOG_CONFIG_DIR="/run/installer/dialog"
pub const ENV_CONFIG_DIR_OVERRIDE: &str = "INSTALLER_DIALOG_CONFIG_DIR";

pub fn print_header() {
    println!("{PROJECT_NAME} {PROJECT_VERSION}");
}

/// Returns the project data directory (log files), creating it if needed.
///
/// Returns: Path to `~/.local/share/installer-dialog` (or equivalent)
pub fn project_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow!("Unable to determine data directory. Ensure XDG_DATA_HOME or HOME environment variable is set")
    })?;

    let project_data_dir = data_dir.join(PROJECT_NAME);
    create_secure_directory(&project_data_dir)?;

    Ok(project_data_dir)
}

/// Returns the project config directory, creating it if needed.
///
/// Honors `INSTALLER_DIALOG_CONFIG_DIR` when set, otherwise
/// `dirs::config_dir()/installer-dialog`.
pub fn project_config_dir() -> Result<PathBuf> {
    let dir = match env::var(ENV_CONFIG_DIR_OVERRIDE) {
        Ok(override_dir) => {
            let path = validate_override_dir(&override_dir)?;
            info!(
                "Using config directory override from {ENV_CONFIG_DIR_OVERRIDE}: {}",
                path.display()
            );
            path
        }
        Err(_) => {
            let config_dir = dirs::config_dir().ok_or_else(|| {
                anyhow!("Unable to determine config directory. Ensure XDG_CONFIG_HOME or HOME environment variable is set")
            })?;
            config_dir.join(PROJECT_NAME)
        }
    };

    create_secure_directory(&dir)?;

    Ok(dir)
}

/// Rejects relative override paths and paths containing `..`.
pub(crate) fn validate_override_dir(value: &str) -> Result<PathBuf> {
    let path = PathBuf::from(value);

    if !path.is_absolute() {
        bail!("{ENV_CONFIG_DIR_OVERRIDE} must be an absolute path: {value}");
    }

    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        bail!("{ENV_CONFIG_DIR_OVERRIDE} contains parent directory references: {value}");
    }

    Ok(path)
}

/// Creates a directory readable only by its owner (0700 on Unix).
///
/// Existing directories get their permissions corrected.
#[cfg(unix)]
fn create_secure_directory(dir: &Path) -> Result<()> {
    use std::fs::{self, DirBuilder};
    use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

    debug!("Creating secure directory: {}", dir.display());

    DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(dir)
        .with_context(|| format!("Unable to create directory: {}", dir.display()))?;

    fs::set_permissions(dir, fs::Permissions::from_mode(0o700))
        .with_context(|| format!("Unable to set permissions on directory: {}", dir.display()))?;

    Ok(())
}

#[cfg(not(unix))]
fn create_secure_directory(dir: &Path) -> Result<()> {
    debug!("Creating directory: {}", dir.display());
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Unable to create directory: {}", dir.display()))?;
    Ok(())
}
