//! Client-side configuration.
//!
//! Reads `~/.foamdesk/config.toml`:
//!
//! ```toml
//! [openfoam]
//! use_wsl = false
//! openfoam_bashrc = "/usr/lib/openfoam/openfoam2306/etc/bashrc"
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use foamdesk_case::FoamEnv;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// How OpenFOAM commands are run.
    #[serde(default)]
    pub openfoam: FoamEnv,
}

impl ClientConfig {
    /// Default config file path: ~/.foamdesk/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Settings at `path`. A missing file means all defaults; a file that
    /// exists but cannot be read or parsed is an error naming it.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()));
            }
        };
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Write the settings to `path`, creating its directory.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}

/// `~/.foamdesk`, falling back to `%USERPROFILE%` on Windows hosts and to
/// the working directory when neither is set.
fn dirs_path() -> PathBuf {
    ["HOME", "USERPROFILE"]
        .into_iter()
        .find_map(std::env::var_os)
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(".foamdesk")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.openfoam, FoamEnv::default());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            [openfoam]
            use_wsl = false
            openfoam_version = "2306"
            "#,
        )
        .unwrap();
        assert!(!config.openfoam.use_wsl);
        assert_eq!(config.openfoam.openfoam_version, "2306");
        assert_eq!(config.openfoam.openfoam_bashrc, "/opt/openfoam12/etc/bashrc");
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");
        let mut config = ClientConfig::default();
        config.openfoam.wsl_distro = "Ubuntu".into();
        config.save(&path).unwrap();

        let back = ClientConfig::load(&path).unwrap();
        assert_eq!(back.openfoam.wsl_distro, "Ubuntu");
    }

    #[test]
    fn malformed_file_names_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[openfoam\nuse_wsl = maybe\n").unwrap();

        let err = ClientConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains(&path.display().to_string()), "{err}");
    }
}
