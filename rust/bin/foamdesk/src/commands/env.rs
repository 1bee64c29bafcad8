//! Environment settings command.

use std::path::Path;

use anyhow::Result;

use crate::config::ClientConfig;

/// Apply any given overrides, save if something changed, and print the result.
pub fn update(
    config_path: &Path,
    wsl: Option<bool>,
    distro: Option<String>,
    bashrc: Option<String>,
) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;
    let changed = wsl.is_some() || distro.is_some() || bashrc.is_some();

    if let Some(wsl) = wsl {
        config.openfoam.use_wsl = wsl;
    }
    if let Some(distro) = distro {
        config.openfoam.wsl_distro = distro;
    }
    if let Some(bashrc) = bashrc {
        config.openfoam.openfoam_bashrc = bashrc;
    }

    if changed {
        config.save(config_path)?;
        println!("Saved {}", config_path.display());
    }

    let env = &config.openfoam;
    println!("  use_wsl:  {}", env.use_wsl);
    println!(
        "  distro:   {}",
        if env.wsl_distro.is_empty() { "(default)" } else { env.wsl_distro.as_str() }
    );
    println!("  version:  {}", env.openfoam_version);
    println!("  bashrc:   {}", env.openfoam_bashrc);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_are_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        update(&path, Some(false), None, Some("/opt/of/bashrc".into())).unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert!(!config.openfoam.use_wsl);
        assert_eq!(config.openfoam.openfoam_bashrc, "/opt/of/bashrc");
        assert!(config.openfoam.wsl_distro.is_empty());
    }

    #[test]
    fn showing_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        update(&path, None, None, None).unwrap();
        assert!(!path.exists());
    }
}
