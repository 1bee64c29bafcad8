//! OpenFOAM execution environment.
//!
//! OpenFOAM tools only run after its `bashrc` has been sourced, and on
//! Windows they live inside WSL. `FoamEnv` turns a tool invocation into the
//! argv an external process runner should execute; nothing is spawned here.

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoamEnv {
    /// Run through `wsl` instead of a native shell.
    pub use_wsl: bool,

    /// WSL distribution; empty selects the default one.
    pub wsl_distro: String,

    pub openfoam_version: String,

    /// Script sourced before every command.
    pub openfoam_bashrc: String,
}

impl Default for FoamEnv {
    fn default() -> Self {
        Self {
            use_wsl: true,
            wsl_distro: String::new(),
            openfoam_version: "12".into(),
            openfoam_bashrc: "/opt/openfoam12/etc/bashrc".into(),
        }
    }
}

impl FoamEnv {
    /// Argv running `command` in a shell with OpenFOAM sourced.
    pub fn shell_command(&self, command: &str) -> Vec<String> {
        let script = format!("source {} && {}", shell_quote(&self.openfoam_bashrc), command);
        let mut argv = Vec::new();
        if self.use_wsl {
            argv.push("wsl".to_string());
            if !self.wsl_distro.is_empty() {
                argv.push("-d".to_string());
                argv.push(self.wsl_distro.clone());
            }
        }
        argv.extend(["bash".to_string(), "-c".to_string(), script]);
        argv
    }

    /// Argv running `application` on the case at `case_root`.
    pub fn solver_command(&self, application: &str, case_root: &Path) -> Vec<String> {
        let root = case_root.to_string_lossy();
        self.shell_command(&format!(
            "{} -case {}",
            shell_quote(application),
            shell_quote(&root)
        ))
    }
}

/// Single-quote `word` for bash unless it is made of safe characters only.
fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+:=,".contains(c));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
