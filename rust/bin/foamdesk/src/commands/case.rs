//! Case-level commands.

use std::path::Path;

use anyhow::Result;
use foamdesk_case::CaseDirectory;

use crate::config::ClientConfig;

/// Materialize the case skeleton.
pub fn create(case_dir: &Path) -> Result<()> {
    let mut case = CaseDirectory::open(case_dir)?;
    case.create()?;

    println!("Case created at {}", case.root().display());
    for file in ["controlDict", "fvSchemes", "fvSolution"] {
        println!("  {}", case.system_dir().join(file).display());
    }
    Ok(())
}

/// List time directories, oldest first.
pub fn times(case_dir: &Path) -> Result<()> {
    let mut case = CaseDirectory::open(case_dir)?;
    for time in case.refresh_time_dirs()? {
        println!("{}", time);
    }
    Ok(())
}

/// Print the environment-wrapped solver invocation for the case.
pub fn solver(case_dir: &Path, config: &ClientConfig) -> Result<()> {
    let mut case = CaseDirectory::open(case_dir)?;
    let application = case.application()?;
    let argv = config.openfoam.solver_command(&application, case.root());
    println!("{}", argv.join(" "));
    Ok(())
}
