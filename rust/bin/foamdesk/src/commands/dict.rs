//! Dictionary commands: show, get, set, unset.

use std::path::Path;

use anyhow::{Result, bail};
use foamdesk_case::CaseDirectory;
use foamdesk_dict::Entry;

/// Print a whole dictionary as OpenFOAM text or JSON.
pub fn show(case_dir: &Path, file: &str, output: &str) -> Result<()> {
    let mut case = CaseDirectory::open(case_dir)?;
    let doc = case.get_dictionary(file)?;
    match output {
        "text" => println!("{}", doc.to_body_string()),
        "json" => println!("{}", serde_json::to_string_pretty(&*doc)?),
        other => bail!("unsupported output format: {}", other),
    }
    Ok(())
}

/// Print one entry. Sub-dictionaries print as OpenFOAM text.
pub fn get(case_dir: &Path, file: &str, key: &str) -> Result<()> {
    let mut case = CaseDirectory::open(case_dir)?;
    let doc = case.get_dictionary(file)?;
    match doc.lookup(key) {
        Some(entry) => println!("{}", entry),
        None => bail!("'{}' is not set in {}", key, file),
    }
    Ok(())
}

/// Assign a scalar and persist.
pub fn set(case_dir: &Path, file: &str, key: &str, value: &str) -> Result<()> {
    let mut case = CaseDirectory::open(case_dir)?;
    let previous = case.get_dictionary(file)?.set_path(key, value);
    case.save_dictionary(file)?;

    match previous {
        Some(Entry::Scalar(old)) => println!("{}: {} -> {}", key, old, value),
        Some(Entry::Dict(_)) => println!("{}: (dictionary) -> {}", key, value),
        None => println!("{}: {}", key, value),
    }
    Ok(())
}

/// Remove an entry and persist.
pub fn unset(case_dir: &Path, file: &str, key: &str) -> Result<()> {
    let mut case = CaseDirectory::open(case_dir)?;
    if case.get_dictionary(file)?.remove_path(key).is_none() {
        bail!("'{}' is not set in {}", key, file);
    }
    case.save_dictionary(file)?;
    println!("{}: removed", key);
    Ok(())
}
