//! Export and import of the whole schedule.

use std::path::PathBuf;

use super::{open_session, CliResult};

pub fn export(path: PathBuf) -> CliResult {
    let session = open_session()?;
    let json = session.export_json()?;
    if path.as_os_str() == "-" {
        println!("{json}");
    } else {
        std::fs::write(&path, json)?;
        println!("Schedule exported to {}", path.display());
    }
    Ok(())
}

pub fn import(path: PathBuf) -> CliResult {
    let json = std::fs::read_to_string(&path)?;
    let mut session = open_session()?;
    session.import_json(&json)?;
    println!("Schedule imported from {}", path.display());
    Ok(())
}
