//! Roster sources: the bundled demo seed and JSON fixture files.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::Employee;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid roster json: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type RosterResult<T> = Result<T, RosterError>;

/// The seed roster the service starts with when no fixture is supplied.
pub fn demo_roster() -> Vec<Employee> {
    vec![
        Employee::new("Alice", 28, "Engineering", 70000.0),
        Employee::new("Bob", 35, "Marketing", 65000.0),
        Employee::new("Charlie", 40, "Engineering", 85000.0),
        Employee::new("Diana", 32, "Sales", 56000.0),
        Employee::new("Edward", 29, "Marketing", 48000.0),
    ]
}

/// Parse a JSON array of employee objects.
pub fn parse_roster(raw: &str) -> RosterResult<Vec<Employee>> {
    Ok(serde_json::from_str(raw)?)
}

/// Read a roster fixture from disk. The file is only ever read.
pub fn load_roster(path: impl AsRef<Path>) -> RosterResult<Vec<Employee>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| RosterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let roster = parse_roster(&raw)?;
    info!(path = %path.display(), employees = roster.len(), "roster fixture loaded");
    Ok(roster)
}
