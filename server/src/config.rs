use std::path::PathBuf;

use anyhow::{Context, Result};
use products_hr::{EmployeeStore, demo_roster, roster::load_roster};
use tracing::info;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub roster_path: Option<PathBuf>,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    /// `roster_path` comes from `--roster` / `ROSTER_PATH` on the command line.
    pub fn load(roster_path: Option<PathBuf>) -> Result<Self> {
        let cors_allowed_origins = parse_origins(
            &std::env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        Ok(Self {
            roster_path,
            cors_allowed_origins,
        })
    }

    /// Build the store once: from the fixture file when configured, else the demo seed.
    pub fn build_store(&self) -> Result<EmployeeStore> {
        let roster = match &self.roster_path {
            Some(path) => load_roster(path)
                .with_context(|| format!("loading roster from {}", path.display()))?,
            None => {
                info!("no roster fixture configured; using demo roster");
                demo_roster()
            }
        };
        Ok(EmployeeStore::new(roster))
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect::<Vec<_>>()
}
