//! Shared context for running CLI commands.

use std::{
    env, fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use offsets_config::Config;
use offsets_table::{Analyzer, Table};
use tracing::debug;

/// Column names of the table built from input files.
pub const FILE_COLUMNS: [&str; 2] = ["path", "body"];

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Builds the analyzer described by the loaded configuration.
    pub fn analyzer(&self) -> Result<Analyzer, ExitCode> {
        Analyzer::from_config(&self.config).map_err(|e| {
            eprintln!("error: invalid analyzer configuration: {e}");
            ExitCode::FAILURE
        })
    }

    /// Reads `files` into a table with a `path` and a `body` column, one row per file.
    pub fn file_table(&self, files: &[PathBuf]) -> Result<Table, ExitCode> {
        let columns = FILE_COLUMNS.iter().map(|c| c.to_string()).collect();
        let mut table = Table::new(columns, self.analyzer()?).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;

        for path in files {
            let body = fs::read_to_string(path).map_err(|e| {
                eprintln!("error: failed to read {}: {e}", path.display());
                ExitCode::FAILURE
            })?;
            table
                .insert(vec![path.display().to_string(), body])
                .map_err(|e| {
                    eprintln!("error: {e}");
                    ExitCode::FAILURE
                })?;
        }
        debug!(rows = table.len(), "loaded files");
        Ok(table)
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
