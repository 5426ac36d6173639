// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the pit command line
//!
//! This module provides the command line options: where the captured test
//! output comes from, how the JSON is written, and logging verbosity.

use std::path::{Path, PathBuf};

use clap::Parser;

/// pit - structured results from captured `go test -v -cover` output
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "pit")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// File holding the captured test output
    ///
    /// Reads standard input when omitted or set to `-`. The output of one
    /// `go test` invocation may cover any number of packages.
    #[arg(short, long, env = "PIT_INPUT")]
    pub input: Option<PathBuf>,

    /// Indent the JSON written to stdout
    #[arg(long, default_value = "false")]
    pub pretty: bool,

    /// Exit with status 1 when any package failed
    #[arg(long, default_value = "false")]
    pub exit_code: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so stdout stays valid JSON.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Get the input file, or `None` for standard input
    #[must_use]
    pub fn input_path(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|path| *path != Path::new("-"))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an input file is given but doesn't exist or isn't
    /// a regular file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(input) = self.input_path() {
            if !input.exists() {
                return Err(ConfigError::InputNotFound(input.to_path_buf()));
            }
            if !input.is_file() {
                return Err(ConfigError::InputNotFile(input.to_path_buf()));
            }
        }
        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Input path not found
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Input path is not a regular file
    #[error("Input path is not a file: {0}")]
    InputNotFile(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.input.is_none());
        assert!(!config.pretty);
        assert!(!config.exit_code);
        assert!(!config.verbose);
        assert!(!config.quiet);
    }

    #[test]
    fn test_input_path_stdin() {
        assert_eq!(Config::default().input_path(), None);

        let dash = Config {
            input: Some(PathBuf::from("-")),
            ..Default::default()
        };
        assert_eq!(dash.input_path(), None);
    }

    #[test]
    fn test_input_path_custom() {
        let config = Config {
            input: Some(PathBuf::from("/tmp/go-test.log")),
            ..Default::default()
        };
        assert_eq!(config.input_path(), Some(Path::new("/tmp/go-test.log")));
    }

    #[test]
    fn test_log_level_default() {
        assert_eq!(Config::default().log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_verbose_wins() {
        let config = Config {
            verbose: true,
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_log_level_quiet() {
        let config = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_validate_nonexistent_input() {
        let config = Config {
            input: Some(PathBuf::from("/nonexistent/path/12345.log")),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_validate_directory_input() {
        let config = Config {
            input: Some(std::env::temp_dir()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InputNotFile(_))));
    }

    #[test]
    fn test_validate_stdin() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
