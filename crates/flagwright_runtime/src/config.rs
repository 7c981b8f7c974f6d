//! Generator configuration.
//!
//! Read from `flagwright.toml` in the working directory, or from the file
//! given with `--config`. Every table and key is optional:
//!
//! ```toml
//! [pass]
//! parallel = true
//! deny_warnings = false
//!
//! [emit]
//! runtime_path = "::flagwright_runtime"
//!
//! [log]
//! filter = "flagwright=debug"
//! ```

use std::path::{Path, PathBuf};

use flagwright_engine::{EmitOptions, PassOptions};
use flagwright_foundation::{Error, ErrorContext, ErrorKind, Result};
use serde::{Deserialize, Serialize};

/// File read when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "flagwright.toml";

/// Generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Pass options.
    pub pass: PassSection,
    /// Emission options.
    pub emit: EmitSection,
    /// Logging options.
    pub log: LogSection,
}

/// The `[pass]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PassSection {
    /// Expand declarations on worker threads.
    pub parallel: bool,
    /// Fail on warnings.
    pub deny_warnings: bool,
}

impl Default for PassSection {
    fn default() -> Self {
        let options = PassOptions::default();
        Self {
            parallel: options.parallel,
            deny_warnings: options.deny_warnings,
        }
    }
}

/// The `[emit]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitSection {
    /// Path the generated code imports the runtime traits from.
    pub runtime_path: String,
}

impl Default for EmitSection {
    fn default() -> Self {
        Self {
            runtime_path: EmitOptions::default().runtime_path,
        }
    }
}

/// The `[log]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSection {
    /// An `EnvFilter` directive; `RUST_LOG` is used when unset.
    pub filter: Option<String>,
}

impl GeneratorConfig {
    /// Loads the configuration from `path`, or from
    /// [`DEFAULT_CONFIG_FILE`] when `path` is `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit
    /// file is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            Error::new(ErrorKind::Io(format!(
                "failed to read config '{}': {e}",
                config_path.display()
            )))
        })?;
        let config = Self::parse(&contents).map_err(|err| {
            err.with_context(ErrorContext::new().with_source(config_path.display().to_string()))
        })?;
        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Parses configuration text.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed TOML or unknown keys.
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::config(e.to_string()))
    }

    /// The pass options.
    #[must_use]
    pub fn pass_options(&self) -> PassOptions {
        PassOptions {
            parallel: self.pass.parallel,
            deny_warnings: self.pass.deny_warnings,
        }
    }

    /// The emission options.
    #[must_use]
    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            runtime_path: self.emit.runtime_path.clone(),
        }
    }
}
