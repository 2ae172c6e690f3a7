//! Log file discovery.
//!
//! Discovery turns configured entries into the list of paths handed to the
//! uploader. Entries come from the `.errorshots` override file when it exists,
//! otherwise from npm's cache log directory. Entries containing `*` are
//! expanded with a single `find` invocation; every other entry is passed
//! through unresolved.
//!
//! ```text
//! .errorshots / npm cache ──▶ partition ──▶ find <patterns> -type f ──┐
//!                                  │                                   ▼
//!                                  └──────── literal paths ──▶ scanned ++ literals
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use errorshots::command::SystemCommandRunner;
//! use errorshots::discovery::{Discovery, DiscoveryConfig};
//!
//! # fn example() -> anyhow::Result<()> {
//! let discovery = Discovery::new(
//!     DiscoveryConfig::from_current_dir()?,
//!     Box::new(SystemCommandRunner),
//! );
//!
//! for path in discovery.resolve()? {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

/// Literal vs wildcard classification of entries
pub mod matcher;

/// Reading the `.errorshots` override file
pub mod override_file;

use std::path::PathBuf;

use log::{debug, warn};

use crate::command::{CommandRunner, CommandSpec};
use crate::constants::{
    FIND_FILE_FILTER_ARGS, FIND_PROGRAM, NPM_CACHE_QUERY_ARGS, NPM_LOGS_DIR, NPM_PROGRAM,
    OVERRIDE_FILE_NAME, WILDCARD_MARKER,
};
use crate::error::ErrorshotsError;

pub use matcher::{classify, partition_entries, EntryKind, PartitionedEntries};
pub use override_file::{parse_entries, read_override_entries};

/// Where discovery looks for the override file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    pub working_dir: PathBuf,
}

impl DiscoveryConfig {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        DiscoveryConfig {
            working_dir: working_dir.into(),
        }
    }

    /// Configuration rooted at the process working directory.
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// Full path of the override file.
    pub fn override_path(&self) -> PathBuf {
        self.working_dir.join(OVERRIDE_FILE_NAME)
    }
}

/// Resolves configured log entries into concrete paths.
pub struct Discovery {
    config: DiscoveryConfig,
    runner: Box<dyn CommandRunner>,
}

impl Discovery {
    pub fn new(config: DiscoveryConfig, runner: Box<dyn CommandRunner>) -> Self {
        Discovery { config, runner }
    }

    /// Resolve the configured entries.
    ///
    /// Scan results come first, followed by literal entries in their original
    /// order. Literal entries are not checked for existence.
    pub fn resolve(&self) -> Result<Vec<PathBuf>, ErrorshotsError> {
        let entries = self.candidate_entries()?;
        let PartitionedEntries {
            scan_patterns,
            literal_paths,
        } = partition_entries(entries);

        let scanned_paths = if scan_patterns.is_empty() {
            Vec::new()
        } else {
            self.scan(&scan_patterns)?
        };

        let resolved: Vec<PathBuf> = scanned_paths
            .into_iter()
            .chain(literal_paths.into_iter().map(PathBuf::from))
            .filter(|path| !path.as_os_str().is_empty())
            .collect();

        debug!("Discovery resolved {} paths", resolved.len());
        Ok(resolved)
    }

    /// Entries from the override file, or the default npm log pattern.
    pub fn candidate_entries(&self) -> Result<Vec<String>, ErrorshotsError> {
        let override_path = self.config.override_path();

        match read_override_entries(&override_path)? {
            Some(entries) => {
                debug!("Using log entries from {}", override_path.display());
                Ok(entries)
            }
            None => Ok(vec![self.default_entry()?]),
        }
    }

    /// `<npm cache>/_logs/*`
    pub fn default_entry(&self) -> Result<String, ErrorshotsError> {
        let cache_dir = self.npm_cache_dir()?;
        Ok(format!(
            "{}/{}/{}",
            cache_dir.trim_end_matches('/'),
            NPM_LOGS_DIR,
            WILDCARD_MARKER
        ))
    }

    fn npm_cache_dir(&self) -> Result<String, ErrorshotsError> {
        let spec = CommandSpec::new(NPM_PROGRAM, NPM_CACHE_QUERY_ARGS);
        let output = self
            .runner
            .run(&spec)
            .map_err(|e| ErrorshotsError::external_command(spec.command_line(), e))?;

        if !output.success() {
            return Err(ErrorshotsError::external_command(
                spec.command_line(),
                output.stderr.trim(),
            ));
        }

        let stdout = output.stdout_text();
        let cache_dir = stdout.trim_end_matches(&['\r', '\n'][..]);
        if cache_dir.is_empty() {
            return Err(ErrorshotsError::external_command(
                spec.command_line(),
                "no cache location reported",
            ));
        }

        debug!("npm cache located at {}", cache_dir);
        Ok(cache_dir.to_string())
    }

    fn scan(&self, patterns: &[String]) -> Result<Vec<PathBuf>, ErrorshotsError> {
        let args = patterns
            .iter()
            .map(String::as_str)
            .chain(FIND_FILE_FILTER_ARGS);
        let spec = CommandSpec::new(FIND_PROGRAM, args).via_shell();

        let output = self
            .runner
            .run(&spec)
            .map_err(|e| ErrorshotsError::external_command(spec.command_line(), e))?;

        if output.program_unavailable() {
            return Err(ErrorshotsError::external_command(
                spec.command_line(),
                output.stderr.trim(),
            ));
        }

        // find exits non-zero when a single pattern matches nothing
        if !output.success() {
            warn!(
                "`{}` reported problems: {}",
                spec.command_line(),
                output.stderr.trim()
            );
        }

        Ok(output.stdout_paths())
    }
}
