//! # errorshots
//!
//! Collects the crash and error logs npm leaves in its cache and pushes them
//! to cloud storage in one shot.
//!
//! ## Overview
//!
//! The work happens in two stages:
//!
//! - **Discovery** resolves configured paths and glob patterns into a list of
//!   files. Patterns come from a `.errorshots` file in the working directory
//!   or default to `<npm cache>/_logs/*`.
//! - **Upload** validates provider credentials and uploads every discovered
//!   file or directory concurrently, logging a public URL for each success.
//!
//! ## Usage
//!
//! ```no_run
//! use errorshots::command::SystemCommandRunner;
//! use errorshots::discovery::{Discovery, DiscoveryConfig};
//! use errorshots::cloud::credentials::S3Credentials;
//! use errorshots::cloud::uploader::Uploader;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let files = Discovery::new(DiscoveryConfig::from_current_dir()?, Box::new(SystemCommandRunner))
//!     .resolve()?;
//!
//! let report = Uploader::s3(S3Credentials::from_env())
//!     .push(Some("s3"), files)
//!     .await?;
//!
//! println!("{} of {} uploads succeeded", report.succeeded(), report.outcomes.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`cli`]: Command-line interface definitions
//! - [`command`]: External command execution
//! - [`discovery`]: Log file discovery
//! - [`cloud`]: Credentials, object stores and upload orchestration
//! - [`error`]: Error types
//! - [`constants`]: Application-wide constants

/// Command-line interface definitions and argument parsing
pub mod cli;

/// External command execution used by discovery
pub mod command;

/// Resolution of configured log entries into paths
pub mod discovery;

/// Cloud storage integration (S3)
pub mod cloud;

/// Error types
pub mod error;

/// Application constants and configuration values
pub mod constants;

/// Test utilities and helpers
#[cfg(test)]
pub mod test_utils;
