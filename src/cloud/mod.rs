//! Cloud storage integration for pushing discovered logs.
//!
//! ## Flow
//!
//! ```text
//! provider token ──▶ Provider::select ──▶ S3Credentials::validate
//!                                                │
//!                                                ▼
//!                         connector ──▶ Arc<dyn ObjectStore>
//!                                                │
//!                 ┌──────────────┬───────────────┴──────────┐
//!                 ▼              ▼                          ▼
//!           UploadTask     UploadTask        ...      UploadTask
//!                 │              │                          │
//!                 └──────────────┴── FuturesUnordered ──────┘
//!                                         │
//!                                         ▼
//!                                PushReport + log lines
//! ```
//!
//! ## Usage Example
//!
//! ```no_run
//! use errorshots::cloud::credentials::{RegionPolicy, S3Credentials};
//! use errorshots::cloud::uploader::Uploader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> anyhow::Result<()> {
//! // Accept a missing region; S3 requires one by default
//! let uploader = Uploader::s3(S3Credentials::from_env()).with_region_policy(RegionPolicy::Optional);
//! let report = uploader
//!     .push(Some("s3"), vec![PathBuf::from("/root/.npm/_logs/debug-0.log")])
//!     .await?;
//!
//! println!("{} uploaded, {} failed", report.succeeded(), report.failed());
//! # Ok(())
//! # }
//! ```

/// Credential fields and their validation
pub mod credentials;

/// Provider selection
pub mod provider;

/// Object store seam and upload tasks
pub mod store;

/// Amazon S3 object store
pub mod s3;

/// Public object URLs
pub mod url;

/// Upload orchestration
pub mod uploader;
