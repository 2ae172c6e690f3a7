//! Global constants for errorshots.
//!
//! This module centralizes the hardcoded names, commands and environment
//! variables the tool relies on so they live in one place.

// Discovery constants
/// Name of the optional override file looked up in the working directory
pub const OVERRIDE_FILE_NAME: &str = ".errorshots";

/// Marker that turns a configured entry into a scan pattern
pub const WILDCARD_MARKER: char = '*';

/// Directory below the npm cache where npm writes its debug logs
pub const NPM_LOGS_DIR: &str = "_logs";

/// Package manager binary queried for its cache location
pub const NPM_PROGRAM: &str = "npm";

/// Arguments of the cache-location query (`npm config get cache`)
pub const NPM_CACHE_QUERY_ARGS: [&str; 3] = ["config", "get", "cache"];

/// Filesystem scan binary used to expand wildcard entries
pub const FIND_PROGRAM: &str = "find";

/// Trailing arguments restricting the scan to regular files
pub const FIND_FILE_FILTER_ARGS: [&str; 2] = ["-type", "f"];

/// Shell exit codes for a program that is missing or not executable
#[cfg(not(windows))]
pub const SHELL_UNAVAILABLE_CODES: [i32; 2] = [126, 127];

/// `cmd` exit code for an unrecognized program
#[cfg(windows)]
pub const SHELL_UNAVAILABLE_CODES: [i32; 1] = [9009];

// Provider constants
/// Provider token selecting Amazon S3
pub const S3_PROVIDER_NAME: &str = "s3";

/// Environment variable holding the S3 access key id
pub const ENV_S3_ACCESS_KEY: &str = "ERROR_SHOTS_S3_ACCESS_KEY";

/// Environment variable holding the S3 secret access key
pub const ENV_S3_SECRET_ACCESS_KEY: &str = "ERROR_SHOTS_S3_SECRET_ACCESS_KEY";

/// Environment variable holding the target bucket
pub const ENV_S3_BUCKET: &str = "ERROR_SHOTS_S3_BUCKET";

/// Environment variable holding the bucket region
pub const ENV_S3_REGION: &str = "ERROR_SHOTS_S3_REGION";

// Public URL constants
/// Region whose buckets are served from the bare `s3.` host
pub const S3_STANDARD_REGION: &str = "us-east-1";

/// Domain of the public S3 endpoints
pub const S3_PUBLIC_DOMAIN: &str = "amazonaws.com";
