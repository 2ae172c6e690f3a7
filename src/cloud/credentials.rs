use log::debug;

use crate::constants::{ENV_S3_ACCESS_KEY, ENV_S3_BUCKET, ENV_S3_REGION, ENV_S3_SECRET_ACCESS_KEY};
use crate::error::ErrorshotsError;

/// Check that every required field has a value.
///
/// Fields are checked in the given order and the first empty one is reported.
pub fn validate_credentials(provider: &str, fields: &[(&str, &str)]) -> Result<(), ErrorshotsError> {
    for (name, value) in fields {
        if value.is_empty() {
            return Err(ErrorshotsError::MissingCredential {
                provider: provider.to_string(),
                field: name.to_string(),
            });
        }
        debug!("{} credential {} is set", provider, name);
    }
    Ok(())
}

/// Whether a provider needs the region to authenticate and build URLs.
///
/// Each provider declares its own policy through
/// [`Provider::region_policy`](crate::cloud::provider::Provider::region_policy).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionPolicy {
    Required,
    Optional,
}

/// S3 credentials read once at the process boundary.
///
/// Unset values are stored as empty strings; validation decides whether
/// that is acceptable.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct S3Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    pub region: String,
}

impl std::fmt::Debug for S3Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Credentials")
            .field("access_key_id", &"<redacted>")
            .field("secret_access_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .finish()
    }
}

impl S3Credentials {
    /// Build credentials from any key lookup, e.g. `|key| std::env::var(key).ok()`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).unwrap_or_default();
        S3Credentials {
            access_key_id: read(ENV_S3_ACCESS_KEY),
            secret_access_key: read(ENV_S3_SECRET_ACCESS_KEY),
            bucket: read(ENV_S3_BUCKET),
            region: read(ENV_S3_REGION),
        }
    }

    /// Credentials from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Required fields in validation order.
    pub fn required_fields(&self, policy: RegionPolicy) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            ("access_key_id", self.access_key_id.as_str()),
            ("secret_access_key", self.secret_access_key.as_str()),
            ("bucket", self.bucket.as_str()),
        ];
        if policy == RegionPolicy::Required {
            fields.push(("region", self.region.as_str()));
        }
        fields
    }

    pub fn validate(&self, policy: RegionPolicy) -> Result<(), ErrorshotsError> {
        validate_credentials("S3", &self.required_fields(policy))
    }

    /// The region, if one was configured.
    pub fn region(&self) -> Option<&str> {
        if self.region.is_empty() {
            None
        } else {
            Some(self.region.as_str())
        }
    }
}
