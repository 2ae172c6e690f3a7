use std::fmt;

use crate::cloud::credentials::RegionPolicy;
use crate::constants::S3_PROVIDER_NAME;
use crate::error::ErrorshotsError;

/// Remote storage providers `push` can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    S3,
}

impl Provider {
    /// Select a provider from the optional CLI token.
    pub fn select(name: Option<&str>) -> Result<Self, ErrorshotsError> {
        match name {
            None => Err(ErrorshotsError::NoProvider),
            Some(S3_PROVIDER_NAME) => Ok(Provider::S3),
            Some(other) => Err(ErrorshotsError::UnknownProvider(other.to_string())),
        }
    }

    /// Region requirement of the provider's credential profile.
    pub fn region_policy(&self) -> RegionPolicy {
        match self {
            Provider::S3 => RegionPolicy::Required,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::S3 => write!(f, "{}", S3_PROVIDER_NAME),
        }
    }
}
