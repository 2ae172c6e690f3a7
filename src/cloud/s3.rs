use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, warn};
use rusoto_core::{ByteStream, HttpClient, Region};
use rusoto_credential::StaticProvider;
use rusoto_s3::{PutObjectRequest, S3Client, S3};
use walkdir::WalkDir;

use crate::cloud::credentials::S3Credentials;
use crate::cloud::store::ObjectStore;
use crate::error::{ErrorshotsError, TransferError};

/// [`ObjectStore`] backed by Amazon S3.
///
/// Every object is sent with a single `PutObject` request. The client is
/// authenticated with the static credentials it was created from.
pub struct S3ObjectStore {
    bucket: String,
    region: Region,
    client: S3Client,
}

impl S3ObjectStore {
    /// Create a store from validated credentials.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use errorshots::cloud::credentials::S3Credentials;
    /// # use errorshots::cloud::s3::S3ObjectStore;
    /// let store = S3ObjectStore::connect(&S3Credentials::from_env()).unwrap();
    /// println!("Uploading to {} in {}", store.bucket(), store.region().name());
    /// ```
    pub fn connect(credentials: &S3Credentials) -> Result<Self, ErrorshotsError> {
        let region = parse_region(credentials.region());
        let provider = StaticProvider::new_minimal(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
        );
        let http_client = HttpClient::new()
            .map_err(|e| ErrorshotsError::Client(format!("Failed to create HTTP client: {}", e)))?;

        Ok(S3ObjectStore {
            bucket: credentials.bucket.clone(),
            client: S3Client::new_with(http_client, provider, region.clone()),
            region,
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    async fn put_object(&self, local: &Path, key: &str) -> Result<(), TransferError> {
        let contents = tokio::fs::read(local).await.map_err(|e| TransferError::Io {
            path: local.display().to_string(),
            message: e.to_string(),
        })?;
        let size = contents.len();

        let request = PutObjectRequest {
            bucket: self.bucket.clone(),
            key: key.to_string(),
            body: Some(ByteStream::from(contents)),
            ..Default::default()
        };

        self.client
            .put_object(request)
            .await
            .map_err(|e| TransferError::Remote {
                bucket: self.bucket.clone(),
                key: key.to_string(),
                message: e.to_string(),
            })?;

        debug!(
            "Uploaded {} ({} bytes) to s3://{}/{}",
            local.display(),
            size,
            self.bucket,
            key
        );
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn upload_file(&self, local: &Path, key: &str) -> Result<(), TransferError> {
        self.put_object(local, key).await
    }

    async fn upload_directory(&self, local: &Path, prefix: &str) -> Result<(), TransferError> {
        for (path, key) in directory_objects(local, prefix)? {
            self.put_object(&path, &key).await?;
        }
        Ok(())
    }
}

/// Parse a region name, falling back to the default region.
pub fn parse_region(region_name: Option<&str>) -> Region {
    match region_name {
        Some(name) => match name.parse::<Region>() {
            Ok(region) => region,
            Err(_) => {
                warn!("Invalid region '{}', using default", name);
                Region::default()
            }
        },
        None => Region::default(),
    }
}

/// Files below `dir` with the object keys they are uploaded under.
pub fn directory_objects(dir: &Path, prefix: &str) -> Result<Vec<(PathBuf, String)>, TransferError> {
    let prefix = prefix.trim_end_matches('/');
    let mut objects = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| TransferError::Io {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(dir)
            .unwrap_or_else(|_| entry.path())
            .components()
            .map(|component| component.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");

        let key = if prefix.is_empty() {
            relative
        } else {
            format!("{}/{}", prefix, relative)
        };
        objects.push((entry.path().to_path_buf(), key));
    }

    Ok(objects)
}
