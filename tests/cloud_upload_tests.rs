//! Integration tests for upload orchestration.
//!
//! These tests drive the uploader against an in-memory object store so no
//! network access or AWS account is needed.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tempfile::TempDir;

use errorshots::cloud::credentials::{RegionPolicy, S3Credentials};
use errorshots::cloud::store::ObjectStore;
use errorshots::cloud::uploader::{UploadOutcome, Uploader};
use errorshots::error::{ErrorshotsError, TransferError};

#[derive(Debug, Clone, PartialEq)]
enum Submitted {
    File { local: PathBuf, key: String },
    Directory { local: PathBuf, prefix: String },
}

/// Records submissions; paths whose name starts with `fail` are rejected
#[derive(Default)]
struct MemoryStore {
    submitted: Mutex<Vec<Submitted>>,
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn upload_file(&self, local: &Path, key: &str) -> Result<(), TransferError> {
        self.submitted.lock().unwrap().push(Submitted::File {
            local: local.to_path_buf(),
            key: key.to_string(),
        });
        if key.starts_with("fail") {
            return Err(TransferError::Remote {
                bucket: "bucket".to_string(),
                key: key.to_string(),
                message: "SlowDown".to_string(),
            });
        }
        // Finish out of submission order
        if key.starts_with("slow") {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        Ok(())
    }

    async fn upload_directory(&self, local: &Path, prefix: &str) -> Result<(), TransferError> {
        self.submitted.lock().unwrap().push(Submitted::Directory {
            local: local.to_path_buf(),
            prefix: prefix.to_string(),
        });
        Ok(())
    }
}

fn credentials() -> S3Credentials {
    S3Credentials {
        access_key_id: "access_key".to_string(),
        secret_access_key: "secret".to_string(),
        bucket: "bucket".to_string(),
        region: "eu-west-1".to_string(),
    }
}

fn uploader(store: Arc<MemoryStore>, credentials: S3Credentials) -> Uploader {
    Uploader::new(
        credentials,
        Box::new(
            move |_: &S3Credentials| -> Result<Arc<dyn ObjectStore>, ErrorshotsError> {
                Ok(store.clone())
            },
        ),
    )
}

/// One file task and one directory task with the directory's own path as prefix
#[tokio::test]
async fn test_file_and_directory_dispatch() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let regular_file = temp_dir.path().join("a/regular_file");
    let some_directory = temp_dir.path().join("a/some_directory");
    fs::create_dir_all(&some_directory)?;
    fs::write(&regular_file, "npm ERR! code ELIFECYCLE")?;

    let store = Arc::new(MemoryStore::default());
    let report = uploader(store.clone(), credentials())
        .push(Some("s3"), vec![regular_file.clone(), some_directory.clone()])
        .await?;

    assert_eq!(report.succeeded(), 2);

    let submitted = store.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 2);
    assert!(submitted.contains(&Submitted::File {
        local: regular_file.clone(),
        key: "regular_file".to_string(),
    }));
    assert!(submitted.contains(&Submitted::Directory {
        local: some_directory.clone(),
        prefix: some_directory.to_string_lossy().into_owned(),
    }));
    Ok(())
}

/// Failed tasks are reported without affecting their siblings
#[tokio::test]
async fn test_failures_do_not_fail_push() -> Result<()> {
    let store = Arc::new(MemoryStore::default());
    let files = vec![
        PathBuf::from("logs/slow.log"),
        PathBuf::from("logs/fail.log"),
        PathBuf::from("logs/ok.log"),
    ];

    let report = uploader(store, credentials())
        .push(Some("s3"), files)
        .await?;

    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.failed(), 1);

    let failure = report
        .outcomes
        .iter()
        .find(|outcome| !outcome.is_success())
        .expect("one failure");
    assert_eq!(failure.local(), Path::new("logs/fail.log"));
    assert!(failure.to_string().contains("SlowDown"));

    // The slow upload reports last even though it was submitted first
    assert_eq!(
        report.outcomes.last().map(|outcome| outcome.local().to_path_buf()),
        Some(PathBuf::from("logs/slow.log"))
    );
    Ok(())
}

/// Success outcomes carry the public URL of the uploaded key
#[tokio::test]
async fn test_success_reports_public_url() -> Result<()> {
    let store = Arc::new(MemoryStore::default());
    let report = uploader(store, credentials())
        .push(Some("s3"), vec![PathBuf::from("/root/.npm/_logs/debug-0.log")])
        .await?;

    assert_eq!(
        report.outcomes,
        vec![UploadOutcome::Success {
            local: PathBuf::from("/root/.npm/_logs/debug-0.log"),
            key: "debug-0.log".to_string(),
            url: "https://s3-eu-west-1.amazonaws.com/bucket/debug-0.log".to_string(),
        }]
    );
    assert!(report.outcomes[0]
        .to_string()
        .contains("/root/.npm/_logs/debug-0.log successfully uploaded at https://"));
    Ok(())
}

/// S3 requires a region unless the caller relaxes it; without one the default host is used
#[tokio::test]
async fn test_optional_region() -> Result<()> {
    let store = Arc::new(MemoryStore::default());
    let credentials = S3Credentials {
        region: String::new(),
        ..credentials()
    };

    let report = uploader(store.clone(), credentials.clone())
        .with_region_policy(RegionPolicy::Optional)
        .push(Some("s3"), vec![PathBuf::from("debug.log")])
        .await?;
    match &report.outcomes[0] {
        UploadOutcome::Success { url, .. } => {
            assert_eq!(url, "https://s3.amazonaws.com/bucket/debug.log")
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    let err = uploader(store, credentials)
        .push(Some("s3"), vec![PathBuf::from("debug.log")])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("region"));
    Ok(())
}

/// Credential errors stop the push before the store is built
#[test]
fn test_credential_error_before_connect() {
    let connects = Arc::new(AtomicUsize::new(0));
    let counter = connects.clone();
    let uploader = Uploader::new(
        S3Credentials {
            secret_access_key: String::new(),
            ..credentials()
        },
        Box::new(
            move |_: &S3Credentials| -> Result<Arc<dyn ObjectStore>, ErrorshotsError> {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(MemoryStore::default()))
            },
        ),
    );

    let result = tokio_test::block_on(uploader.push(Some("s3"), vec![PathBuf::from("debug.log")]));

    let err = result.unwrap_err();
    assert!(err.to_string().contains("secret_access_key"));
    assert_eq!(connects.load(Ordering::SeqCst), 0);
}
