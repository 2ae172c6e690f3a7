use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::FutureExt;
use futures::stream::{FuturesUnordered, StreamExt};
use log::{error, info};

use crate::cloud::credentials::{RegionPolicy, S3Credentials};
use crate::cloud::provider::Provider;
use crate::cloud::s3::S3ObjectStore;
use crate::cloud::store::{ObjectStore, UploadTask};
use crate::cloud::url::public_url;
use crate::error::{ErrorshotsError, TransferError};

/// Builds the object store once credentials are validated.
pub type StoreConnector =
    Box<dyn Fn(&S3Credentials) -> Result<Arc<dyn ObjectStore>, ErrorshotsError> + Send + Sync>;

/// Result of a single upload task.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Success {
        local: PathBuf,
        key: String,
        url: String,
    },
    Failure {
        local: PathBuf,
        error: TransferError,
    },
}

impl UploadOutcome {
    pub fn local(&self) -> &Path {
        match self {
            UploadOutcome::Success { local, .. } | UploadOutcome::Failure { local, .. } => local,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success { .. })
    }
}

impl fmt::Display for UploadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadOutcome::Success { local, url, .. } => {
                write!(f, "{} successfully uploaded at {}", local.display(), url)
            }
            UploadOutcome::Failure { local, error } => {
                write!(f, "Failed to upload {}: {}", local.display(), error)
            }
        }
    }
}

/// Outcomes of one push, in completion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PushReport {
    pub outcomes: Vec<UploadOutcome>,
}

impl PushReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Pushes discovered log files to remote storage.
///
/// Provider selection and credential problems are returned as errors before
/// anything is uploaded. Once dispatch starts every task is independent: a
/// failed transfer is logged and recorded in the [`PushReport`] but never
/// fails the push.
pub struct Uploader {
    credentials: S3Credentials,
    region_override: Option<RegionPolicy>,
    connector: StoreConnector,
}

impl Uploader {
    pub fn new(credentials: S3Credentials, connector: StoreConnector) -> Self {
        Uploader {
            credentials,
            region_override: None,
            connector,
        }
    }

    /// Uploader talking to Amazon S3.
    pub fn s3(credentials: S3Credentials) -> Self {
        Self::new(
            credentials,
            Box::new(
                |credentials: &S3Credentials| -> Result<Arc<dyn ObjectStore>, ErrorshotsError> {
                    Ok(Arc::new(S3ObjectStore::connect(credentials)?))
                },
            ),
        )
    }

    /// Use `policy` instead of the selected provider's own region policy.
    pub fn with_region_policy(mut self, policy: RegionPolicy) -> Self {
        self.region_override = Some(policy);
        self
    }

    /// Upload `files` to the provider named `provider`.
    ///
    /// Resolves once every dispatched task has reported.
    pub async fn push(
        &self,
        provider: Option<&str>,
        files: Vec<PathBuf>,
    ) -> Result<PushReport, ErrorshotsError> {
        info!("Getting ready to push the following files: {:?}", files);

        let provider = Provider::select(provider)?;
        let region_policy = self
            .region_override
            .unwrap_or_else(|| provider.region_policy());

        match provider {
            Provider::S3 => self.push_s3(files, region_policy).await,
        }
    }

    async fn push_s3(
        &self,
        files: Vec<PathBuf>,
        region_policy: RegionPolicy,
    ) -> Result<PushReport, ErrorshotsError> {
        self.credentials.validate(region_policy)?;

        info!("Authenticating against AWS with given credentials...");
        let store = (self.connector)(&self.credentials)?;

        info!("Initiating upload of {} files", files.len());

        let mut pending: FuturesUnordered<_> = files
            .into_iter()
            .map(|path| self.dispatch(Arc::clone(&store), path))
            .collect();

        let mut report = PushReport::default();
        while let Some(outcome) = pending.next().await {
            log_outcome(&outcome);
            report.outcomes.push(outcome);
        }

        info!(
            "Upload finished: {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
        Ok(report)
    }

    /// Spawn the upload of `path` and return a future for its outcome.
    fn dispatch(
        &self,
        store: Arc<dyn ObjectStore>,
        path: PathBuf,
    ) -> impl std::future::Future<Output = UploadOutcome> {
        let task = UploadTask::for_path(&path);
        let bucket = self.credentials.bucket.clone();
        let region = self.credentials.region().map(str::to_string);

        let handle = tokio::spawn(async move {
            let result = task.submit(store.as_ref()).await;
            match result {
                Ok(()) => {
                    let url = public_url(&bucket, task.key(), region.as_deref());
                    UploadOutcome::Success {
                        local: task.local().to_path_buf(),
                        key: task.key().to_string(),
                        url,
                    }
                }
                Err(error) => UploadOutcome::Failure {
                    local: task.local().to_path_buf(),
                    error,
                },
            }
        });

        handle.map(move |joined| {
            joined.unwrap_or_else(|e| UploadOutcome::Failure {
                error: TransferError::Aborted {
                    path: path.display().to_string(),
                    message: e.to_string(),
                },
                local: path,
            })
        })
    }
}

fn log_outcome(outcome: &UploadOutcome) {
    if outcome.is_success() {
        info!("{}", outcome);
    } else {
        error!("{}", outcome);
    }
}
