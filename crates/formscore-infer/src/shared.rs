use crate::estimator::PoseEstimator;
use crate::options::DetectorOptions;
use crate::InferError;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// A lazily created pose estimator shared by every comparison.
///
/// Initialization is single-flight: concurrent first callers wait on the
/// same initialization, and only one estimator is ever stored. A failed
/// initialization stores nothing, so a later call may retry.
pub struct SharedDetector {
    cell: OnceCell<Arc<dyn PoseEstimator>>,
}

impl SharedDetector {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::const_new(),
        }
    }

    /// Return the stored estimator, running `init` if none exists yet.
    pub async fn get_or_init<F, Fut>(&self, init: F) -> Result<Arc<dyn PoseEstimator>, InferError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Arc<dyn PoseEstimator>, InferError>>,
    {
        self.cell.get_or_try_init(init).await.map(Arc::clone)
    }

    pub fn get(&self) -> Option<Arc<dyn PoseEstimator>> {
        self.cell.get().map(Arc::clone)
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}

impl Default for SharedDetector {
    fn default() -> Self {
        Self::new()
    }
}

static DETECTOR: SharedDetector = SharedDetector::new();

/// The process-wide detector, loaded from `options` on first use.
///
/// `options` only matter for the call that performs initialization; later
/// calls get the existing detector regardless of the options they pass.
pub async fn shared_detector(
    options: &DetectorOptions,
) -> Result<Arc<dyn PoseEstimator>, InferError> {
    DETECTOR
        .get_or_init(|| {
            let options = options.clone();
            async move {
                tokio::task::spawn_blocking(move || crate::load_detector(&options))
                    .await
                    .map_err(|e| InferError::Runtime(format!("detector load task failed: {e}")))?
            }
        })
        .await
}
