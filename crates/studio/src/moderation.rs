//! Content moderation gate consulted before a drawing is saved.
//!
//! The gate owns an optional pretrained [`Classifier`]. Until one has been
//! loaded, or whenever classification fails, it answers with the pixel
//! heuristic from [`scribble_core::moderation`]. Verdicts are advisory.

use std::sync::Arc;

use async_trait::async_trait;
use image::RgbaImage;
use scribble_core::moderation::{self, ModerationResult, Prediction};
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    #[error("classifier failed to load: {0}")]
    Load(String),

    /// A coalesced initialisation attempt that some other caller ran failed.
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    #[error("classification failed: {0}")]
    Classify(String),
}

/// A loaded image classifier.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Ranked `{className, probability}` pairs for a rendered bitmap.
    async fn classify(&self, image: &RgbaImage) -> Result<Vec<Prediction>, ModerationError>;
}

/// Produces a [`Classifier`], typically by loading model weights.
#[async_trait]
pub trait ClassifierLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn Classifier>, ModerationError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateStatus {
    Uninitialized,
    Loading,
    Ready,
    Failed(String),
}

struct GateState {
    status: GateStatus,
    classifier: Option<Arc<dyn Classifier>>,
    /// Completed load attempts, used to coalesce concurrent initialisation.
    attempts: u64,
}

pub struct ModerationGate {
    loader: Arc<dyn ClassifierLoader>,
    state: RwLock<GateState>,
    init_lock: Mutex<()>,
}

impl ModerationGate {
    pub fn new(loader: Arc<dyn ClassifierLoader>) -> Self {
        Self {
            loader,
            state: RwLock::new(GateState {
                status: GateStatus::Uninitialized,
                classifier: None,
                attempts: 0,
            }),
            init_lock: Mutex::new(()),
        }
    }

    pub async fn status(&self) -> GateStatus {
        self.state.read().await.status.clone()
    }

    pub async fn is_ready(&self) -> bool {
        self.state.read().await.status == GateStatus::Ready
    }

    /// Load the classifier once.
    ///
    /// Callers that arrive while a load is running wait for it and share
    /// its outcome instead of loading again. Once ready, further calls
    /// return immediately. After a failure the next call retries.
    pub async fn initialize(&self) -> Result<(), ModerationError> {
        let seen = self.state.read().await.attempts;
        let _init = self.init_lock.lock().await;

        {
            let state = self.state.read().await;
            match &state.status {
                GateStatus::Ready => return Ok(()),
                GateStatus::Failed(reason) if state.attempts != seen => {
                    return Err(ModerationError::Unavailable(reason.clone()));
                }
                _ => {}
            }
        }

        self.state.write().await.status = GateStatus::Loading;
        tracing::info!("Loading moderation classifier");

        let outcome = self.loader.load().await;

        let mut state = self.state.write().await;
        state.attempts += 1;
        match outcome {
            Ok(classifier) => {
                state.classifier = Some(classifier);
                state.status = GateStatus::Ready;
                tracing::info!("Moderation classifier ready");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Moderation classifier unavailable, using pixel heuristic");
                state.status = GateStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Verdict for a rendered canvas.
    pub async fn moderate(&self, image: &RgbaImage) -> ModerationResult {
        let classifier = self.state.read().await.classifier.clone();

        if let Some(classifier) = classifier {
            match classifier.classify(image).await {
                Ok(predictions) => return moderation::evaluate_predictions(predictions),
                Err(e) => {
                    tracing::warn!(error = %e, "Classification failed, using pixel heuristic");
                }
            }
        }

        moderation::analyze_pixels(image)
    }
}
