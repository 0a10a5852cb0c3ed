#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use image::RgbaImage;
use scribble_core::drawing::{CreateDrawing, Drawing, Point, Stroke};
use scribble_core::moderation::Prediction;
use scribble_core::types::DrawingId;
use scribble_studio::client::{ClientError, DrawingApi};
use scribble_studio::editor::SavingIndicator;
use scribble_studio::moderation::{Classifier, ClassifierLoader, ModerationError};

/// In-process stand-in for the drawings API.
#[derive(Default)]
pub struct FakeApi {
    pub drawings: Mutex<Vec<Drawing>>,
    pub created: Mutex<Vec<CreateDrawing>>,
    pub fail_with: Mutex<Option<(u16, String)>>,
    pub delete_calls: AtomicUsize,
    /// Records whether the editor reported a save in flight during `create`.
    pub watch_saving: Mutex<Option<SavingIndicator>>,
    pub saw_saving: Mutex<Option<bool>>,
}

impl FakeApi {
    pub fn with_drawings(drawings: Vec<Drawing>) -> Self {
        Self {
            drawings: Mutex::new(drawings),
            ..Self::default()
        }
    }

    pub fn failing(status: u16, message: &str) -> Self {
        let api = Self::default();
        *api.fail_with.lock().unwrap() = Some((status, message.to_string()));
        api
    }

    fn check(&self) -> Result<(), ClientError> {
        match self.fail_with.lock().unwrap().clone() {
            Some((status, message)) => Err(ClientError::Api { status, message }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DrawingApi for FakeApi {
    async fn list(&self) -> Result<Vec<Drawing>, ClientError> {
        self.check()?;
        Ok(self.drawings.lock().unwrap().clone())
    }

    async fn get(&self, id: &DrawingId) -> Result<Drawing, ClientError> {
        self.check()?;
        self.drawings
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == *id)
            .cloned()
            .ok_or(ClientError::Api {
                status: 404,
                message: "Drawing not found".into(),
            })
    }

    async fn create(&self, input: &CreateDrawing) -> Result<Drawing, ClientError> {
        if let Some(indicator) = self.watch_saving.lock().unwrap().as_ref() {
            *self.saw_saving.lock().unwrap() = Some(indicator.is_saving());
        }
        self.check()?;
        self.created.lock().unwrap().push(input.clone());
        let drawing = Drawing::create(input.clone());
        self.drawings.lock().unwrap().insert(0, drawing.clone());
        Ok(drawing)
    }

    async fn delete(&self, id: &DrawingId) -> Result<(), ClientError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.drawings.lock().unwrap().retain(|d| d.id != *id);
        Ok(())
    }
}

/// Classifier returning fixed predictions, or failing.
pub struct FakeClassifier {
    pub predictions: Option<Vec<Prediction>>,
    pub calls: AtomicUsize,
}

impl FakeClassifier {
    pub fn returning(predictions: Vec<Prediction>) -> Arc<Self> {
        Arc::new(Self {
            predictions: Some(predictions),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn broken() -> Arc<Self> {
        Arc::new(Self {
            predictions: None,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Classifier for FakeClassifier {
    async fn classify(&self, _image: &RgbaImage) -> Result<Vec<Prediction>, ModerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.predictions
            .clone()
            .ok_or_else(|| ModerationError::Classify("model crashed".into()))
    }
}

/// Loader that counts attempts and fails the first `failures` of them.
pub struct FakeLoader {
    pub classifier: Arc<FakeClassifier>,
    pub failures: AtomicUsize,
    pub loads: AtomicUsize,
    pub delay: Duration,
}

impl FakeLoader {
    pub fn new(classifier: Arc<FakeClassifier>) -> Arc<Self> {
        Self::failing_first(classifier, 0)
    }

    pub fn failing_first(classifier: Arc<FakeClassifier>, failures: usize) -> Arc<Self> {
        Arc::new(Self {
            classifier,
            failures: AtomicUsize::new(failures),
            loads: AtomicUsize::new(0),
            delay: Duration::from_millis(20),
        })
    }
}

#[async_trait]
impl ClassifierLoader for FakeLoader {
    async fn load(&self) -> Result<Arc<dyn Classifier>, ModerationError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;

        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(ModerationError::Load("weights not found".into()));
        }
        Ok(self.classifier.clone() as Arc<dyn Classifier>)
    }
}

pub fn stroke(points: &[(f64, f64)]) -> Stroke {
    Stroke {
        id: uuid::Uuid::new_v4().to_string(),
        points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        color: "#000000".into(),
        width: 4.0,
        timestamp: 0,
    }
}

pub fn drawing(title: &str, author: Option<&str>, strokes: Vec<Stroke>) -> Drawing {
    Drawing::create(CreateDrawing {
        title: title.into(),
        strokes,
        author: author.map(String::from),
    })
}
