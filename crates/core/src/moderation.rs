//! Moderation verdict rules.
//!
//! Two ways to reach a [`ModerationResult`]:
//!
//! - [`evaluate_predictions`] turns classifier output into a verdict using
//!   per-category thresholds plus a weighted combined score.
//! - [`analyze_pixels`] is the fallback when no classifier is available: it
//!   flags a bitmap whose opaque pixels are mostly skin-toned.
//!
//! Verdicts are advisory. Nothing here is a security control.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Threshold for categories without a specific entry.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Combined score above which a drawing is flagged even when no single
/// category crosses its threshold.
pub const COMBINED_SCORE_THRESHOLD: f64 = 0.4;

/// Weights of the explicit categories in the combined score.
pub const PORN_WEIGHT: f64 = 0.8;
pub const SEXY_WEIGHT: f64 = 0.3;
pub const HENTAI_WEIGHT: f64 = 0.6;

/// Fraction of skin-toned opaque pixels above which the heuristic flags.
pub const SKIN_RATIO_THRESHOLD: f64 = 0.3;

/// Category reported by the heuristic when it flags.
pub const SUSPICIOUS_CONTENT: &str = "Suspicious Content";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One classifier output: a category label and its probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub class_name: String,
    pub probability: f64,
}

impl Prediction {
    pub fn new(class_name: impl Into<String>, probability: f64) -> Self {
        Self {
            class_name: class_name.into(),
            probability,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationResult {
    #[serde(rename = "isNSFW")]
    pub is_nsfw: bool,
    pub confidence: f64,
    pub predictions: Vec<Prediction>,
    pub flagged_categories: Vec<String>,
}

/// Labels produced by the pretrained classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Drawing,
    Hentai,
    Neutral,
    Porn,
    Sexy,
}

impl Category {
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Drawing" => Some(Self::Drawing),
            "Hentai" => Some(Self::Hentai),
            "Neutral" => Some(Self::Neutral),
            "Porn" => Some(Self::Porn),
            "Sexy" => Some(Self::Sexy),
            _ => None,
        }
    }

    /// Explicit categories are strict; the ones expected in hand-drawn
    /// art are lenient.
    pub fn threshold(self) -> f64 {
        match self {
            Self::Porn | Self::Hentai => 0.3,
            Self::Sexy => 0.5,
            Self::Drawing => 0.7,
            Self::Neutral => 0.8,
        }
    }

    /// Only explicit categories can be flagged.
    pub fn is_explicit(self) -> bool {
        matches!(self, Self::Porn | Self::Sexy | Self::Hentai)
    }
}

// ---------------------------------------------------------------------------
// Classifier path
// ---------------------------------------------------------------------------

/// Threshold applied to a raw classifier label.
pub fn threshold_for(label: &str) -> f64 {
    Category::parse(label).map_or(DEFAULT_THRESHOLD, Category::threshold)
}

/// Weighted sum of the explicit category probabilities.
pub fn combined_score(predictions: &[Prediction]) -> f64 {
    let prob = |cat: Category| {
        predictions
            .iter()
            .find(|p| Category::parse(&p.class_name) == Some(cat))
            .map_or(0.0, |p| p.probability)
    };
    prob(Category::Porn) * PORN_WEIGHT
        + prob(Category::Sexy) * SEXY_WEIGHT
        + prob(Category::Hentai) * HENTAI_WEIGHT
}

/// Build a verdict from classifier output.
pub fn evaluate_predictions(predictions: Vec<Prediction>) -> ModerationResult {
    let mut flagged_categories = Vec::new();
    let mut confidence: f64 = 0.0;

    for p in &predictions {
        let explicit = Category::parse(&p.class_name).is_some_and(Category::is_explicit);
        if explicit && p.probability > threshold_for(&p.class_name) {
            flagged_categories.push(p.class_name.clone());
            confidence = confidence.max(p.probability);
        }
    }

    let is_nsfw =
        !flagged_categories.is_empty() || combined_score(&predictions) > COMBINED_SCORE_THRESHOLD;

    ModerationResult {
        is_nsfw,
        confidence,
        predictions,
        flagged_categories,
    }
}

// ---------------------------------------------------------------------------
// Pixel heuristic
// ---------------------------------------------------------------------------

/// Fixed RGB skin-tone rule covering darker and very light tones.
pub fn is_skin_tone(r: u8, g: u8, b: u8) -> bool {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    let warm = r > 95 && g > 40 && b > 20 && r > g && r > b && r - g > 15 && r - b > 15;
    let pale = r > 220 && g > 210 && b > 170 && (r - g).abs() <= 15 && r >= g && g >= b;
    warm || pale
}

/// Fraction of painted pixels that are skin-toned. 0 when nothing is
/// painted.
///
/// Painted means non-transparent and not the white canvas background. Pure
/// white satisfies the pale skin rule, so counting it would flag every
/// rendered canvas.
pub fn skin_tone_ratio(img: &RgbaImage) -> f64 {
    let mut opaque = 0u64;
    let mut skin = 0u64;
    for px in img.pixels() {
        let [r, g, b, a] = px.0;
        if a > 0 && (r, g, b) != (255, 255, 255) {
            opaque += 1;
            if is_skin_tone(r, g, b) {
                skin += 1;
            }
        }
    }
    if opaque == 0 {
        0.0
    } else {
        skin as f64 / opaque as f64
    }
}

/// Heuristic verdict for when no classifier is available.
pub fn analyze_pixels(img: &RgbaImage) -> ModerationResult {
    let suspicious = skin_tone_ratio(img) > SKIN_RATIO_THRESHOLD;
    let (confidence, neutral, sexy) = if suspicious {
        (0.6, 0.4, 0.6)
    } else {
        (0.1, 0.9, 0.1)
    };
    ModerationResult {
        is_nsfw: suspicious,
        confidence,
        predictions: vec![
            Prediction::new("Neutral", neutral),
            Prediction::new("Sexy", sexy),
        ],
        flagged_categories: if suspicious {
            vec![SUSPICIOUS_CONTENT.to_string()]
        } else {
            Vec::new()
        },
    }
}
