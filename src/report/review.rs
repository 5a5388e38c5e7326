//! Prediction review
//!
//! Compares what the citizen selected with what the classifier saw.

use std::fmt;

use super::classifier::Prediction;
use super::draft::Category;

pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionReview {
    Consistent,
    CategoryMismatch { selected: Category, detected: String },
    LowConfidence { confidence: f64 },
}

impl fmt::Display for PredictionReview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionReview::Consistent => write!(f, "Prediction matches the selected category"),
            PredictionReview::CategoryMismatch { selected, detected } => write!(
                f,
                "You selected \"{selected}\", but the image looks like \"{detected}\". Please recheck before submitting."
            ),
            PredictionReview::LowConfidence { confidence } => write!(
                f,
                "The classifier is not confident about this image (confidence: {:.1}%). Please double-check your image and category.",
                confidence * 100.0
            ),
        }
    }
}

/// A mismatch is reported before low confidence.
pub fn review_prediction(selected: Category, prediction: &Prediction, threshold: f64) -> PredictionReview {
    if prediction.prediction != selected.as_str() {
        return PredictionReview::CategoryMismatch {
            selected,
            detected: prediction.prediction.clone(),
        };
    }

    if prediction.confidence < threshold {
        return PredictionReview::LowConfidence {
            confidence: prediction.confidence,
        };
    }

    PredictionReview::Consistent
}
