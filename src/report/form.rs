//! Report form checks
//!
//! Runs the pre-submission checks on a draft: required fields, then (when an
//! image is attached and a classifier is available) the classification
//! cross-check against the selected category.

use log::{debug, info};

use super::classifier::{ClassifierClient, Prediction};
use super::draft::IssueDraft;
use super::review::{DEFAULT_CONFIDENCE_THRESHOLD, PredictionReview, review_prediction};
use crate::error::ReportError;

pub struct ReportForm {
    classifier: Option<ClassifierClient>,
    confidence_threshold: f64,
}

impl ReportForm {
    /// Form without a classifier; only required fields are checked.
    pub fn new() -> Self {
        Self {
            classifier: None,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }

    pub fn with_classifier(classifier: ClassifierClient, confidence_threshold: f64) -> Self {
        Self {
            classifier: Some(classifier),
            confidence_threshold,
        }
    }

    /// Check a draft before it is submitted.
    ///
    /// Returns the prediction when the first image was classified and agrees
    /// with the selected category.
    pub async fn prepare(&self, draft: &IssueDraft) -> Result<Option<Prediction>, ReportError> {
        draft.validate()?;

        let (Some(classifier), Some(image)) = (&self.classifier, draft.images.first()) else {
            debug!("Skipping classification for \"{}\"", draft.title);
            return Ok(None);
        };
        // validate() guarantees a category.
        let Some(selected) = draft.category else {
            return Err(ReportError::MissingFields(vec!["category"]));
        };

        let prediction = classifier.predict(image).await?;
        info!(
            "Classifier detected {} ({:.2}) for \"{}\"",
            prediction.prediction, prediction.confidence, draft.title
        );

        match review_prediction(selected, &prediction, self.confidence_threshold) {
            PredictionReview::Consistent => Ok(Some(prediction)),
            review => Err(ReportError::NeedsReview(review)),
        }
    }
}

impl Default for ReportForm {
    fn default() -> Self {
        Self::new()
    }
}
