//! Issue reporting
//!
//! Report drafts, their validation, and the optional image classification
//! cross-check.

pub mod classifier;
pub mod draft;
pub mod form;
pub mod review;

pub use classifier::{ClassifierClient, Prediction};
pub use draft::{Attachment, Category, IssueDraft, Location};
pub use form::ReportForm;
pub use review::{DEFAULT_CONFIDENCE_THRESHOLD, PredictionReview, review_prediction};
