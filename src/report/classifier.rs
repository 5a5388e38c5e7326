//! Classification client
//!
//! Uploads a report image to `POST {classifier_url}/predict` and reads back
//! the detected category with its confidence.

use log::debug;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::draft::Attachment;
use crate::error::ClassifyError;

const PREDICT_PATH: &str = "/predict";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub prediction: String,
    /// In `[0, 1]`.
    pub confidence: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictBody {
    Prediction(Prediction),
    Failure { error: String },
}

pub struct ClassifierClient {
    http: reqwest::Client,
    predict_url: String,
}

impl ClassifierClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClassifyError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifyError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            predict_url: format!("{}{}", base_url.trim_end_matches('/'), PREDICT_PATH),
        })
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }

    pub async fn predict(&self, image: &Attachment) -> Result<Prediction, ClassifyError> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| ClassifyError::Transport(format!("invalid content type: {e}")))?;
        let form = Form::new().part("file", part);

        debug!("POST {} with {}", self.predict_url, image.file_name);
        let response = self
            .http
            .post(&self.predict_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;

        let body = serde_json::from_slice::<PredictBody>(&bytes);
        if !status.is_success() {
            return Err(match body {
                Ok(PredictBody::Failure { error }) => ClassifyError::Service(error),
                _ => ClassifyError::Service(format!("HTTP {status}")),
            });
        }

        match body {
            Ok(PredictBody::Prediction(prediction)) => check_prediction(prediction),
            Ok(PredictBody::Failure { error }) => Err(ClassifyError::Service(error)),
            Err(e) => Err(ClassifyError::MalformedResponse(e.to_string())),
        }
    }
}

fn check_prediction(prediction: Prediction) -> Result<Prediction, ClassifyError> {
    if !(0.0..=1.0).contains(&prediction.confidence) {
        return Err(ClassifyError::MalformedResponse(format!(
            "confidence {} outside [0, 1]",
            prediction.confidence
        )));
    }
    if prediction.prediction.trim().is_empty() {
        return Err(ClassifyError::MalformedResponse("empty prediction".into()));
    }
    Ok(prediction)
}
