//! Issue report draft
//!
//! The citizen-facing report being filled in, and its required-field check.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ReportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pothole,
    Garbage,
    Waterlogging,
    Streetlight,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Pothole,
        Category::Garbage,
        Category::Waterlogging,
        Category::Streetlight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pothole => "pothole",
            Category::Garbage => "garbage",
            Category::Waterlogging => "waterlogging",
            Category::Streetlight => "streetlight",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

/// A file attached to a report.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueDraft {
    pub title: String,
    pub description: String,
    pub category: Option<Category>,
    pub location: Location,
    pub images: Vec<Attachment>,
    pub voice_notes: Vec<Attachment>,
}

impl IssueDraft {
    /// Title, description and category must all be filled in.
    pub fn validate(&self) -> Result<(), ReportError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.category.is_none() {
            missing.push("category");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ReportError::MissingFields(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_are_listed() {
        let draft = IssueDraft {
            title: "  ".into(),
            ..IssueDraft::default()
        };
        assert_eq!(
            draft.validate(),
            Err(ReportError::MissingFields(vec!["title", "description", "category"]))
        );

        let draft = IssueDraft {
            title: "Broken lamp".into(),
            description: "Dark since Monday".into(),
            category: Some(Category::Streetlight),
            ..IssueDraft::default()
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("Pothole".parse::<Category>(), Ok(Category::Pothole));
        assert_eq!(" garbage ".parse::<Category>(), Ok(Category::Garbage));
        assert!("graffiti".parse::<Category>().is_err());
    }

    #[test]
    fn test_missing_fields_message() {
        let err = ReportError::MissingFields(vec!["title", "category"]);
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields: title, category"
        );
    }
}
