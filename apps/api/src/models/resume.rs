use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Shown whenever any form field is left blank.
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields before generating the resume.";

/// The six free-text fields captured by the resume form.
///
/// Values are passed to the prompt verbatim; the only constraint is that
/// none may be empty. Absent form keys deserialize as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
}

impl ResumeDetails {
    /// Form labels paired with their values, in form order.
    pub fn labelled_fields(&self) -> [(&'static str, &str); 6] {
        [
            ("Full Name", self.name.as_str()),
            ("Email Address", self.email.as_str()),
            ("Phone Number", self.phone.as_str()),
            ("Skills", self.skills.as_str()),
            ("Work Experience", self.experience.as_str()),
            ("Education", self.education.as_str()),
        ]
    }

    /// Labels of every field that is empty. Whitespace counts as content.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.labelled_fields()
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(label, _)| label)
            .collect()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.missing_fields().is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()))
        }
    }
}

/// Outcome of a successful generation.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedResume {
    /// Raw model output, exactly as written into the PDF.
    pub text: String,
    pub pdf_path: PathBuf,
    pub pdf_bytes_len: usize,
    pub page_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ResumeDetails {
        ResumeDetails {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            skills: "Rust, Tokio, PostgreSQL".to_string(),
            experience: "Backend engineer at Acme, 2019-2024".to_string(),
            education: "BSc Computer Science".to_string(),
        }
    }

    #[test]
    fn test_complete_details_validate() {
        assert!(complete().validate().is_ok());
        assert!(complete().missing_fields().is_empty());
    }

    #[test]
    fn test_each_empty_field_is_reported() {
        let mut details = complete();
        details.phone = String::new();
        details.education = String::new();

        assert_eq!(details.missing_fields(), vec!["Phone Number", "Education"]);
        match details.validate() {
            Err(AppError::Validation(msg)) => assert_eq!(msg, MISSING_FIELDS_MESSAGE),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_whitespace_only_field_counts_as_filled() {
        let mut details = complete();
        details.name = "   ".to_string();
        details.skills = "\n".to_string();

        assert!(details.missing_fields().is_empty());
        assert!(details.validate().is_ok());
    }

    #[test]
    fn test_absent_form_keys_default_to_empty() {
        let details: ResumeDetails =
            serde_json::from_value(serde_json::json!({"name": "Jane Doe"})).unwrap();
        assert_eq!(details.name, "Jane Doe");
        assert_eq!(details.missing_fields().len(), 5);
    }
}
