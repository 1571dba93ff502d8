//! Intake data captured at session creation.
//!
//! An intake record is supplied once when a screening session starts and
//! is never mutated afterwards; a fresh session creation replaces it
//! wholesale.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::error::IntakeError;

/// Maximum accepted length of a medical record identifier.
pub const MAX_MEDICAL_RECORD_ID_LEN: usize = 64;

/// Questionnaire language selected by the guardian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Arabic,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => write!(f, "english"),
            Language::Arabic => write!(f, "arabic"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" => Ok(Language::English),
            "arabic" => Ok(Language::Arabic),
            other => Err(format!("invalid language: '{other}'")),
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

/// Parameters supplied once at session creation.
///
/// Captured from the intake screens and immutable for the lifetime of
/// the session. The medical record identifier ties the screening to the
/// clinic's patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeData {
    pub guardian_name: String,
    pub child_name: String,
    /// Child age in months. Must be positive.
    pub child_age_months: u32,
    pub language: Language,
    pub medical_record_id: String,
}

impl IntakeData {
    /// Validate the intake bounds before any network call.
    pub fn validate(&self) -> Result<(), IntakeError> {
        if self.child_age_months == 0 {
            return Err(IntakeError::InvalidChildAge);
        }
        if self.medical_record_id.is_empty() {
            return Err(IntakeError::EmptyMedicalRecordId);
        }
        if self.medical_record_id.len() > MAX_MEDICAL_RECORD_ID_LEN {
            return Err(IntakeError::MedicalRecordIdTooLong {
                max: MAX_MEDICAL_RECORD_ID_LEN,
                got: self.medical_record_id.len(),
            });
        }
        Ok(())
    }
}
