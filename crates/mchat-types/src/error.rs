use thiserror::Error;

/// Errors from validating intake parameters, raised before any network
/// call.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("child age must be a positive number of months")]
    InvalidChildAge,

    #[error("medical record id must not be empty")]
    EmptyMedicalRecordId,

    #[error("medical record id exceeds {max} characters (got {got})")]
    MedicalRecordIdTooLong { max: usize, got: usize },
}

/// Errors from remote screening service calls.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("service rejected request (HTTP {status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Errors from the persistent snapshot store.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(String),

    #[error("snapshot serialization error: {0}")]
    Serialize(String),

    #[error("snapshot is malformed: {0}")]
    Malformed(String),
}

/// Errors returned by session context operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no active session")]
    NoActiveSession,

    #[error("invalid intake: {0}")]
    Intake(#[from] IntakeError),

    #[error("{0}")]
    Service(#[from] ServiceError),
}
