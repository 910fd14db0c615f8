//! Application-level error type returned by all IPC command handlers.
//!
//! `AppError` is serialized to `{ kind, message }` JSON payloads so the
//! frontend can pattern-match on a stable `kind` string and pick the right
//! notification style.

use crate::brief::ValidationError;

/// Top-level error returned by command handlers.
///
/// Serialized with serde's adjacently-tagged representation:
/// `{ "kind": "<variant>", "message": "<human-readable text>" }`
#[derive(Debug, thiserror::Error, serde::Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum AppError {
    /// Imported or loaded content does not match the brief shape.
    #[error("{0}")]
    SchemaValidation(String),

    /// The PDF document could not be built. No artifact is produced.
    #[error("{0}")]
    Render(String),

    /// The archive endpoint is unreachable, rejected the request, or is not
    /// configured. Never blocks the local download.
    #[error("{0}")]
    ArchiveUnavailable(String),

    /// A form event referred to a list item that does not exist.
    #[error("{0}")]
    InvalidEdit(String),

    /// A destructive action was invoked without the user's confirmation.
    #[error("confirmation required")]
    ConfirmationRequired,

    /// A requested resource (saved brief, etc.) was not found.
    #[error("{0}")]
    NotFound(String),

    /// The local snapshot store could not be read or written.
    #[error("{0}")]
    Store(String),

    /// The configuration file could not be read or parsed.
    #[error("{0}")]
    Config(String),

    /// A generic I/O error, stringified at the boundary so it stays
    /// serializable.
    #[error("{0}")]
    Io(String),
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        Self::SchemaValidation(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    /// Convert an [`std::io::Error`] into an [`AppError::Io`].
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::FieldIssue;

    #[test]
    fn schema_validation_serializes_to_kind_message() {
        let err = AppError::SchemaValidation("general: required section missing".to_string());
        let value = serde_json::to_value(&err).expect("serialize AppError::SchemaValidation");
        assert_eq!(value["kind"], "SchemaValidation");
        assert_eq!(value["message"], "general: required section missing");
    }

    #[test]
    fn archive_unavailable_serializes_to_kind_message() {
        let err = AppError::ArchiveUnavailable("connection refused".to_string());
        let value = serde_json::to_value(&err).expect("serialize");
        assert_eq!(value["kind"], "ArchiveUnavailable");
        assert_eq!(value["message"], "connection refused");
    }

    #[test]
    fn confirmation_required_serializes_with_kind() {
        let value = serde_json::to_value(&AppError::ConfirmationRequired).expect("serialize");
        assert_eq!(value["kind"], "ConfirmationRequired");
    }

    #[test]
    fn from_validation_error_produces_schema_validation_variant() {
        let err = ValidationError {
            issues: vec![FieldIssue {
                path: "general.priority".to_string(),
                reason: "expected one of Low, Medium, High, Urgent".to_string(),
            }],
        };
        let app_err = AppError::from(err);
        match app_err {
            AppError::SchemaValidation(msg) => assert!(msg.contains("general.priority")),
            other => panic!("expected SchemaValidation, got {other:?}"),
        }
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let app_err = AppError::from(io_err);
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn app_error_display_is_human_readable() {
        assert_eq!(AppError::ConfirmationRequired.to_string(), "confirmation required");
        assert_eq!(
            AppError::Render("font unavailable".to_string()).to_string(),
            "font unavailable"
        );
    }
}
