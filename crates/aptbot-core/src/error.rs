use thiserror::Error;

pub type Result<T> = std::result::Result<T, AptError>;

#[derive(Debug, Error)]
pub enum AptError {
    #[error("invalid source: {0}")]
    InvalidSource(String),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl AptError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSource(_) => "INVALID_SOURCE",
            Self::InvalidSnapshot(_) => "INVALID_SNAPSHOT",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_stable_for_domain_variants() {
        assert_eq!(
            AptError::InvalidSource("x".to_string()).code(),
            "INVALID_SOURCE"
        );
        assert_eq!(
            AptError::InvalidSnapshot("x".to_string()).code(),
            "INVALID_SNAPSHOT"
        );
        assert_eq!(
            AptError::Validation("x".to_string()).code(),
            "VALIDATION_FAILED"
        );
    }

    #[test]
    fn json_errors_convert_transparently() {
        let err: AptError = serde_json::from_str::<serde_json::Value>("{")
            .expect_err("must fail")
            .into();
        assert_eq!(err.code(), "JSON_ERROR");
    }
}
