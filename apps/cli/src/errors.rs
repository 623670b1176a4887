use thiserror::Error;

/// Application-level error type.
/// Every variant carries an actionable message; `main` logs the error and
/// exits non-zero.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Input error: {0}")]
    Input(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message_is_preserved() {
        let err = AppError::Validation("`cv.name` must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: `cv.name` must not be empty"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(_)));
    }
}
