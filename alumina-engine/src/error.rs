//! Engine error types

use alumina_host::HostError;
use shared::AppError;
use thiserror::Error;

/// Engine error type
#[derive(Debug, Error)]
pub enum EngineError {
    /// A remote call against the host failed
    #[error("host call failed: {0}")]
    Host(#[from] HostError),

    /// Domain-level failure with a structured error code
    #[error(transparent)]
    App(#[from] AppError),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn test_from_app_error() {
        let err: EngineError = AppError::new(ErrorCode::TemplateNotFound).into();
        assert!(matches!(err, EngineError::App(_)));
        assert_eq!(format!("{}", err), "Template item not found");
    }

    #[test]
    fn test_from_host_error() {
        let err: EngineError = HostError::InvalidResponse("bad".to_string()).into();
        assert_eq!(format!("{}", err), "host call failed: Invalid response: bad");
    }
}
