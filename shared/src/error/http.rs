//! HTTP status mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the HTTP status code the host platform reports for this error
    pub fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::Success => StatusCode::OK,

            ErrorCode::ValidationFailed
            | ErrorCode::InvalidRequest
            | ErrorCode::RequiredField
            | ErrorCode::ValueOutOfRange
            | ErrorCode::NotATemplate
            | ErrorCode::TemplateNoAttributes
            | ErrorCode::TemplateTooManyAttributes
            | ErrorCode::AttributeNoValues
            | ErrorCode::AttributeValueNotAllowed
            | ErrorCode::DocumentEmpty => StatusCode::BAD_REQUEST,

            ErrorCode::NotFound
            | ErrorCode::TemplateNotFound
            | ErrorCode::AttributeNotFound
            | ErrorCode::VariantNotFound
            | ErrorCode::ItemNotFound
            | ErrorCode::RowNotFound => StatusCode::NOT_FOUND,

            ErrorCode::AlreadyExists => StatusCode::CONFLICT,

            ErrorCode::TimeoutError => StatusCode::GATEWAY_TIMEOUT,

            ErrorCode::Unknown
            | ErrorCode::VariantCreateFailed
            | ErrorCode::InternalError
            | ErrorCode::NetworkError
            | ErrorCode::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::TemplateNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::VariantNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ErrorCode::AlreadyExists.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
