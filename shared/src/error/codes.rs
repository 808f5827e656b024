//! Unified error codes for the Alumina variant engine
//!
//! Error codes are shared between the engine, the host client and any
//! embedding application. They are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Template errors
//! - 2xxx: Attribute errors
//! - 3xxx: Variant errors
//! - 4xxx: Document errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 6,
    /// Value out of range
    ValueOutOfRange = 7,

    // ==================== 1xxx: Template ====================
    /// Template item not found
    TemplateNotFound = 1001,
    /// Item is not configured to create variants
    NotATemplate = 1002,
    /// Template defines no variant attributes
    TemplateNoAttributes = 1003,
    /// Template defines more attributes than the engine supports
    TemplateTooManyAttributes = 1004,

    // ==================== 2xxx: Attribute ====================
    /// Item attribute not found
    AttributeNotFound = 2001,
    /// Item attribute has no values configured
    AttributeNoValues = 2002,
    /// Attribute value is outside the template definition
    AttributeValueNotAllowed = 2003,

    // ==================== 3xxx: Variant ====================
    /// No variant matches the requested attribute values
    VariantNotFound = 3001,
    /// Variant creation failed on the host
    VariantCreateFailed = 3002,
    /// Item not found
    ItemNotFound = 3101,

    // ==================== 4xxx: Document ====================
    /// Line item row not found
    RowNotFound = 4001,
    /// Document has no rows to process
    DocumentEmpty = 4002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Template
            ErrorCode::TemplateNotFound => "Template item not found",
            ErrorCode::NotATemplate => "Item is not configured to create variants",
            ErrorCode::TemplateNoAttributes => "Template must define at least one variant attribute",
            ErrorCode::TemplateTooManyAttributes => {
                "Template has more attributes than the engine supports"
            }

            // Attribute
            ErrorCode::AttributeNotFound => "Item attribute not found",
            ErrorCode::AttributeNoValues => "Item attribute has no values configured",
            ErrorCode::AttributeValueNotAllowed => {
                "Attribute value is outside the template definition"
            }

            // Variant
            ErrorCode::VariantNotFound => "No variant matches the requested attribute values",
            ErrorCode::VariantCreateFailed => "Variant creation failed",
            ErrorCode::ItemNotFound => "Item not found",

            // Document
            ErrorCode::RowNotFound => "Line item row not found",
            ErrorCode::DocumentEmpty => "Document has no rows to process",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::RequiredField),
            7 => Ok(ErrorCode::ValueOutOfRange),

            // Template
            1001 => Ok(ErrorCode::TemplateNotFound),
            1002 => Ok(ErrorCode::NotATemplate),
            1003 => Ok(ErrorCode::TemplateNoAttributes),
            1004 => Ok(ErrorCode::TemplateTooManyAttributes),

            // Attribute
            2001 => Ok(ErrorCode::AttributeNotFound),
            2002 => Ok(ErrorCode::AttributeNoValues),
            2003 => Ok(ErrorCode::AttributeValueNotAllowed),

            // Variant
            3001 => Ok(ErrorCode::VariantNotFound),
            3002 => Ok(ErrorCode::VariantCreateFailed),
            3101 => Ok(ErrorCode::ItemNotFound),

            // Document
            4001 => Ok(ErrorCode::RowNotFound),
            4002 => Ok(ErrorCode::DocumentEmpty),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
