//! Alumina Host - client boundary to the business-management platform
//!
//! Provides the [`HostClient`] trait the engine talks through, a
//! reqwest-based [`HttpHost`] speaking the platform's `ApiResponse`
//! envelope, and an in-memory [`MockHost`] for tests.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod mock;

pub use client::{HostClient, SelectionValues, VariantOverrides};
pub use config::HostConfig;
pub use error::{HostError, HostResult};
pub use http::HttpHost;
pub use mock::{CallCounts, MockHost};

// Re-export shared types for convenience
pub use shared::{ApiResponse, ResolvedVariant, TemplateAttributes};
