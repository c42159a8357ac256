/// Portfolio API access
///
/// - `client.rs` - HTTP calls (JSON GET/POST, multipart upload, DELETE)
/// - `error.rs` - failure taxonomy shared by every call

pub mod client;
pub mod error;

pub use client::{ApiClient, JsonResponse};
pub use error::ApiError;
