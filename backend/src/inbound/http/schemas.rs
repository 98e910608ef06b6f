//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape and are registered under the domain
//! type names.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request path or body could not be decoded.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested user does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The user conflicts with one that is already stored.
    #[schema(rename = "already_exists")]
    AlreadyExists,
    /// The request was cancelled before it reached storage.
    #[schema(rename = "cancelled")]
    Cancelled,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Server-side failures are returned as `internal_error` with a generic
/// message; the full detail is only logged.
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message, prefixed with the failing operation.
    #[schema(example = "users.get: user 7 not found")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
///
/// Any client-supplied attributes are returned alongside `id`.
#[derive(ToSchema)]
#[schema(as = User, example = json!({"id": 1, "name": "Alice"}))]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Storage-assigned identifier, starting at 1.
    #[schema(example = 1, minimum = 1)]
    id: i64,
}

/// OpenAPI schema for [`crate::domain::NewUser`].
///
/// An arbitrary JSON object. An `id` member is accepted and ignored.
#[derive(ToSchema)]
#[schema(as = NewUser, example = json!({"name": "Alice"}))]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct NewUserSchema {
    /// Ignored; storage assigns identifiers and the path names the target.
    #[schema(nullable)]
    id: Option<i64>,
}
