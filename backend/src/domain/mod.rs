//! Domain primitives, ports and services.
//!
//! Purpose: define the user record model, the error taxonomy surfaced to
//! clients, and the use-case service that sits between inbound adapters and
//! storage. Nothing in this module depends on HTTP or a concrete store.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and its stable identifier.
//! - User / NewUser / UserId: the user record and its inputs.
//! - RequestContext: cancellation and deadline carried through every call.
//! - UserRegistryService: the driving-port implementation.

pub mod error;
pub mod ports;
pub mod request_context;
pub mod trace_id;
pub mod user;
mod user_registry_service;

pub use self::error::{Error, ErrorCode};
pub use self::request_context::{CancellationReason, RequestContext};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, User, UserAttributes, UserId, UserIdParseError};
pub use self::user_registry_service::UserRegistryService;

