//! Domain types, ports and services for the user registry.
//!
//! Purpose: hold the registry rules independently of HTTP and storage. Values
//! are validated on construction, ports describe what the registry needs from
//! and offers to adapters, and [`UsersService`] enforces uniqueness and the
//! partial-update merge.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - TraceId (alias to `trace_id::TraceId`): request correlation id.
//! - User (alias to `user::User`): registered user record.
//! - UsersService: implementation of the user driving ports.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
mod user_validation;
mod users_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, Gender, PersonName, User, UserDetails, UserDetailsPatch, UserField, UserId,
    UserValidationError,
};
pub use self::user_validation::{parse_date_of_birth, validate_new_user, validate_user_patch};
pub use self::users_service::UsersService;
