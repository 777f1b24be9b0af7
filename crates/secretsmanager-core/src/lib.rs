//! # secretsmanager-core
//!
//! Core library for secretsmanager providing:
//! - The `provider:secret-id:secret-key` reference grammar
//! - The error taxonomy shared by every resolution stage
//! - Base64 transport encoding used at the host boundary
//! - Session wire types exchanged with the host

pub mod encoding;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{ProviderKind, SecretReference, SessionParams, SessionParamsResponse};
