//! Error code registry for the modkit framework
//!
//! This crate maps small positive integer codes to error semantics shared by
//! HTTP-facing modules. It includes:
//! - Process-unique code identities (`Code`, `CodeAllocator`)
//! - HTTP status classification of codes (`status`)
//! - A concurrently readable, atomically swapped message table (`MessageRegistry`)
//! - The built-in catalog of common codes and messages (`catalog`)
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod code;
pub mod config;
pub mod error;
pub mod registry;
pub mod status;

// Re-export commonly used types
pub use catalog::{CommonCodes, common};
pub use code::{Code, CodeAllocator, CodeDef, ErrorCode, new_code};
pub use config::{ConfigError, MessagesConfig};
pub use error::CodeError;
pub use registry::{MessageRegistry, MessageTable, register, registry};
