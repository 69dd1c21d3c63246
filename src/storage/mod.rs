//! Storage layer
//!
//! Configuration file management (TOML) and in-memory token resolution.

use crate::error::StorageError;

pub mod config;
pub mod credentials;

type Result<T> = std::result::Result<T, StorageError>;
