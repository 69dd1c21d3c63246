//! Utils module - Shared utilities and helpers

/// Conversion of transport and decoding failures into API errors
pub mod error_helpers;

/// Logger initialisation for the binary
pub mod logging;

/// Display-width aware text helpers
pub mod text;

/// Input validation and sanitization utilities
pub mod validation;
