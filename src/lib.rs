//! Acquisition of SonarQube analysis data for reporting
//!
//! Issues (with the language of their rule), issue facets, quality profiles
//! and server information are fetched page by page from a SonarQube server
//! and collected into a [`core::report::ReportModel`].

pub use error::AppError;

/// Main architecture layers (dependency flow: CLI → Core → Storage)
pub mod cli; // Command-line interface
pub mod core; // Acquisition services and report collection
pub mod storage; // Configuration and credentials

/// Support modules (used across layers)
pub mod api; // Server client, models and request templates
pub mod display; // Table output
pub mod error; // Error handling
pub mod export; // Report files
pub mod utils; // Shared utilities and helpers

pub type Result<T> = std::result::Result<T, AppError>;
