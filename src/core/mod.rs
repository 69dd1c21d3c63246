//! Acquisition layer: pagination, the per-resource services and the report
//! they are collected into.

pub mod context;
pub mod pagination;
pub mod report;
pub mod services;
