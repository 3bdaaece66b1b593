//! depgroup - framework-aware dependency grouping engine
//!
//! Scans a project directory for package manifests (npm, pip, cargo,
//! bundler), detects the frameworks in use, and generates a grouped
//! dependency-update configuration.

pub mod config;
pub mod detect;
pub mod ecosystems;
pub mod grouping;
pub mod model;
pub mod orchestrator;
pub mod parsers;
pub mod readers;
pub mod reports;
