//! # ACMS Common Library
//!
//! Shared code for the Airport Compliance Management System:
//! - Domain classification types (sizes, categories, tiers, statuses)
//! - Policy constants (thresholds and inference tables)
//! - Database models, schema and queries
//! - Common error type
//! - Configuration loading

pub mod config;
pub mod db;
pub mod error;
pub mod policy;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    AirportSize, AirportType, ComplianceStatus, EvaluationMode, RequirementTier, SafetyCategory,
    UsageClass,
};
