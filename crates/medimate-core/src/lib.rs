//! # medimate-core
//!
//! The deterministic triage engine for the MediMate symptom checker.
//!
//! This crate provides:
//! - The two seams the rest of the workspace depends on (`AnalysisBackend`,
//!   `HistoryStore`)
//! - `SymptomAnalyzer`, the local rule-based backend: emergency screen,
//!   condition matching, ranking, confidence and advice
//! - The pure scoring functions it is built from
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use medimate_catalog::Catalog;
//! use medimate_core::SymptomAnalyzer;
//!
//! let analyzer = SymptomAnalyzer::new(Arc::new(Catalog::embedded()?));
//! let result = analyzer.analyze(&input);
//! ```

pub mod analyzer;
pub mod scoring;
pub mod traits;

pub use analyzer::SymptomAnalyzer;
pub use scoring::DurationBand;
pub use traits::{AnalysisBackend, HistoryStore};
