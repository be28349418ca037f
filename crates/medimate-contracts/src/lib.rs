//! # medimate-contracts
//!
//! Shared types, wire shapes, and errors for the MediMate triage service.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions and error types.

pub mod assessment;
pub mod condition;
pub mod error;
pub mod history;
pub mod symptom;
pub mod verify;
