//! # medimate-verify
//!
//! Verification for the MediMate triage service.
//!
//! Two verifiers sit on either side of the analyzer:
//!
//! - [`RequestVerifier`] checks a raw request body against the endpoint's
//!   JSON Schema plus semantic rules before it is deserialized.
//! - [`ResultVerifier`] checks an `AssessmentResult` against the service's
//!   output invariants before it is returned or saved.
//!
//! Both collect every failure into a `VerificationReport` rather than
//! stopping at the first.

pub mod request;
pub mod result;

pub use request::RequestVerifier;
pub use result::ResultVerifier;
