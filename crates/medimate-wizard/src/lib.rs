//! # medimate-wizard
//!
//! The multi-step symptom-checker wizard for MediMate.
//!
//! A [`Wizard`] walks one patient through category, symptoms, severity and
//! duration, and demographics, then submits the assembled assessment to an
//! analysis backend with a local fallback. Clients drive it by dispatching
//! [`WizardCommand`]s; each forward move is validated.
//!
//! [`scenarios`] holds scripted walkthroughs of fictional patients, used by
//! the demo CLI.
//!
//! ```rust,ignore
//! let mut wizard = Wizard::new(catalog.clone());
//! wizard.dispatch(WizardCommand::SelectCategory(SymptomCategory::Respiratory))?;
//! wizard.dispatch(WizardCommand::Next)?;
//! // ...
//! let result = wizard.submit(&remote, &SymptomAnalyzer::new(catalog))?;
//! ```

pub mod scenarios;
pub mod wizard;

pub use scenarios::Scenario;
pub use wizard::{Wizard, WizardCommand, WizardStep};
