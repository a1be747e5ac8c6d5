//! # Chorale Core
//!
//! Rule engine for four-voice chorales: voice-leading passes over the
//! melodic lines and a functional-harmony grammar over the chord labels.
//! Every violation is reported as a [`Diagnostic`]; only malformed input
//! is an error.
//!
//! ## Features
//!
//! - **colored**: Colored terminal rendering of reports (default)
//! - **serde**: Serialization of diagnostics, configs and reports, plus
//!   `Report::to_json`
//!
//! ## Example
//!
//! ```
//! use chorale_core::{Chorale, ChoraleChecker};
//!
//! let chorale = Chorale::from_lines(
//!     "E5 F5 D5 C5",
//!     "G4 A4 G4 E4",
//!     "C4 C4 B3 G3",
//!     "C3 F3 G3 C3",
//! )?;
//! let report = ChoraleChecker::default().check(&chorale)?;
//! assert!(report.is_clean());
//! # Ok::<(), chorale_core::ChoraleError>(())
//! ```

pub mod checker;
pub mod config;
pub mod error;
pub mod report;
pub mod rules;
pub mod types;

// Re-export commonly used types
pub use checker::ChoraleChecker;
pub use config::CheckerConfig;
pub use error::{ChoraleError, Result};
pub use report::Report;
pub use rules::{Diagnostic, RuleKind};
pub use types::{Chorale, Chord, Key, Mode, Pitch, Voice, VoiceId};
