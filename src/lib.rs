//! # Chorale
//!
//! Interactive front end for [`chorale_core`]: a REPL for entering
//! four-voice chorales slice by slice or loading them from files, and
//! checking them for voice-leading and harmonic-progression errors.
//!
//! ## Modules
//!
//! - `commands`: the command registry and the handlers behind each REPL
//!   command (`add`, `load`, `check`, `key`, `enable`, ...).
//! - `repl`: the Read-Eval-Print Loop, including the file watcher that
//!   re-checks a chorale file whenever it is saved.

pub mod commands;
pub mod repl;

pub use crate::commands::{create_registry, read_chorale, CommandContext, CommandResult};
pub use crate::repl::{start, Repl};
