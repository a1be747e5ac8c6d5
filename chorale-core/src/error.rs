//! Structural errors for the chorale core
//!
//! Rule violations are never errors: they are collected as
//! [`Diagnostic`](crate::rules::Diagnostic)s. The variants here cover the
//! preconditions a check cannot run without.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChoraleError {
    #[error("Chorale must contain at least one note per voice")]
    EmptyChorale,

    #[error("Voice lengths differ: {soprano} soprano, {alto} alto, {tenor} tenor, {bass} bass notes")]
    MismatchedVoices {
        soprano: usize,
        alto: usize,
        tenor: usize,
        bass: usize,
    },

    #[error("Invalid pitch '{0}'")]
    InvalidPitch(String),

    #[error("Line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("No chords to walk")]
    EmptyProgression,

    #[error("Inversion {index} does not exist for '{label}'")]
    InvalidInversion { label: String, index: usize },

    #[error("Cannot label chord {0}")]
    Unlabelable(String),

    #[error("Unknown rule '{0}'")]
    UnknownRule(String),
}

pub type Result<T> = std::result::Result<T, ChoraleError>;
