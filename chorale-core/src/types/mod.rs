// chorale-core/src/types/mod.rs

pub mod chorale;
pub mod chord;
pub mod interval;
pub mod key;
pub mod pitch;
pub mod roman_numeral;

pub use chorale::{Chorale, Note, Slice, Voice, VoiceId};
pub use chord::{Chord, SeventhQuality, TriadQuality};
pub use interval::{GenericInterval, Interval, Motion, Quality};
pub use key::{FixedKey, Key, KeyFinder, KrumhanslKeyFinder, Mode};
pub use pitch::{Pitch, Step};
pub use roman_numeral::*;
