//! Per-domain threshold tables and result synthesizers.
//!
//! Each module owns its reading type, `classify` table, bilingual
//! message/recommendation tables, plausibility bounds and a seedable
//! `sample` for offline mode.

pub mod anemia;
pub mod blood_pressure;
pub mod glucose;
pub mod infection;
pub mod nutrition;
pub mod retake;

pub use retake::retake;
