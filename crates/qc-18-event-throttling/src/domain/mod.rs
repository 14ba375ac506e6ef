//! Domain layer for Event Throttling
//!
//! This layer contains:
//! - Validator snapshots in canonical order
//! - Attendance tracking (online/offline classification)
//! - Emission decisions and their reasons
//! - Invariants checked by tests and debug builds
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod attendance;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod validators;
pub mod value_objects;

pub use attendance::{AttendanceList, ValidatorAttendance};
pub use entities::{DominantSet, EmissionDecision, EmitReason, EventHeader};
pub use errors::{ThrottlerError, ThrottlerResult};
pub use invariants::{invariant_dominant_coverage, invariant_dominant_minimality};
pub use validators::{Validators, ValidatorsBuilder};
pub use value_objects::*;
