//! # QC-18: Event Emission Throttling Subsystem
//!
//! Decides, on every emission opportunity, whether the local validator
//! produces a new DAG event or stays silent. Only a stake-dominant subset
//! of validators needs to emit for frames to advance; the others are
//! suppressed until they are needed to cover offline stake.
//!
//! ## Architecture
//!
//! - **Domain**: Validators snapshot, events, attendance, decisions
//! - **Algorithms**: Dominant set and needed stake (pure)
//! - **Ports**: Inbound (EmissionThrottler) and Outbound (WorldReader, ConfigProvider)
//! - **Application**: ThrottlingState, the per-validator decision engine
//! - **Adapters**: SharedWorld snapshot store, TOML/env configuration
//!
//! ```text
//! ┌───────────────┐  candidate   ┌──────────────────┐  snapshots  ┌─────────────┐
//! │ Event emitter │ ───────────▶ │ ThrottlingState  │ ◀────────── │ WorldReader │
//! └───────────────┘ ◀─────────── │  dominant set    │             └─────────────┘
//!                    decision    │  attendance      │
//!                                └──────────────────┘
//! ```
//!
//! ## Decision Policy
//!
//! An event is emitted when any of the following holds, otherwise skipped:
//! - throttling is disabled
//! - the event carries transactions
//! - it is the validator's first event of the epoch
//! - the validator belongs to the dominant set
//! - dominant validators went offline and the validator covers their stake
//! - the validator has been silent for half of the shortest inactivity timeout
//! - frames stopped advancing for `frame_stall_timeout` suppressed rounds
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: The dominant set covers the needed stake, or is the whole set
//! - **INVARIANT-2**: The dominant set is the shortest canonical prefix doing so
//!
//! ## Usage Example
//!
//! ```ignore
//! use qc_18_event_throttling::{
//!     EmissionThrottler, SharedWorld, ThrottlerConfig, ThrottlingState, Rules, Validators,
//! };
//!
//! let world = SharedWorld::new(validators, epoch, Rules::default());
//! let mut throttler = ThrottlingState::new(my_id, ThrottlerConfig::enabled(), world.clone())?;
//!
//! if throttler.can_skip_event_emission(&candidate).should_emit() {
//!     broadcast(candidate);
//! }
//! ```

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;

pub use adapters::{ConfigError, SharedWorld, StaticConfigProvider, TomlConfigProvider};
pub use algorithms::{compute_dominant_set, compute_needed_stake};
pub use application::ThrottlingState;
pub use config::ThrottlerConfig;
pub use domain::entities::*;
pub use domain::errors::{ThrottlerError, ThrottlerResult};
pub use domain::value_objects::*;
pub use domain::{AttendanceList, ValidatorAttendance, Validators, ValidatorsBuilder};
pub use ports::inbound::EmissionThrottler;
pub use ports::outbound::{ConfigProvider, EconomyRules, Rules, WorldReader};
