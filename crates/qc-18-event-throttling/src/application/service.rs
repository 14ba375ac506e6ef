//! Event Throttling Service
//!
//! Main service implementing EmissionThrottler.
//!
//! Every attempt runs the same pipeline:
//! 1. Reset on the first event of an epoch or on an epoch switch
//! 2. Refresh attendance against the previous online dominant set
//! 3. Recompute the full and the online dominant sets
//! 4. Decide, recording the attempt when emitting

use crate::algorithms::{compute_dominant_set, compute_needed_stake, dominant_stake};
use crate::config::ThrottlerConfig;
use crate::domain::{
    invariant_dominant_coverage, AttendanceList, Attempt, DominantSet, EmissionDecision,
    EmitReason, Epoch, EventHeader, Frame, ThrottlerResult, ValidatorId, Validators, Weight,
};
use crate::metrics;
use crate::ports::inbound::EmissionThrottler;
use crate::ports::outbound::WorldReader;
use tracing::{debug, info, trace};

/// Throttling state of a single validator
///
/// Owned by the emitter of that validator and driven synchronously, one
/// call per emission attempt. Holds no locks; all shared state is read
/// through `W`.
pub struct ThrottlingState<W: WorldReader> {
    validator_id: ValidatorId,
    config: ThrottlerConfig,
    world: W,

    attempt: Attempt,
    last_emission: Attempt,
    attendance: AttendanceList,
    last_dominant_set: DominantSet,
    epoch: Option<Epoch>,

    last_frame: Frame,
    rounds_without_frame_progress: Attempt,
}

impl<W: WorldReader> ThrottlingState<W> {
    /// Create a throttler for `validator_id`, rejecting invalid configs
    pub fn new(validator_id: ValidatorId, config: ThrottlerConfig, world: W) -> ThrottlerResult<Self> {
        config.validate()?;

        info!(
            validator = validator_id,
            enabled = config.enabled,
            threshold = config.dominant_stake_threshold,
            dominating_timeout = config.dominating_timeout,
            non_dominating_timeout = config.non_dominating_timeout,
            "Event throttler created"
        );

        Ok(Self {
            validator_id,
            config,
            world,
            attempt: 0,
            last_emission: 0,
            attendance: AttendanceList::new(),
            last_dominant_set: DominantSet::new(),
            epoch: None,
            last_frame: 0,
            rounds_without_frame_progress: 0,
        })
    }

    /// Install the configuration of a new epoch.
    ///
    /// On error the current configuration and state are kept.
    pub fn reconfigure(&mut self, config: ThrottlerConfig) -> ThrottlerResult<()> {
        config.validate()?;

        info!(
            validator = self.validator_id,
            enabled = config.enabled,
            threshold = config.dominant_stake_threshold,
            "Event throttler reconfigured"
        );

        self.config = config;
        self.reset();
        Ok(())
    }

    pub fn validator_id(&self) -> ValidatorId {
        self.validator_id
    }

    pub fn config(&self) -> &ThrottlerConfig {
        &self.config
    }

    /// Attempts since the last reset
    pub fn attempt(&self) -> Attempt {
        self.attempt
    }

    /// Attempt of the most recent emission (0 if none since the last reset)
    pub fn last_emission(&self) -> Attempt {
        self.last_emission
    }

    pub fn attendance(&self) -> &AttendanceList {
        &self.attendance
    }

    /// Full-stake dominant set of the latest round
    pub fn last_dominant_set(&self) -> &DominantSet {
        &self.last_dominant_set
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    /// Whether the latest round placed this validator outside the dominant set
    pub fn is_suppressed(&self) -> bool {
        self.attempt > 0 && !self.last_dominant_set.contains(self.validator_id)
    }

    /// Subset of `validators` considered online; this validator always is
    fn online_validators(&self, validators: &Validators) -> Validators {
        validators.filter(|id| id == self.validator_id || self.attendance.is_online(id))
    }

    /// Dominant set among online validators, measured against the full stake
    fn compute_online_dominant_set(&self, validators: &Validators, needed: Weight) -> DominantSet {
        compute_dominant_set(&self.online_validators(validators), needed)
    }

    fn check_epoch(&mut self, candidate: &EventHeader, epoch: Epoch) {
        let previous = self.epoch;
        match previous {
            Some(current) if current != epoch => {
                info!(
                    validator = self.validator_id,
                    from = current,
                    to = epoch,
                    "Epoch changed, resetting throttler"
                );
                self.reset();
            }
            _ if candidate.is_genesis() && self.attempt > 0 => {
                info!(
                    validator = self.validator_id,
                    epoch,
                    "First event of epoch, resetting throttler"
                );
                self.reset();
            }
            _ => {}
        }
        self.epoch = Some(epoch);
    }

    fn decide(
        &mut self,
        candidate: &EventHeader,
        dominant_set: &DominantSet,
        online_dominant_set: &DominantSet,
        frame_progressed: bool,
    ) -> EmissionDecision {
        if !self.config.enabled {
            return EmissionDecision::Emit(EmitReason::ThrottlerDisabled);
        }

        if candidate.carries_transactions() {
            return EmissionDecision::Emit(EmitReason::CarriesTransactions);
        }

        if candidate.is_genesis() {
            return EmissionDecision::Emit(EmitReason::Genesis);
        }

        if dominant_set.contains(self.validator_id) {
            self.rounds_without_frame_progress = 0;
            return EmissionDecision::Emit(EmitReason::DominantStake);
        }

        if online_dominant_set.contains(self.validator_id) {
            self.rounds_without_frame_progress = 0;
            debug!(
                validator = self.validator_id,
                attempt = self.attempt,
                "Emitting to cover stake of offline dominant validators"
            );
            return EmissionDecision::Emit(EmitReason::StakeNotDominated);
        }

        // Suppressed validators still emit often enough to be considered
        // online by peers and to stay clear of the missed-block rule.
        let rules = self.world.get_rules();
        let heartbeat_timeout = (self.config.non_dominating_timeout / 2)
            .min(rules.economy.block_missed_slack / 2);
        if self.last_emission.saturating_add(heartbeat_timeout) <= self.attempt {
            self.rounds_without_frame_progress = 0;
            debug!(
                validator = self.validator_id,
                attempt = self.attempt,
                last_emission = self.last_emission,
                heartbeat_timeout,
                "Heartbeat emission"
            );
            return EmissionDecision::Emit(EmitReason::Heartbeat);
        }

        if frame_progressed {
            self.rounds_without_frame_progress = 0;
        } else {
            self.rounds_without_frame_progress += 1;
        }
        let stall_timeout = self.config.frame_stall_timeout;
        if stall_timeout > 0 && self.rounds_without_frame_progress > stall_timeout {
            debug!(
                validator = self.validator_id,
                attempt = self.attempt,
                frame = self.last_frame,
                rounds = self.rounds_without_frame_progress,
                "Frames stalled, forcing emission"
            );
            self.rounds_without_frame_progress = 0;
            return EmissionDecision::Emit(EmitReason::FrameStalled);
        }

        EmissionDecision::Skip
    }
}

impl<W: WorldReader> EmissionThrottler for ThrottlingState<W> {
    fn can_skip_event_emission(&mut self, candidate: &EventHeader) -> EmissionDecision {
        let (validators, epoch) = self.world.get_epoch_validators();
        self.check_epoch(candidate, epoch);

        self.attempt += 1;

        let needed = compute_needed_stake(
            validators.total_weight(),
            self.config.dominant_stake_threshold,
        );

        // Timeouts are chosen by the membership observed before this round.
        let previous_dominant_set = self.compute_online_dominant_set(&validators, needed);
        self.attendance.update_attendance(
            validators.as_ref(),
            &self.world,
            &self.config,
            &previous_dominant_set,
            self.attempt,
        );

        let dominant_set = compute_dominant_set(&validators, needed);
        let online_dominant_set = self.compute_online_dominant_set(&validators, needed);
        debug_assert!(invariant_dominant_coverage(&dominant_set, &validators, needed));

        let frame_progressed = candidate.frame > self.last_frame;
        if frame_progressed {
            self.last_frame = candidate.frame;
        }

        let decision = self.decide(candidate, &dominant_set, &online_dominant_set, frame_progressed);
        if decision.should_emit() {
            self.last_emission = self.attempt;
        }

        trace!(
            validator = self.validator_id,
            attempt = self.attempt,
            epoch,
            decision = decision.as_str(),
            dominant = dominant_set.len(),
            online_dominant = online_dominant_set.len(),
            online_dominant_stake = dominant_stake(&online_dominant_set.to_vec(), &validators),
            "Emission decision"
        );

        self.last_dominant_set = dominant_set;
        metrics::record_decision(&decision);
        metrics::record_online_validators(self.attendance.online_count());

        decision
    }

    fn reset(&mut self) {
        self.attempt = 0;
        self.last_emission = 0;
        self.attendance.clear();
        self.last_dominant_set = DominantSet::new();
        self.epoch = None;
        self.last_frame = 0;
        self.rounds_without_frame_progress = 0;
    }
}
