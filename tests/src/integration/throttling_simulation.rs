//! # Event Throttling Network Simulations
//!
//! Whole-network scenarios: every validator runs its own throttler over
//! the shared world, offline validators do not take part in a round.
//!
//! ## Properties Tested:
//!
//! 1. **Steady state**: the dominant set emits every round, frames advance every round
//! 2. **Offline coverage**: suppressed validators step in for offline dominant stake
//! 3. **Recovery**: suppression resumes once dominant validators are back
//! 4. **Heartbeat**: suppressed validators emit periodically
//! 5. **Frame stall fallback**: suppressed validators emit when frames stop advancing

#[cfg(test)]
mod tests {
    use crate::simulation::{init_tracing, Network, SIMULATION_EPOCH};
    use qc_18_event_throttling::{
        compute_dominant_set, compute_needed_stake, Attempt, EmitReason, Frame, ThrottlerConfig,
        ValidatorId, Weight, WorldReader,
    };
    use std::collections::BTreeMap;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn config(
        threshold: f64,
        dominating_timeout: Attempt,
        non_dominating_timeout: Attempt,
    ) -> ThrottlerConfig {
        ThrottlerConfig {
            enabled: true,
            dominant_stake_threshold: threshold,
            dominating_timeout,
            non_dominating_timeout,
            frame_stall_timeout: 0,
        }
    }

    fn network(
        stakes: &[Weight],
        config: ThrottlerConfig,
        block_missed_slack: u64,
    ) -> Network {
        init_tracing();
        Network::with_slack(stakes, config, block_missed_slack).unwrap()
    }

    fn range(from: ValidatorId, to: ValidatorId) -> Vec<ValidatorId> {
        (from..=to).collect()
    }

    /// Run 100 rounds and check frame progress and per-validator emission counts
    fn check_steady_state(threshold: f64, stakes: &[Weight], offline: &[ValidatorId]) {
        let mut net = network(stakes, config(threshold, 10, 1000), 100);
        let mut counts: BTreeMap<ValidatorId, usize> = BTreeMap::new();

        for round in 0..100u32 {
            for id in net.round(offline) {
                *counts.entry(id).or_default() += 1;
            }
            assert!(
                net.frames().iter().all(|f| *f == round + 1),
                "threshold={threshold} stakes={stakes:?} offline={offline:?} round={round} frames={:?}",
                net.frames()
            );
        }

        let validators = net.validators();
        let online = validators.filter(|id| !offline.contains(&id));
        let needed = compute_needed_stake(validators.total_weight(), threshold);
        let dominant = compute_dominant_set(&online, needed);

        for id in validators.ids() {
            let count = counts.get(&id).copied().unwrap_or(0);
            if offline.contains(&id) {
                assert_eq!(count, 0, "offline validator {id} emitted");
            } else if dominant.contains(id) {
                assert_eq!(count, 100, "dominant validator {id}, threshold={threshold} stakes={stakes:?}");
            } else {
                assert!(count < 100, "suppressed validator {id}, threshold={threshold} stakes={stakes:?}");
            }
        }
    }

    // =============================================================================
    // STEADY STATE
    // =============================================================================

    #[test]
    fn test_all_online_dominant_validators_emit_every_round() {
        let distributions: &[(&str, Vec<Weight>)] = &[
            ("single", vec![1]),
            ("uniform 5", vec![100; 5]),
            ("uniform 10", vec![42; 10]),
            ("uniform 100", vec![21; 100]),
            ("two dominating", vec![50, 20, 10, 10, 10]),
            ("three dominating", vec![40, 30, 20, 5, 5]),
        ];

        for (_, stakes) in distributions {
            for threshold in [0.7, 0.75, 0.8, 0.9, 0.95, 1.0] {
                check_steady_state(threshold, stakes, &[]);
            }
        }
    }

    #[test]
    fn test_frames_advance_with_offline_validators() {
        check_steady_state(0.75, &[20; 5], &[1]);
        check_steady_state(0.75, &[10; 10], &[1, 2]);
        check_steady_state(0.75, &[10; 10], &[2]);
    }

    #[test]
    fn test_disabled_throttler_emits_everything() {
        let mut config = config(0.75, 3, 100);
        config.enabled = false;
        let mut net = network(&[80, 20], config, 100);

        for round in 1..=20u32 {
            let events = net.run_round(&[]);
            assert_eq!(events.len(), 2);
            assert!(events.iter().all(|e| e.reason == EmitReason::ThrottlerDisabled));
            assert_eq!(net.frames(), vec![round; 2]);
        }
    }

    // =============================================================================
    // OFFLINE COVERAGE AND RECOVERY
    // =============================================================================

    #[test]
    fn test_offline_dominant_validator_is_covered() {
        for dominating_timeout in [2, 3, 10] {
            let mut net = network(&[80, 20], config(0.75, dominating_timeout, 1000), 1000);

            // genesis
            assert_eq!(net.round(&[]), vec![1, 2]);
            assert_eq!(net.round(&[]), vec![1]);

            // validator 2 waits for validator 1 to time out
            for _ in 0..dominating_timeout {
                assert_eq!(net.round(&[1]), Vec::<ValidatorId>::new());
            }
            let events = net.run_round(&[1]);
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].header.creator, 2);
            assert_eq!(events[0].reason, EmitReason::StakeNotDominated);

            // validator 1 is back; 2 has not seen it yet
            assert_eq!(net.round(&[]), vec![1, 2]);
            assert_eq!(net.round(&[]), vec![1]);
        }
    }

    #[test]
    fn test_progressive_fill_and_recovery() {
        let mut net = network(&[10; 10], config(0.70, 2, 1000), 100);

        // genesis
        assert_eq!(net.round(&[]), range(1, 10));

        // each step takes another dominant validator offline; validators
        // forced in by earlier steps keep emitting
        for offline_count in 1..=3u32 {
            let offline = range(1, offline_count);
            let first = offline_count + 1;
            assert_eq!(net.round(&offline), range(first, 6 + offline_count), "step {offline_count}");
            assert_eq!(net.round(&offline), range(first, 6 + offline_count), "step {offline_count}");
            assert_eq!(net.round(&offline), range(first, 7 + offline_count), "step {offline_count}");
        }

        // everyone is back
        assert_eq!(net.round(&[]), range(1, 10));
        assert_eq!(net.round(&[]), range(1, 7));
        assert_eq!(net.round(&[]), range(1, 7));
    }

    #[test]
    fn test_stall_and_recovery() {
        let mut net = network(&[32, 32, 32, 3, 1], config(0.70, 2, 1000), 100);

        let all_online: &[ValidatorId] = &[];
        let first_offline: &[ValidatorId] = &[1];

        // (offline, emitting, frame after the round)
        let mut script: Vec<(&[ValidatorId], Vec<ValidatorId>, Frame)> = Vec::new();
        script.push((all_online, range(1, 5), 1));
        for frame in 2..=6 {
            script.push((all_online, range(1, 3), frame));
        }
        script.push((first_offline, vec![2, 3], 7));
        script.push((first_offline, vec![2, 3], 7));
        script.push((first_offline, range(2, 5), 7));
        script.push((first_offline, range(2, 5), 8));
        script.push((all_online, range(1, 5), 9));
        script.push((all_online, range(1, 3), 10));

        for (round, (offline, emitting, frame)) in script.into_iter().enumerate() {
            assert_eq!(net.round(offline), emitting, "round {}", round + 1);
            assert_eq!(net.frames(), vec![frame; 5], "round {}", round + 1);
        }
    }

    #[test]
    fn test_online_set_changes_without_progress() {
        let mut net = network(&[10; 10], config(0.75, 4, 1000), 4);

        net.round(&[]);
        assert_eq!(net.frames(), vec![1; 10]);

        // 60% of the stake online: no quorum, frames stop
        let offline = [1, 2, 3, 4];
        net.round(&offline);
        assert_eq!(net.frames(), vec![2; 10]);
        for _ in 0..10 {
            net.round(&offline);
            assert_eq!(net.frames(), vec![2; 10]);
        }

        // 80% back online: one round to catch up, then progress
        net.round(&[1, 2]);
        assert_eq!(net.frames(), vec![2; 10]);
        net.round(&[1, 2]);
        assert_eq!(net.frames(), vec![3; 10]);
    }

    // =============================================================================
    // HEARTBEAT AND FRAME STALL
    // =============================================================================

    #[test]
    fn test_heartbeat_keeps_suppressed_validators_visible() {
        for dominating_timeout in [2, 3, 7, 11] {
            for non_dominating_timeout in [7, 11, 15, 25, 100] {
                let mut net =
                    network(&[80, 20], config(0.75, dominating_timeout, non_dominating_timeout), 100);
                let heartbeat = non_dominating_timeout / 2;

                assert_eq!(net.round(&[]), vec![1, 2]);
                for _ in 0..heartbeat - 1 {
                    assert_eq!(net.round(&[]), vec![1]);
                }

                let events = net.run_round(&[1]);
                assert_eq!(events.len(), 1);
                assert_eq!(events[0].header.creator, 2);
                assert_eq!(events[0].reason, EmitReason::Heartbeat);

                for _ in 0..(dominating_timeout - 1).min(heartbeat - 1) {
                    assert_eq!(net.round(&[1]), Vec::<ValidatorId>::new());
                }
                assert_eq!(net.round(&[1]), vec![2]);
            }
        }
    }

    #[test]
    fn test_frame_stall_forces_suppressed_emissions() {
        let mut config = config(0.75, 100, 1000);
        config.frame_stall_timeout = 3;
        let mut net = network(&[80, 20], config, 1000);

        assert_eq!(net.round(&[]), vec![1, 2]);
        assert_eq!(net.round(&[]), vec![1]);

        let mut emissions = Vec::new();
        for round in 0..10 {
            for event in net.run_round(&[1]) {
                assert_eq!(event.header.creator, 2);
                assert_eq!(event.reason, EmitReason::FrameStalled);
                emissions.push(round);
            }
        }
        assert_eq!(emissions, vec![4, 8]);
    }

    #[test]
    fn test_suppressed_validators_track_the_dominant_set() {
        let mut net = network(&[750, 750, 125, 125, 125, 125], config(0.75, 3, 1000), 1000);
        for _ in 0..10 {
            net.round(&[]);
        }

        for id in 1..=6 {
            let throttler = net.throttler(id).unwrap();
            assert_eq!(throttler.last_dominant_set().to_vec(), vec![1, 2]);
            assert_eq!(throttler.is_suppressed(), id > 2);
            assert_eq!(throttler.attempt(), 10);
        }

        // only the genesis event of a suppressed validator reached the world
        let world = net.world();
        assert_eq!(world.epoch(), SIMULATION_EPOCH);
        assert_eq!(world.get_last_event(1).map(|e| e.seq), Some(10));
        assert_eq!(world.get_last_event(3).map(|e| e.seq), Some(1));
    }
}
