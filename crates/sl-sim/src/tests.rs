//! Integration tests for sl-sim.

use std::sync::atomic::{AtomicBool, Ordering};

use sl_control::LampState;
use sl_core::{FanOutPolicy, GeoPoint, LampId, LightLevel, SimConfig, Tick};
use sl_topology::{NeighborGraph, NeighborGraphBuilder};

use crate::{NoopObserver, Sim, SimBuilder, SimCounters, SimObserver, TickInput, TickOutput, VecTickSource};

// ── Helpers ───────────────────────────────────────────────────────────────────

const A: LampId = LampId(11_046_617_406);
const B: LampId = LampId(11_046_617_407);
const C: LampId = LampId(11_046_617_408);

/// 2023-11-03 at `h:m` UTC.
fn at(h: i64, m: i64) -> i64 {
    1_698_969_600 + h * 3_600 + m * 60
}

fn test_config(timeout: u32, recheck: u32) -> SimConfig {
    let mut cfg = SimConfig::default();
    cfg.lamp.timeout_ticks = timeout;
    cfg.lamp.recheck_ticks = recheck;
    cfg
}

/// Lamps on a meridian ~33 m apart, registered in the given order.  With the
/// default 50 m range only consecutive positions connect.
fn line_of(ids: &[(LampId, usize)]) -> NeighborGraph {
    let mut b = NeighborGraphBuilder::new();
    for &(id, slot) in ids {
        b.add_lamp(id, GeoPoint::new(56.1700 + 0.0003 * slot as f64, 10.1900));
    }
    b.build(0.05).unwrap()
}

/// A–B–C in a line: A–B and B–C in range, A–C out of range.
fn abc() -> NeighborGraph {
    line_of(&[(A, 0), (B, 1), (C, 2)])
}

fn sim(cfg: SimConfig, graph: NeighborGraph) -> Sim<sl_control::LightController> {
    Sim::with_controller(cfg, graph).unwrap()
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn builds_one_node_per_lamp_in_order() {
        let s = sim(test_config(10, 10), abc());
        let ids: Vec<_> = s.nodes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![A, B, C]);
        assert!(s.nodes().iter().all(|n| n.state() == LampState::DARK));
        assert_eq!(s.counters(), SimCounters::default());
        assert_eq!(s.current_tick(), Tick::ZERO);
    }

    #[test]
    fn state_count_mismatch_errors() {
        let cfg = test_config(10, 10);
        let controller = sl_control::LightController::default();
        let result = SimBuilder::new(cfg, abc(), controller)
            .initial_states(vec![LampState::DARK; 2])
            .build();
        assert!(matches!(result, Err(SimError::LampCountMismatch { expected: 3, got: 2, .. })));
    }

    #[test]
    fn invalid_config_errors() {
        let mut cfg = test_config(10, 10);
        cfg.clock.ambient_lux = f64::NAN;
        assert!(matches!(Sim::with_controller(cfg, abc()), Err(SimError::Config(_))));
    }

    #[test]
    fn initial_states_applied() {
        let cfg = test_config(10, 10);
        let controller = sl_control::LightController::default();
        let held = LampState::new(LightLevel::FULL, 3);
        let s = SimBuilder::new(cfg, abc(), controller)
            .initial_states(vec![LampState::DARK, held, LampState::DARK])
            .build()
            .unwrap();
        assert_eq!(s.state(B), Some(held));
    }
}

// ── Propagation ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod propagation {
    use super::*;

    #[test]
    fn line_scenario_at_23h() {
        let mut s = sim(test_config(10, 10), abc());
        let out = s.step(&TickInput::new(at(23, 0), [A]));

        assert_eq!(s.state(A), Some(LampState::new(LightLevel::FULL, 10)));
        // B is lit by A's fan-out, then evaluates its own quiet observation
        // later in the same tick and starts counting down.
        assert_eq!(s.state(B), Some(LampState::new(LightLevel::FULL, 9)));
        // C is not a direct neighbor of A and 23:00 is past the dim window.
        assert_eq!(s.state(C), Some(LampState::DARK));

        assert_eq!(out.changes[&A], LightLevel::FULL);
        assert_eq!(out.changes[&B], LightLevel::FULL);
        assert_eq!(out.changes[&C], LightLevel::OFF);
        assert_eq!(s.counters().messages_sent, 1);
        assert_eq!(s.counters().messages_received, 1);
    }

    #[test]
    fn unreadable_timestamp_darkens_then_next_tick_recovers() {
        let held = LampState::new(LightLevel::FULL, 5);
        let mut s = SimBuilder::new(
            test_config(10, 10),
            abc(),
            sl_control::LightController::default(),
        )
        .initial_states(vec![held, held, LampState::DARK])
        .build()
        .unwrap();

        // Out of chrono's range: every lamp's observation is malformed.
        let out = s.step(&TickInput::new(i64::MAX, [A]));
        assert!(out.changes.values().all(|&l| l == LightLevel::OFF));
        assert!(s.nodes().iter().all(|n| n.state() == LampState::DARK));
        assert_eq!(s.counters().ticks_processed, 1);
        assert_eq!(s.counters().messages_sent, s.counters().messages_received);
        assert_eq!(s.current_tick(), Tick(1));

        let sent_before = s.counters().messages_sent;
        let out = s.step(&TickInput::new(at(23, 0), [A]));
        assert_eq!(out.tick, Tick(1));
        assert_eq!(s.state(A), Some(LampState::new(LightLevel::FULL, 10)));
        assert_eq!(s.level(B), Some(LightLevel::FULL));
        assert_eq!(s.level(C), Some(LightLevel::OFF));
        assert_eq!(s.counters().messages_sent, sent_before + 1);
        assert_eq!(s.counters().ticks_processed, 2);
    }

    #[test]
    fn neighbor_registered_first_keeps_full_timeout() {
        // Same geometry, but B is evaluated before A.
        let graph = line_of(&[(B, 1), (A, 0), (C, 2)]);
        let mut s = sim(test_config(10, 10), graph);
        s.step(&TickInput::new(at(23, 0), [A]));

        assert_eq!(s.state(A), Some(LampState::new(LightLevel::FULL, 10)));
        assert_eq!(s.state(B), Some(LampState::new(LightLevel::FULL, 10)));
        assert_eq!(s.state(C), Some(LampState::DARK));
    }

    #[test]
    fn relay_is_one_hop_only() {
        // Five lamps in a line; motion at the end reaches only its neighbor.
        let ids: Vec<(LampId, usize)> = (0..5).map(|i| (LampId(i as u64), i)).collect();
        let mut s = sim(test_config(10, 10), line_of(&ids));
        s.step(&TickInput::new(at(23, 0), [LampId(0)]));

        let lit: Vec<_> = (0..5).map(|i| s.level(LampId(i)).unwrap()).collect();
        assert_eq!(
            lit,
            vec![LightLevel::FULL, LightLevel::FULL, LightLevel::OFF, LightLevel::OFF, LightLevel::OFF]
        );
        assert_eq!(s.counters().messages_sent, 1);
    }

    #[test]
    fn relayed_lamp_does_not_re_announce_its_own_trigger_while_fresh() {
        // A and B both see motion.  A's relay puts B in a fresh hold, so B's
        // own trigger is gated and C never hears about it.
        let mut s = sim(test_config(10, 10), abc());
        s.step(&TickInput::new(at(23, 0), [A, B]));

        assert_eq!(s.state(B), Some(LampState::new(LightLevel::FULL, 10)));
        assert_eq!(s.state(C), Some(LampState::DARK));
        assert_eq!(s.counters().messages_sent, 1);
    }

    #[test]
    fn always_policy_announces_every_trigger() {
        let mut cfg = test_config(10, 10);
        cfg.lamp.fan_out = FanOutPolicy::Always;
        let mut s = sim(cfg, abc());
        s.step(&TickInput::new(at(23, 0), [A, B]));

        // A → B, then B → A and B → C.
        assert_eq!(s.level(C), Some(LightLevel::FULL));
        assert_eq!(s.counters().messages_sent, 3);
        assert_eq!(s.counters().messages_received, 3);
    }

    #[test]
    fn gated_lamp_re_announces_after_cooling() {
        // recheck 9 < timeout 10: a retrigger on the very next tick is gated,
        // a retrigger once the hold has decayed below 9 is announced again.
        let mut s = sim(test_config(10, 9), abc());
        s.step(&TickInput::new(at(23, 0), [A])); // A: 0 → 10, announces
        s.step(&TickInput::new(at(23, 1), [A])); // A: before 10, gated
        assert_eq!(s.counters().messages_sent, 1);
        s.step(&TickInput::quiet(at(23, 2)));    // A: 10 → 9
        s.step(&TickInput::quiet(at(23, 3)));    // A: 9 → 8
        s.step(&TickInput::new(at(23, 4), [A])); // A: before 8 < 9, announces
        assert_eq!(s.counters().messages_sent, 2);
    }

    #[test]
    fn daytime_everything_dark() {
        let mut s = sim(test_config(10, 10), abc());
        let out = s.step(&TickInput::new(at(12, 0), [A, B, C]));
        assert!(out.changes.values().all(|&l| l == LightLevel::OFF));
    }

    #[test]
    fn early_evening_dims_everyone() {
        let mut s = sim(test_config(10, 10), abc());
        let out = s.step(&TickInput::quiet(at(20, 0)));
        assert!(out.changes.values().all(|&l| l == LightLevel::DIM));
    }

    #[test]
    fn unknown_ids_are_ignored_and_counted() {
        let mut s = sim(test_config(10, 10), abc());
        let out = s.step(&TickInput::new(at(23, 0), [LampId(1), LampId(2), A]));
        assert_eq!(s.counters().unknown_ids, 2);
        assert_eq!(out.changes.len(), 3);
        assert_eq!(out.changes[&A], LightLevel::FULL);
    }

    #[test]
    fn hold_decays_to_dark_over_quiet_ticks() {
        let mut s = sim(test_config(3, 3), abc());
        s.step(&TickInput::new(at(23, 0), [A]));
        let mut cooldowns = vec![s.state(A).unwrap().cooldown_ticks];
        for m in 1..6 {
            s.step(&TickInput::quiet(at(23, m)));
            cooldowns.push(s.state(A).unwrap().cooldown_ticks);
        }
        assert_eq!(cooldowns, vec![3, 2, 1, 0, 0, 0]);
        assert_eq!(s.level(A), Some(LightLevel::OFF));
    }

    #[test]
    fn output_carries_tick_and_timestamp() {
        let mut s = sim(test_config(10, 10), abc());
        let first = s.step(&TickInput::quiet(at(23, 0)));
        let second = s.step(&TickInput::quiet(at(23, 1)));
        assert_eq!(first.tick, Tick(0));
        assert_eq!(second.tick, Tick(1));
        assert_eq!(second.timestamp, at(23, 1));
        assert_eq!(s.counters().ticks_processed, 2);
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_loop {
    use super::*;
    use crate::{RandomMotionSource, TickSource};

    #[derive(Default)]
    struct Recorder {
        starts:  Vec<Tick>,
        outputs: Vec<TickOutput>,
        ended:   Option<(Tick, SimCounters)>,
    }

    impl SimObserver for Recorder {
        fn on_tick_start(&mut self, tick: Tick) {
            self.starts.push(tick);
        }
        fn on_tick_end(&mut self, output: &TickOutput, _counters: &SimCounters) {
            self.outputs.push(output.clone());
        }
        fn on_sim_end(&mut self, ticks: Tick, counters: &SimCounters) {
            self.ended = Some((ticks, *counters));
        }
    }

    /// Raises the stop flag once `after` ticks have completed.
    struct StopAfter<'a> {
        flag:  &'a AtomicBool,
        after: usize,
        seen:  usize,
    }

    impl SimObserver for StopAfter<'_> {
        fn on_tick_end(&mut self, _output: &TickOutput, _counters: &SimCounters) {
            self.seen += 1;
            if self.seen >= self.after {
                self.flag.store(true, Ordering::Relaxed);
            }
        }
    }

    #[test]
    fn runs_until_source_exhausted() {
        let mut s = sim(test_config(10, 10), abc());
        let mut source = VecTickSource::new([
            TickInput::new(at(23, 0), [A]),
            TickInput::quiet(at(23, 1)),
            TickInput::quiet(at(23, 2)),
        ]);
        let mut rec = Recorder::default();
        s.run(&mut source, &mut rec, &AtomicBool::new(false)).unwrap();

        assert_eq!(rec.starts, vec![Tick(0), Tick(1), Tick(2)]);
        assert_eq!(rec.outputs.len(), 3);
        let (ticks, counters) = rec.ended.unwrap();
        assert_eq!(ticks, Tick(3));
        assert_eq!(counters.messages_sent, 1);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn stop_flag_ends_after_in_flight_tick() {
        let mut s = sim(test_config(10, 10), abc());
        let mut source = VecTickSource::new((0..10).map(|m| TickInput::quiet(at(23, m))));
        let flag = AtomicBool::new(false);
        let mut obs = StopAfter { flag: &flag, after: 4, seen: 0 };
        s.run(&mut source, &mut obs, &flag).unwrap();

        assert_eq!(s.counters().ticks_processed, 4);
        assert_eq!(source.remaining(), 6);
    }

    #[test]
    fn pre_set_stop_flag_processes_nothing() {
        let mut s = sim(test_config(10, 10), abc());
        let mut source = VecTickSource::new([TickInput::quiet(at(23, 0))]);
        s.run(&mut source, &mut NoopObserver, &AtomicBool::new(true)).unwrap();
        assert_eq!(s.counters().ticks_processed, 0);
    }

    #[test]
    fn random_source_is_deterministic() {
        let lamps = vec![A, B, C];
        let mut r1 = RandomMotionSource::new(7, lamps.clone(), 0.5, at(20, 0), 60, 20);
        let mut r2 = RandomMotionSource::new(7, lamps, 0.5, at(20, 0), 60, 20);
        for i in 0..20 {
            let a = r1.next_tick().unwrap().unwrap();
            let b = r2.next_tick().unwrap().unwrap();
            assert_eq!(a, b);
            assert_eq!(a.timestamp, at(20, 0) + 60 * i);
        }
        assert!(r1.next_tick().unwrap().is_none());
    }

    #[test]
    fn random_source_probability_extremes() {
        let lamps = vec![A, B, C];
        let mut none = RandomMotionSource::new(1, lamps.clone(), 0.0, 0, 1, 5);
        let mut all = RandomMotionSource::new(1, lamps, 1.0, 0, 1, 5);
        while let Some(t) = none.next_tick().unwrap() {
            assert!(t.active.is_empty());
        }
        while let Some(t) = all.next_tick().unwrap() {
            assert_eq!(t.active.len(), 3);
        }
    }

    #[test]
    fn random_run_sends_equal_received() {
        let ids: Vec<(LampId, usize)> = (0..12).map(|i| (LampId(i as u64), i)).collect();
        let lamps: Vec<LampId> = ids.iter().map(|&(id, _)| id).collect();
        let mut s = sim(test_config(5, 3), line_of(&ids));
        let mut source = RandomMotionSource::new(42, lamps, 0.2, at(19, 0), 300, 200);
        s.run(&mut source, &mut NoopObserver, &AtomicBool::new(false)).unwrap();

        let c = s.counters();
        assert_eq!(c.ticks_processed, 200);
        assert_eq!(c.messages_sent, c.messages_received);
        assert!(c.messages_sent > 0);
    }
}

// ── Wire records ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod records {
    use super::*;

    #[test]
    fn tick_input_from_json() {
        let t: TickInput =
            serde_json::from_str(r#"{"timestamp": 1699052400, "active": [11046617406, 5]}"#).unwrap();
        assert_eq!(t.timestamp, at(23, 0));
        assert!(t.active.contains(&A));
        assert!(t.active.contains(&LampId(5)));
    }

    #[test]
    fn tick_input_active_defaults_to_empty() {
        let t: TickInput = serde_json::from_str(r#"{"timestamp": 0}"#).unwrap();
        assert!(t.active.is_empty());
    }

    #[test]
    fn tick_output_to_json() {
        let mut s = sim(test_config(10, 10), abc());
        let out = s.step(&TickInput::new(at(23, 0), [A]));
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["timestamp"], at(23, 0));
        assert_eq!(json["changes"]["11046617406"], 1.0);
        assert_eq!(json["changes"]["11046617408"], 0.0);
    }
}
