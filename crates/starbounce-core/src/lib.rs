pub mod collision;
pub mod geometry;
pub mod render;
pub mod sim;
pub mod time;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::render::DrawCall;
    use crate::sim::{DrivenInput, SimEvent, Simulation};

    /// Run N ticks with idle input, returning all accumulated events.
    pub fn run_ticks(sim: &mut dyn Simulation, n: usize, dt: f32) -> Vec<SimEvent> {
        let idle = DrivenInput::default();
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(sim.tick(dt, &idle));
        }
        all_events
    }

    /// Collect the draw calls for the current frame.
    pub fn collect_draws(sim: &dyn Simulation) -> Vec<DrawCall> {
        let mut calls = Vec::new();
        sim.draw(&mut calls);
        calls
    }

    // ================================================================
    // Simulation Contract Tests
    // ================================================================
    // Generic checks every Simulation implementation must pass. Scene
    // crates call them from their own #[cfg(test)] modules.

    /// reset() twice must leave the same state as reset() once.
    pub fn contract_reset_idempotent(sim: &mut dyn Simulation) {
        run_ticks(sim, 10, 1.0 / 60.0);
        sim.reset();
        let once = sim.serialize_state();
        sim.reset();
        let twice = sim.serialize_state();
        assert_eq!(once, twice, "reset() must be idempotent");
    }

    /// serialize_state → apply_state must reproduce identical bytes.
    pub fn contract_state_roundtrip_preserves(sim: &mut dyn Simulation) {
        let state_a = sim.serialize_state();
        assert!(!state_a.is_empty(), "serialize_state() must not be empty");
        sim.apply_state(&state_a);
        let state_b = sim.serialize_state();
        assert_eq!(
            state_a, state_b,
            "State must be stable after serialize→apply→serialize roundtrip"
        );
    }

    /// Garbage passed to apply_state must not change anything.
    pub fn contract_bad_state_ignored(sim: &mut dyn Simulation) {
        let before = sim.serialize_state();
        sim.apply_state(&[0xc1, 0xff, 0x00]);
        let after = sim.serialize_state();
        assert_eq!(before, after, "Undecodable state must be ignored");
    }

    /// tick() with dt>0 must change state and bump the tick counter.
    pub fn contract_tick_advances(sim: &mut dyn Simulation) {
        let before = sim.serialize_state();
        let ticks = sim.tick_count();
        sim.tick(1.0 / 60.0, &DrivenInput::default());
        assert_eq!(sim.tick_count(), ticks + 1, "tick() must count ticks");
        assert_ne!(
            before,
            sim.serialize_state(),
            "tick(dt>0) must advance simulation state"
        );
    }

    /// tick() with dt=0 must not move anything that is drawn.
    pub fn contract_zero_dt_keeps_position(sim: &mut dyn Simulation) {
        let before = collect_draws(sim);
        sim.tick(0.0, &DrivenInput::default());
        let after = collect_draws(sim);
        let positions = |calls: &[DrawCall]| calls.iter().map(|c| c.position).collect::<Vec<_>>();
        assert_eq!(
            positions(&before),
            positions(&after),
            "A zero-length tick must not move anything"
        );
    }
}
