pub mod events;
pub mod game_trait;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::events::GameEvent;
    use crate::game_trait::{FrameInput, Simulation};

    /// Run N ticks with the same input, returning all accumulated events.
    pub fn run_ticks<S: Simulation>(sim: &mut S, n: usize, input: FrameInput) -> Vec<GameEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(sim.update(input));
        }
        all_events
    }

    /// Run N ticks with no input.
    pub fn run_idle<S: Simulation>(sim: &mut S, n: usize) -> Vec<GameEvent> {
        run_ticks(sim, n, FrameInput::default())
    }

    // ================================================================
    // Simulation Contract Tests
    // ================================================================
    // Every Simulation implementation must pass these. Game crates call
    // them from their own #[cfg(test)] modules with a fresh instance.

    /// update() must advance the simulated clock.
    pub fn contract_update_advances_clock<S: Simulation>(sim: &mut S) {
        let before = sim.elapsed_ms();
        sim.update(FrameInput::default());
        assert!(
            sim.elapsed_ms() > before,
            "update() must advance the simulation clock"
        );
    }

    /// pause() must freeze the clock and the frame, resume() must unfreeze it.
    pub fn contract_pause_stops_updates<S>(sim: &mut S)
    where
        S: Simulation,
        S::Frame: PartialEq + std::fmt::Debug,
    {
        sim.pause();
        assert!(sim.is_paused());
        let clock = sim.elapsed_ms();
        let before = sim.frame();
        let events = sim.update(FrameInput {
            move_x: 7,
            jump: true,
        });
        assert!(events.is_empty(), "Paused update must not emit events");
        assert_eq!(clock, sim.elapsed_ms(), "Clock must not move while paused");
        assert_eq!(before, sim.frame(), "Frame must not change while paused");

        sim.resume();
        assert!(!sim.is_paused());
        sim.update(FrameInput::default());
        assert!(
            sim.elapsed_ms() > clock,
            "Clock must advance after resume"
        );
    }

    /// Two tick rates worth of idle updates must not panic and must keep the
    /// clock monotonic.
    pub fn contract_clock_monotonic<S: Simulation>(sim: &mut S) {
        let ticks = (sim.tick_rate() * 2.0) as usize;
        let mut last = sim.elapsed_ms();
        for _ in 0..ticks {
            sim.update(FrameInput::default());
            let now = sim.elapsed_ms();
            assert!(now >= last, "Clock went backwards: {last} -> {now}");
            last = now;
        }
    }
}
