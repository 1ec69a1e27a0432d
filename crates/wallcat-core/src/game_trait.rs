use serde::{Deserialize, Serialize};

use crate::events::GameEvent;

/// Input sampled for a single frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Signed horizontal intent in px/tick. 0 means no horizontal input.
    pub move_x: i32,
    /// Jump key went down since the previous frame.
    pub jump: bool,
}

/// Core trait for a frame-stepped simulation.
///
/// The host owns the window, input sampling, audio and drawing; the
/// simulation only advances state and describes what should be rendered.
pub trait Simulation {
    /// Snapshot handed to the renderer after each update.
    type Frame;

    /// Simulation tick rate in Hz. One tick per rendered frame.
    fn tick_rate(&self) -> f32 {
        60.0
    }

    /// Advance one tick. Returns the events produced during the tick.
    fn update(&mut self, input: FrameInput) -> Vec<GameEvent>;

    /// Describe the current state for drawing.
    fn frame(&self) -> Self::Frame;

    /// Simulated milliseconds since the session started.
    fn elapsed_ms(&self) -> u64;

    fn pause(&mut self);

    fn resume(&mut self);

    fn is_paused(&self) -> bool;

    /// Whether the session has reached its end condition.
    fn is_complete(&self) -> bool;
}

/// Generates the `pause`, `resume`, `is_paused` and `is_complete` methods of
/// [`Simulation`].
///
/// Requires the implementing struct to have `paused: bool` and
/// `complete: bool` fields.
#[macro_export]
macro_rules! simulation_boilerplate {
    () => {
        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }

        fn is_paused(&self) -> bool {
            self.paused
        }

        fn is_complete(&self) -> bool {
            self.complete
        }
    };
}
