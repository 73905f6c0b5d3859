//! Fixed-timestep accumulator for the frame loop

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Turns variable display-frame deltas into whole `SIM_DT` steps
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame delta, returning how many sim steps to run now.
    ///
    /// At most `MAX_SUBSTEPS` steps run per frame. Time left over after the
    /// cap is dropped so a slow device never builds up a backlog.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }

        self.accumulator = self.accumulator.min(SIM_DT * MAX_SUBSTEPS as f32);
        steps
    }

    /// Time banked towards the next step
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
