//! Simulation clock
//!
//! The core consumes one `FrameTime` per tick. `SimClock` turns variable
//! wall-clock frame times into fixed steps, the same accumulator scheme a
//! render loop would use.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};

/// Clock values handed to a single tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameTime {
    /// Seconds since the clock started (after this step)
    pub elapsed: f32,
    /// Seconds covered by this step
    pub delta: f32,
}

impl FrameTime {
    pub fn new(elapsed: f32, delta: f32) -> Self {
        Self { elapsed, delta }
    }
}

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct SimClock {
    step: f32,
    elapsed: f32,
    accumulator: f32,
}

impl SimClock {
    pub fn new(step: f32) -> Self {
        assert!(step > 0.0 && step.is_finite(), "clock step must be positive");
        Self {
            step,
            elapsed: 0.0,
            accumulator: 0.0,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Produce exactly one fixed step
    pub fn tick(&mut self) -> FrameTime {
        self.elapsed += self.step;
        FrameTime::new(self.elapsed, self.step)
    }

    /// Feed a wall-clock frame time and get the fixed steps it covers.
    /// Long frames are clamped and capped so a stall can't snowball.
    pub fn advance(&mut self, frame_dt: f32) -> Vec<FrameTime> {
        let frame_dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += frame_dt;

        let mut steps = Vec::new();
        while self.accumulator >= self.step && (steps.len() as u32) < MAX_SUBSTEPS {
            steps.push(self.tick());
            self.accumulator -= self.step;
        }
        // Capped: drop the backlog so later frames start fresh
        if self.accumulator >= self.step {
            self.accumulator = 0.0;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_steps_accumulate() {
        let mut clock = SimClock::new(0.25);
        assert!(clock.advance(0.1).is_empty());
        assert!(clock.advance(0.1).is_empty());
        let steps = clock.advance(0.1);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0], FrameTime::new(0.25, 0.25));
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut clock = SimClock::new(0.01);
        let steps = clock.advance(5.0);
        // 0.1s clamp at 0.01 per step would be 10, but substeps cap at 8
        assert_eq!(steps.len(), MAX_SUBSTEPS as usize);
        assert!(steps.iter().all(|s| s.delta == 0.01));
        assert!(steps.windows(2).all(|w| w[1].elapsed > w[0].elapsed));
    }

    #[test]
    fn test_capped_frames_leave_no_backlog() {
        let mut clock = SimClock::new(0.01);
        for _ in 0..1000 {
            assert_eq!(clock.advance(0.1).len(), MAX_SUBSTEPS as usize);
            assert!(clock.accumulator < clock.step);
        }
        // A normal frame afterwards only covers itself
        assert_eq!(clock.advance(0.016).len(), 1);
    }

    #[test]
    fn test_tick_advances_elapsed() {
        let mut clock = SimClock::new(0.5);
        clock.tick();
        let t = clock.tick();
        assert_eq!(t.elapsed, 1.0);
        assert_eq!(clock.elapsed(), 1.0);
    }
}
