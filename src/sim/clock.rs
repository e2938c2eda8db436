//! Fixed-step frame clock
//!
//! Display refresh rates vary; the simulation is tuned per 1/60 s frame. The
//! clock accumulates wall time and hands out whole steps, capped so a long
//! stall (tab hidden, debugger) does not trigger a catch-up avalanche.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `dt` seconds of wall time and return how many steps to run now
    pub fn advance(&mut self, dt: f32) -> u32 {
        // Clamp huge or bogus frame times
        let dt = if dt.is_finite() { dt.clamp(0.0, 0.1) } else { 0.0 };
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        // Anything past the cap is dropped rather than carried forward
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_step_per_sixtieth() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(SIM_DT * 0.5), 0);
        assert_eq!(clock.advance(SIM_DT * 0.6), 1);
        assert!(clock.accumulator < SIM_DT * 0.2);
    }

    #[test]
    fn test_fast_display_runs_every_other_frame() {
        let mut clock = FrameClock::new();
        let steps: u32 = (0..120).map(|_| clock.advance(1.0 / 120.0)).sum();
        assert!((59..=60).contains(&steps));
    }

    #[test]
    fn test_stall_is_capped() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(5.0), MAX_SUBSTEPS);
        assert!(clock.accumulator <= SIM_DT);
        assert!(clock.advance(f32::NAN) <= 1);
    }
}
