//! Fixed-timestep clock shared by the simulation host.
//!
//! Movement runs at a fixed cadence (`should_step` drains the accumulator in
//! `fixed_dt` slices) while game logic runs once per frame. The host feeds each
//! frame's duration to `advance`, so a recorded run replays identically.

const DEFAULT_FIXED_DT: f64 = 1.0 / 60.0;

pub struct TimeState {
    pub fixed_dt: f64,
    pub max_accumulator: f64,
    accumulator: f64,
    pub fixed_step_count: u64,
    pub frame_count: u64,
    pub steps_this_frame: u32,
    pub real_dt: f64,
    pub interpolation_alpha: f64,
}

impl TimeState {
    pub fn new() -> Self {
        Self::with_fixed_dt(DEFAULT_FIXED_DT)
    }

    /// A non-positive or non-finite step would never drain the accumulator,
    /// so it is replaced by the 60 Hz default.
    pub fn with_fixed_dt(fixed_dt: f64) -> Self {
        let fixed_dt = if fixed_dt.is_finite() && fixed_dt > 0.0 {
            fixed_dt
        } else {
            log::warn!(
                "Invalid fixed_dt {}, using {:.4}s",
                fixed_dt,
                DEFAULT_FIXED_DT
            );
            DEFAULT_FIXED_DT
        };
        Self {
            fixed_dt,
            max_accumulator: 0.25,
            accumulator: 0.0,
            fixed_step_count: 0,
            frame_count: 0,
            steps_this_frame: 0,
            real_dt: 0.0,
            interpolation_alpha: 0.0,
        }
    }

    /// Start a frame with an explicit delta.
    pub fn advance(&mut self, dt: f64) {
        self.real_dt = dt.max(0.0);

        // Spiral-of-death cap
        if self.real_dt > self.max_accumulator {
            log::warn!(
                "Frame took {:.1}ms, capping accumulator to {}ms",
                self.real_dt * 1000.0,
                self.max_accumulator * 1000.0
            );
            self.real_dt = self.max_accumulator;
        }

        self.accumulator += self.real_dt;
        self.steps_this_frame = 0;
        self.frame_count += 1;
    }

    /// Simulated time covered by the fixed steps taken so far.
    pub fn simulated_seconds(&self) -> f64 {
        self.fixed_step_count as f64 * self.fixed_dt
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            self.fixed_step_count += 1;
            self.steps_this_frame += 1;
            true
        } else {
            false
        }
    }

    pub fn end_frame(&mut self) {
        self.interpolation_alpha = self.accumulator / self.fixed_dt;
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain_steps(time: &mut TimeState) -> u32 {
        let mut steps = 0;
        while time.should_step() {
            steps += 1;
        }
        steps
    }

    #[test]
    fn one_fixed_dt_yields_one_step() {
        let mut time = TimeState::with_fixed_dt(0.1);
        time.advance(0.1);
        assert_eq!(drain_steps(&mut time), 1);
        assert_eq!(time.steps_this_frame, 1);
        assert_eq!(time.fixed_step_count, 1);
    }

    #[test]
    fn short_frames_accumulate_until_a_step_is_due() {
        let mut time = TimeState::with_fixed_dt(0.1);
        time.advance(0.04);
        assert_eq!(drain_steps(&mut time), 0);
        time.advance(0.04);
        assert_eq!(drain_steps(&mut time), 0);
        time.advance(0.04);
        assert_eq!(drain_steps(&mut time), 1);
    }

    #[test]
    fn long_frame_is_capped_by_max_accumulator() {
        let mut time = TimeState::with_fixed_dt(0.125);
        time.advance(10.0);
        assert!((time.real_dt - time.max_accumulator).abs() < 1e-9);
        assert_eq!(drain_steps(&mut time), 2);
    }

    #[test]
    fn negative_delta_is_treated_as_zero() {
        let mut time = TimeState::with_fixed_dt(0.1);
        time.advance(-1.0);
        assert_eq!(time.real_dt, 0.0);
        assert_eq!(drain_steps(&mut time), 0);
        assert_eq!(time.frame_count, 1);
    }

    #[test]
    fn non_positive_fixed_dt_falls_back_to_default() {
        for bad in [0.0, -0.5, f64::NAN] {
            let mut time = TimeState::with_fixed_dt(bad);
            assert!((time.fixed_dt - 1.0 / 60.0).abs() < 1e-12);
            time.advance(0.04);
            assert_eq!(drain_steps(&mut time), 2);
        }
    }

    #[test]
    fn simulated_seconds_counts_fixed_steps() {
        let mut time = TimeState::with_fixed_dt(0.25);
        time.advance(0.25);
        drain_steps(&mut time);
        time.advance(0.25);
        drain_steps(&mut time);
        assert_eq!(time.fixed_step_count, 2);
        assert!((time.simulated_seconds() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn end_frame_reports_leftover_as_alpha() {
        let mut time = TimeState::with_fixed_dt(0.1);
        time.advance(0.15);
        drain_steps(&mut time);
        time.end_frame();
        assert!((time.interpolation_alpha - 0.5).abs() < 1e-6);
    }
}
