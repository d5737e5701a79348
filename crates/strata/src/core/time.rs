/// Turns variable host frame times into whole physics ticks.
///
/// Collision resolution integrates velocity per tick, so the level must be
/// stepped at a steady rate. Leftover time carries over to the next frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Seconds per tick.
    dt: f32,
    /// Upper bound on ticks per host frame.
    max_steps: u32,
    /// Unconsumed time from previous frames.
    accumulator: f32,
    /// Ticks handed out since creation.
    ticks: u64,
}

impl FrameClock {
    pub fn new(dt: f32, max_steps: u32) -> Self {
        debug_assert!(dt > 0.0, "tick length must be positive");
        Self {
            dt,
            max_steps: max_steps.max(1),
            accumulator: 0.0,
            ticks: 0,
        }
    }

    /// Feed one host frame. Returns how many ticks to run now.
    ///
    /// Time beyond `max_steps` ticks is dropped so a stalled frame cannot
    /// snowball into ever longer catch-up frames.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator = (self.accumulator + frame_dt.max(0.0)).min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        self.ticks += steps as u64;
        steps
    }

    /// Fraction of a tick left over, for render interpolation (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
