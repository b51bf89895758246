use std::time::{Duration, Instant};

/// Length of the FPS counting window.
pub const FPS_WINDOW: Duration = Duration::from_millis(1000);

/// Frame timer. Create it once before the loop and call [`Timer::update`]
/// exactly once per frame.
#[derive(Debug, Clone)]
pub struct Timer {
    init_time: Instant,
    previous_frame_time: Instant,
    current_frame_time: Instant,
    last_fps_update_time: Instant,
    frame_count: u32,
    frame_index: u64,
    fps: u32,
    fps_ready: bool,
    delta: f32,
}

impl Timer {
    /// Start a timer at the current instant.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Start a timer at a given instant. Used to drive the timer from a
    /// synthetic clock.
    pub fn starting_at(now: Instant) -> Self {
        Self {
            init_time: now,
            previous_frame_time: now,
            current_frame_time: now,
            last_fps_update_time: now,
            frame_count: 0,
            frame_index: 0,
            fps: 0,
            fps_ready: false,
            delta: 0.0,
        }
    }

    /// Advance to the current instant.
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// Advance to `now`.
    ///
    /// An instant earlier than the current frame is treated as no time passing.
    pub fn update_at(&mut self, now: Instant) {
        self.previous_frame_time = self.current_frame_time;
        self.current_frame_time = now.max(self.previous_frame_time);
        self.delta = self
            .current_frame_time
            .duration_since(self.previous_frame_time)
            .as_secs_f32();
        self.fps_ready = false;

        // The window check runs before this frame is counted.
        if self
            .current_frame_time
            .duration_since(self.last_fps_update_time)
            >= FPS_WINDOW
        {
            self.fps = self.frame_count;
            self.frame_count = 0;
            self.last_fps_update_time = self.current_frame_time;
            self.fps_ready = true;
            tracing::debug!(fps = self.fps, "fps window closed");
        }

        self.frame_count += 1;
        self.frame_index += 1;
    }

    /// Seconds between the two most recent updates.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Frames counted over the last completed window.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// True only on the update that closed an FPS window.
    pub fn is_fps_ready(&self) -> bool {
        self.fps_ready
    }

    /// Seconds from creation to the most recent update.
    pub fn elapsed_seconds(&self) -> f32 {
        self.current_frame_time
            .duration_since(self.init_time)
            .as_secs_f32()
    }

    /// Total number of updates since creation.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fresh_timer_is_zeroed() {
        let timer = Timer::new();
        assert_eq!(timer.delta(), 0.0);
        assert_eq!(timer.fps(), 0);
        assert!(!timer.is_fps_ready());
        assert_eq!(timer.elapsed_seconds(), 0.0);
    }

    #[test]
    fn delta_is_time_between_updates() {
        let t0 = Instant::now();
        let mut timer = Timer::starting_at(t0);
        timer.update_at(t0 + ms(16));
        assert!((timer.delta() - 0.016).abs() < 1e-6);
        timer.update_at(t0 + ms(50));
        assert!((timer.delta() - 0.034).abs() < 1e-6);
        assert!((timer.elapsed_seconds() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn clock_regression_gives_zero_delta() {
        let t0 = Instant::now();
        let mut timer = Timer::starting_at(t0 + ms(100));
        timer.update_at(t0);
        assert_eq!(timer.delta(), 0.0);
        assert!(timer.elapsed_seconds() >= 0.0);
    }

    #[test]
    fn elapsed_is_non_decreasing() {
        let t0 = Instant::now();
        let mut timer = Timer::starting_at(t0);
        let mut last = 0.0;
        for i in 1..100u64 {
            timer.update_at(t0 + ms(i * 7));
            assert!(timer.elapsed_seconds() >= last);
            last = timer.elapsed_seconds();
        }
    }

    #[test]
    fn fps_window_reports_sixty() {
        let t0 = Instant::now();
        let mut timer = Timer::starting_at(t0);
        for i in 1..=60u64 {
            timer.update_at(t0 + ms(i * 16));
            assert!(!timer.is_fps_ready(), "window closed early at frame {i}");
        }

        timer.update_at(t0 + ms(1000));
        assert!(timer.is_fps_ready());
        assert_eq!(timer.fps(), 60);

        timer.update_at(t0 + ms(1016));
        assert!(!timer.is_fps_ready());
        assert_eq!(timer.fps(), 60);
    }

    #[test]
    fn next_window_counts_from_reset() {
        let t0 = Instant::now();
        let mut timer = Timer::starting_at(t0);
        timer.update_at(t0 + ms(1000));
        assert!(timer.is_fps_ready());
        assert_eq!(timer.fps(), 0);

        // The closing update counts toward the next window.
        for i in 1..30u64 {
            timer.update_at(t0 + ms(1000 + i * 33));
        }
        timer.update_at(t0 + ms(2000));
        assert!(timer.is_fps_ready());
        assert_eq!(timer.fps(), 30);
        assert_eq!(timer.frame_index(), 31);
    }
}
