use chrono::{DateTime, Duration, TimeZone, Utc};

/// Julian day number of the Unix epoch.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
/// Julian day number of J2000.0 (2000-01-01T12:00).
pub const J2000_JD: f64 = 2_451_545.0;
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Slowest playback speed (days per second).
pub const MIN_SPEED: f64 = 0.01;
/// Fastest playback speed (days per second).
pub const MAX_SPEED: f64 = 365.0;

/// Julian day of an instant.
pub fn julian_day(at: DateTime<Utc>) -> f64 {
    at.timestamp_millis() as f64 / MS_PER_DAY + UNIX_EPOCH_JD
}

/// Fractional days since J2000.0, the epoch of every orbital element.
pub fn days_since_j2000(at: DateTime<Utc>) -> f64 {
    julian_day(at) - J2000_JD
}

/// The J2000.0 instant.
pub fn j2000() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Logarithmic slider position (0..=100) to playback speed.
pub fn speed_from_slider(position: f64) -> f64 {
    let position = position.clamp(0.0, 100.0);
    MIN_SPEED * ((MAX_SPEED / MIN_SPEED).ln() * position / 100.0).exp()
}

/// Inverse of [`speed_from_slider`], for showing the current speed on the slider.
pub fn slider_from_speed(speed: f64) -> f64 {
    let speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    100.0 * (speed / MIN_SPEED).ln() / (MAX_SPEED / MIN_SPEED).ln()
}

/// Turns absolute frame timestamps into elapsed seconds.
///
/// Registration is explicit: frames arriving while stopped contribute nothing,
/// and the first frame after `start` only records its timestamp.
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    running: bool,
    last: Option<f64>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register for frames.
    pub fn start(&mut self) {
        self.running = true;
        self.last = None;
    }

    /// Unregister. Later frames yield zero until the next `start`.
    pub fn stop(&mut self) {
        self.running = false;
        self.last = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed a frame timestamp (seconds). Returns the elapsed time since the previous frame.
    /// Timestamps that go backwards yield zero.
    pub fn tick(&mut self, timestamp: f64) -> f64 {
        if !self.running {
            return 0.0;
        }
        let elapsed = match self.last {
            Some(prev) => (timestamp - prev).max(0.0),
            None => 0.0,
        };
        self.last = Some(timestamp);
        elapsed
    }
}

/// Animation clock for the displayed date.
#[derive(Debug, Clone)]
pub struct TimeDriver {
    date: DateTime<Utc>,
    playing: bool,
    speed: f64,
    timer: FrameTimer,
}

impl TimeDriver {
    /// Paused at `date` with the given speed. A non-positive speed falls back to one day per second.
    pub fn new(date: DateTime<Utc>, speed: f64) -> Self {
        let speed = if speed > 0.0 && speed.is_finite() { speed } else { 1.0 };
        Self {
            date,
            playing: false,
            speed,
            timer: FrameTimer::new(),
        }
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Days per second of wall time.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn slider_position(&self) -> f64 {
        slider_from_speed(self.speed)
    }

    /// Per-frame callback. Advances the date while playing.
    pub fn on_frame(&mut self, timestamp: f64) {
        let elapsed = self.timer.tick(timestamp);
        if self.playing && elapsed > 0.0 {
            self.advance(elapsed);
        }
    }

    /// Advance by `elapsed_seconds` of wall time at the current speed.
    pub fn advance(&mut self, elapsed_seconds: f64) {
        self.step(elapsed_seconds * self.speed);
    }

    /// Move the date by a signed number of days, rounded to the millisecond.
    pub fn step(&mut self, days: f64) {
        if !days.is_finite() {
            log::warn!("Ignoring non-finite step of {} days", days);
            return;
        }
        let ms = (days * MS_PER_DAY).round();
        if ms.abs() > i64::MAX as f64 {
            log::warn!("Step of {} days overflows the date range", days);
            return;
        }
        let shifted = Duration::try_milliseconds(ms as i64)
            .and_then(|delta| self.date.checked_add_signed(delta));
        match shifted {
            Some(date) => self.date = date,
            None => log::warn!("Step of {} days leaves the representable date range", days),
        }
    }

    pub fn play(&mut self) {
        if !self.playing {
            self.playing = true;
            self.timer.start();
        }
    }

    pub fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            self.timer.stop();
        }
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Set the playback speed. Non-positive or non-finite values are rejected.
    pub fn set_speed(&mut self, speed: f64) -> bool {
        if speed > 0.0 && speed.is_finite() {
            self.speed = speed;
            true
        } else {
            log::warn!("Rejected playback speed {}", speed);
            false
        }
    }

    /// Set the speed from a slider position. Non-finite positions are rejected.
    pub fn set_speed_slider(&mut self, position: f64) -> bool {
        if !position.is_finite() {
            log::warn!("Rejected speed slider position {}", position);
            return false;
        }
        self.speed = speed_from_slider(position);
        true
    }

    pub fn set_date(&mut self, date: DateTime<Utc>) {
        self.date = date;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap()
    }

    fn days_between(a: DateTime<Utc>, b: DateTime<Utc>) -> f64 {
        (b - a).num_milliseconds() as f64 / MS_PER_DAY
    }

    #[test]
    fn j2000_is_day_zero() {
        assert!(days_since_j2000(j2000()).abs() < 1e-12);
        assert!((julian_day(j2000()) - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn unix_epoch_julian_day() {
        let epoch = Utc.timestamp_millis_opt(0).unwrap();
        assert!((julian_day(epoch) - UNIX_EPOCH_JD).abs() < 1e-12);
    }

    #[test]
    fn slider_endpoints() {
        assert!((speed_from_slider(0.0) - MIN_SPEED).abs() < 1e-12);
        assert!((speed_from_slider(100.0) - MAX_SPEED).abs() < 1e-9);
    }

    #[test]
    fn slider_is_a_bijection() {
        for i in 0..=100 {
            let pos = i as f64;
            let back = slider_from_speed(speed_from_slider(pos));
            assert!((back - pos).abs() < 1e-9, "{pos} -> {back}");
        }
        for speed in [0.01, 0.5, 1.0, 7.0, 30.0, 365.0] {
            let back = speed_from_slider(slider_from_speed(speed));
            assert!((back - speed).abs() / speed < 1e-12);
        }
    }

    #[test]
    fn frame_timer_first_tick_is_zero() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.tick(5.0), 0.0);
        timer.start();
        assert_eq!(timer.tick(10.0), 0.0);
        assert!((timer.tick(10.5) - 0.5).abs() < 1e-12);
        timer.stop();
        assert_eq!(timer.tick(11.0), 0.0);
    }

    #[test]
    fn frame_timer_ignores_backwards_time() {
        let mut timer = FrameTimer::new();
        timer.start();
        timer.tick(3.0);
        assert_eq!(timer.tick(2.0), 0.0);
    }

    #[test]
    fn playback_is_frame_rate_independent() {
        for frames in [[0.0, 1.0, 2.0], [0.0, 0.4, 2.0]] {
            let mut driver = TimeDriver::new(date(), 10.0);
            driver.play();
            for ts in frames {
                driver.on_frame(ts);
            }
            assert!((days_between(date(), driver.date()) - 20.0).abs() < 1e-6);
        }
    }

    #[test]
    fn resume_does_not_catch_up() {
        let mut driver = TimeDriver::new(date(), 1.0);
        driver.play();
        driver.on_frame(0.0);
        driver.on_frame(1.0);
        driver.pause();
        driver.on_frame(50.0);
        driver.play();
        driver.on_frame(100.0);
        driver.on_frame(101.0);
        assert!((days_between(date(), driver.date()) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn paused_driver_does_not_move() {
        let mut driver = TimeDriver::new(date(), 5.0);
        driver.on_frame(0.0);
        driver.on_frame(3.0);
        assert_eq!(driver.date(), date());
    }

    #[test]
    fn step_is_reversible() {
        let mut driver = TimeDriver::new(date(), 1.0);
        driver.step(5.0);
        driver.step(-5.0);
        assert_eq!(driver.date(), date());
        driver.step(1.0);
        driver.step(-1.0);
        assert_eq!(driver.date(), date());
    }

    #[test]
    fn step_overflow_keeps_date() {
        let mut driver = TimeDriver::new(date(), 1.0);
        driver.step(1e300);
        assert_eq!(driver.date(), date());
        driver.step(f64::NAN);
        assert_eq!(driver.date(), date());
    }

    #[test]
    fn speed_must_be_positive() {
        let mut driver = TimeDriver::new(date(), 2.0);
        assert!(!driver.set_speed(0.0));
        assert!(!driver.set_speed(-3.0));
        assert_eq!(driver.speed(), 2.0);
        assert!(driver.set_speed(4.0));
        assert_eq!(driver.speed(), 4.0);
        assert!(!driver.set_speed(f64::NAN));
        // Only the slider is bounded; direct speeds above its range are kept.
        assert!(driver.set_speed(1000.0));
        assert_eq!(driver.speed(), 1000.0);
        assert_eq!(TimeDriver::new(date(), -1.0).speed(), 1.0);
    }

    #[test]
    fn non_finite_slider_keeps_speed() {
        let mut driver = TimeDriver::new(date(), 2.0);
        assert!(!driver.set_speed_slider(f64::NAN));
        assert!(!driver.set_speed_slider(f64::INFINITY));
        assert_eq!(driver.speed(), 2.0);
        assert!(driver.set_speed_slider(100.0));
        assert!((driver.speed() - MAX_SPEED).abs() < 1e-9);
    }

    #[test]
    fn toggle_flips_playing() {
        let mut driver = TimeDriver::new(date(), 1.0);
        assert!(!driver.is_playing());
        driver.toggle();
        assert!(driver.is_playing());
        driver.toggle();
        assert!(!driver.is_playing());
    }
}
