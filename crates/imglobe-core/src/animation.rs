//! Playback state for the host's timeline controls
//!
//! The engine does not run a timer; the host UI owns the loop and consults
//! this state for its cadence. Speed is a whole-number multiplier clamped
//! into [1, 5].

use serde::{Deserialize, Serialize};

/// Timeline playback state: a speed multiplier and a playing flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    speed: i32,
    playing: bool,
}

impl Animation {
    pub const MIN_SPEED: i32 = 1;
    pub const MAX_SPEED: i32 = 5;

    /// Create a paused animation, clamping the speed into bounds
    pub fn new(speed: i32) -> Self {
        Self {
            speed: speed.clamp(Self::MIN_SPEED, Self::MAX_SPEED),
            playing: false,
        }
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Decrease the speed, respecting the lower bound
    pub fn slow_down(&mut self) {
        if self.speed > Self::MIN_SPEED {
            self.speed -= 1;
        }
    }

    /// Increase the speed, respecting the upper bound
    pub fn speed_up(&mut self) {
        if self.speed < Self::MAX_SPEED {
            self.speed += 1;
        }
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Invert the playing flag
    pub fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    /// Milliseconds between year steps at the current speed
    pub fn frame_interval_ms(&self) -> u64 {
        (1000 * (6 - self.speed)) as u64
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(Self::MIN_SPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_bounds() {
        let mut anim = Animation::new(1);
        anim.slow_down();
        assert_eq!(anim.speed(), 1);

        for _ in 0..10 {
            anim.speed_up();
        }
        assert_eq!(anim.speed(), 5);

        assert_eq!(Animation::new(42).speed(), 5);
        assert_eq!(Animation::new(-3).speed(), 1);
    }

    #[test]
    fn test_toggle_playing() {
        let mut anim = Animation::default();
        assert!(!anim.is_playing());

        anim.toggle_playing();
        assert!(anim.is_playing());

        anim.toggle_playing();
        assert!(!anim.is_playing());
    }

    #[test]
    fn test_frame_interval_shrinks_with_speed() {
        assert_eq!(Animation::new(1).frame_interval_ms(), 5000);
        assert_eq!(Animation::new(5).frame_interval_ms(), 1000);
    }
}
