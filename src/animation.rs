use crate::config::StageConfig;
use std::f32::consts::TAU;

/// Lava phase wraps here so that both the 16 px scroll and the bob repeat.
pub const LAVA_PHASE_PERIOD: f32 = TAU * 16.0;

/// Per-stage values advanced once per logic tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationState {
    /// Cloud layer x offset, always in `(-cloud_width, 0]`.
    pub cloud_pos: f32,
    /// Lava animation phase, wraps at [`LAVA_PHASE_PERIOD`].
    pub lava_phase: f32,
    /// Remaining shake time; no shake at zero.
    pub shake_timer: f32,
}

impl AnimationState {
    /// Back to the load-time state.
    pub fn reset(&mut self) {
        *self = AnimationState::default();
    }

    /// `dt` is in tick units (1.0 = one 60 Hz frame).
    pub fn update(&mut self, dt: f32, config: &StageConfig, cloud_width: f32) {
        self.cloud_pos -= config.cloud_speed * dt;
        if cloud_width > 0.0 {
            self.cloud_pos = -(-self.cloud_pos).rem_euclid(cloud_width);
        }

        self.lava_phase = (self.lava_phase + config.lava_speed * dt).rem_euclid(LAVA_PHASE_PERIOD);

        self.shake_timer = (self.shake_timer - dt).max(0.0);
    }

    /// Whether the shake timer is still running.
    #[inline]
    pub fn is_shaking(&self) -> bool {
        self.shake_timer > 0.0
    }

    /// Horizontal scroll of the lava surface, `0..16`.
    pub fn lava_offset(&self) -> i32 {
        (self.lava_phase.round() as i32).rem_euclid(16)
    }

    /// Vertical bob of the lava surface, `-1..=1`.
    pub fn lava_bob(&self) -> i32 {
        (self.lava_phase / 2.0).sin().round() as i32
    }
}
