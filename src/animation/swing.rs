use serde::{Deserialize, Serialize};
use crate::interaction::PointerState;
use crate::model::Group;

/// Tuning for the pointer-driven lean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwingParams {
    /// Lean angle (radians) per unit of normalized pointer X
    pub sensitivity: f32,
    /// Cap on the distance to target considered in one tick
    pub max_swing_angle: f32,
    /// Fraction of the capped distance covered per tick
    pub swing_speed: f32,
}

impl Default for SwingParams {
    fn default() -> Self {
        Self {
            sensitivity: 0.1,
            max_swing_angle: 0.2,
            swing_speed: 0.005,
        }
    }
}

impl SwingParams {
    pub fn target_for(&self, pointer_x: f32) -> f32 {
        pointer_x * self.sensitivity
    }

    /// Largest rotation change a single tick can produce
    pub fn max_step(&self) -> f32 {
        (self.max_swing_angle * self.swing_speed).max(0.0)
    }
}

/// Lean target and live rotation about the depth axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwingState {
    pub target: f32,
    pub rotation: f32,
}

impl SwingState {
    /// One tick of easing toward the pointer-derived target
    pub fn advance(self, pointer: &PointerState, params: &SwingParams) -> Self {
        let target = params.target_for(pointer.x);
        let delta = target - self.rotation;
        let step = (delta.abs() * params.swing_speed).min(params.max_step());

        Self {
            target,
            rotation: self.rotation + sign(delta) * step,
        }
    }
}

/// `f32::signum` maps 0.0 to 1.0; the fixed point needs 0
fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Owns pointer and swing state between frames
#[derive(Debug, Clone, Default)]
pub struct AnimationController {
    pointer: PointerState,
    swing: SwingState,
    params: SwingParams,
    elapsed: f32,
    frames: u64,
}

impl AnimationController {
    pub fn new(params: SwingParams) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    pub fn set_pointer(&mut self, pointer: PointerState) {
        self.pointer = pointer;
    }

    /// Advance one frame. `dt` feeds the clock only; the lean moves a fixed step per frame.
    pub fn update(&mut self, dt: f32) -> f32 {
        self.elapsed += dt.max(0.0);
        self.frames += 1;
        self.swing = self.swing.advance(&self.pointer, &self.params);
        self.swing.rotation
    }

    /// Write the live rotation onto the model's depth axis
    pub fn apply(&self, model: &mut Group) {
        model.transform.rotation.z = self.swing.rotation;
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn swing(&self) -> SwingState {
        self.swing
    }

    pub fn params(&self) -> &SwingParams {
        &self.params
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
