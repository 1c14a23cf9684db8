use crate::animation::AnimationController;
use crate::config::SceneConfig;
use crate::interaction::{PointerState, Viewport};
use crate::model::{Group, TulipBuilder};
use crate::render::{LightingParams, PerspectiveCamera};

/// Everything that changes between frames, independent of the GPU
#[derive(Debug, Clone)]
pub struct Scene {
    pub tulip: Group,
    pub camera: PerspectiveCamera,
    pub lighting: LightingParams,
    pub viewport: Viewport,
    pub animation: AnimationController,
}

impl Default for Scene {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

impl Scene {
    pub fn from_config(config: &SceneConfig) -> Self {
        let viewport = Viewport::new(config.max_pixel_ratio);
        Self {
            tulip: TulipBuilder::new(config.tulip).build(),
            camera: PerspectiveCamera::new(config.camera, viewport.aspect()),
            lighting: config.lighting,
            viewport,
            animation: AnimationController::new(config.swing),
        }
    }

    /// Track a new CSS size. Returns the drawing buffer size in device pixels.
    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f32) -> (u32, u32) {
        self.viewport.resize(width, height, device_pixel_ratio);
        self.camera.set_aspect(self.viewport.aspect());
        self.viewport.drawing_buffer_size()
    }

    /// Record a pointer position given in client coordinates
    pub fn pointer_move(&mut self, client_x: f32, client_y: f32) {
        let pointer = PointerState::from_client(
            client_x,
            client_y,
            self.viewport.width as f32,
            self.viewport.height as f32,
        );
        self.animation.set_pointer(pointer);
    }

    /// Advance the swing one frame and pose the tulip. Returns the new lean angle.
    pub fn tick(&mut self, dt: f32) -> f32 {
        let angle = self.animation.update(dt);
        self.animation.apply(&mut self.tulip);
        angle
    }
}
