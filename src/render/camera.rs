use serde::{Deserialize, Serialize};
use crate::math::{Mat4, Vec3};

/// Perspective camera settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 100.0,
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
        }
    }
}

/// Camera with a cached projection that is rebuilt when the aspect changes
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub params: CameraParams,
    aspect: f32,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(params: CameraParams, aspect: f32) -> Self {
        let mut camera = Self {
            params,
            aspect,
            projection: Mat4::identity(),
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective(
            self.params.fov.to_radians(),
            self.aspect,
            self.params.near,
            self.params.far,
        );
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.params.position, self.params.target, Vec3::UP)
    }

    pub fn position(&self) -> Vec3 {
        self.params.position
    }
}
