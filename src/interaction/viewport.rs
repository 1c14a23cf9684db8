/// Canvas size in CSS pixels and the pixel density it is rendered at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
    /// Upper bound applied to the device pixel ratio
    pub max_pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            pixel_ratio: 1.0,
            max_pixel_ratio: 2.0,
        }
    }
}

impl Viewport {
    pub fn new(max_pixel_ratio: f32) -> Self {
        Self {
            max_pixel_ratio,
            ..Default::default()
        }
    }

    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f32) {
        self.width = width;
        self.height = height;
        self.pixel_ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(self.max_pixel_ratio)
        } else {
            1.0
        };
    }

    /// Width over height; a zero height counts as one pixel
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Size of the backing store in device pixels
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        let scale = |v: u32| ((v as f32 * self.pixel_ratio).round() as u32).max(1);
        (scale(self.width), scale(self.height))
    }
}
