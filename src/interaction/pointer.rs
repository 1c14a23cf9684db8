/// Pointer position normalized to [-1, 1] on both axes, +Y up
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    /// Map client (CSS pixel) coordinates onto the viewport's normalized square
    pub fn from_client(client_x: f32, client_y: f32, width: f32, height: f32) -> Self {
        let width = width.max(1.0);
        let height = height.max(1.0);
        Self {
            x: (client_x / width) * 2.0 - 1.0,
            y: -(client_y / height) * 2.0 + 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners() {
        let top_left = PointerState::from_client(0.0, 0.0, 800.0, 600.0);
        assert_eq!(top_left, PointerState { x: -1.0, y: 1.0 });

        let bottom_right = PointerState::from_client(800.0, 600.0, 800.0, 600.0);
        assert_eq!(bottom_right, PointerState { x: 1.0, y: -1.0 });
    }

    #[test]
    fn test_centre() {
        let centre = PointerState::from_client(400.0, 300.0, 800.0, 600.0);
        assert!(centre.x.abs() < 1e-6);
        assert!(centre.y.abs() < 1e-6);
    }

    #[test]
    fn test_zero_sized_viewport_stays_finite() {
        let p = PointerState::from_client(10.0, 10.0, 0.0, 0.0);
        assert!(p.x.is_finite() && p.y.is_finite());
    }
}
