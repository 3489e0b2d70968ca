/// Upper bound on the render scale relative to logical pixels. HiDPI hosts
/// can report 3x or more; rendering above 2x costs GPU time for no visible
/// gain on a fullscreen shader.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Window dimensions in logical pixels plus the host scale factor.
/// Updated on every resize event; drives the camera aspect ratio and the
/// surface extent. Logical sizes stay `f64` so fractional sizes (physical
/// pixels at a non-integer scale factor) round once, at the surface, not
/// on every conversion.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scale_factor: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, scale_factor: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            scale_factor,
        }
    }

    pub fn aspect(&self) -> f32 {
        (self.width / self.height) as f32
    }

    /// Host scale factor clamped to `MAX_PIXEL_RATIO`.
    pub fn pixel_ratio(&self) -> f64 {
        self.scale_factor.min(MAX_PIXEL_RATIO)
    }

    /// Surface extent in physical pixels at the capped pixel ratio.
    pub fn physical_extent(&self) -> (u32, u32) {
        let ratio = self.pixel_ratio();
        let width = (self.width * ratio).round() as u32;
        let height = (self.height * ratio).round() as u32;
        (width.max(1), height.max(1))
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_ratio_is_capped() {
        let viewport = Viewport::new(800.0, 600.0, 3.0);
        assert_eq!(viewport.pixel_ratio(), 2.0);
    }

    #[test]
    fn test_pixel_ratio_below_cap_passes_through() {
        let viewport = Viewport::new(800.0, 600.0, 1.5);
        assert_eq!(viewport.pixel_ratio(), 1.5);
    }

    #[test]
    fn test_zero_sized_viewport_is_clamped() {
        let viewport = Viewport::new(0.0, 0.0, 1.0);
        assert_eq!(viewport.physical_extent(), (1, 1));
    }
}
