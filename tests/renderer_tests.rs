use plane_sketch::renderer::SketchRenderer;
use plane_sketch::viewport::Viewport;

#[cfg(test)]
mod renderer_tests {
    use super::*;

    #[test]
    fn test_panel_descriptor_uses_capped_pixel_ratio() {
        // On a 3x host the surface is sized at the 2x cap; the egui
        // descriptor must agree or the panel renders oversized.
        let viewport = Viewport::new(800.0, 600.0, 3.0);
        let descriptor = SketchRenderer::screen_descriptor(&viewport);

        assert_eq!(descriptor.pixels_per_point, 2.0);
        assert_eq!(descriptor.size_in_pixels, [1600, 1200]);
    }

    #[test]
    fn test_panel_descriptor_matches_surface_below_cap() {
        let viewport = Viewport::new(800.0, 600.0, 1.5);
        let descriptor = SketchRenderer::screen_descriptor(&viewport);

        assert_eq!(descriptor.pixels_per_point, 1.5);
        assert_eq!(
            [descriptor.size_in_pixels[0], descriptor.size_in_pixels[1]],
            [viewport.physical_extent().0, viewport.physical_extent().1]
        );
    }
}
