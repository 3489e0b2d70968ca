use glam::Vec3;
use plane_sketch::camera::{Camera, FOV_Y_DEGREES};
use plane_sketch::viewport::Viewport;
use plane_sketch::Sketch;

#[cfg(test)]
mod camera_tests {
    use super::*;

    #[test]
    fn test_camera_starts_at_unit_diagonal_looking_at_origin() {
        let camera = Camera::new(800.0 / 600.0);
        assert_eq!(camera.position, Vec3::ONE);
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn test_aspect_updates_after_simulated_resize() {
        let mut sketch = Sketch::new(Viewport::new(800.0, 600.0, 1.0));
        assert!((sketch.camera.aspect() - 800.0 / 600.0).abs() < 1e-6);

        sketch.resize(1024.0, 768.0);

        assert!(
            (sketch.camera.aspect() - 1024.0 / 768.0).abs() < 1e-6,
            "camera aspect must track the viewport"
        );
        assert_eq!(
            sketch.viewport.physical_extent(),
            (1024, 768),
            "surface extent must match the resized viewport at 1x scale"
        );
    }

    #[test]
    fn test_projection_recomputed_on_aspect_change() {
        let mut camera = Camera::new(1.0);
        let before = camera.projection_matrix();
        camera.set_aspect(2.0);
        let after = camera.projection_matrix();
        assert_ne!(before, after);
    }

    #[test]
    fn test_projection_encodes_fixed_fov() {
        let aspect = 1024.0 / 768.0;
        let camera = Camera::new(aspect);
        let proj = camera.projection_matrix();

        let focal = 1.0 / (FOV_Y_DEGREES.to_radians() / 2.0).tan();
        assert!((proj.col(1).y - focal).abs() < 1e-5);
        assert!((proj.col(0).x * aspect - focal).abs() < 1e-5);
    }

    #[test]
    fn test_view_matrix_centers_the_target() {
        let camera = Camera::new(1.0);
        let target_in_view = camera.view_matrix().transform_point3(Vec3::ZERO);

        assert!(target_in_view.x.abs() < 1e-5);
        assert!(target_in_view.y.abs() < 1e-5);
        assert!(
            (target_in_view.z + 3.0_f32.sqrt()).abs() < 1e-5,
            "target should sit straight ahead at the eye distance"
        );
    }
}
