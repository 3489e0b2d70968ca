use glam::Vec3;
use plane_sketch::camera::Camera;
use plane_sketch::frame::FrameInfo;
use plane_sketch::geometry::PlaneMesh;
use plane_sketch::types::SketchParams;
use plane_sketch::viewport::Viewport;
use plane_sketch::{PaintTarget, Sketch};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton};

/// Records every paint issued through the sketch's paint seam.
#[derive(Default)]
struct RecordingTarget {
    frames: Vec<FrameInfo>,
    eyes: Vec<Vec3>,
}

impl PaintTarget for RecordingTarget {
    fn paint(
        &mut self,
        camera: &Camera,
        _plane: &PlaneMesh,
        _params: &mut SketchParams,
        frame: FrameInfo,
    ) -> Result<(), wgpu::SurfaceError> {
        self.frames.push(frame);
        self.eyes.push(camera.position);
        Ok(())
    }
}

fn start_drag(sketch: &mut Sketch, from: (f64, f64), to: (f64, f64)) {
    sketch
        .controls
        .process_mouse_button(MouseButton::Left, ElementState::Pressed);
    sketch
        .controls
        .process_cursor_moved(PhysicalPosition::new(from.0, from.1));
    sketch
        .controls
        .process_cursor_moved(PhysicalPosition::new(to.0, to.1));
    sketch
        .controls
        .process_mouse_button(MouseButton::Left, ElementState::Released);
}

#[cfg(test)]
mod sketch_tests {
    use super::*;

    #[test]
    fn test_exactly_one_paint_per_tick() {
        let mut sketch = Sketch::new(Viewport::new(800.0, 600.0, 1.0));
        let mut target = RecordingTarget::default();

        for _ in 0..3 {
            sketch.tick(&mut target).expect("paint never fails here");
        }

        assert_eq!(target.frames.len(), 3, "one draw call per scheduled frame");
        let numbers: Vec<u64> = target.frames.iter().map(|f| f.number).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
    }

    #[test]
    fn test_painted_time_strictly_increases() {
        let mut sketch = Sketch::new(Viewport::new(800.0, 600.0, 1.0));
        let mut target = RecordingTarget::default();

        sketch.tick(&mut target).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        sketch.tick(&mut target).unwrap();

        assert!(
            target.frames[1].time > target.frames[0].time,
            "uniform time seen by the shader must strictly increase"
        );
    }

    #[test]
    fn test_controls_update_runs_before_paint() {
        let mut sketch = Sketch::new(Viewport::new(800.0, 600.0, 1.0));
        start_drag(&mut sketch, (0.0, 0.0), (80.0, 0.0));
        let eye_before = sketch.camera.position;

        let mut target = RecordingTarget::default();
        sketch.tick(&mut target).unwrap();

        assert!(
            (target.eyes[0] - eye_before).length() > 1e-6,
            "paint must see the camera after the damping step"
        );
        assert_eq!(
            target.eyes[0], sketch.camera.position,
            "painted eye matches the post-update camera"
        );
    }

    #[test]
    fn test_damping_toggle_flows_into_controls() {
        let mut sketch = Sketch::new(Viewport::new(800.0, 600.0, 1.0));
        sketch.params.damping = false;
        start_drag(&mut sketch, (0.0, 0.0), (80.0, 0.0));

        let mut target = RecordingTarget::default();
        sketch.tick(&mut target).unwrap();

        assert_eq!(
            sketch.controls.yaw_velocity(),
            0.0,
            "with damping off, no inertia survives the tick"
        );
    }

    #[test]
    fn test_resize_flows_to_camera_and_viewport() {
        let mut sketch = Sketch::new(Viewport::new(800.0, 600.0, 1.0));
        sketch.resize(1024.0, 768.0);

        assert!((sketch.camera.aspect() - 1024.0 / 768.0).abs() < 1e-6);
        assert_eq!(sketch.viewport.physical_extent(), (1024, 768));
    }

    #[test]
    fn test_sketch_plane_lies_flat() {
        let sketch = Sketch::new(Viewport::new(800.0, 600.0, 1.0));
        assert_eq!(sketch.plane.rotation.x, -std::f32::consts::FRAC_PI_2);
    }
}
