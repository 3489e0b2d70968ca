use crate::camera::Camera;
use crate::controls::OrbitControls;
use crate::frame::{FrameClock, FrameInfo};
use crate::geometry::{PlaneMesh, PLANE_SEGMENTS, PLANE_SIZE};
use crate::types::SketchParams;
use crate::viewport::Viewport;

/// Paint seam between the sketch's per-frame state and the GPU renderer.
/// One call paints one frame; test doubles stand in for the renderer.
pub trait PaintTarget {
    fn paint(
        &mut self,
        camera: &Camera,
        plane: &PlaneMesh,
        params: &mut SketchParams,
        frame: FrameInfo,
    ) -> Result<(), wgpu::SurfaceError>;
}

/// Scene state and frame ordering: plane, camera, orbit controls, panel
/// parameters, and the monotonic clock. Everything is created once and lives
/// for the program lifetime.
pub struct Sketch {
    pub viewport: Viewport,
    pub camera: Camera,
    pub controls: OrbitControls,
    pub plane: PlaneMesh,
    pub params: SketchParams,
    clock: FrameClock,
}

impl Sketch {
    pub fn new(viewport: Viewport) -> Self {
        let camera = Camera::new(viewport.aspect());
        let controls = OrbitControls::from_camera(&camera);
        Self {
            viewport,
            camera,
            controls,
            plane: PlaneMesh::horizontal(PLANE_SIZE, PLANE_SEGMENTS),
            params: SketchParams::default(),
            clock: FrameClock::new(),
        }
    }

    /// Resize handler: update the viewport and recompute the camera
    /// projection for the new aspect ratio.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.resize(width, height);
        self.camera.set_aspect(self.viewport.aspect());
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.viewport.set_scale_factor(scale_factor);
    }

    /// Run one frame in order: advance the clock, step control damping, then
    /// issue exactly one paint. Returns the frame's timing info.
    pub fn tick(
        &mut self,
        target: &mut dyn PaintTarget,
    ) -> Result<FrameInfo, wgpu::SurfaceError> {
        let frame = self.clock.advance();
        self.controls.damping_enabled = self.params.damping;
        self.controls.update(&mut self.camera);
        target.paint(&self.camera, &self.plane, &mut self.params, frame)?;
        Ok(frame)
    }
}
