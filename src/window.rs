use winit::window::Window;

use crate::camera::Camera;
use crate::frame::FrameInfo;
use crate::geometry::PlaneMesh;
use crate::renderer::SketchRenderer;
use crate::sketch::PaintTarget;
use crate::types::SketchParams;

/// Per-frame adapter tying the winit window and the GPU renderer to the
/// sketch's paint seam. Built fresh each redraw; one `paint` is one
/// `SketchRenderer::render`.
pub struct WindowPaint<'a> {
    window: &'a Window,
    renderer: &'a mut SketchRenderer,
    fps: f32,
    show_ui: bool,
}

impl<'a> WindowPaint<'a> {
    pub fn new(
        window: &'a Window,
        renderer: &'a mut SketchRenderer,
        fps: f32,
        show_ui: bool,
    ) -> Self {
        Self {
            window,
            renderer,
            fps,
            show_ui,
        }
    }
}

impl PaintTarget for WindowPaint<'_> {
    fn paint(
        &mut self,
        camera: &Camera,
        plane: &PlaneMesh,
        params: &mut SketchParams,
        frame: FrameInfo,
    ) -> Result<(), wgpu::SurfaceError> {
        self.renderer
            .render(self.window, camera, plane, params, frame, self.fps, self.show_ui)
    }
}
