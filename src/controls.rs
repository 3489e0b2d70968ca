use glam::Vec3;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

use crate::camera::Camera;

pub const ROTATE_SPEED: f32 = 0.005;
pub const ZOOM_SPEED: f32 = 0.25;
/// Fraction of orbit velocity that survives each frame while coasting.
pub const DAMPING_FACTOR: f32 = 0.92;
pub const MIN_DISTANCE: f32 = 0.5;
pub const MAX_DISTANCE: f32 = 20.0;
/// Keep pitch short of the poles so the view-up vector stays valid.
pub const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Orbit-style camera controls with inertial damping: left-drag orbits the
/// camera around its target on a spherical offset, the scroll wheel dollies
/// the radius, and motion coasts to a stop instead of ending abruptly.
pub struct OrbitControls {
    yaw: f32,
    pitch: f32,
    distance: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
    zoom_velocity: f32,
    pub damping_enabled: bool,
    dragging: bool,
    last_cursor: Option<(f32, f32)>,
}

impl OrbitControls {
    /// Derive the initial orbit from wherever the camera already sits.
    pub fn from_camera(camera: &Camera) -> Self {
        let offset = camera.position - camera.target;
        let distance = offset.length().max(MIN_DISTANCE);
        Self {
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            zoom_velocity: 0.0,
            damping_enabled: true,
            dragging: false,
            last_cursor: None,
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn yaw_velocity(&self) -> f32 {
        self.yaw_velocity
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.dragging = state == ElementState::Pressed;
            if !self.dragging {
                self.last_cursor = None;
            }
        }
    }

    pub fn process_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        let (x, y) = (position.x as f32, position.y as f32);
        if self.dragging {
            if let Some((last_x, last_y)) = self.last_cursor {
                self.yaw_velocity -= (x - last_x) * ROTATE_SPEED;
                self.pitch_velocity += (y - last_y) * ROTATE_SPEED;
            }
        }
        self.last_cursor = Some((x, y));
    }

    pub fn process_scroll(&mut self, delta: MouseScrollDelta) {
        let scroll = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
        };
        self.zoom_velocity -= scroll * ZOOM_SPEED;
    }

    /// Advance the damping physics by one step and reposition the camera on
    /// its spherical offset around the target.
    pub fn update(&mut self, camera: &mut Camera) {
        self.yaw += self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.distance = (self.distance + self.zoom_velocity).clamp(MIN_DISTANCE, MAX_DISTANCE);

        if self.damping_enabled {
            self.yaw_velocity *= DAMPING_FACTOR;
            self.pitch_velocity *= DAMPING_FACTOR;
            self.zoom_velocity *= DAMPING_FACTOR;
        } else {
            self.yaw_velocity = 0.0;
            self.pitch_velocity = 0.0;
            self.zoom_velocity = 0.0;
        }

        let offset = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        ) * self.distance;
        camera.position = camera.target + offset;
    }
}
