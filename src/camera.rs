//! Orbit camera.
//!
//! The camera stays locked on a target and rotates around it from pointer
//! deltas, with velocity smoothing on yaw, pitch, and zoom. Pitch is clamped
//! near the world-up poles so the view never flips over the target.

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// Field of view handed to the projection. The value is in degrees but fed
/// to a radians-taking perspective; kept as-is for parity with the scenes
/// this renderer was tuned against.
pub const FOV_Y_DEG: f32 = 45.0;

const SMOOTHING: f32 = 0.89;
const POLE_LIMIT: f32 = 0.98;

pub struct OrbitCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    yaw: f32,
    pitch: f32,
    zoom_amount: f32,
    pub view_matrix: Mat4,
    pub projection_matrix: Mat4,
}

impl OrbitCamera {
    pub fn new(position: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            position,
            target,
            up,
            yaw: 0.0,
            pitch: 0.0,
            zoom_amount: 0.0,
            view_matrix: Mat4::look_at(position, target, up),
            projection_matrix: Mat4::identity(),
        }
    }

    /// Snaps the camera to a new pose and rebuilds the view matrix.
    pub fn set_view(&mut self, position: Vec3, target: Vec3, up: Vec3) {
        self.position = position;
        self.target = target;
        self.up = up;
        self.view_matrix = Mat4::look_at(position, target, up);
    }

    /// Rebuilds the projection for a new aspect ratio.
    pub fn set_projection(&mut self, aspect_ratio: f32) {
        self.projection_matrix = Mat4::perspective(FOV_Y_DEG, aspect_ratio, 0.1, 100.0);
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Advances the orbit from one frame of pointer input.
    ///
    /// `rel_x`/`rel_y` are pointer deltas while dragging, `scroll` is wheel
    /// movement. Yaw and pitch are velocities that decay toward zero.
    pub fn update(&mut self, dt: f64, rel_x: i32, rel_y: i32, scroll: i32) {
        let speed = 0.03 * dt as f32;
        self.yaw = SMOOTHING * self.yaw + -(rel_x as f32) * speed;
        self.pitch = SMOOTHING * self.pitch + -(rel_y as f32) * speed;

        let cam_forward = (self.target - self.position).normalize();
        let cam_right = cam_forward.cross(Vec3::UP).normalize();

        // Stop pitching further once the view direction gets nearly
        // parallel to world up.
        if (-cam_forward).dot(Vec3::UP) > POLE_LIMIT {
            self.pitch = self.pitch.max(0.0);
        } else if (-cam_forward).dot(Vec3::DOWN) > POLE_LIMIT {
            self.pitch = self.pitch.min(0.0);
        }

        let distance = (self.position - self.target).magnitude();
        let mut to_camera = Vec4::from_vec3(self.position - self.target, 0.0).normalize();

        // Yaw around world up first, then pitch around the camera's right.
        to_camera = Mat4::rotation(self.yaw, Vec3::UP) * to_camera;
        to_camera = Mat4::rotation(self.pitch, cam_right) * to_camera;
        self.position = self.target + to_camera.to_vec3() * distance;

        // Recompute the basis for the view matrix.
        let cam_forward = self.target - self.position;
        let cam_right = cam_forward.cross(Vec3::UP).normalize();
        let cam_up = cam_right.cross(cam_forward).normalize();

        let forward = self.target - self.position;
        self.zoom_amount = SMOOTHING * self.zoom_amount + scroll as f32 * 0.01;
        if self.zoom_amount > 0.0 && forward.magnitude() > 0.0
            || self.zoom_amount < 0.0 && forward.magnitude() < 90.0
        {
            self.position = self.position + forward * self.zoom_amount;
        } else {
            self.zoom_amount = 0.0;
        }

        self.view_matrix = Mat4::look_at(self.position, self.target, cam_up);
    }
}
