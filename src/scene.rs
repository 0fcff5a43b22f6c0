//! Scene state and the per-frame draw loop.
//!
//! Two scenes share one rasterizer: a default test scene (cube, spinning
//! sphere, tumbling bunny under a directional light) and a toy solar system
//! (nine spheres orbiting a self-lit sun that doubles as the point light).

use crate::camera::OrbitCamera;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::raster::{Rasterizer, CLEAR_COLOR, CLEAR_DEPTH};
use crate::texture::Texture;
use crate::uniforms::{ShadingMode, TexCoordWrap, Uniforms};

const Z_NEAR: f32 = 0.1;

/// One solar-system body.
pub struct Object {
    pub color: Vec3,
    pub diameter: f32,
    pub distance_from_sun: f32,
    pub orbital_period: f32,
    pub current_sun_rotation: f64,
    pub mesh: Mesh,
}

/// Everything the render loop mutates between frames.
pub struct Scene {
    /// Requested framebuffer size; applied to the rasterizer on update.
    pub width: u32,
    pub height: u32,

    pub camera: OrbitCamera,
    pub rasterizer: Rasterizer,

    // User-facing settings, pre-clamped at the input layer.
    pub shading: ShadingMode,
    pub tex_coord_wrap: TexCoordWrap,
    pub texturing_on: bool,
    pub back_face_culling: bool,
    pub solar_system: bool,
    pub shininess: i32,
    pub sphere_subdivisions: u32,

    previous_solar_system: bool,
    previous_sphere_subdivisions: u32,

    directional_light_on: bool,
    world_light_direction: Vec3,
    world_light_position: Vec3,

    cube_mesh: Mesh,
    sphere_mesh: Mesh,
    bunny_mesh: Mesh,
    objects: Vec<Object>,

    scene_camera_position: Vec3,
    solar_camera_position: Vec3,

    time: f64,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        let sphere_subdivisions = 20;
        let scene_camera_position = Vec3::new(-4.8, 2.56, 6.51);

        let mut camera = OrbitCamera::new(scene_camera_position, Vec3::ZERO, Vec3::UP);
        camera.set_projection(width as f32 / height as f32);

        let mut rasterizer = Rasterizer::new(width, height, Z_NEAR);
        rasterizer.set_texture(Texture::checkerboard(32));

        let objects = solar_bodies(sphere_subdivisions);
        log::info!(
            "scene ready: {}x{}, {} solar bodies",
            width,
            height,
            objects.len()
        );

        Self {
            width,
            height,
            camera,
            rasterizer,
            shading: ShadingMode::Flat,
            tex_coord_wrap: TexCoordWrap::Repeat,
            texturing_on: true,
            back_face_culling: true,
            solar_system: false,
            shininess: 16,
            sphere_subdivisions,
            previous_solar_system: false,
            previous_sphere_subdivisions: sphere_subdivisions,
            directional_light_on: true,
            world_light_direction: Vec3::new(0.0, 0.0, -1.0).normalize(),
            world_light_position: Vec3::ZERO,
            cube_mesh: Mesh::cube_centered(2.0),
            sphere_mesh: Mesh::uv_sphere(sphere_subdivisions, Vec3::new(0.0, 0.0, 1.0)),
            bunny_mesh: Mesh::bunny(),
            objects,
            scene_camera_position,
            solar_camera_position: Vec3::new(-22.0, 15.0, 33.0),
            time: 0.0,
        }
    }

    /// Runs one frame: camera, mode changes, resizes, clear, and draws.
    pub fn update(&mut self, dt: f64, rel_x: i32, rel_y: i32, wheel: i32) {
        self.camera.update(dt, rel_x, rel_y, wheel);

        if self.solar_system && !self.previous_solar_system {
            self.directional_light_on = false;
            self.previous_solar_system = true;
            self.camera
                .set_view(self.solar_camera_position, Vec3::ZERO, Vec3::UP);
            log::info!("entering solar system");
        } else if !self.solar_system && self.previous_solar_system {
            self.directional_light_on = true;
            self.previous_solar_system = false;
            self.camera
                .set_view(self.scene_camera_position, Vec3::ZERO, Vec3::UP);
            log::info!("leaving solar system");
        }

        self.rasterizer.clear_color = if self.solar_system {
            Vec3::ZERO
        } else {
            Vec3::ONE * 0.05
        };

        if self.sphere_subdivisions != self.previous_sphere_subdivisions {
            self.sphere_mesh =
                Mesh::uv_sphere(self.sphere_subdivisions, Vec3::new(0.0, 0.0, 1.0));
            self.previous_sphere_subdivisions = self.sphere_subdivisions;
            log::debug!("rebuilt sphere at {} subdivisions", self.sphere_subdivisions);
        }

        if self.width != self.rasterizer.width() || self.height != self.rasterizer.height() {
            self.camera
                .set_projection(self.width as f32 / self.height as f32);
            self.rasterizer.resize(self.width, self.height);
            log::info!("rasterizer resized to {}x{}", self.width, self.height);
        }

        self.rasterizer.back_face_culling = self.back_face_culling;

        self.rasterizer.clear(CLEAR_COLOR | CLEAR_DEPTH);
        self.render_objects(dt);
    }

    fn uniforms(&self, model_matrix: Mat4, sun_mesh: bool) -> Uniforms {
        Uniforms {
            model_matrix,
            view_matrix: self.camera.view_matrix,
            mvp_matrix: self.camera.projection_matrix * self.camera.view_matrix * model_matrix,
            world_camera_position: self.camera.position,
            world_light_direction: self.world_light_direction,
            world_light_position: self.world_light_position,
            directional_light_on: self.directional_light_on,
            sun_mesh,
            shading: self.shading,
            texturing_on: self.texturing_on,
            shininess: self.shininess,
            tex_coord_wrap: self.tex_coord_wrap,
        }
    }

    fn render_objects(&mut self, dt: f64) {
        self.time += dt;

        if self.solar_system {
            for object in &mut self.objects {
                if object.orbital_period != 0.0 {
                    object.current_sun_rotation += 1.5 * dt / object.orbital_period as f64;
                }
            }

            for i in 0..self.objects.len() {
                let object = &self.objects[i];
                let radius = object.diameter / 2.0;
                let model = Mat4::rotation_y(object.current_sun_rotation as f32)
                    * Mat4::translation(object.distance_from_sun, 0.0, 0.0)
                    * Mat4::scaling(radius, radius, radius);

                let uniforms = self.uniforms(model, i == 0);
                self.rasterizer
                    .draw_triangle_mesh(&self.objects[i].mesh, &uniforms);
            }
        } else {
            let time = self.time as f32;

            let model = Mat4::translation(0.0, 0.0, -4.0);
            let uniforms = self.uniforms(model, false);
            self.rasterizer.draw_triangle_mesh(&self.cube_mesh, &uniforms);

            let model = Mat4::translation(5.0, 0.0, 0.0)
                * Mat4::scaling(2.0, 2.0, 2.0)
                * Mat4::rotation_y(1.8 * time);
            let uniforms = self.uniforms(model, false);
            self.rasterizer
                .draw_triangle_mesh(&self.sphere_mesh, &uniforms);

            let axis = Vec3::new(time.cos(), time.cos(), time.sin()).normalize();
            let model = Mat4::scaling(1.4, 1.4, 1.4) * Mat4::rotation(0.2 * time, axis);
            let uniforms = self.uniforms(model, false);
            self.rasterizer
                .draw_triangle_mesh(&self.bunny_mesh, &uniforms);
        }
    }
}

fn solar_bodies(sphere_subdivisions: u32) -> Vec<Object> {
    let bodies: [(Vec3, f32, f32, f32); 9] = [
        (Vec3::new(252.0, 224.0, 32.0) / 255.0, 4.2, 0.0, 0.0), // sun
        (Vec3::new(250.0, 251.0, 186.0) / 255.0, 0.8, 4.0, 0.241), // mercury
        (Vec3::new(234.0, 201.0, 134.0) / 255.0, 1.2, 6.0, 0.615), // venus
        (Vec3::new(51.0, 62.0, 91.0) / 255.0, 1.3, 8.0, 1.0),   // earth
        (Vec3::new(116.0, 18.0, 3.0) / 255.0, 0.7, 10.0, 1.88), // mars
        (Vec3::new(125.0, 58.0, 26.0) / 255.0, 2.3, 13.0, 11.9), // jupiter
        (Vec3::new(251.0, 238.0, 186.0) / 255.0, 2.1, 17.0, 29.4), // saturn
        (Vec3::new(110.0, 207.0, 250.0) / 255.0, 1.8, 20.0, 83.7), // uranus
        (Vec3::new(99.0, 138.0, 241.0) / 255.0, 1.6, 23.0, 163.7), // neptune
    ];

    bodies
        .iter()
        .enumerate()
        .map(|(i, &(color, diameter, distance_from_sun, orbital_period))| Object {
            color,
            diameter,
            distance_from_sun,
            orbital_period,
            // Golden-angle stagger so the orbits don't start in a line.
            current_sun_rotation: i as f64 * 2.399963,
            mesh: Mesh::uv_sphere(sphere_subdivisions, color),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn solar_toggle_snaps_camera_and_lighting() {
        let mut scene = Scene::new(64, 64);
        scene.solar_system = true;
        scene.update(0.016, 0, 0, 0);

        assert!(!scene.directional_light_on);
        assert_eq!(scene.rasterizer.clear_color, Vec3::ZERO);
        assert_relative_eq!(scene.camera.position.x, -22.0, epsilon = 1e-5);

        scene.solar_system = false;
        scene.update(0.016, 0, 0, 0);
        assert!(scene.directional_light_on);
        assert_relative_eq!(scene.camera.position.x, -4.8, epsilon = 1e-5);
        assert_eq!(scene.rasterizer.clear_color, Vec3::ONE * 0.05);
    }

    #[test]
    fn changing_subdivisions_rebuilds_sphere() {
        let mut scene = Scene::new(64, 64);
        scene.sphere_subdivisions = 10;
        scene.update(0.016, 0, 0, 0);

        let n = 10;
        assert_eq!(scene.sphere_mesh.vertex_count(), 3 * (2 * n * n - 2 * n));
    }

    #[test]
    fn resize_request_is_applied_on_update() {
        let mut scene = Scene::new(64, 64);
        scene.width = 100;
        scene.height = 40;
        scene.update(0.016, 0, 0, 0);

        assert_eq!(scene.rasterizer.width(), 100);
        assert_eq!(scene.rasterizer.height(), 40);
        assert_eq!(scene.rasterizer.frame_buffer().len(), 4000);
    }

    #[test]
    fn orbits_advance_with_their_periods() {
        let mut scene = Scene::new(32, 32);
        scene.solar_system = true;

        let before: Vec<f64> = scene
            .objects
            .iter()
            .map(|o| o.current_sun_rotation)
            .collect();
        scene.update(0.1, 0, 0, 0);

        // The sun (period 0) holds still; planets advance by 1.5 dt / period.
        assert_eq!(scene.objects[0].current_sun_rotation, before[0]);
        for (object, &start) in scene.objects.iter().zip(&before).skip(1) {
            let expected = start + 1.5 * 0.1 / object.orbital_period as f64;
            assert_relative_eq!(object.current_sun_rotation, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn default_scene_draws_into_cleared_framebuffer() {
        let mut scene = Scene::new(48, 48);
        scene.update(0.016, 0, 0, 0);

        let background = crate::colors::pack_rgba(Vec3::ONE * 0.05);
        let drawn = scene
            .rasterizer
            .frame_buffer()
            .iter()
            .filter(|&&p| p != background)
            .count();
        assert!(drawn > 0, "expected the test scene to cover some pixels");
    }
}
