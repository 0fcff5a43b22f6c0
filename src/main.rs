use std::time::Instant;

use solrast::scene::Scene;
use solrast::window::{FpsCounter, Key, Window, WindowError, WindowEvent};

const WINDOW_WIDTH: u32 = 960;
const WINDOW_HEIGHT: u32 = 540;

fn sphere_triangle_count(subdivisions: u32) -> u32 {
    subdivisions * 2 + (subdivisions - 2) * subdivisions * 2
}

fn format_title(fps: f32, scene: &Scene) -> String {
    format!(
        "solrast | FPS: {:.1} | Shading: {} (1) | Shininess: {} (2)(3) | Sphere Triangles: {} (4)(5) | Wrap: {} (7) | Cull: {} (8) | Secret: {} (S)",
        fps,
        scene.shading,
        scene.shininess,
        sphere_triangle_count(scene.sphere_subdivisions),
        scene.tex_coord_wrap,
        if scene.back_face_culling { "on" } else { "off" },
        if scene.solar_system { "on" } else { "off" },
    )
}

fn handle_key(key: Key, scene: &mut Scene) {
    match key {
        Key::Escape => {}
        Key::Num1 => scene.shading = scene.shading.cycle(),
        Key::Num2 => {
            if scene.shininess != 2 {
                scene.shininess /= 2;
            }
        }
        Key::Num3 => {
            if scene.shininess != 2 << 10 {
                scene.shininess *= 2;
            }
        }
        Key::Num4 => {
            if scene.sphere_subdivisions != 5 {
                scene.sphere_subdivisions -= 5;
            }
        }
        Key::Num5 => {
            if scene.sphere_subdivisions != 150 {
                scene.sphere_subdivisions += 5;
            }
        }
        Key::Num7 => scene.tex_coord_wrap = scene.tex_coord_wrap.toggle(),
        Key::Num8 => scene.back_face_culling = !scene.back_face_culling,
        Key::S => scene.solar_system = !scene.solar_system,
    }
}

fn main() -> Result<(), WindowError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut window = Window::new("solrast", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut scene = Scene::new(WINDOW_WIDTH, WINDOW_HEIGHT);

    let mut fps_counter = FpsCounter::new();
    let mut previous = Instant::now();
    let mut title_timer = 0.0f64;

    'running: loop {
        let mut rel_x = 0;
        let mut rel_y = 0;
        let mut wheel = 0;

        for event in window.poll_events() {
            match event {
                WindowEvent::Quit | WindowEvent::Key(Key::Escape) => break 'running,
                WindowEvent::Key(key) => handle_key(key, &mut scene),
                WindowEvent::MouseDrag { dx, dy } => {
                    rel_x += dx;
                    rel_y += dy;
                }
                WindowEvent::Wheel(y) => wheel += y,
                WindowEvent::Resize(width, height) => {
                    // Ignore degenerate sizes from live-resizing.
                    if width > 50 && height > 50 {
                        scene.width = width;
                        scene.height = height;
                        window.resize(width, height)?;
                    }
                }
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(previous).as_secs_f64();
        previous = now;

        scene.update(dt, rel_x, rel_y, wheel);
        window.present(scene.rasterizer.frame_buffer_bytes())?;

        let fps = fps_counter.tick(dt as f32);
        title_timer += dt;
        if title_timer > 0.25 {
            window.set_title(&format_title(fps, &scene));
            title_timer = 0.0;
        }
    }

    Ok(())
}
