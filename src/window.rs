//! SDL2 window, event pump, and framebuffer presentation.
//!
//! SDL is used only to get pixels on screen and input events in; all
//! rendering happens on the CPU. The framebuffer's little-endian
//! `R, G, B, A=0` byte order maps to SDL's `ABGR8888` streaming texture.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("sdl: {0}")]
    Sdl(String),
    #[error("window creation: {0}")]
    Build(#[from] sdl2::video::WindowBuildError),
    #[error("canvas creation: {0}")]
    Canvas(#[from] sdl2::IntegerOrSdlError),
    #[error("texture creation: {0}")]
    Texture(#[from] sdl2::render::TextureValueError),
    #[error("texture upload: {0}")]
    Upload(#[from] sdl2::render::UpdateTextureError),
}

/// Keys the renderer reacts to; everything else is dropped at the pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num7,
    Num8,
    S,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Quit,
    Key(Key),
    /// Pointer moved while the left button was held.
    MouseDrag { dx: i32, dy: i32 },
    Wheel(i32),
    Resize(u32, u32),
}

/// Rolling-average frame rate over the last 100 frames.
pub struct FpsCounter {
    samples: [f32; Self::SAMPLES],
    sum: f32,
    index: usize,
}

impl FpsCounter {
    const SAMPLES: usize = 100;

    pub fn new() -> Self {
        Self {
            samples: [0.0; Self::SAMPLES],
            sum: 0.0,
            index: 0,
        }
    }

    /// Records one frame time and returns the current average FPS.
    pub fn tick(&mut self, dt: f32) -> f32 {
        self.sum -= self.samples[self.index];
        self.sum += dt;
        self.samples[self.index] = dt;
        self.index = (self.index + 1) % Self::SAMPLES;

        let average = self.sum / Self::SAMPLES as f32;
        if average > 0.0 {
            1.0 / average
        } else {
            0.0
        }
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    texture: sdl2::render::Texture<'static>,
    event_pump: sdl2::EventPump,
    mouse: sdl2::mouse::MouseUtil,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, WindowError> {
        let sdl_context = sdl2::init().map_err(WindowError::Sdl)?;
        let video_subsystem = sdl_context.video().map_err(WindowError::Sdl)?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()?;

        let canvas = window.into_canvas().build()?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump().map_err(WindowError::Sdl)?;
        let mouse = sdl_context.mouse();

        // SAFETY: texture_creator is heap-allocated and lives as long as the
        // Window; field order drops the texture first.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture =
            texture_creator_ref.create_texture_streaming(PixelFormatEnum::ABGR8888, width, height)?;

        Ok(Self {
            canvas,
            texture_creator,
            texture,
            event_pump,
            mouse,
            width,
            height,
        })
    }

    /// Drains the event queue into renderer events.
    ///
    /// Left-button press/release hides/shows the cursor here; drag deltas
    /// are only reported while the button is held.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(WindowEvent::Quit),
                Event::KeyDown {
                    keycode: Some(keycode),
                    ..
                } => {
                    if let Some(key) = map_key(keycode) {
                        events.push(WindowEvent::Key(key));
                    }
                }
                Event::MouseMotion {
                    mousestate,
                    xrel,
                    yrel,
                    ..
                } if mousestate.left() => {
                    events.push(WindowEvent::MouseDrag { dx: xrel, dy: yrel });
                }
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    ..
                } => self.mouse.show_cursor(false),
                Event::MouseButtonUp {
                    mouse_btn: MouseButton::Left,
                    ..
                } => self.mouse.show_cursor(true),
                Event::MouseWheel { y, .. } => events.push(WindowEvent::Wheel(y)),
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => events.push(WindowEvent::Resize(w as u32, h as u32)),
                _ => {}
            }
        }

        events
    }

    /// Blits a full frame of `R, G, B, A` bytes to the screen.
    pub fn present(&mut self, pixels: &[u8]) -> Result<(), WindowError> {
        self.texture
            .update(None, pixels, (self.width * 4) as usize)?;

        self.canvas.clear();
        self.canvas
            .copy(
                &self.texture,
                None,
                Some(Rect::new(0, 0, self.width, self.height)),
            )
            .map_err(WindowError::Sdl)?;
        self.canvas.present();
        Ok(())
    }

    /// Recreates the streaming texture for a new window size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), WindowError> {
        self.width = width;
        self.height = height;
        // SAFETY: same as in new(); texture_creator outlives the texture.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(self.texture_creator.as_ref() as *const _) };
        self.texture =
            texture_creator_ref.create_texture_streaming(PixelFormatEnum::ABGR8888, width, height)?;
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) {
        let _ = self.canvas.window_mut().set_title(title);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

fn map_key(keycode: Keycode) -> Option<Key> {
    match keycode {
        Keycode::Escape => Some(Key::Escape),
        Keycode::Num1 => Some(Key::Num1),
        Keycode::Num2 => Some(Key::Num2),
        Keycode::Num3 => Some(Key::Num3),
        Keycode::Num4 => Some(Key::Num4),
        Keycode::Num5 => Some(Key::Num5),
        Keycode::Num7 => Some(Key::Num7),
        Keycode::Num8 => Some(Key::Num8),
        Keycode::S => Some(Key::S),
        _ => None,
    }
}
