/// Terminal front end: plays demo scenes through the ASCII rasterizer
use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use log::info;
use std::io::{stdout, Write};
use std::time::{Duration, Instant};
use shapemotion_core::{Mesh, Scene, ShapeFactory, TextureAssets};

pub mod cli;
pub mod renderer;
pub mod scenes;

pub use renderer::AsciiRenderer;

const ORBIT_STEP: f32 = 0.1;
const ZOOM_STEP: f32 = 1.1;

/// Main application struct for terminal scene playback
pub struct TerminalApp {
    scene: Scene,
    textures: TextureAssets,
    renderer: AsciiRenderer,
    scene_index: usize,
    title: String,
    paused: bool,
    running: bool,
    frame_time: Duration,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(textures: TextureAssets, fps: u32) -> anyhow::Result<Self> {
        let (width, height) = terminal::size().context("reading terminal size")?;

        Ok(Self {
            scene: Scene::new(),
            textures,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            scene_index: 0,
            title: String::new(),
            paused: false,
            running: true,
            frame_time: Duration::from_secs(1) / fps.max(1),
            last_fps_sample: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    /// Load one of [`scenes::SCENE_NAMES`]
    pub fn show_scene(&mut self, name: &str) -> anyhow::Result<()> {
        let factory = ShapeFactory::new(&self.textures);
        scenes::load(name, &mut self.scene, &factory)?;
        if let Some(index) = scenes::SCENE_NAMES.iter().position(|n| *n == name) {
            self.scene_index = index;
        }
        self.title = name.to_string();
        info!("showing scene {:?} with {} shapes", name, self.scene.shapes().len());
        Ok(())
    }

    /// Replace the scene with a single imported mesh
    pub fn show_mesh(&mut self, title: &str, mesh: Mesh) -> anyhow::Result<()> {
        let factory = ShapeFactory::new(&self.textures);
        scenes::load_mesh(&mut self.scene, &factory, mesh)?;
        self.title = title.to_string();
        Ok(())
    }

    fn next_scene(&mut self) -> anyhow::Result<()> {
        let next = (self.scene_index + 1) % scenes::SCENE_NAMES.len();
        self.show_scene(scenes::SCENE_NAMES[next])
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> anyhow::Result<()> {
        let mut last_tick = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?)?;
            }

            // Advance the scene clock and rasterize
            let delta = if self.paused {
                Duration::ZERO
            } else {
                frame_start - last_tick
            };
            last_tick = frame_start;
            self.scene.frame(delta, &mut self.renderer)?;

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_fps_sample).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_fps_sample).as_secs_f32();
                self.frame_count = 0;
                self.last_fps_sample = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> anyhow::Result<()> {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code)?,
            Event::Resize(width, height) => {
                let camera = self.renderer.camera.clone();
                self.renderer = AsciiRenderer::new(width as usize, height as usize);
                self.renderer.camera = shapemotion_core::Camera {
                    aspect: self.renderer.camera.aspect,
                    ..camera
                };
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> anyhow::Result<()> {
        let camera = &mut self.renderer.camera;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('w') | KeyCode::Up => camera.orbit(0.0, ORBIT_STEP),
            KeyCode::Char('s') | KeyCode::Down => camera.orbit(0.0, -ORBIT_STEP),
            KeyCode::Char('a') | KeyCode::Left => camera.orbit(-ORBIT_STEP, 0.0),
            KeyCode::Char('d') | KeyCode::Right => camera.orbit(ORBIT_STEP, 0.0),
            KeyCode::Char('+') | KeyCode::Char('=') => camera.zoom(1.0 / ZOOM_STEP),
            KeyCode::Char('-') => camera.zoom(ZOOM_STEP),
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Char('n') => self.next_scene()?,
            _ => {}
        }
        Ok(())
    }

    fn render(&mut self) -> anyhow::Result<()> {
        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let status = if self.paused { " [paused]" } else { "" };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "{}{} | t={:.1}s | FPS: {:.1} | WASD/Arrows=Orbit +/-=Zoom Space=Pause N=Next Q=Quit",
                self.title,
                status,
                self.scene.elapsed().as_secs_f32(),
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
