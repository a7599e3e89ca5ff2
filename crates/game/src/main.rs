//! SkyJet - arcade jet flight with nitro, cannon and target drones

mod config;
mod headless;
mod hud;
mod models;
mod scenery;
mod session;

use anyhow::Result;
use engine_core::Time;
use input::InputState;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use config::GameConfig;
use session::Session;

/// Window title refreshes per second.
const TITLE_RATE: f64 = 10.0;

/// Live windowed session.
struct GameState {
    window: Arc<Window>,
    session: Session,
    input: InputState,
    time: Time,
    last_title: f64,
    running: bool,
}

impl GameState {
    fn new(window: Arc<Window>, config: &GameConfig) -> Self {
        let mut session = Session::new(config);
        let size = window.inner_size();
        session.sim.camera_mut().set_aspect(size.width, size.height);
        session.describe();
        Self {
            window,
            session,
            input: InputState::new(),
            time: Time::new(),
            last_title: f64::NEG_INFINITY,
            running: true,
        }
    }

    /// Handle a window event. Returns true if the app should exit.
    fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                self.running = false;
                true
            }
            WindowEvent::Resized(size) => {
                self.session.sim.camera_mut().set_aspect(size.width, size.height);
                false
            }
            WindowEvent::Focused(false) => {
                self.input.release_all();
                false
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.input.process_keyboard(key, event.state);
                }
                if self.input.quit_requested() {
                    self.running = false;
                    return true;
                }
                false
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.process_mouse_button(button, state);
                false
            }
            WindowEvent::RedrawRequested => {
                self.update();
                false
            }
            _ => false,
        }
    }

    fn update(&mut self) {
        self.time.update();
        let now = self.time.elapsed_seconds();
        let intent = self.input.intent();
        self.session.frame(&intent, self.time.delta_seconds(), now);
        self.input.begin_frame();

        if now - self.last_title >= 1.0 / TITLE_RATE {
            self.last_title = now;
            let status = if self.session.sim.player_visible() { "" } else { " | CRASHED" };
            self.window
                .set_title(&format!("SkyJet | {}{}", self.session.hud(), status));
        }
    }
}

/// Application handler for winit.
struct App {
    config: GameConfig,
    state: Option<GameState>,
}

impl App {
    fn new(config: GameConfig) -> Self {
        Self { config, state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            let window_attrs = Window::default_attributes()
                .with_title("SkyJet")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window_width,
                    self.config.window_height,
                ));

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            window.request_redraw();
            self.state = Some(GameState::new(window, &self.config));
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) || !state.running {
                log::info!(
                    "Exiting after {} frames, {} kills",
                    state.session.stats.frames,
                    state.session.stats.kills
                );
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                             SkyJet                               ║");
    println!("╠══════════════════════════════════════════════════════════════════╣");
    println!("║  CONTROLS:                                                       ║");
    println!("║    S / Down   - Nose up        │  W / Up     - Nose down         ║");
    println!("║    A / Left   - Roll left      │  D / Right  - Roll right        ║");
    println!("║    Q / E      - Yaw            │  Shift      - Nitro boost       ║");
    println!("║    Z / Ctrl   - Air brake      │  Space/LMB  - Fire cannon       ║");
    println!("║    Escape     - Quit                                             ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");

    let mut config = GameConfig::load();
    if std::env::args().skip(1).any(|a| a == "--headless") {
        config.headless = true;
    }

    if config.headless {
        headless::run(&config);
        return Ok(());
    }

    log::info!("Starting SkyJet ({}x{})", config.window_width, config.window_height);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
