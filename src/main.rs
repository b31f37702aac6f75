use anyhow::{Context, Result};
use log::info;
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

use rusted_locomotion::engine::frame_clock::FrameClock;
use rusted_locomotion::game::locomotion::LocomotionConfig;
use rusted_locomotion::game::sandbox::Sandbox;

const WINDOW_TITLE: &str = "Rusted Locomotion";

fn load_config() -> Result<LocomotionConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading locomotion config from {}", path);
            LocomotionConfig::from_file(&path)
                .with_context(|| format!("failed to load config '{}'", path))
        }
        None => Ok(LocomotionConfig::default()),
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Locomotion...");

    let config = load_config()?;
    let mut sandbox = Sandbox::new(config);
    if !sandbox.warnings().is_empty() {
        info!("Started with {} config warning(s)", sandbox.warnings().len());
    }

    let mut frame_clock = FrameClock::new();
    let mut shown_state = sandbox.player().state();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(format!("{} - {}", WINDOW_TITLE, shown_state.animation_name()))
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!(
                    "Close requested after {} frames ({} updates), shutting down...",
                    frame_clock.frame_count(),
                    frame_clock.update_count()
                );
                sandbox.shutdown();
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                if event.physical_key == PhysicalKey::Code(KeyCode::KeyP) {
                    if event.state == ElementState::Pressed && !event.repeat {
                        frame_clock.toggle_pause();
                    }
                } else {
                    sandbox.input_mut().process_keyboard_event(&event);
                }
            }
            Event::AboutToWait => {
                let dt = frame_clock.fixed_timestep();
                for _ in 0..frame_clock.begin_frame() {
                    sandbox.step(dt);
                }

                let state = sandbox.player().state();
                if state != shown_state {
                    shown_state = state;
                    info!(
                        "Player {} at {:?}",
                        state.animation_name(),
                        sandbox.player_position()
                    );
                    window.set_title(&format!("{} - {}", WINDOW_TITLE, state.animation_name()));
                }

                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
