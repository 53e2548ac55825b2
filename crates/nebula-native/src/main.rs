use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use nebula_core::{GestureClassifier, GesturePoller, Scene};
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

mod config;
mod keyboard;
mod renderer;

use keyboard::KeyAction;

const WINDOW_TITLE: &str = "Nebula Morph";

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(e) = run() {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = config::load()?;
    let poll_params = config.polling.clone();
    let scene = Scene::start(config).context("starting scene")?;
    let shared = scene.shared();
    let (mut frames, controller) = scene.into_parts();

    // Keyboard-driven stand-in for the camera and the remote classifier
    let classifier = keyboard::KeyboardClassifier::new(Duration::from_millis(
        config::SIM_CLASSIFIER_LATENCY_MS,
    ));
    let dyn_classifier: Arc<dyn GestureClassifier> = classifier.clone();
    let poller = GesturePoller::spawn(controller, dyn_classifier, poll_params)
        .context("starting gesture poller")?;
    let commands = poller.handle();
    log::info!("[input] O = open hand, C = closed fist, N = no hand, Space = toggle, Esc = quit");

    let event_loop = EventLoop::new().context("creating event loop")?;
    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .build(&event_loop)
        .context("creating window")?;

    let mut gpu = pollster::block_on(renderer::GpuState::new(&window, frames.field().len()))
        .context("initialising GPU")?;
    let frame_shared = Arc::clone(&shared);
    let mut seen_phrase = frame_shared.phrase_serial();
    let mut last_frame = Instant::now();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => gpu.resize(size),
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => elwt.exit(),
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event: key, .. },
                ..
            } => {
                if key.state != ElementState::Pressed || key.repeat {
                    return;
                }
                match keyboard::action_for_key(&key.logical_key) {
                    Some(KeyAction::Show(signal)) => classifier.show(signal),
                    Some(KeyAction::Toggle) => {
                        if !commands.toggle() {
                            log::warn!("[input] gesture poller is not running");
                        }
                    }
                    Some(KeyAction::Quit) => elwt.exit(),
                    None => {}
                }
            }
            Event::AboutToWait => {
                let now = Instant::now();
                let dt = now - last_frame;
                last_frame = now;
                let frame = frames.tick(dt);
                match gpu.render(frame) {
                    Ok(_) => gpu.window.request_redraw(),
                    Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(_) => {}
                }

                let serial = frame_shared.phrase_serial();
                if serial != seen_phrase {
                    seen_phrase = serial;
                    let title = match frame_shared.current_phrase() {
                        Some(phrase) => format!("{WINDOW_TITLE} - {phrase}"),
                        None => WINDOW_TITLE.to_string(),
                    };
                    gpu.window.set_title(&title);
                }
            }
            Event::LoopExiting => frame_shared.end(),
            _ => {}
        })
        .context("running event loop")?;

    shared.end();
    if let Some(controller) = poller.shutdown() {
        log::info!(
            "[scene] shown {} phrases over {} completed cycles",
            controller.phrases().selections(),
            controller.phrases().cycles()
        );
    }
    Ok(())
}
