use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::info;
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use super::clock::{TickGate, TARGET_TICK_INTERVAL};
use super::input::InputCollector;
use super::metrics::MetricsAccumulator;
use super::sim::{SimCommand, Simulation};
use super::Renderer;

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub tick_interval: Duration,
    pub metrics_log_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Overworld".to_string(),
            window_width: 960,
            window_height: 720,
            tick_interval: TARGET_TICK_INTERVAL,
            metrics_log_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("renderer draw failed: {0}")]
    RendererDraw(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

/// Drives the simulation at a fixed tick rate inside a winit event
/// loop. Cutscenes run inside the ticks; the one way ticking stops is
/// the pause surface, which halts the gate entirely until dismissed.
pub fn run_app(config: LoopConfig, mut sim: Box<dyn Simulation>) -> Result<(), AppError> {
    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window: &'static winit::window::Window = Box::leak(Box::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    ));
    let mut renderer = Renderer::new(window).map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let mut gate = TickGate::new(config.tick_interval);
    let mut collector = InputCollector::new();
    let mut metrics = MetricsAccumulator::new(config.metrics_log_interval);
    let mut last_frame_instant = Instant::now();
    let mut paused = false;

    info!(
        tick_interval_us = gate.interval().as_micros() as u64,
        window_width = config.window_width,
        window_height = config.window_height,
        "loop_config"
    );

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if let Err(error) = renderer.resize(window, new_size.width, new_size.height) {
                        tracing::warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    collector.handle_keyboard_input(&event);
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;

                    if paused {
                        if collector.take_pause_dismiss_pressed() {
                            paused = false;
                            gate.restart();
                            sim.resume_from_pause();
                            info!("pause_resumed");
                        }
                    } else if gate.feed(frame_dt) {
                        let snapshot = collector.snapshot_for_tick();
                        match sim.advance(&snapshot) {
                            SimCommand::Continue => {}
                            SimCommand::EnterPause => {
                                paused = true;
                                info!("pause_entered");
                            }
                            SimCommand::Quit => {
                                info!(reason = "sim_quit", "shutdown_requested");
                                window_target.exit();
                            }
                        }
                        metrics.record_tick();
                    }

                    if let Err(error) = renderer.render(&sim.frame(), paused) {
                        tracing::warn!(error = %error, "renderer_draw_failed");
                        window_target.exit();
                    }
                    metrics.record_frame(frame_dt);
                    if let Some(snapshot) = metrics.maybe_snapshot(now) {
                        info!(
                            fps = snapshot.fps,
                            tps = snapshot.tps,
                            frame_time_ms = snapshot.frame_time_ms,
                            paused,
                            "loop_metrics"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}
