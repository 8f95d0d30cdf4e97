use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{AppControl, FrameCtx, InitCtx, Lifecycle, Program, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;
use crate::input::InputState;
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "kiln".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `program` until it or the user asks to exit.
    ///
    /// Returns the error from window/GPU creation or from `Program::init` if
    /// startup failed; in that case no frame was drawn. Errors are logged
    /// here before being returned, so callers only pick the exit status.
    pub fn run<P>(config: RuntimeConfig, gpu_init: GpuInit, program: P) -> Result<()>
    where
        P: 'static + Program,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = RuntimeState::new(config, gpu_init, program);

        let looped = event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error");

        state.shutdown();
        if let Some(err) = state.failure.take() {
            return Err(err);
        }
        if let Err(err) = &looped {
            log::error!("{err:#}");
        }
        looped
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct RuntimeState<P>
where
    P: Program + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    program: P,
    lifecycle: Lifecycle,

    window: Option<WindowEntry>,
    failure: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<P> RuntimeState<P>
where
    P: Program + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, program: P) -> Self {
        Self {
            config,
            gpu_init,
            program,
            lifecycle: Lifecycle::default(),
            window: None,
            failure: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        self.request_exit(event_loop);
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init))
                    .context("GPU initialization failed for window")
            },
        }
        .try_build()
    }

    /// Runs `Program::init` against the freshly created window.
    fn init_program(&mut self) -> Result<()> {
        let (program, window) = (&mut self.program, &self.window);
        let Some(entry) = window else {
            anyhow::bail!("no window to initialize against");
        };

        entry
            .with(|fields| {
                let mut ctx = InitCtx {
                    window: WindowCtx {
                        id: fields.window.id(),
                        window: fields.window,
                    },
                    gpu: fields.gpu,
                };
                program.init(&mut ctx)
            })
            .context("program initialization failed")
    }

    fn redraw(&mut self) -> AppControl {
        let (program, window) = (&mut self.program, &mut self.window);
        let Some(entry) = window else {
            return AppControl::Continue;
        };

        let mut control = AppControl::Continue;
        entry.with_mut(|fields| {
            let time = fields.clock.tick();
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    id: fields.window.id(),
                    window: fields.window,
                },
                gpu: fields.gpu,
                time,
            };

            control = program.update(&mut ctx);
            program.draw_debug_ui();
        });
        control
    }

    /// Destroys the program (once, and only if init succeeded), then the GPU
    /// context and window.
    fn shutdown(&mut self) {
        if self.lifecycle.mark_destroyed() {
            log::debug!("destroying program");
            self.program.destroy();
        }
        self.window = None;
    }
}

impl<P> ApplicationHandler for RuntimeState<P>
where
    P: Program + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.lifecycle != Lifecycle::Uninitialized {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => self.window = Some(entry),
            Err(e) => return self.fail(event_loop, e),
        }

        if let Err(e) = self.init_program() {
            return self.fail(event_loop, e);
        }
        self.lifecycle.mark_ready();
        log::info!("program initialized");

        if let Some(entry) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; the program draws every frame.
        if let Some(entry) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let ready = self.lifecycle.is_ready();
        let (program, window) = (&mut self.program, &mut self.window);
        let Some(entry) = window else {
            return;
        };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        let mut control = AppControl::Continue;
        entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.window, fields.input_state, &event) {
                fields.input_state.apply_event(&ev);
                if ready {
                    control = program.on_event(&ev);
                }
            }
        });

        if control == AppControl::Exit {
            log::info!("exit requested by program");
            self.request_exit(event_loop);
            return;
        }

        match &event {
            WindowEvent::CloseRequested => self.request_exit(event_loop),

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested if ready => {
                if self.redraw() == AppControl::Exit {
                    self.request_exit(event_loop);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_titled_and_sized() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.title, "kiln");
        assert_eq!(cfg.initial_size, LogicalSize::new(1280.0, 720.0));
    }
}
