use std::{
    sync::mpsc::{channel, Receiver},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use pixels::{Pixels, SurfaceTexture};
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use crate::core::{
    cancel::CancelFlag,
    color_map::Palette,
    display::{ChannelDisplay, DrawCommand, FrameBuffer},
    file_io::{date_time_string, FilePrefix},
    menu::{MenuAction, MenuInput, MenuState, RenderSelection},
    scan_renderer::{RenderError, RenderOutcome},
};
use crate::errors::{FractalError, Result};
use crate::fractals::common::FractalParams;

const WINDOW_TITLE: &str = "Fractal Generator";
// While a render is running, wake periodically to pull draw commands from the worker.
const ACTIVE_LOOP_TICK_MS: u64 = 10;

enum Screen {
    Menu,
    Rendering {
        selection: RenderSelection,
        cancel: CancelFlag,
        worker: JoinHandle<std::result::Result<RenderOutcome, RenderError>>,
        commands: Receiver<DrawCommand>,
    },
    Finished {
        selection: RenderSelection,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppControl {
    Continue,
    Exit,
}

fn menu_input_from_key(key: VirtualKeyCode) -> Option<MenuInput> {
    match key {
        VirtualKeyCode::Left => Some(MenuInput::Left),
        VirtualKeyCode::Right => Some(MenuInput::Right),
        VirtualKeyCode::Up => Some(MenuInput::Up),
        VirtualKeyCode::Down => Some(MenuInput::Down),
        VirtualKeyCode::Return | VirtualKeyCode::NumpadEnter => Some(MenuInput::Confirm),
        VirtualKeyCode::Escape | VirtualKeyCode::Delete | VirtualKeyCode::Back => {
            Some(MenuInput::Exit)
        }
        _ => None,
    }
}

fn is_clear_key(key: VirtualKeyCode) -> bool {
    matches!(
        key,
        VirtualKeyCode::Escape | VirtualKeyCode::Delete | VirtualKeyCode::Back
    )
}

/**
 * Interactive frontend: the menu and the most recent frame live in a single
 * `FrameBuffer` owned by the window thread. Renders run on a worker thread
 * that streams its draw calls back through a channel, so the window keeps
 * polling the keyboard and can cancel the render at any pixel.
 */
struct ExploreApp {
    params: FractalParams,
    menu: MenuState,
    screen: Screen,
    frame_buffer: FrameBuffer,
    menu_palette: Palette,
    render_palette: Palette,
    file_prefix: FilePrefix,
}

impl ExploreApp {
    fn new(params: FractalParams, file_prefix: FilePrefix) -> Result<ExploreApp> {
        let mut app = ExploreApp {
            menu: MenuState::new(params.fractal.kind, params.gradient),
            screen: Screen::Menu,
            frame_buffer: FrameBuffer::new(params.viewport.resolution),
            menu_palette: Palette::grayscale(),
            render_palette: params.palette(),
            file_prefix,
            params,
        };
        app.show_menu()?;
        Ok(app)
    }

    fn title(&self) -> String {
        match &self.screen {
            Screen::Menu => format!("{} -- {}", WINDOW_TITLE, self.menu.summary()),
            Screen::Rendering { selection, .. } => format!(
                "{} -- rendering {} ({}), Clear to cancel",
                WINDOW_TITLE,
                selection.fractal_kind.display_name(),
                selection.gradient.display_name()
            ),
            Screen::Finished { selection } => format!(
                "{} -- {} ({}), Space to save, any key for menu",
                WINDOW_TITLE,
                selection.fractal_kind.display_name(),
                selection.gradient.display_name()
            ),
        }
    }

    /// The menu is always shown in grayscale; frames use their gradient's palette.
    fn active_palette(&self) -> &Palette {
        match self.screen {
            Screen::Menu => &self.menu_palette,
            Screen::Rendering { .. } | Screen::Finished { .. } => &self.render_palette,
        }
    }

    fn is_rendering(&self) -> bool {
        matches!(self.screen, Screen::Rendering { .. })
    }

    fn show_menu(&mut self) -> Result<()> {
        self.screen = Screen::Menu;
        self.menu
            .draw(&mut self.frame_buffer)
            .map_err(|source| RenderError::Draw { column: 0, source })?;
        log::info!("Menu: {}", self.menu.summary());
        Ok(())
    }

    fn start_render(&mut self, selection: RenderSelection) {
        let mut params = self.params.clone();
        params.fractal.kind = selection.fractal_kind;
        params.gradient = selection.gradient;
        self.render_palette = params.palette();

        let renderer = params.renderer();
        let resolution = params.viewport.resolution;
        let cancel = CancelFlag::new();
        let worker_cancel = cancel.clone();
        let (sender, commands) = channel();
        let worker = thread::spawn(move || {
            let mut display = ChannelDisplay::new(resolution, sender);
            renderer.render(&mut display, &worker_cancel)
        });

        log::info!(
            "Rendering {} with the {} gradient",
            selection.fractal_kind.display_name(),
            selection.gradient.display_name()
        );
        self.screen = Screen::Rendering {
            selection,
            cancel,
            worker,
            commands,
        };
    }

    fn handle_key(&mut self, key: VirtualKeyCode) -> Result<AppControl> {
        if let Screen::Rendering { cancel, .. } = &self.screen {
            if is_clear_key(key) {
                cancel.request_cancel();
            }
            return Ok(AppControl::Continue);
        }

        if matches!(self.screen, Screen::Finished { .. }) {
            if key == VirtualKeyCode::Space {
                self.save_frame()?;
            } else {
                self.show_menu()?;
            }
            return Ok(AppControl::Continue);
        }

        let action = menu_input_from_key(key).map(|input| self.menu.handle_input(input));
        match action {
            Some(MenuAction::Redraw) => self.show_menu()?,
            Some(MenuAction::Start(selection)) => self.start_render(selection),
            Some(MenuAction::Exit) => return Ok(AppControl::Exit),
            Some(MenuAction::None) | None => {}
        }
        Ok(AppControl::Continue)
    }

    /// Applies pending draw commands and collects the worker once it is done.
    /// @return: true if the frame buffer changed.
    fn update(&mut self) -> Result<bool> {
        let (changed, finished) = match &self.screen {
            Screen::Rendering {
                commands, worker, ..
            } => {
                // Check completion first, so that every command sent before the
                // worker returned is drained below.
                let finished = worker.is_finished();
                let mut changed = false;
                for command in commands.try_iter() {
                    self.frame_buffer
                        .apply(&command)
                        .map_err(|source| RenderError::Draw { column: 0, source })?;
                    changed = true;
                }
                (changed, finished)
            }
            _ => (false, false),
        };

        if finished {
            self.finish_render()?;
            return Ok(true);
        }
        Ok(changed)
    }

    fn finish_render(&mut self) -> Result<()> {
        if let Screen::Rendering {
            selection, worker, ..
        } = std::mem::replace(&mut self.screen, Screen::Menu)
        {
            let outcome = worker.join().map_err(|_| FractalError::WorkerPanicked)??;
            match outcome {
                RenderOutcome::Completed => {
                    log::info!("Render complete");
                    self.screen = Screen::Finished { selection };
                }
                RenderOutcome::Cancelled => {
                    log::info!("Render cancelled, returning to menu");
                    self.show_menu()?;
                }
            }
        }
        Ok(())
    }

    fn save_frame(&self) -> Result<()> {
        let render_path = self
            .file_prefix
            .with_suffix(&format!("_{}.png", date_time_string()));
        self.frame_buffer.to_image(&self.render_palette).save(&render_path)?;
        log::info!("Wrote image file to: {}", render_path.display());
        Ok(())
    }

    fn shutdown(&mut self) {
        if let Screen::Rendering { cancel, worker, .. } =
            std::mem::replace(&mut self.screen, Screen::Menu)
        {
            cancel.request_cancel();
            if worker.join().is_err() {
                log::error!("Render worker panicked during shutdown");
            }
        }
    }
}

fn exit_app(app: &mut ExploreApp, control_flow: &mut ControlFlow, error: Option<FractalError>) {
    if let Some(error) = error {
        log::error!("{}", error);
    }
    app.shutdown();
    *control_flow = ControlFlow::Exit;
}

/**
 * Create a window showing the selection menu.
 * Supported features:
 * -- left/right arrows to change the focused selection, up/down to move focus
 * -- enter to start rendering
 * -- escape/delete ("clear") to cancel a render, or to exit from the menu
 * -- space to save a finished render to a PNG file
 */
pub fn explore_fractal(params: FractalParams, file_prefix: FilePrefix) -> Result<()> {
    params.validate()?;
    let resolution = params.viewport.resolution;
    let mut app = ExploreApp::new(params, file_prefix)?;

    let event_loop = EventLoop::new();
    let window = {
        let logical_size = LogicalSize::new(resolution[0] as f64, resolution[1] as f64);
        WindowBuilder::new()
            .with_title(app.title())
            .with_inner_size(logical_size)
            .with_min_inner_size(logical_size)
            .build(&event_loop)?
    };

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(resolution[0], resolution[1], surface_texture)?
    };

    // GUI application main loop:
    event_loop.run(move |event, _, control_flow| {
        *control_flow = if app.is_rendering() {
            ControlFlow::WaitUntil(Instant::now() + Duration::from_millis(ACTIVE_LOOP_TICK_MS))
        } else {
            ControlFlow::Wait
        };

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => exit_app(&mut app, control_flow, None),
                WindowEvent::Resized(size) => {
                    if let Err(error) = pixels.resize_surface(size.width, size.height) {
                        exit_app(&mut app, control_flow, Some(error.into()));
                    }
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(key),
                            ..
                        },
                    ..
                } => match app.handle_key(key) {
                    Ok(AppControl::Continue) => {
                        window.set_title(&app.title());
                        window.request_redraw();
                    }
                    Ok(AppControl::Exit) => exit_app(&mut app, control_flow, None),
                    Err(error) => exit_app(&mut app, control_flow, Some(error)),
                },
                _ => {}
            },
            Event::MainEventsCleared => match app.update() {
                Ok(true) => {
                    window.set_title(&app.title());
                    window.request_redraw();
                }
                Ok(false) => {}
                Err(error) => exit_app(&mut app, control_flow, Some(error)),
            },
            Event::RedrawRequested(_) => {
                app.frame_buffer
                    .write_rgba_frame(app.active_palette(), pixels.frame_mut());
                if let Err(error) = pixels.render() {
                    exit_app(&mut app, control_flow, Some(error.into()));
                }
            }
            _ => {}
        }
    });
}
