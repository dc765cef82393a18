use pixels::{Pixels, SurfaceTexture};
use tracing::error;
use winit::dpi::LogicalSize;
use winit::event::Event;
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

mod achievements;
mod colors;
mod config;
mod error;
mod game;
mod modes;
mod round;
mod session;

use config::Config;
use error::GameError;
use game::World;

fn main() -> Result<(), GameError> {
    tracing_subscriber::fmt().with_env_filter("hueguess=info").init();
    let config = Config::load_or_default();

    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();
    let window = {
        let size = LogicalSize::new(config.window.width as f64, config.window.height as f64);
        WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(size)
            .with_min_inner_size(size)
            .build(&event_loop)?
    };

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(game::WIDTH, game::HEIGHT, surface_texture)?
    };
    let mut world = World::new(&config)?;

    event_loop.run(move |event, _, control_flow| {
        // Draw the current frame
        if let Event::RedrawRequested(_) = event {
            world.draw(pixels.get_frame());
            if let Err(e) = pixels.render() {
                error!("pixels.render() failed: {}", e);
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        // Handle input events
        if input.update(&event) {
            // Close events (Escape is a game key, not a quit key)
            if input.quit() {
                *control_flow = ControlFlow::Exit;
                return;
            }

            // Resize the window
            if let Some(size) = input.window_resized() {
                pixels.resize_surface(size.width, size.height);
            }

            // Update internal state and request a redraw
            world.update(&input);
            window.request_redraw();
        }
    });
}
