//! Neural Flow entry point
//!
//! Mounts the field full-window on the host page (wasm) or runs a short
//! headless simulation for a smoke check (native).

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    log::info!("Neural Flow starting...");

    match neural_flow::platform::mount("particle-field") {
        Ok(handle) => {
            // The demo page never unmounts the field, so the handle (and its
            // listeners) live for the page lifetime
            std::mem::forget(handle);
            log::info!("Neural Flow running!");
        }
        Err(err) => log::warn!("particle field failed to mount: {err:?}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use neural_flow::field::{Field, SurfaceConfig};
    use neural_flow::policy::FieldPolicy;
    use neural_flow::render::Surface;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct CountingSurface {
        circles: usize,
        lines: usize,
    }

    impl Surface for CountingSurface {
        fn clear(&mut self, _width: f32, _height: f32) {
            self.circles = 0;
            self.lines = 0;
        }
        fn fill_circle(&mut self, _center: Vec2, _radius: f32, _alpha: f32) {
            self.circles += 1;
        }
        fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _width: f32, _alpha: f32) {
            self.lines += 1;
        }
    }

    env_logger::init();
    log::info!("Neural Flow (native) starting...");

    // Headless smoke run: desktop policy over a fixed viewport, cursor
    // parked mid-screen so repulsion and cursor links get exercised
    let policy = FieldPolicy::for_device(true, false);
    let config = SurfaceConfig {
        width: 1280.0,
        height: 800.0,
        scale: 1.0,
    };
    let mut rng = Pcg32::seed_from_u64(42);
    let mut field = Field::new(policy, config, &mut rng);
    field.set_cursor(Vec2::new(640.0, 400.0));

    let mut surface = CountingSurface {
        circles: 0,
        lines: 0,
    };
    for frame in 0..600 {
        field.frame(&mut surface);
        if frame % 120 == 0 {
            log::info!(
                "frame {frame}: {} particles drawn, {} links",
                surface.circles,
                surface.lines,
            );
        }
    }
    field.dispose();
    log::info!("headless run complete");
}
