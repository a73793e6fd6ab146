//! Drawing-surface seam
//!
//! The field draws through [`Surface`] so the frame logic never touches a
//! real canvas directly: the browser backend lives behind the same trait the
//! tests drive with a recording stand-in. All coordinates are logical units;
//! the display-scale transform is the backend's concern.

use glam::Vec2;

/// Field color, rgb(255, 107, 107) from the site palette.
pub const FIELD_COLOR: (u8, u8, u8) = (255, 107, 107);

/// Immediate-mode drawing operations the field needs.
pub trait Surface {
    /// Clear the full logical viewport.
    fn clear(&mut self, width: f32, height: f32);
    /// Fill one particle dot.
    fn fill_circle(&mut self, center: Vec2, radius: f32, alpha: f32);
    /// Stroke one connecting line.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, alpha: f32);
}

#[cfg(target_arch = "wasm32")]
mod canvas {
    use std::f64::consts::TAU;

    use glam::Vec2;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use super::{FIELD_COLOR, Surface};
    use crate::field::SurfaceConfig;

    /// Browser 2D canvas backend.
    pub struct CanvasSurface {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl CanvasSurface {
        /// Grab the 2D context. `None` means nothing renders this session.
        pub fn acquire(canvas: &HtmlCanvasElement) -> Option<Self> {
            let ctx = canvas
                .get_context("2d")
                .ok()
                .flatten()?
                .dyn_into::<CanvasRenderingContext2d>()
                .ok()?;
            Some(Self {
                canvas: canvas.clone(),
                ctx,
            })
        }

        /// Size the backing store to `logical * scale` and scale the context
        /// transform to match, so draw calls stay in logical units. Sharp on
        /// HiDPI displays; never touches particle state.
        pub fn configure(&self, config: &SurfaceConfig) -> Result<(), JsValue> {
            let scale = config.scale as f64;
            self.canvas.set_width((config.width as f64 * scale) as u32);
            self.canvas.set_height((config.height as f64 * scale) as u32);
            let style = self.canvas.style();
            style.set_property("width", &format!("{}px", config.width))?;
            style.set_property("height", &format!("{}px", config.height))?;
            self.ctx.set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0)?;
            Ok(())
        }
    }

    fn rgba(alpha: f32) -> String {
        let (r, g, b) = FIELD_COLOR;
        format!("rgba({r}, {g}, {b}, {alpha})")
    }

    impl Surface for CanvasSurface {
        fn clear(&mut self, width: f32, height: f32) {
            self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, alpha: f32) {
            self.ctx.set_fill_style_str(&rgba(alpha));
            self.ctx.begin_path();
            // arc only errors on a negative radius; sizes are spawned positive
            let _ = self
                .ctx
                .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
            self.ctx.fill();
        }

        fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, alpha: f32) {
            self.ctx.set_stroke_style_str(&rgba(alpha));
            self.ctx.set_line_width(width as f64);
            self.ctx.begin_path();
            self.ctx.move_to(from.x as f64, from.y as f64);
            self.ctx.line_to(to.x as f64, to.y as f64);
            self.ctx.stroke();
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
