//! Browser platform glue
//!
//! Owns the real canvas, the window listeners, and the cancellable
//! requestAnimationFrame loop for one mounted field. Everything here is
//! wasm-only; the logic it drives lives in [`crate::field`] and is
//! platform-free.
//!
//! Teardown is explicit and total: [`FieldHandle::dispose`] cancels the
//! pending frame, detaches every listener, and empties the session slot, so
//! a callback that was already queued finds nothing to draw against.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MediaQueryList, MouseEvent, Window};

use crate::field::{Field, SurfaceConfig};
use crate::policy::FieldPolicy;
use crate::render::CanvasSurface;

const BREAKPOINT_QUERY: &str = "(min-width: 768px)";
const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

type FrameClosure = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
type Slot = Rc<RefCell<Option<Mounted>>>;

/// One running session: everything that must be torn down together.
struct Mounted {
    field: Field,
    surface: CanvasSurface,
    raf_id: Option<i32>,
    frame_cb: FrameClosure,
    resize_cb: Closure<dyn FnMut()>,
    pointer_cb: Option<Closure<dyn FnMut(MouseEvent)>>,
}

/// Handle to a mounted particle field. Disposing (or dropping) stops the
/// frame loop and detaches every listener; disposal is idempotent.
#[wasm_bindgen]
pub struct FieldHandle {
    slot: Slot,
    window: Window,
    breakpoint: Option<(MediaQueryList, Closure<dyn FnMut()>)>,
}

#[wasm_bindgen]
impl FieldHandle {
    pub fn dispose(&mut self) {
        if let Some((query, cb)) = self.breakpoint.take() {
            let _ = query
                .remove_event_listener_with_callback("change", cb.as_ref().unchecked_ref());
        }
        let mounted = self.slot.borrow_mut().take();
        if let Some(mounted) = mounted {
            teardown(&self.window, mounted);
            log::info!("particle field disposed");
        }
    }
}

impl Drop for FieldHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Mount the particle field onto the canvas with the given element id.
///
/// Re-evaluates the device policy and remounts whenever the viewport class
/// flips across the desktop breakpoint. With reduced motion requested the
/// session slot stays empty and nothing runs.
pub fn mount(canvas_id: &str) -> Result<FieldHandle, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str("canvas element not found"))?
        .dyn_into()?;

    let slot: Slot = Rc::new(RefCell::new(None));
    mount_session(&slot, &window, &canvas)?;

    // The policy is a mount-time decision, so a breakpoint crossing rebuilds
    // the whole session with freshly read signals
    let breakpoint = match window.match_media(BREAKPOINT_QUERY)? {
        Some(query) => {
            let slot = slot.clone();
            let window = window.clone();
            let canvas = canvas.clone();
            let cb = Closure::<dyn FnMut()>::new(move || {
                let mounted = slot.borrow_mut().take();
                if let Some(mounted) = mounted {
                    teardown(&window, mounted);
                }
                if let Err(err) = mount_session(&slot, &window, &canvas) {
                    log::warn!("viewport-class remount failed: {err:?}");
                }
            });
            query.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())?;
            Some((query, cb))
        }
        None => None,
    };

    Ok(FieldHandle {
        slot,
        window,
        breakpoint,
    })
}

/// Build one session into the slot: read the device signals, seed the field,
/// hook up listeners, and start the frame loop. Leaves the slot empty when
/// there is nothing to render (reduced motion, or no 2D context).
fn mount_session(slot: &Slot, window: &Window, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let desktop = media_matches(window, BREAKPOINT_QUERY);
    let reduced_motion = media_matches(window, REDUCED_MOTION_QUERY);
    let policy = FieldPolicy::for_device(desktop, reduced_motion);
    if !policy.renders() {
        log::info!("reduced motion requested, particle field stays idle");
        return Ok(());
    }

    let Some(surface) = CanvasSurface::acquire(canvas) else {
        log::warn!("no 2d context, nothing to render this session");
        return Ok(());
    };
    let config = viewport_config(window);
    surface.configure(&config)?;

    let seed = js_sys::Date::now() as u64;
    let mut rng = Pcg32::seed_from_u64(seed);
    let field = Field::new(policy, config, &mut rng);
    log::info!(
        "particle field mounted: {} particles, cursor interaction {}, seed {seed}",
        policy.particle_count,
        if policy.cursor_interactive { "on" } else { "off" },
    );

    // Resize: rescale the backing store and adopt the new logical size;
    // particle positions are never reset
    let resize_cb = {
        let slot = Rc::downgrade(slot);
        let window = window.clone();
        Closure::<dyn FnMut()>::new(move || {
            let Some(slot) = slot.upgrade() else { return };
            let mut guard = slot.borrow_mut();
            let Some(mounted) = guard.as_mut() else { return };
            let config = viewport_config(&window);
            if let Err(err) = mounted.surface.configure(&config) {
                log::warn!("resize failed: {err:?}");
                return;
            }
            mounted.field.resize(config);
        })
    };
    window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())?;

    // Pointer: fire-and-forget writes into the field's cursor, read by the
    // next frame. Desktop only; on other devices the cursor stays parked
    let pointer_cb = if policy.cursor_interactive {
        let slot = Rc::downgrade(slot);
        let cb = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let Some(slot) = slot.upgrade() else { return };
            if let Some(mounted) = slot.borrow_mut().as_mut() {
                mounted
                    .field
                    .set_cursor(Vec2::new(event.client_x() as f32, event.client_y() as f32));
            }
        });
        window.add_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref())?;
        Some(cb)
    } else {
        None
    };

    // Frame loop as a revocable task: the closure lives in a slot so each
    // tick can reschedule itself, and teardown cancels via the stored id
    let frame_cb: FrameClosure = Rc::new(RefCell::new(None));
    {
        let slot = Rc::downgrade(slot);
        let frame_slot = frame_cb.clone();
        let window = window.clone();
        *frame_cb.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
            let Some(slot) = slot.upgrade() else { return };
            let mut guard = slot.borrow_mut();
            // Disposed while this tick was queued: draw nothing
            let Some(mounted) = guard.as_mut() else { return };
            mounted.field.frame(&mut mounted.surface);
            mounted.raf_id = schedule_frame(&window, &frame_slot);
        }));
    }
    let raf_id = schedule_frame(window, &frame_cb);

    *slot.borrow_mut() = Some(Mounted {
        field,
        surface,
        raf_id,
        frame_cb,
        resize_cb,
        pointer_cb,
    });
    Ok(())
}

fn schedule_frame(window: &Window, frame_cb: &FrameClosure) -> Option<i32> {
    frame_cb.borrow().as_ref().and_then(|cb| {
        window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .ok()
    })
}

/// Cancel the pending frame and detach every listener. Nothing can fire
/// against the session afterwards.
fn teardown(window: &Window, mut mounted: Mounted) {
    if let Some(id) = mounted.raf_id.take() {
        let _ = window.cancel_animation_frame(id);
    }
    let _ = window.remove_event_listener_with_callback(
        "resize",
        mounted.resize_cb.as_ref().unchecked_ref(),
    );
    if let Some(cb) = &mounted.pointer_cb {
        let _ =
            window.remove_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
    }
    // Break the frame closure's self-referential cycle; safe now that the
    // pending frame is cancelled
    mounted.frame_cb.borrow_mut().take();
    mounted.field.dispose();
}

fn media_matches(window: &Window, query: &str) -> bool {
    window
        .match_media(query)
        .ok()
        .flatten()
        .map(|list| list.matches())
        .unwrap_or(false)
}

fn viewport_config(window: &Window) -> SurfaceConfig {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    let scale = window.device_pixel_ratio() as f32;
    SurfaceConfig {
        width,
        height,
        scale: if scale > 0.0 { scale } else { 1.0 },
    }
}
