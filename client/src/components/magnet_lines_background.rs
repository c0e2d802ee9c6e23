//! Full-viewport canvas of drifting points joined by fading lines.
//!
//! SYSTEM CONTEXT
//! ==============
//! Purely decorative. The simulation lives in `util::magnet_lines`; this
//! component owns the canvas, the `requestAnimationFrame` loop, and the
//! window resize listener, and tears all three down on unmount.

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use crate::util::magnet_lines::LinesStyle;

/// Fixed canvas behind the page content. Ignores pointer input.
#[component]
pub fn MagnetLinesBackground(
    #[prop(into, default = String::from("#4f46e5"))] color: String,
    #[prop(default = 0.2)] speed: f64,
    #[prop(default = 0.7)] intensity: f64,
) -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    #[cfg(feature = "hydrate")]
    {
        let style = LinesStyle { color, speed, intensity };
        Effect::new(move || {
            if let Some(canvas) = canvas_ref.get() {
                animation::start(canvas, style.clone());
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (color, speed, intensity);

    view! {
        <canvas
            node_ref=canvas_ref
            class="magnet-lines"
            aria-hidden="true"
            style="position:fixed;top:0;left:0;width:100vw;height:100vh;z-index:-1;pointer-events:none;background-color:#111827;"
        ></canvas>
    }
}

#[cfg(feature = "hydrate")]
mod animation {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

    use leptos::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

    use crate::util::magnet_lines::{Field, LinesStyle, POINT_RADIUS, gradient_stops};

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

    /// Size the canvas, scatter points, and run the frame loop until the
    /// current reactive owner is cleaned up.
    pub(super) fn start(canvas: HtmlCanvasElement, style: LinesStyle) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(ctx) = context_2d(&canvas) else {
            leptos::logging::warn!("magnet lines: 2d context unavailable");
            return;
        };

        let (width, height) = viewport_size(&window);
        size_canvas(&canvas, width, height);
        let field = Rc::new(RefCell::new(Field::scatter(width, height, &style, js_sys::Math::random)));

        let alive = Arc::new(AtomicBool::new(true));
        let frame_id = Arc::new(AtomicI32::new(0));

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let weak = Rc::downgrade(&callback);
        let alive_frame = alive.clone();
        let frame_id_frame = frame_id.clone();
        let field_frame = field.clone();
        *callback.borrow_mut() = Some(Closure::new(move || {
            if !alive_frame.load(Ordering::Relaxed) {
                return;
            }
            {
                let mut field = field_frame.borrow_mut();
                field.step();
                draw(&ctx, &field, &style);
            }
            if let Some(callback) = weak.upgrade() {
                schedule(&callback, &frame_id_frame);
            }
        }));
        schedule(&callback, &frame_id);

        let resize = window_event_listener(leptos::ev::resize, move |_| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = viewport_size(&window);
            size_canvas(&canvas, width, height);
            field.borrow_mut().resize(width, height);
        });

        // Keeps the frame closure alive for as long as the owner is.
        let _callback = StoredValue::new_local(callback);

        on_cleanup(move || {
            alive.store(false, Ordering::Relaxed);
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(frame_id.load(Ordering::Relaxed));
            }
            resize.remove();
        });
    }

    fn schedule(callback: &FrameCallback, frame_id: &AtomicI32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(closure) = callback.borrow().as_ref() {
            if let Ok(id) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
                frame_id.store(id, Ordering::Relaxed);
            }
        }
    }

    fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
        canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()
    }

    fn viewport_size(window: &Window) -> (f64, f64) {
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (width, height)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn size_canvas(canvas: &HtmlCanvasElement, width: f64, height: f64) {
        canvas.set_width(width.max(0.0) as u32);
        canvas.set_height(height.max(0.0) as u32);
    }

    fn draw(ctx: &CanvasRenderingContext2d, field: &Field, style: &LinesStyle) {
        ctx.clear_rect(0.0, 0.0, field.width, field.height);

        ctx.set_line_width(1.0);
        for link in field.links() {
            let a = field.particles[link.from];
            let b = field.particles[link.to];
            let gradient = ctx.create_linear_gradient(a.x, a.y, b.x, b.y);
            for (offset, color) in gradient_stops(&style.color, link.alpha) {
                let _ = gradient.add_color_stop(offset, &color);
            }
            ctx.set_stroke_style_canvas_gradient(&gradient);
            ctx.begin_path();
            ctx.move_to(a.x, a.y);
            ctx.line_to(b.x, b.y);
            ctx.stroke();
        }

        ctx.set_fill_style_str(&style.color);
        for p in &field.particles {
            ctx.begin_path();
            let _ = ctx.arc(p.x, p.y, POINT_RADIUS, 0.0, TAU);
            ctx.fill();
        }
    }
}
