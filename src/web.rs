// Browser glue: finds the canvas, forwards window input to the field, runs
// the requestAnimationFrame loop, and debounces window resizes.

use crate::config::FieldConfig;
use crate::debounce::Debounce;
use crate::error::FieldError;
use crate::field::ParticleField;
use crate::Timer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent,
    TouchEvent, Window,
};

struct App {
    window: Window,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    field: ParticleField,
    resize: Debounce,
    resize_timeout: Option<i32>,
    resize_callback: Option<js_sys::Function>,
}

/// Builds the field on the configured canvas and keeps it running for the
/// lifetime of the page.
pub fn run(config: FieldConfig) -> Result<(), FieldError> {
    let window = web_sys::window().ok_or(FieldError::NoWindow)?;
    let document = window.document().ok_or(FieldError::NoDocument)?;
    let canvas_id = config.canvas_id.clone();
    let canvas = document
        .get_element_by_id(&canvas_id)
        .ok_or_else(|| FieldError::MissingElement(canvas_id.clone()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| FieldError::NotACanvas(canvas_id.clone()))?;
    let context = canvas
        .get_context("2d")
        .map_err(|e| FieldError::host("getContext", e))?
        .ok_or_else(|| FieldError::NoContext(canvas_id.clone()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| FieldError::NoContext(canvas_id.clone()))?;

    let [width, height] = viewport_size(&window)?;
    fit_canvas(&canvas, width, height);

    let resize = Debounce::new(config.resize_debounce_ms);
    let field = ParticleField::new(config, width, height);
    log::info!(
        "ember field on #{}: {}x{}, {} particles",
        canvas_id,
        width,
        height,
        field.particles().len()
    );

    let app = Rc::new(RefCell::new(App {
        window: window.clone(),
        canvas,
        context,
        field,
        resize,
        resize_timeout: None,
        resize_callback: None,
    }));

    listen_pointer(&window, &app)?;
    listen_resize(&window, &app)?;
    start_frame_loop(&window, app)?;
    Ok(())
}

fn viewport_size(window: &Window) -> Result<[f64; 2], FieldError> {
    let width = window
        .inner_width()
        .map_err(|e| FieldError::host("innerWidth", e))?;
    let height = window
        .inner_height()
        .map_err(|e| FieldError::host("innerHeight", e))?;
    match (width.as_f64(), height.as_f64()) {
        (Some(width), Some(height)) => Ok([width, height]),
        _ => Err(FieldError::host("innerWidth/innerHeight", JsValue::NULL)),
    }
}

fn fit_canvas(canvas: &HtmlCanvasElement, width: f64, height: f64) {
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
}

fn listen(
    window: &Window,
    event: &str,
    options: Option<&AddEventListenerOptions>,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), FieldError> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let result = match options {
        Some(options) => window.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            options,
        ),
        None => window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()),
    };
    result.map_err(|e| FieldError::host("addEventListener", e))?;
    // Listeners live as long as the page
    closure.forget();
    Ok(())
}

fn listen_pointer(window: &Window, app: &Rc<RefCell<App>>) -> Result<(), FieldError> {
    {
        let app = app.clone();
        listen(window, "mousemove", None, move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                app.borrow_mut()
                    .field
                    .pointer_moved(event.client_x() as f64, event.client_y() as f64);
            }
        })?;
    }
    {
        let app = app.clone();
        listen(window, "mousedown", None, move |_| {
            app.borrow_mut().field.pointer_pressed();
        })?;
    }
    {
        let app = app.clone();
        listen(window, "mouseup", None, move |_| {
            app.borrow_mut().field.pointer_released();
        })?;
    }

    // touchmove has to be non-passive so it can stop the page from scrolling
    let mut options = AddEventListenerOptions::new();
    #[allow(deprecated)]
    options.passive(false);
    {
        let app = app.clone();
        listen(window, "touchmove", Some(&options), move |event| {
            event.prevent_default();
            if let Some(touch) = event
                .dyn_ref::<TouchEvent>()
                .and_then(|event| event.touches().get(0))
            {
                app.borrow_mut()
                    .field
                    .pointer_moved(touch.client_x() as f64, touch.client_y() as f64);
            }
        })?;
    }
    {
        let app = app.clone();
        listen(window, "touchstart", None, move |_| {
            app.borrow_mut().field.pointer_pressed();
        })?;
    }
    {
        let app = app.clone();
        listen(window, "touchend", None, move |_| {
            app.borrow_mut().field.pointer_released();
        })?;
    }
    Ok(())
}

fn listen_resize(window: &Window, app: &Rc<RefCell<App>>) -> Result<(), FieldError> {
    let on_timeout = {
        let app = app.clone();
        Closure::wrap(Box::new(move || settle_resize(&mut app.borrow_mut())) as Box<dyn FnMut()>)
    };
    app.borrow_mut().resize_callback = Some(on_timeout.as_ref().unchecked_ref::<js_sys::Function>().clone());
    on_timeout.forget();

    let app = app.clone();
    listen(window, "resize", None, move |_| {
        let mut app = app.borrow_mut();
        app.resize.signal(js_sys::Date::now());
        let delay = app.resize.quiet_ms();
        schedule_resize(&mut app, delay);
    })
}

// Cancels any pending resize timer and arms a new one
fn schedule_resize(app: &mut App, delay_ms: f64) {
    if let Some(handle) = app.resize_timeout.take() {
        app.window.clear_timeout_with_handle(handle);
    }
    let callback = match &app.resize_callback {
        Some(callback) => callback,
        None => return,
    };
    match app
        .window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback, delay_ms.ceil() as i32)
    {
        Ok(handle) => app.resize_timeout = Some(handle),
        Err(e) => log::warn!("setTimeout failed: {:?}", e),
    }
}

fn settle_resize(app: &mut App) {
    app.resize_timeout = None;
    let now = js_sys::Date::now();
    if !app.resize.poll(now) {
        // Timer fired a little early, wait out the rest of the quiet period
        if let Some(remaining) = app.resize.remaining(now) {
            schedule_resize(app, remaining);
        }
        return;
    }

    let [width, height] = match viewport_size(&app.window) {
        Ok(size) => size,
        Err(e) => {
            log::warn!("skipping resize: {}", e);
            return;
        }
    };
    let _timer = Timer::new("resize ember field");
    fit_canvas(&app.canvas, width, height);
    if app.field.resize(width, height) {
        log::info!("rebuilt field with {} particles", app.field.particles().len());
    }
}

fn request_frame(window: &Window, callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    window.request_animation_frame(callback.as_ref().unchecked_ref())
}

fn start_frame_loop(window: &Window, app: Rc<RefCell<App>>) -> Result<(), FieldError> {
    // The frame closure has to reschedule itself, so it reaches itself
    // through a shared slot filled in after construction.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    let loop_window = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        {
            let mut app = app.borrow_mut();
            let App { field, context, .. } = &mut *app;
            field.frame(context, timestamp, js_sys::Date::now());
        }
        if let Some(callback) = f.borrow().as_ref() {
            if let Err(e) = request_frame(&loop_window, callback) {
                log::error!("requestAnimationFrame failed: {:?}", e);
            }
        }
    }) as Box<dyn FnMut(f64)>));

    let first = g.borrow();
    if let Some(callback) = first.as_ref() {
        request_frame(window, callback).map_err(|e| FieldError::host("requestAnimationFrame", e))?;
    }
    Ok(())
}
