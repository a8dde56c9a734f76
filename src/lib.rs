// Re-export all public modules so they can be used from main.rs
pub mod config;
pub mod logging;

// MVC Architecture
pub mod model;
pub mod view;
pub mod controller;

#[cfg(target_arch = "wasm32")]
pub use web::start;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};
    use web_sys::{Document, Event, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

    use crate::config::GameConfig;
    use crate::controller::input::wasm::keyboard_event_to_input;
    use crate::controller::{FrameLoopContext, InputEvent, InputProcessor};
    use crate::logging;
    use crate::view::{GpuContext, RenderState};

    const CANVAS_WIDTH: u32 = 800;
    const CANVAS_HEIGHT: u32 = 400;

    #[wasm_bindgen(start)]
    pub async fn start() -> Result<(), JsValue> {
        logging::init();

        let config = GameConfig::default();
        config.validate().map_err(|e| js_error(e.to_string()))?;

        let (window, document, canvas) = init_canvas(CANVAS_WIDTH, CANVAS_HEIGHT)?;
        setup_app(config, &window, &document, &canvas).await
    }

    /// Main application setup for WASM
    async fn setup_app(
        config: GameConfig,
        window: &Window,
        document: &Document,
        canvas: &HtmlCanvasElement,
    ) -> Result<(), JsValue> {
        let gpu = GpuContext::new(canvas, canvas.width(), canvas.height())
            .await
            .map_err(|e| js_error(format!("GPU init failed: {e}")))?;

        let mut render_state = RenderState::new(gpu.device.as_ref(), &gpu.config);
        let frame_ctx = Rc::new(RefCell::new(FrameLoopContext::new(
            config,
            InputProcessor::default(),
            now_ms(window),
        )));
        let egui_events: Rc<RefCell<Vec<egui::Event>>> = Rc::new(RefCell::new(Vec::new()));

        setup_input_listeners(document, window, canvas, frame_ctx.clone(), egui_events.clone())?;
        tracing::info!("game ready, press SPACE to start");

        // Continuous redraw using requestAnimationFrame
        let f = RcCellCallback::new(window.clone(), {
            let window = window.clone();
            let canvas = canvas.clone();

            move || {
                let dpr = window.device_pixel_ratio() as f32;
                let (width, height) = (canvas.width(), canvas.height());
                render_state.resize(gpu.device.as_ref(), &gpu.surface, width, height);

                let now = now_ms(&window);
                let mut raw_input = egui::RawInput::default();
                raw_input.time = Some(now / 1000.0);
                raw_input.screen_rect = Some(egui::Rect::from_min_size(
                    egui::Pos2::ZERO,
                    egui::vec2(width as f32 / dpr, height as f32 / dpr),
                ));
                raw_input.events.extend(egui_events.borrow_mut().drain(..));

                let mut ctx = frame_ctx.borrow_mut();
                ctx.egui_ctx.set_pixels_per_point(dpr);
                ctx.update(now, raw_input, &mut render_state);
                drop(ctx);

                if let Err(e) = render_state.draw_frame(gpu.device.as_ref(), gpu.queue.as_ref(), &gpu.surface) {
                    tracing::warn!("frame skipped: {e:?}");
                }
            }
        });
        f.start()
    }

    /// Setup all input event listeners
    fn setup_input_listeners(
        document: &Document,
        window: &Window,
        canvas: &HtmlCanvasElement,
        frame_ctx: Rc<RefCell<FrameLoopContext>>,
        egui_events: Rc<RefCell<Vec<egui::Event>>>,
    ) -> Result<(), JsValue> {
        // Keyboard down
        {
            let frame_ctx = frame_ctx.clone();
            let window = window.clone();
            let keydown = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                let event = keyboard_event_to_input(&e);
                let mut ctx = frame_ctx.borrow_mut();
                if ctx.input.is_action_key(&e.key()) {
                    // Keep the page from scrolling
                    e.prevent_default();
                }
                ctx.handle_input(&event, now_ms(&window));
            }) as Box<dyn FnMut(KeyboardEvent)>);
            document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
            keydown.forget();
        }

        // Canvas click / tap: jump, and let egui see the press for the banner button
        {
            let frame_ctx = frame_ctx.clone();
            let egui_events = egui_events.clone();
            let window = window.clone();
            let target = canvas.clone();
            let mousedown = Closure::wrap(Box::new(move |e: MouseEvent| {
                let pos = pointer_pos(&target, &e);
                egui_events.borrow_mut().push(egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed: true,
                    modifiers: egui::Modifiers::default(),
                });
                frame_ctx.borrow_mut().handle_input(&InputEvent::PointerDown, now_ms(&window));
            }) as Box<dyn FnMut(MouseEvent)>);
            canvas.add_event_listener_with_callback("mousedown", mousedown.as_ref().unchecked_ref())?;
            mousedown.forget();
        }

        // Mouse up
        {
            let egui_events = egui_events.clone();
            let target = canvas.clone();
            let mouseup = Closure::wrap(Box::new(move |e: MouseEvent| {
                let pos = pointer_pos(&target, &e);
                egui_events.borrow_mut().push(egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed: false,
                    modifiers: egui::Modifiers::default(),
                });
            }) as Box<dyn FnMut(MouseEvent)>);
            canvas.add_event_listener_with_callback("mouseup", mouseup.as_ref().unchecked_ref())?;
            mouseup.forget();
        }

        // Mouse move (hover state for the banner button)
        {
            let egui_events = egui_events.clone();
            let target = canvas.clone();
            let mm = Closure::wrap(Box::new(move |e: MouseEvent| {
                egui_events.borrow_mut().push(egui::Event::PointerMoved(pointer_pos(&target, &e)));
            }) as Box<dyn FnMut(MouseEvent)>);
            canvas.add_event_listener_with_callback("mousemove", mm.as_ref().unchecked_ref())?;
            mm.forget();
        }

        // Focus loss - release any held pointer in egui
        {
            let egui_events = egui_events.clone();
            let blur = Closure::wrap(Box::new(move |_e: Event| {
                egui_events.borrow_mut().push(egui::Event::PointerGone);
            }) as Box<dyn FnMut(Event)>);
            window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())?;
            blur.forget();
        }

        Ok(())
    }

    /// Pointer position in egui points (CSS pixels relative to the canvas)
    fn pointer_pos(canvas: &HtmlCanvasElement, e: &MouseEvent) -> egui::Pos2 {
        let rect = canvas.get_bounding_client_rect();
        egui::pos2(
            (e.client_x() as f64 - rect.left()) as f32,
            (e.client_y() as f64 - rect.top()) as f32,
        )
    }

    fn now_ms(window: &Window) -> f64 {
        window.performance().map(|p| p.now()).unwrap_or(0.0)
    }

    fn init_canvas(width: u32, height: u32) -> Result<(Window, Document, HtmlCanvasElement), JsValue> {
        let window = web_sys::window().ok_or(js_error("no global `window`"))?;
        let document = window.document().ok_or(js_error("no document on window"))?;
        let body = document.body().ok_or(js_error("no body on document"))?;
        let canvas_el = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_error("failed to create canvas"))?;

        let dpr = window.device_pixel_ratio();
        canvas_el.set_width((width as f64 * dpr) as u32);
        canvas_el.set_height((height as f64 * dpr) as u32);
        canvas_el.style().set_property("width", &format!("{width}px"))?;
        canvas_el.style().set_property("height", &format!("{height}px"))?;
        body.append_child(&canvas_el)?;
        Ok((window, document, canvas_el))
    }

    fn js_error<E: Into<String>>(msg: E) -> JsValue {
        JsValue::from_str(&msg.into())
    }

    struct RcCellCallback {
        inner: Rc<RefCell<Box<dyn FnMut()>>>,
        window: Window,
    }

    impl RcCellCallback {
        fn new(window: Window, f: impl FnMut() + 'static) -> Self {
            Self {
                inner: Rc::new(RefCell::new(Box::new(f))),
                window,
            }
        }

        fn start(self) -> Result<(), JsValue> {
            let inner = self.inner.clone();
            let window = self.window.clone();

            let callback = Rc::new(RefCell::new(None::<Closure<dyn FnMut()>>));
            let callback_clone = callback.clone();

            *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                inner.borrow_mut().as_mut()();

                // Recursively schedule next frame
                if let Some(cb) = callback_clone.borrow().as_ref() {
                    if let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        tracing::error!("requestAnimationFrame failed: {e:?}");
                    }
                }
            }) as Box<dyn FnMut()>));

            if let Some(cb) = callback.borrow().as_ref() {
                self.window.request_animation_frame(cb.as_ref().unchecked_ref())?;
            }

            // Leak the closure to keep it alive
            std::mem::forget(callback);
            Ok(())
        }
    }
}
