use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent, WebGl2RenderingContext, Window};

pub mod math;
pub mod mesh;
pub mod model;
pub mod animation;
pub mod interaction;
pub mod render;
pub mod config;
pub mod scene;

use config::SceneConfig;
use render::RenderPipeline;
use scene::Scene;

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    console_log::init_with_level(log::Level::Info).ok();
}

/// Tulip engine exposed to JavaScript
#[wasm_bindgen]
pub struct TulipScene {
    scene: Scene,
    pipeline: RenderPipeline,
    canvas: HtmlCanvasElement,
}

#[wasm_bindgen]
impl TulipScene {
    /// Create an engine with the stock tulip
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<TulipScene, JsValue> {
        Self::from_config(canvas, &SceneConfig::default())
    }

    /// Create an engine from a YAML scene configuration
    #[wasm_bindgen]
    pub fn with_config(canvas: HtmlCanvasElement, yaml: &str) -> Result<TulipScene, JsValue> {
        let config = SceneConfig::from_yaml(yaml)
            .map_err(|e| JsValue::from_str(&e))?;
        Self::from_config(canvas, &config)
    }

    /// Advance the swing one frame and draw it
    #[wasm_bindgen]
    pub fn render(&mut self, dt: f32) {
        self.scene.tick(dt);
        self.pipeline.render(&self.scene.tulip, &self.scene.camera, &self.scene.lighting);
    }

    /// Resize to a CSS size at the given device pixel ratio
    #[wasm_bindgen]
    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f32) {
        let (buffer_width, buffer_height) = self.scene.resize(width, height, device_pixel_ratio);

        self.canvas.set_width(buffer_width);
        self.canvas.set_height(buffer_height);
        self.pipeline.resize(buffer_width as i32, buffer_height as i32);

        log::debug!(
            "Resized to {}x{} (buffer {}x{}, ratio {})",
            width,
            height,
            buffer_width,
            buffer_height,
            self.scene.viewport.pixel_ratio
        );
    }

    /// Pointer moved, in client coordinates
    #[wasm_bindgen]
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.scene.pointer_move(x, y);
    }

    /// Current lean about the depth axis (radians)
    #[wasm_bindgen]
    pub fn swing_angle(&self) -> f32 {
        self.scene.animation.swing().rotation
    }

    /// Lean the tulip is easing toward (radians)
    #[wasm_bindgen]
    pub fn swing_target(&self) -> f32 {
        self.scene.animation.swing().target
    }
}

impl TulipScene {
    fn from_config(canvas: HtmlCanvasElement, config: &SceneConfig) -> Result<TulipScene, JsValue> {
        let gl = canvas
            .get_context("webgl2")?
            .ok_or("Failed to get WebGL2 context")?
            .dyn_into::<WebGl2RenderingContext>()?;

        let scene = Scene::from_config(config);
        let (width, height) = scene.viewport.drawing_buffer_size();

        let mut pipeline = RenderPipeline::new(gl, width as i32, height as i32)
            .map_err(|e| JsValue::from_str(&e))?;
        pipeline.upload_model(&scene.tulip)
            .map_err(|e| JsValue::from_str(&e))?;

        log::info!(
            "Tulip scene created: {} parts, {} distinct meshes",
            scene.tulip.children.len(),
            pipeline.mesh_count()
        );

        Ok(Self { scene, pipeline, canvas })
    }
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window"))
}

/// CSS size of the window and its device pixel ratio
fn window_metrics(window: &Window) -> Result<(u32, u32, f32), JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(1.0);
    let height = window.inner_height()?.as_f64().unwrap_or(1.0);
    Ok((width as u32, height as u32, window.device_pixel_ratio() as f32))
}

/// Run the tulip full-window: size the canvas, follow the pointer, and animate
#[wasm_bindgen]
pub fn start(canvas: HtmlCanvasElement, config: Option<String>) -> Result<(), JsValue> {
    let config = match config.as_deref().map(SceneConfig::from_yaml) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            log::warn!("Invalid scene config, using defaults: {}", e);
            SceneConfig::default()
        }
        None => SceneConfig::default(),
    };

    let engine = Rc::new(RefCell::new(TulipScene::from_config(canvas, &config)?));
    let window = window()?;

    // Initial sizing so the canvas fits the window immediately
    let (width, height, ratio) = window_metrics(&window)?;
    engine.borrow_mut().resize(width, height, ratio);

    let resize_closure = {
        let engine = engine.clone();
        Closure::wrap(Box::new(move || {
            let metrics = web_sys::window().ok_or(()).and_then(|w| window_metrics(&w).map_err(|_| ()));
            if let Ok((width, height, ratio)) = metrics {
                engine.borrow_mut().resize(width, height, ratio);
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    let pointer_closure = {
        let engine = engine.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            engine
                .borrow_mut()
                .on_pointer_move(event.client_x() as f32, event.client_y() as f32);
        }) as Box<dyn FnMut(_)>)
    };
    window.add_event_listener_with_callback("mousemove", pointer_closure.as_ref().unchecked_ref())?;
    pointer_closure.forget();

    // The frame closure reschedules itself through this slot
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let first = frame.clone();

    let performance = window.performance().ok_or("No performance timer")?;
    let last_time = Rc::new(RefCell::new(performance.now()));

    *first.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let now = performance.now();
        let dt = ((now - *last_time.borrow()) / 1000.0) as f32;
        *last_time.borrow_mut() = now;

        engine.borrow_mut().render(dt);

        let scheduled = match (web_sys::window(), frame.borrow().as_ref()) {
            (Some(window), Some(callback)) => window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .is_ok(),
            _ => false,
        };
        if !scheduled {
            log::error!("Failed to schedule next animation frame");
        }
    }) as Box<dyn FnMut()>));

    if let Some(callback) = first.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }

    log::info!("Tulip animation started");

    Ok(())
}
