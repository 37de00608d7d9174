//! Whiplash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, WheelEvent};

    use whiplash::driver::FrameDriver;
    use whiplash::platform::input::{Key, PointerEvent};
    use whiplash::platform::now_ms;
    use whiplash::sim::Viewport;
    use whiplash::{Settings, World};

    /// Game instance holding all state
    struct Game {
        world: World,
        driver: FrameDriver,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl Game {
        /// Match the canvas backing store to its layout size
        fn resize(&mut self) {
            let width = self.canvas.client_width().max(1) as u32;
            let height = self.canvas.client_height().max(1) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.world.resize(width as f32, height as f32);
        }

        fn frame(&mut self) {
            let now = now_ms();
            self.driver.frame(&mut self.world, &mut self.ctx, now);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Whiplash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings::load();
        let viewport = Viewport::new(
            canvas.client_width().max(1) as f32,
            canvas.client_height().max(1) as f32,
        );
        let world = World::new(viewport, &settings, now_ms());

        let game = Rc::new(RefCell::new(Game {
            world,
            driver: FrameDriver::new(settings.heartbeat_ms),
            canvas: canvas.clone(),
            ctx,
        }));
        game.borrow_mut().resize();

        setup_input_handlers(&canvas, game.clone())?;
        setup_resize(game.clone())?;

        request_animation_frame(game);

        log::info!("Whiplash running!");
        Ok(())
    }

    /// Position of a touch relative to the canvas
    fn touch_point(canvas: &HtmlCanvasElement, touch: &web_sys::Touch) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        Vec2::new(
            touch.client_x() as f32 - rect.left() as f32,
            touch.client_y() as f32 - rect.top() as f32,
        )
    }

    /// Normalize a touch event: the changed touch plus every active one
    fn touch_event(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<PointerEvent> {
        let changed = event.changed_touches().get(0)?;
        let list = event.touches();
        let touches = (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|t| touch_point(canvas, &t))
            .collect();
        Some(PointerEvent::touch(touch_point(canvas, &changed), touches))
    }

    fn mouse_event(event: &MouseEvent) -> PointerEvent {
        PointerEvent::mouse(event.offset_x() as f32, event.offset_y() as f32)
    }

    fn listen<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
        target: &web_sys::EventTarget,
        kind: &str,
        handler: impl FnMut(E) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard
        {
            let game = game.clone();
            listen(&window, "keydown", move |event: web_sys::KeyboardEvent| {
                if let Some(key) = Key::from_keyboard(&event.key(), event.key_code()) {
                    game.borrow_mut().world.key_down(key);
                }
            })?;
        }
        {
            let game = game.clone();
            listen(&window, "keyup", move |event: web_sys::KeyboardEvent| {
                if let Some(key) = Key::from_keyboard(&event.key(), event.key_code()) {
                    game.borrow_mut().world.key_up(key);
                }
            })?;
        }

        // Mouse
        {
            let game = game.clone();
            listen(canvas, "mousedown", move |event: MouseEvent| {
                game.borrow_mut().world.pointer_down(&mouse_event(&event));
            })?;
        }
        {
            let game = game.clone();
            listen(canvas, "mousemove", move |event: MouseEvent| {
                game.borrow_mut().world.pointer_move(&mouse_event(&event));
            })?;
        }
        for kind in ["mouseup", "mouseleave"] {
            let game = game.clone();
            listen(canvas, kind, move |event: MouseEvent| {
                game.borrow_mut().world.pointer_up(&mouse_event(&event));
            })?;
        }

        // Touch
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            listen(canvas, "touchstart", move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pointer) = touch_event(&canvas_clone, &event) {
                    game.borrow_mut().world.pointer_down(&pointer);
                }
            })?;
        }
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            listen(canvas, "touchmove", move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pointer) = touch_event(&canvas_clone, &event) {
                    game.borrow_mut().world.pointer_move(&pointer);
                }
            })?;
        }
        for kind in ["touchend", "touchcancel"] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            listen(canvas, kind, move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pointer) = touch_event(&canvas_clone, &event) {
                    game.borrow_mut().world.pointer_up(&pointer);
                }
            })?;
        }

        // Wheel zoom
        {
            listen(canvas, "wheel", move |event: WheelEvent| {
                event.prevent_default();
                game.borrow_mut().world.wheel(event.delta_y() as f32);
            })?;
        }

        Ok(())
    }

    fn setup_resize(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        listen(&window, "resize", move |_event: web_sys::Event| {
            game.borrow_mut().resize();
            // Paint the new size right away; no-op while a frame is pending
            request_animation_frame(game.clone());
        })
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window to animate");
            return;
        };
        let callback_game = game.clone();
        game.borrow_mut().driver.request(move || {
            let closure = Closure::once(move |_time: f64| {
                game_loop(callback_game);
            });
            let handle = window
                .request_animation_frame(closure.as_ref().unchecked_ref())
                .map_err(|e| log::warn!("requestAnimationFrame failed: {:?}", e))
                .ok();
            closure.forget();
            handle
        });
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use whiplash::driver::FrameDriver;
    use whiplash::platform::input::{Key, PointerEvent};
    use whiplash::renderer::Recorder;
    use whiplash::sim::Viewport;
    use whiplash::{Settings, World};

    env_logger::init();
    log::info!("Whiplash (native) starting...");
    log::info!("Native mode renders headlessly - serve the wasm build for the playable version");

    let settings = Settings::load();
    let mut world = World::new(Viewport::new(320.0, 320.0), &settings, 0.0);
    let mut driver = FrameDriver::new(settings.heartbeat_ms);
    let mut surface = Recorder::new();

    // Walk forward for a second, then drag-steer downward for another
    world.key_down(Key::Up);
    let mut now = 0.0;
    for _ in 0..60 {
        now += 1000.0 / 60.0;
        surface.clear();
        driver.frame(&mut world, &mut surface, now);
    }
    world.key_up(Key::Up);

    world.pointer_down(&PointerEvent::mouse(160.0, 160.0));
    world.pointer_move(&PointerEvent::mouse(160.0, 220.0));
    world.pointer_move(&PointerEvent::mouse(165.0, 300.0));
    world.pointer_up(&PointerEvent::mouse(165.0, 300.0));
    for _ in 0..60 {
        now += 1000.0 / 60.0;
        surface.clear();
        driver.frame(&mut world, &mut surface, now);
    }

    let player = world.player();
    log::info!(
        "After {} frames: player at ({:.1}, {:.1}) facing {:.2} rad, {} draw ops in last frame",
        driver.frames(),
        player.pos.x,
        player.pos.y,
        player.direction,
        surface.ops.len()
    );
    for guard in world.characters.iter().filter(|c| !c.is_player()) {
        log::info!(
            "Guard at ({:.1}, {:.1}) facing {:.2} rad",
            guard.pos.x,
            guard.pos.y,
            guard.direction
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
