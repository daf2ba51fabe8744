use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use chatdock_chat::ChatExchange;
use chatdock_core::{
    ClickDisposition, DragController, PanelController, PanelVisibility, Point, WidgetSettings,
};
use gloo_timers::future::sleep;
use snafu::ResultExt;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, KeyboardEvent, MouseEvent};

use crate::dom::{DomSurface, DomView, WidgetElements};
use crate::error::{DockError, DockResult, SettingsSnafu, describe_js};
use crate::http::FetchChatBackend;
use crate::listener::Listener;
use crate::surface::{
    WidgetSurface, drag_launcher, reposition_panel, submits_on_key, toggle_panel,
    visibility_from_display,
};

/// Floating chat launcher bound to existing page elements.
///
/// Dropping the instance (or calling `free()` from JS) removes every listener
/// it installed. A reply still in flight completes and renders first.
#[wasm_bindgen]
pub struct ChatDock {
    inner: Rc<DockInner>,
}

#[wasm_bindgen]
impl ChatDock {
    /// Binds the widget. `options` is an optional object of setting overrides.
    pub fn mount(options: JsValue) -> Result<ChatDock, JsValue> {
        let overrides = options_json(&options)?;
        let settings = WidgetSettings::load(overrides.as_deref()).context(SettingsSnafu {
            stage: "mount-load-settings",
        })?;
        Ok(Self {
            inner: DockInner::mount(settings)?,
        })
    }

    /// Toggles the panel as a plain launcher click would.
    pub fn toggle(&self) -> Result<(), JsValue> {
        self.inner.apply_click(ClickDisposition::Toggle)?;
        Ok(())
    }

    /// Sends the entry field's current text.
    pub fn send(&self) {
        DockInner::send(&self.inner);
    }

    /// Re-derives the panel placement from the launcher's current box.
    pub fn reposition(&self) -> Result<(), JsValue> {
        self.inner.reposition_panel()?;
        Ok(())
    }

    /// Reflects the panel's inline display, including changes made by page script.
    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.inner.sync_visibility() == PanelVisibility::Shown
    }

    /// Messages rendered so far, oldest first.
    pub fn transcript(&self) -> Result<JsValue, JsValue> {
        let transcript = self.inner.exchange.transcript();
        serde_wasm_bindgen::to_value(transcript.messages()).map_err(|error| {
            DockError::Export {
                stage: "export-transcript",
                message: error.to_string(),
            }
            .into()
        })
    }
}

fn options_json(options: &JsValue) -> DockResult<Option<String>> {
    if options.is_undefined() || options.is_null() {
        return Ok(None);
    }

    let json = js_sys::JSON::stringify(options).map_err(|error| DockError::Options {
        stage: "stringify-mount-options",
        message: describe_js(&error),
    })?;
    Ok(json.as_string())
}

/// Document-level listeners that live for one drag gesture.
struct GestureListeners {
    mouse_move: Listener,
    mouse_up: Listener,
}

impl GestureListeners {
    fn detach(&self) {
        self.mouse_move.detach();
        self.mouse_up.detach();
    }
}

struct DockInner {
    document: Document,
    surface: DomSurface,
    settings: WidgetSettings,
    drag: RefCell<DragController>,
    panel: RefCell<PanelController>,
    exchange: ChatExchange<FetchChatBackend>,
    view: DomView,
    gesture: RefCell<Option<GestureListeners>>,
    listeners: RefCell<Vec<Listener>>,
}

impl DockInner {
    fn mount(settings: WidgetSettings) -> DockResult<Rc<Self>> {
        let window = web_sys::window().ok_or(DockError::Unavailable {
            stage: "mount-window",
            object: "window",
        })?;
        let document = window.document().ok_or(DockError::Unavailable {
            stage: "mount-document",
            object: "document",
        })?;
        let elements = WidgetElements::locate(&document, &settings)?;

        let surface = DomSurface { window, elements };

        let initial = visibility_from_display(&surface.panel_display());
        let view = DomView::new(document.clone(), &surface.elements, settings.render_markup);
        let exchange = ChatExchange::new(
            FetchChatBackend::new(settings.endpoint.clone()),
            settings.fallback_message.clone(),
        );

        let inner = Rc::new(Self {
            document,
            surface,
            settings,
            drag: RefCell::new(DragController::new()),
            panel: RefCell::new(PanelController::with_visibility(initial)),
            exchange,
            view,
            gesture: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        });
        Self::install_listeners(&inner)?;

        log::info!(
            "chat dock mounted on '#{}' (endpoint {})",
            inner.settings.launcher_id,
            inner.settings.endpoint
        );
        Ok(inner)
    }

    fn install_listeners(inner: &Rc<Self>) -> DockResult<()> {
        let elements: &WidgetElements = &inner.surface.elements;
        let mut listeners = vec![
            Listener::attach(
                &elements.launcher,
                "mousedown",
                with_dock(inner, |dock, event| dock.on_launcher_down(&event)),
            )?,
            Listener::attach(
                &elements.launcher,
                "click",
                with_dock(inner, |dock, _event| dock.on_launcher_click()),
            )?,
            Listener::attach(
                &elements.input,
                "keydown",
                with_dock(inner, |dock, event| {
                    let submits = event
                        .dyn_ref::<KeyboardEvent>()
                        .is_some_and(|event| submits_on_key(&event.key(), event.is_composing()));
                    if submits {
                        DockInner::send(&dock);
                    }
                }),
            )?,
            Listener::attach(
                &inner.surface.window,
                "resize",
                with_dock(inner, |dock, _event| dock.on_window_resize()),
            )?,
        ];

        if let Some(send_button) = elements.send_button.as_ref() {
            listeners.push(Listener::attach(
                send_button,
                "click",
                with_dock(inner, |dock, _event| DockInner::send(&dock)),
            )?);
        }

        inner.listeners.borrow_mut().extend(listeners);
        Ok(())
    }

    fn on_launcher_down(self: &Rc<Self>, event: &Event) {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        event.prevent_default();

        let cursor = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
        if self.drag.borrow_mut().press(cursor).is_none() {
            return;
        }

        // Track on the document so the drag survives leaving the launcher.
        let listeners = Listener::attach(
            &self.document,
            "mousemove",
            with_dock(self, |dock, event| dock.on_document_move(&event)),
        )
        .and_then(|mouse_move| {
            Listener::attach(
                &self.document,
                "mouseup",
                with_dock(self, |dock, _event| dock.on_document_up()),
            )
            .map(|mouse_up| GestureListeners {
                mouse_move,
                mouse_up,
            })
        });

        match listeners {
            Ok(listeners) => *self.gesture.borrow_mut() = Some(listeners),
            Err(error) => {
                log::error!("failed to start launcher drag: {error}");
                self.drag.borrow_mut().release();
            }
        }
    }

    fn on_document_move(&self, event: &Event) {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        event.prevent_default();

        let cursor = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
        let Some(delta) = self.drag.borrow_mut().move_to(cursor) else {
            return;
        };

        if let Err(error) = drag_launcher(&self.surface, delta, &self.settings.panel) {
            log::error!("failed to move launcher: {error}");
        }
    }

    fn on_document_up(self: &Rc<Self>) {
        let Some(gesture) = self.drag.borrow_mut().release() else {
            return;
        };

        // This runs inside the mouseup callback, so the closures are only
        // detached here and freed after the grace delay.
        let listeners = self.gesture.borrow_mut().take();
        if let Some(listeners) = listeners.as_ref() {
            listeners.detach();
        }

        let dock = Rc::downgrade(self);
        let grace = Duration::from_millis(u64::from(self.settings.drag_grace_ms));
        spawn_local(async move {
            sleep(grace).await;
            drop(listeners);
            if let Some(dock) = dock.upgrade() {
                dock.drag.borrow_mut().settle(gesture);
            }
        });
    }

    fn on_launcher_click(&self) {
        let disposition = self.drag.borrow_mut().take_click();
        if let Err(error) = self.apply_click(disposition) {
            log::error!("failed to toggle chat panel: {error}");
        }
    }

    fn on_window_resize(&self) {
        if self.sync_visibility() != PanelVisibility::Shown {
            return;
        }
        if let Err(error) = self.reposition_panel() {
            log::error!("failed to reposition chat panel after resize: {error}");
        }
    }

    fn apply_click(&self, disposition: ClickDisposition) -> DockResult<()> {
        let mut panel = self.panel.borrow_mut();
        toggle_panel(&self.surface, &mut panel, disposition, &self.settings.panel)?;
        Ok(())
    }

    fn reposition_panel(&self) -> DockResult<()> {
        reposition_panel(&self.surface, &self.settings.panel)
    }

    fn sync_visibility(&self) -> PanelVisibility {
        let visibility = visibility_from_display(&self.surface.panel_display());
        self.panel.borrow_mut().sync(visibility);
        visibility
    }

    fn send(dock: &Rc<Self>) {
        let dock = Rc::clone(dock);
        spawn_local(async move {
            let outcome = dock.exchange.send_message(&dock.view).await;
            log::debug!("chat send finished: {outcome:?}");
        });
    }
}

/// Adapts a dock method into an event callback holding only a weak handle.
fn with_dock(
    dock: &Rc<DockInner>,
    handler: impl Fn(Rc<DockInner>, Event) + 'static,
) -> impl FnMut(Event) + 'static {
    let dock: Weak<DockInner> = Rc::downgrade(dock);
    move |event| {
        if let Some(dock) = dock.upgrade() {
            handler(dock, event);
        }
    }
}
