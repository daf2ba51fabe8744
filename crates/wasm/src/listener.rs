use std::cell::Cell;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget};

use crate::error::{DockError, DockResult, describe_js};

/// DOM event listener that unregisters itself when dropped.
pub(crate) struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
    attached: Cell<bool>,
}

impl Listener {
    pub(crate) fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> DockResult<Self> {
        let callback = Closure::<dyn FnMut(Event)>::wrap(Box::new(handler));
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|error| DockError::Listen {
                stage: "attach-listener",
                event,
                message: describe_js(&error),
            })?;

        Ok(Self {
            target: target.clone(),
            event,
            callback,
            attached: Cell::new(true),
        })
    }

    /// Stops delivery without freeing the closure.
    ///
    /// Use this from inside the listener's own callback; the closure must stay
    /// alive until that call returns.
    pub(crate) fn detach(&self) {
        if !self.attached.replace(false) {
            return;
        }
        if let Err(error) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove '{}' listener: {}", self.event, describe_js(&error));
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.detach();
    }
}
