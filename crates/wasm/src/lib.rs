//! Browser binding for the chat launcher widget.
//!
//! Load the module, then call `ChatDock.mount()` once the launcher, panel,
//! message list and entry field are in the document.

pub mod error;
pub mod style;
pub mod surface;

#[cfg(target_arch = "wasm32")]
mod dock;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod http;
#[cfg(target_arch = "wasm32")]
mod listener;

#[cfg(target_arch = "wasm32")]
pub use dock::ChatDock;
pub use error::{DockError, DockResult};
pub use surface::{WidgetPart, WidgetSurface};

/// Initialize WASM module
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("chatdock WASM module initialized");
}
