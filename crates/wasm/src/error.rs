use chatdock_core::SettingsError;
use snafu::Snafu;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DockError {
    #[snafu(display("browser {object} is unavailable on `{stage}`"))]
    Unavailable {
        stage: &'static str,
        object: &'static str,
    },
    #[snafu(display("required element '#{id}' is missing on `{stage}`"))]
    MissingElement { stage: &'static str, id: String },
    #[snafu(display("element '#{id}' is not {expected} on `{stage}`"))]
    UnexpectedElement {
        stage: &'static str,
        id: String,
        expected: &'static str,
    },
    #[snafu(display("failed to listen for '{event}' on `{stage}`: {message}"))]
    Listen {
        stage: &'static str,
        event: &'static str,
        message: String,
    },
    #[snafu(display("failed to set style '{property}' on `{stage}`: {message}"))]
    Style {
        stage: &'static str,
        property: &'static str,
        message: String,
    },
    #[snafu(display("failed to render message on `{stage}`: {message}"))]
    Render {
        stage: &'static str,
        message: String,
    },
    #[snafu(display("invalid widget options on `{stage}`: {source}"))]
    Settings {
        stage: &'static str,
        source: SettingsError,
    },
    #[snafu(display("widget options are not serializable on `{stage}`: {message}"))]
    Options {
        stage: &'static str,
        message: String,
    },
    #[snafu(display("failed to export transcript on `{stage}`: {message}"))]
    Export {
        stage: &'static str,
        message: String,
    },
}

pub type DockResult<T> = Result<T, DockError>;

impl From<DockError> for JsValue {
    fn from(error: DockError) -> Self {
        js_sys::Error::new(&error.to_string()).into()
    }
}

/// Best-effort message for a thrown JS value.
pub fn describe_js(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}
