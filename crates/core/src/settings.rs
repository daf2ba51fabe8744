use figment::{
    Figment,
    providers::{Format, Json, Serialized},
};
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};

use crate::geometry::PanelLayout;

pub const DEFAULT_LAUNCHER_ID: &str = "chat-launcher";
pub const DEFAULT_PANEL_ID: &str = "chat-widget";
pub const DEFAULT_MESSAGES_ID: &str = "chat-body";
pub const DEFAULT_INPUT_ID: &str = "chat-input";
pub const DEFAULT_ENDPOINT: &str = "/chat";
pub const DEFAULT_DRAG_GRACE_MS: u32 = 100;
pub const DEFAULT_FALLBACK_MESSAGE: &str = "Sorry, I'm having trouble connecting to the server.";

/// Everything the widget needs to find its elements and reach the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSettings {
    #[serde(default = "default_launcher_id")]
    pub launcher_id: String,
    #[serde(default = "default_panel_id")]
    pub panel_id: String,
    #[serde(default = "default_messages_id")]
    pub messages_id: String,
    #[serde(default = "default_input_id")]
    pub input_id: String,
    /// Optional send control; Enter in the entry field always sends.
    #[serde(default)]
    pub send_button_id: Option<String>,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub panel: PanelLayout,
    #[serde(default = "default_drag_grace_ms")]
    pub drag_grace_ms: u32,
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
    /// Insert message text as markup. When false, text is inserted verbatim.
    #[serde(default = "default_render_markup")]
    pub render_markup: bool,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            launcher_id: default_launcher_id(),
            panel_id: default_panel_id(),
            messages_id: default_messages_id(),
            input_id: default_input_id(),
            send_button_id: None,
            endpoint: default_endpoint(),
            panel: PanelLayout::default(),
            drag_grace_ms: default_drag_grace_ms(),
            fallback_message: default_fallback_message(),
            render_markup: default_render_markup(),
        }
    }
}

impl WidgetSettings {
    /// Layers a JSON override document on top of the defaults.
    ///
    /// Nested tables merge key by key, so `{"panel": {"width": 420}}` keeps the
    /// default height and margin.
    pub fn load(overrides: Option<&str>) -> SettingsResult<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(overrides) = overrides.map(str::trim).filter(|raw| !raw.is_empty()) {
            figment = figment.merge(Json::string(overrides));
        }

        let settings = figment.extract::<Self>().context(ExtractSnafu {
            stage: "extract-widget-settings",
        })?;
        Ok(settings.normalized())
    }

    pub fn normalized(mut self) -> Self {
        self.launcher_id = non_blank_or(self.launcher_id, DEFAULT_LAUNCHER_ID);
        self.panel_id = non_blank_or(self.panel_id, DEFAULT_PANEL_ID);
        self.messages_id = non_blank_or(self.messages_id, DEFAULT_MESSAGES_ID);
        self.input_id = non_blank_or(self.input_id, DEFAULT_INPUT_ID);
        self.send_button_id = self
            .send_button_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        self.endpoint = non_blank_or(self.endpoint, DEFAULT_ENDPOINT);
        self.fallback_message = non_blank_or(self.fallback_message, DEFAULT_FALLBACK_MESSAGE);
        self.panel = self.panel.normalized();
        self
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SettingsError {
    #[snafu(display("failed to read widget settings on `{stage}`: {source}"))]
    Extract {
        stage: &'static str,
        source: figment::Error,
    },
}

pub type SettingsResult<T> = Result<T, SettingsError>;

fn non_blank_or(value: String, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

fn default_launcher_id() -> String {
    DEFAULT_LAUNCHER_ID.to_string()
}

fn default_panel_id() -> String {
    DEFAULT_PANEL_ID.to_string()
}

fn default_messages_id() -> String {
    DEFAULT_MESSAGES_ID.to_string()
}

fn default_input_id() -> String {
    DEFAULT_INPUT_ID.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_drag_grace_ms() -> u32 {
    DEFAULT_DRAG_GRACE_MS
}

fn default_fallback_message() -> String {
    DEFAULT_FALLBACK_MESSAGE.to_string()
}

fn default_render_markup() -> bool {
    true
}
