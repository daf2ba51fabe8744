use chatdock_chat::{ChatMessage, ChatView};
use chatdock_core::{Point, Rect, Viewport, WidgetSettings};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, HtmlInputElement, Window};

use crate::error::{DockError, DockResult, describe_js};
use crate::surface::{WidgetPart, WidgetSurface};

/// Elements the widget drives. All but the send control are required.
pub(crate) struct WidgetElements {
    pub launcher: HtmlElement,
    pub panel: HtmlElement,
    pub messages: HtmlElement,
    pub input: HtmlInputElement,
    pub send_button: Option<HtmlElement>,
}

impl WidgetElements {
    pub(crate) fn locate(document: &Document, settings: &WidgetSettings) -> DockResult<Self> {
        let send_button = match settings.send_button_id.as_deref() {
            Some(id) => Some(element_by_id::<HtmlElement>(document, id, "an HTML element")?),
            None => None,
        };

        Ok(Self {
            launcher: element_by_id(document, &settings.launcher_id, "an HTML element")?,
            panel: element_by_id(document, &settings.panel_id, "an HTML element")?,
            messages: element_by_id(document, &settings.messages_id, "an HTML element")?,
            input: element_by_id(document, &settings.input_id, "an input element")?,
            send_button,
        })
    }
}

fn element_by_id<T: JsCast>(document: &Document, id: &str, expected: &'static str) -> DockResult<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| DockError::MissingElement {
            stage: "locate-widget-elements",
            id: id.to_string(),
        })?
        .dyn_into::<T>()
        .map_err(|_| DockError::UnexpectedElement {
            stage: "locate-widget-elements",
            id: id.to_string(),
            expected,
        })
}

/// Widget elements plus the window they are laid out in.
pub(crate) struct DomSurface {
    pub window: Window,
    pub elements: WidgetElements,
}

impl DomSurface {
    fn element(&self, part: WidgetPart) -> &HtmlElement {
        match part {
            WidgetPart::Launcher => &self.elements.launcher,
            WidgetPart::Panel => &self.elements.panel,
        }
    }
}

impl WidgetSurface for DomSurface {
    fn set_style(&self, part: WidgetPart, property: &'static str, value: &str) -> DockResult<()> {
        self.element(part)
            .style()
            .set_property(property, value)
            .map_err(|error| DockError::Style {
                stage: "set-inline-style",
                property,
                message: describe_js(&error),
            })
    }

    fn panel_display(&self) -> String {
        self.elements
            .panel
            .style()
            .get_property_value("display")
            .unwrap_or_default()
    }

    fn launcher_origin(&self) -> Point {
        let launcher = &self.elements.launcher;
        Point::new(f64::from(launcher.offset_left()), f64::from(launcher.offset_top()))
    }

    fn launcher_rect(&self) -> Rect {
        let rect = self.elements.launcher.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn viewport(&self) -> Viewport {
        let dimension = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|value| value.as_f64()).unwrap_or(0.0)
        };
        Viewport::new(
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
        )
    }

    fn focus_input(&self) {
        if let Err(error) = self.elements.input.focus() {
            log::warn!("failed to focus chat input: {}", describe_js(&error));
        }
    }
}

/// Message list and entry field seen through the exchange's view contract.
pub(crate) struct DomView {
    document: Document,
    messages: HtmlElement,
    input: HtmlInputElement,
    render_markup: bool,
}

impl DomView {
    pub(crate) fn new(document: Document, elements: &WidgetElements, render_markup: bool) -> Self {
        Self {
            document,
            messages: elements.messages.clone(),
            input: elements.input.clone(),
            render_markup,
        }
    }

    fn try_render(&self, message: &ChatMessage) -> DockResult<()> {
        let element = self
            .document
            .create_element("div")
            .map_err(|error| DockError::Render {
                stage: "create-message-element",
                message: describe_js(&error),
            })?;
        element.set_class_name(&message.class_name());
        if self.render_markup {
            // Replies are trusted to carry safe markup such as links.
            element.set_inner_html(&message.text);
        } else {
            element.set_text_content(Some(&message.text));
        }

        self.messages
            .append_child(&element)
            .map_err(|error| DockError::Render {
                stage: "append-message-element",
                message: describe_js(&error),
            })?;
        self.messages.set_scroll_top(self.messages.scroll_height());
        Ok(())
    }
}

impl ChatView for DomView {
    fn input_value(&self) -> String {
        self.input.value()
    }

    fn clear_input(&self) {
        self.input.set_value("");
    }

    fn render(&self, message: &ChatMessage) {
        if let Err(error) = self.try_render(message) {
            log::error!("failed to render message {}: {error}", message.id.0);
        }
    }
}
