//! Card payload types.
//!
//! These serialize to the card JSON accepted by Google Chat incoming
//! webhooks (`cards` field of a message).

use serde::Serialize;

/// A card attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Card {
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<CardHeader>,
    sections: Vec<Section>,
}

impl Card {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn header(mut self, header: CardHeader) -> Self {
        self.header = Some(header);
        self
    }

    #[must_use]
    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }
}

/// Card title block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardHeader {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_style: Option<ImageStyle>,
}

impl CardHeader {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            image_url: None,
            image_style: None,
        }
    }

    #[must_use]
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    #[must_use]
    pub fn image(mut self, url: impl Into<String>, style: ImageStyle) -> Self {
        self.image_url = Some(url.into());
        self.image_style = Some(style);
        self
    }
}

/// How a header image is cropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageStyle {
    Image,
    Avatar,
}

/// A group of widgets inside a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<String>,
    widgets: Vec<Widget>,
}

impl Section {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    #[must_use]
    pub fn widget(mut self, widget: impl Into<Widget>) -> Self {
        self.widgets.push(widget.into());
        self
    }
}

/// A single card element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Widget {
    TextParagraph { text: String },
    KeyValue(KeyValue),
    Image(Image),
    Buttons(Vec<Button>),
}

impl Widget {
    #[must_use]
    pub fn text_paragraph(text: impl Into<String>) -> Self {
        Self::TextParagraph { text: text.into() }
    }

    #[must_use]
    pub fn buttons(buttons: impl IntoIterator<Item = Button>) -> Self {
        Self::Buttons(buttons.into_iter().collect())
    }
}

impl From<KeyValue> for Widget {
    fn from(value: KeyValue) -> Self {
        Self::KeyValue(value)
    }
}

impl From<Image> for Widget {
    fn from(value: Image) -> Self {
        Self::Image(value)
    }
}

/// Labelled value, optionally with an icon and a button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    top_label: Option<String>,
    content: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    content_multiline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    bottom_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    on_click: Option<OnClick>,
    #[serde(skip_serializing_if = "Option::is_none")]
    button: Option<Button>,
}

impl KeyValue {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            top_label: None,
            content: content.into(),
            content_multiline: false,
            bottom_label: None,
            icon: None,
            icon_url: None,
            on_click: None,
            button: None,
        }
    }

    #[must_use]
    pub fn top_label(mut self, label: impl Into<String>) -> Self {
        self.top_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn bottom_label(mut self, label: impl Into<String>) -> Self {
        self.bottom_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn multiline(mut self) -> Self {
        self.content_multiline = true;
        self
    }

    /// Use a built-in icon such as `"STAR"` or `"EMAIL"`.
    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn icon_url(mut self, url: impl Into<String>) -> Self {
        self.icon_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn on_click(mut self, url: impl Into<String>) -> Self {
        self.on_click = Some(OnClick::open_link(url));
        self
    }

    #[must_use]
    pub fn button(mut self, button: Button) -> Self {
        self.button = Some(button);
        self
    }
}

/// An image widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    on_click: Option<OnClick>,
}

impl Image {
    #[must_use]
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            on_click: None,
        }
    }

    #[must_use]
    pub fn on_click(mut self, url: impl Into<String>) -> Self {
        self.on_click = Some(OnClick::open_link(url));
        self
    }
}

/// A clickable button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Button {
    TextButton {
        text: String,
        #[serde(rename = "onClick")]
        on_click: OnClick,
    },
    ImageButton {
        #[serde(skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
        #[serde(rename = "iconUrl", skip_serializing_if = "Option::is_none")]
        icon_url: Option<String>,
        #[serde(rename = "onClick")]
        on_click: OnClick,
    },
}

impl Button {
    #[must_use]
    pub fn text(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::TextButton {
            text: text.into(),
            on_click: OnClick::open_link(url),
        }
    }

    #[must_use]
    pub fn image(icon: ButtonIcon, url: impl Into<String>) -> Self {
        let (icon, icon_url) = match icon {
            ButtonIcon::Icon(name) => (Some(name), None),
            ButtonIcon::IconUrl(icon_url) => (None, Some(icon_url)),
        };
        Self::ImageButton {
            icon,
            icon_url,
            on_click: OnClick::open_link(url),
        }
    }
}

/// Icon shown on an image button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonIcon {
    /// Built-in icon name.
    Icon(String),
    IconUrl(String),
}

/// Click action: open a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnClick {
    open_link: OpenLink,
}

impl OnClick {
    #[must_use]
    pub fn open_link(url: impl Into<String>) -> Self {
        Self {
            open_link: OpenLink { url: url.into() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenLink {
    url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_card_json_shape() {
        let card = Card::new()
            .header(
                CardHeader::new("Deploy finished")
                    .subtitle("api-server")
                    .image("https://example.com/logo.png", ImageStyle::Avatar),
            )
            .section(
                Section::new()
                    .header("Details")
                    .widget(Widget::text_paragraph("All checks <b>passed</b>"))
                    .widget(KeyValue::new("v1.4.2").top_label("Version").icon("STAR")),
            )
            .section(Section::new().widget(Widget::buttons([Button::text(
                "Open",
                "https://example.com/deploys/1",
            )])));

        assert_eq!(
            serde_json::to_value(&card).unwrap(),
            json!({
                "header": {
                    "title": "Deploy finished",
                    "subtitle": "api-server",
                    "imageUrl": "https://example.com/logo.png",
                    "imageStyle": "AVATAR"
                },
                "sections": [
                    {
                        "header": "Details",
                        "widgets": [
                            { "textParagraph": { "text": "All checks <b>passed</b>" } },
                            { "keyValue": { "topLabel": "Version", "content": "v1.4.2", "icon": "STAR" } }
                        ]
                    },
                    {
                        "widgets": [
                            { "buttons": [
                                { "textButton": { "text": "Open", "onClick": { "openLink": { "url": "https://example.com/deploys/1" } } } }
                            ] }
                        ]
                    }
                ]
            })
        );
    }

    #[test]
    fn test_image_button_and_image_widget() {
        let widget = Widget::buttons([Button::image(
            ButtonIcon::IconUrl("https://example.com/icon.png".into()),
            "https://example.com",
        )]);
        assert_eq!(
            serde_json::to_value(&widget).unwrap(),
            json!({ "buttons": [ { "imageButton": {
                "iconUrl": "https://example.com/icon.png",
                "onClick": { "openLink": { "url": "https://example.com" } }
            } } ] })
        );

        let widget: Widget = Image::new("https://example.com/chart.png")
            .on_click("https://example.com/dash")
            .into();
        assert_eq!(
            serde_json::to_value(&widget).unwrap(),
            json!({ "image": {
                "imageUrl": "https://example.com/chart.png",
                "onClick": { "openLink": { "url": "https://example.com/dash" } }
            } })
        );
    }

    #[test]
    fn test_multiline_key_value() {
        let value = serde_json::to_value(KeyValue::new("line1\nline2").multiline()).unwrap();
        assert_eq!(value["contentMultiline"], json!(true));
        assert!(value.get("topLabel").is_none());
    }
}
