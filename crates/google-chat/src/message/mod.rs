//! The Google Chat message value produced by notifications.

pub mod card;

use serde_json::{json, Map, Value};

pub use card::{
    Button, ButtonIcon, Card, CardHeader, Image, ImageStyle, KeyValue, OnClick, Section, Widget,
};

/// A Google Chat message plus its routing hints.
///
/// Built fluently by a notification's `to_google_chat`:
///
/// ```
/// use google_chat_notify::GoogleChatMessage;
///
/// let message = GoogleChatMessage::new()
///     .bold("Deploy finished")
///     .line("")
///     .text("See ")
///     .link("https://example.com/deploys/1", Some("the log"))
///     .to("ops");
///
/// assert_eq!(message.space(), Some("ops"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoogleChatMessage {
    space: Option<String>,
    threaded: bool,
    thread_key: Option<String>,
    text: String,
    cards: Vec<Card>,
}

impl GoogleChatMessage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Send to this space alias or webhook URL, overriding every other route.
    #[must_use]
    pub fn to(mut self, space: impl Into<String>) -> Self {
        self.space = Some(space.into());
        self
    }

    /// Reply in the existing thread, falling back to a new one.
    #[must_use]
    pub fn threaded(mut self) -> Self {
        self.threaded = true;
        self
    }

    /// Post into the thread identified by `key` (implies [`Self::threaded`]).
    #[must_use]
    pub fn thread(mut self, key: impl Into<String>) -> Self {
        self.thread_key = Some(key.into());
        self.threaded = true;
        self
    }

    // -------------------------------------------------------------------------
    // Text formatting
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn text(mut self, text: impl AsRef<str>) -> Self {
        self.text.push_str(text.as_ref());
        self
    }

    /// Append `text` followed by a newline.
    #[must_use]
    pub fn line(mut self, text: impl AsRef<str>) -> Self {
        self.text.push_str(text.as_ref());
        self.text.push('\n');
        self
    }

    #[must_use]
    pub fn bold(self, text: impl AsRef<str>) -> Self {
        self.wrap(text.as_ref(), "*")
    }

    #[must_use]
    pub fn italic(self, text: impl AsRef<str>) -> Self {
        self.wrap(text.as_ref(), "_")
    }

    #[must_use]
    pub fn strikethrough(self, text: impl AsRef<str>) -> Self {
        self.wrap(text.as_ref(), "~")
    }

    #[must_use]
    pub fn monospace(self, text: impl AsRef<str>) -> Self {
        self.wrap(text.as_ref(), "`")
    }

    #[must_use]
    pub fn monospace_block(self, text: impl AsRef<str>) -> Self {
        self.wrap(text.as_ref(), "```")
    }

    /// Append a link, optionally with a display label.
    #[must_use]
    pub fn link(mut self, url: impl AsRef<str>, label: Option<&str>) -> Self {
        match label {
            Some(label) => {
                self.text.push('<');
                self.text.push_str(url.as_ref());
                self.text.push('|');
                self.text.push_str(label);
                self.text.push('>');
            }
            None => self.text.push_str(url.as_ref()),
        }
        self
    }

    /// Mention a user by their Google Chat user id.
    #[must_use]
    pub fn mention(mut self, user_id: impl AsRef<str>) -> Self {
        self.text.push_str("<users/");
        self.text.push_str(user_id.as_ref());
        self.text.push('>');
        self
    }

    #[must_use]
    pub fn mention_all(mut self) -> Self {
        self.text.push_str("<users/all>");
        self
    }

    fn wrap(mut self, text: &str, marker: &str) -> Self {
        self.text.push_str(marker);
        self.text.push_str(text);
        self.text.push_str(marker);
        self
    }

    // -------------------------------------------------------------------------
    // Cards
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn card(mut self, card: Card) -> Self {
        self.cards.push(card);
        self
    }

    #[must_use]
    pub fn cards(mut self, cards: impl IntoIterator<Item = Card>) -> Self {
        self.cards.extend(cards);
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Explicit destination, if one was set and is non-empty.
    #[must_use]
    pub fn space(&self) -> Option<&str> {
        self.space.as_deref().filter(|s| !s.is_empty())
    }

    #[must_use]
    pub const fn is_threaded(&self) -> bool {
        self.threaded
    }

    #[must_use]
    pub fn thread_key(&self) -> Option<&str> {
        self.thread_key.as_deref()
    }

    /// True when there is nothing to post.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.cards.is_empty()
    }

    /// The JSON body posted to the webhook.
    ///
    /// Routing fields (`space`, `threaded`) are not part of the body.
    #[must_use]
    pub fn to_payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();

        if !self.text.is_empty() {
            payload.insert("text".to_string(), Value::String(self.text.clone()));
        }

        if !self.cards.is_empty() {
            payload.insert("cards".to_string(), json!(self.cards));
        }

        if let Some(key) = &self.thread_key {
            payload.insert("thread".to_string(), json!({ "threadKey": key }));
        }

        payload
    }
}
