//! Builders for Discord's layout components ("Components V2").
//!
//! serenity 0.12 has no builders for these, so the payload is serialized from
//! our own types and sent through the raw interaction response endpoint.

use serde::Serialize;

use crate::constant;

mod kind {
    pub const TEXT_DISPLAY: u8 = 10;
    pub const SEPARATOR: u8 = 14;
    pub const CONTAINER: u8 = 17;
}

/// Small vertical padding around a separator
const SEPARATOR_SPACING_SMALL: u8 = 1;

#[derive(Clone, Debug, PartialEq)]
pub enum Component {
    /// Markdown text
    TextDisplay(String),
    Separator { divider: bool },
    Container {
        accent_colour: Option<u32>,
        components: Vec<Component>,
    },
}

impl Component {
    pub fn text(content: impl Into<String>) -> Self {
        Self::TextDisplay(content.into())
    }

    pub fn divider() -> Self {
        Self::Separator { divider: true }
    }

    /// Every piece of text in this component and its children, in display order.
    #[cfg(test)]
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Self::TextDisplay(content) => vec![content.as_str()],
            Self::Separator { .. } => vec![],
            Self::Container { components, .. } => components.iter().flat_map(Self::texts).collect(),
        }
    }
}

/// Wire shape of a [`Component`]
#[derive(Serialize)]
#[serde(untagged)]
enum ComponentPayload<'a> {
    TextDisplay {
        #[serde(rename = "type")]
        kind: u8,
        content: &'a str,
    },
    Separator {
        #[serde(rename = "type")]
        kind: u8,
        divider: bool,
        spacing: u8,
    },
    Container {
        #[serde(rename = "type")]
        kind: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        accent_color: Option<u32>,
        components: Vec<ComponentPayload<'a>>,
    },
}

impl<'a> From<&'a Component> for ComponentPayload<'a> {
    fn from(component: &'a Component) -> Self {
        match component {
            Component::TextDisplay(content) => Self::TextDisplay {
                kind: kind::TEXT_DISPLAY,
                content,
            },
            Component::Separator { divider } => Self::Separator {
                kind: kind::SEPARATOR,
                divider: *divider,
                spacing: SEPARATOR_SPACING_SMALL,
            },
            Component::Container {
                accent_colour,
                components,
            } => Self::Container {
                kind: kind::CONTAINER,
                accent_color: *accent_colour,
                components: components.iter().map(Self::from).collect(),
            },
        }
    }
}

#[derive(Serialize)]
struct InteractionResponse<'a> {
    #[serde(rename = "type")]
    kind: u8,
    data: MessageData<'a>,
}

#[derive(Serialize)]
struct MessageData<'a> {
    flags: u64,
    components: Vec<ComponentPayload<'a>>,
}

/// A message made solely of layout components; such messages have no plain `content`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutMessage {
    pub components: Vec<Component>,
}

impl LayoutMessage {
    pub fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    /// The body for an immediate interaction response carrying this message.
    pub fn into_interaction_response(self) -> anyhow::Result<serde_json::Value> {
        let response = InteractionResponse {
            kind: constant::callback::CHANNEL_MESSAGE_WITH_SOURCE,
            data: MessageData {
                flags: constant::flags::IS_COMPONENTS_V2,
                components: self.components.iter().map(Into::into).collect(),
            },
        };
        Ok(serde_json::to_value(response)?)
    }
}
