//! Discord rendering of conversation replies
//!
//! Buttons are laid out one per row. Discord caps a message at five rows, so
//! long keyboards continue in follow-up messages.

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};
use serenity::builder::CreateComponents;
use serenity::http::Http;
use serenity::model::application::component::ButtonStyle;
use serenity::model::id::{ChannelId, MessageId};
use std::sync::Arc;

use crate::core::{split_for_message, truncate_label, CUSTOM_ID_LIMIT, ROWS_PER_MESSAGE};
use crate::features::conversation::{ChatId, Outbox, Reply, ReplyMode};

/// Content of keyboard messages that carry no text of their own
pub const CONTINUED_TEXT: &str = "⬇️ More:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedButton {
    pub label: String,
    pub custom_id: String,
}

/// One Discord message worth of a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub content: String,
    pub buttons: Vec<RenderedButton>,
}

/// Lay a reply out as Discord messages.
///
/// Buttons whose encoded action does not fit in a custom_id are dropped.
pub fn render_reply(reply: &Reply) -> Vec<RenderedMessage> {
    let buttons: Vec<RenderedButton> = reply
        .buttons
        .iter()
        .filter_map(|button| {
            let custom_id = button.action.encode();
            if custom_id.is_empty() || custom_id.len() > CUSTOM_ID_LIMIT {
                warn!(
                    "Skipping button '{}': payload is {} bytes",
                    button.label,
                    custom_id.len()
                );
                return None;
            }
            Some(RenderedButton {
                label: truncate_label(&button.label),
                custom_id,
            })
        })
        .collect();

    let mut messages: Vec<RenderedMessage> = if reply.text.trim().is_empty() {
        Vec::new()
    } else {
        split_for_message(&reply.text)
            .into_iter()
            .map(|content| RenderedMessage {
                content,
                buttons: Vec::new(),
            })
            .collect()
    };

    for (idx, chunk) in buttons.chunks(ROWS_PER_MESSAGE).enumerate() {
        match messages.last_mut() {
            // The first rows sit under the last piece of text.
            Some(last) if idx == 0 => last.buttons = chunk.to_vec(),
            _ => messages.push(RenderedMessage {
                content: CONTINUED_TEXT.to_string(),
                buttons: chunk.to_vec(),
            }),
        }
    }

    messages
}

fn build_components<'a>(
    components: &'a mut CreateComponents,
    buttons: &[RenderedButton],
) -> &'a mut CreateComponents {
    for button in buttons {
        components.create_action_row(|row| {
            row.create_button(|b| {
                b.custom_id(&button.custom_id)
                    .label(&button.label)
                    .style(ButtonStyle::Primary)
            })
        });
    }
    components
}

/// Delivers replies to the Discord channel a chat maps to.
///
/// With an edit target, `Update` replies rewrite that message in place
/// instead of posting a new one.
pub struct DiscordOutbox {
    http: Arc<Http>,
    edit_target: Option<MessageId>,
}

impl DiscordOutbox {
    pub fn new(http: Arc<Http>) -> Self {
        Self {
            http,
            edit_target: None,
        }
    }

    pub fn editing(http: Arc<Http>, message: MessageId) -> Self {
        Self {
            http,
            edit_target: Some(message),
        }
    }

    async fn send(&self, channel: ChannelId, message: &RenderedMessage) -> Result<()> {
        channel
            .send_message(&self.http, |m| {
                m.content(&message.content);
                if !message.buttons.is_empty() {
                    m.components(|c| build_components(c, &message.buttons));
                }
                m
            })
            .await?;
        Ok(())
    }

    async fn edit(
        &self,
        channel: ChannelId,
        target: MessageId,
        message: &RenderedMessage,
    ) -> Result<()> {
        channel
            .edit_message(&self.http, target, |m| {
                m.content(&message.content)
                    .components(|c| build_components(c, &message.buttons))
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Outbox for DiscordOutbox {
    async fn deliver(&self, chat: ChatId, reply: &Reply) -> Result<()> {
        let channel = ChannelId(chat);
        let messages = render_reply(reply);
        debug!(
            "Chat {chat}: delivering {} message(s), mode {:?}",
            messages.len(),
            reply.mode
        );

        let mut messages = messages.iter();
        if let (ReplyMode::Update, Some(target)) = (reply.mode, self.edit_target) {
            if let Some(first) = messages.next() {
                self.edit(channel, target, first).await?;
            }
        }
        for message in messages {
            self.send(channel, message).await?;
        }
        Ok(())
    }
}
