use chrono::NaiveDateTime;
use serde::Deserialize;

/// Root of a Telegram Desktop chat export (`result.json`).
#[derive(Debug, Deserialize)]
pub struct ChatExport {
    pub chats: ChatList,
}

#[derive(Debug, Deserialize)]
pub struct ChatList {
    pub list: Vec<Chat>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    /// Chat title. Absent for saved-messages exports.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    /// Export-wide message id. Unique within a chat.
    pub id: i64,
    /// Display name of the sender. Will be None for messages without a sender
    /// (service messages).
    #[serde(default, rename = "from")]
    pub sender: Option<String>,
    /// When the message was sent, as exported (`2021-04-09T12:01:33`).
    #[serde(default)]
    pub date: Option<NaiveDateTime>,
    /// Id of the message this one replies to, when it is a reply. The referenced
    /// message may not exist in the export (deleted or outside the export range).
    #[serde(default)]
    pub reply_to_message_id: Option<i64>,
    /// The message body itself.
    #[serde(default)]
    pub text: MessageText,
}

/// Message body as exported: either a flat string or a list of rich-text
/// segments (links, mentions, code spans keep their own segment objects).
#[derive(Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MessageText {
    Plain(String),
    Segmented(Vec<TextSegment>),
}

impl Default for MessageText {
    fn default() -> Self {
        MessageText::Plain(String::new())
    }
}

/// One fragment of a segmented message body.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextSegment {
    Plain(String),
    Entity(TextEntity),
}

/// A formatted fragment. Only its raw `text` matters for analysis; formatting
/// metadata is ignored.
#[derive(Debug, PartialEq, Deserialize)]
pub struct TextEntity {
    #[serde(default)]
    pub text: Option<String>,
}
