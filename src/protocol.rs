//! Wire types for the `/update-telegram` endpoint.
//!
//! The inbound payload carries a post identifier plus a handful of optional
//! Telegram channel fields. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// Identifier of the remote content record.
///
/// WordPress addresses posts by numeric id, but callers are allowed to send
/// the id as a string; both forms render identically into the outbound URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Number(u64),
    Text(String),
}

impl PostId {
    /// An id of `0` or `""` is rejected the same as a missing one.
    pub fn is_empty(&self) -> bool {
        match self {
            PostId::Number(n) => *n == 0,
            PostId::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostId::Number(n) => write!(f, "{n}"),
            PostId::Text(s) => f.write_str(s),
        }
    }
}

/// Request format for the update endpoint.
///
/// # Example
/// ```json
/// {
///   "postId": 42,
///   "chatId": "-1001234567890",
///   "membersCount": 1500,
///   "title": "Example Channel",
///   "description": "What the channel is about"
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub post_id: Option<PostId>,

    pub chat_id: Option<String>,

    /// Kept as a raw JSON number so integers and floats forward unchanged.
    pub members_count: Option<Number>,

    pub title: Option<String>,

    pub description: Option<String>,
}

impl UpdateRequest {
    /// String fields count as absent when empty, so a blank `title` never
    /// produces a write.
    pub fn chat_id(&self) -> Option<&str> {
        non_empty(&self.chat_id)
    }

    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    /// Whether any update field is usable. `membersCount` is checked for
    /// numeric presence rather than truthiness so that `0` counts.
    pub fn has_update_fields(&self) -> bool {
        self.chat_id().is_some()
            || self.title().is_some()
            || self.description().is_some()
            || self.members_count.is_some()
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Success acknowledgment returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAck {
    pub success: bool,
    pub message: String,
}

impl UpdateAck {
    pub fn for_post(post_id: &PostId) -> Self {
        UpdateAck {
            success: true,
            message: format!("Post {post_id} updated successfully."),
        }
    }
}

/// Error body returned to the caller on 400/404/500 responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
