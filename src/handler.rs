//! The update handler: request validation plus the field-to-metadata mapping.
//!
//! Each inbound field maps to one meta key on the content submission record;
//! `title` additionally updates the post's primary title. Writes are issued
//! strictly in sequence and the first failure aborts the rest — writes that
//! already completed stay applied, there is no rollback.

use crate::errors::{Result, UpdaterError};
use crate::protocol::{UpdateAck, UpdateRequest};
use crate::wordpress::{
    ContentApi, META_CHAT_ID, META_DESCRIPTION, META_MEMBERS, META_TITLE,
};
use serde_json::Value as JsonValue;
use std::sync::Arc;

pub struct UpdateHandler {
    api: Arc<dyn ContentApi>,
}

impl UpdateHandler {
    pub fn new(api: Arc<dyn ContentApi>) -> Self {
        Self { api }
    }

    pub async fn handle(&self, request: UpdateRequest) -> Result<UpdateAck> {
        let post_id = match &request.post_id {
            Some(id) if !id.is_empty() => id,
            _ => {
                return Err(UpdaterError::InvalidRequest(
                    "postId is required".to_string(),
                ));
            }
        };

        if !request.has_update_fields() {
            return Err(UpdaterError::InvalidRequest(
                "At least one update field (chatId, title, membersCount, description) is required"
                    .to_string(),
            ));
        }

        if let Some(chat_id) = request.chat_id() {
            self.api
                .write_metadata(post_id, META_CHAT_ID, JsonValue::from(chat_id))
                .await?;
        }

        // Presence of the number is what counts here; zero is a valid value.
        if let Some(members) = &request.members_count {
            self.api
                .write_metadata(post_id, META_MEMBERS, JsonValue::Number(members.clone()))
                .await?;
        }

        if let Some(title) = request.title() {
            self.api
                .write_metadata(post_id, META_TITLE, JsonValue::from(title))
                .await?;
            // The meta key and the post's own title are separate records in
            // WordPress; both get the new value.
            self.api.update_title(post_id, title).await?;
        }

        if let Some(description) = request.description() {
            self.api
                .write_metadata(post_id, META_DESCRIPTION, JsonValue::from(description))
                .await?;
        }

        tracing::info!(%post_id, "post updated");
        Ok(UpdateAck::for_post(post_id))
    }
}
