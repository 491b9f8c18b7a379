//! UseCase: direct user-to-user messages.
//!
//! Not persisted; a private message exists only on the wire. Delivery to an
//! offline recipient fails loudly so the sender can retry later.

use std::sync::Arc;

use rostrum_shared::time::Clock;

use crate::domain::{ConnectionIdentity, EventPusher, MessageBody, UserId};
use crate::infrastructure::dto::websocket::{AuthorDto, ServerEvent};

use super::error::RelayError;

pub struct PrivateMessageUseCase {
    pusher: Arc<dyn EventPusher>,
    clock: Arc<dyn Clock>,
}

impl PrivateMessageUseCase {
    pub fn new(pusher: Arc<dyn EventPusher>, clock: Arc<dyn Clock>) -> Self {
        Self { pusher, clock }
    }

    pub async fn execute(
        &self,
        identity: &ConnectionIdentity,
        recipient_id: UserId,
        message: String,
    ) -> Result<(), RelayError> {
        let body = MessageBody::new(message)?;
        let event = ServerEvent::ReceivePrivateMessage {
            from: AuthorDto {
                id: identity.user_id.as_str().to_string(),
                name: identity.display_name.clone(),
                role: identity.role,
            },
            message: body.into_string(),
            timestamp: self.clock.now_millis(),
        };
        self.pusher
            .push_to(&recipient_id, &event.to_json())
            .await
            .map_err(|_| RelayError::RecipientUnavailable(recipient_id.as_str().to_string()))
    }
}
