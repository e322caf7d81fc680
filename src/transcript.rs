use chrono::Utc;
use log::{ debug, info };
use uuid::Uuid;

use crate::error::ChatError;
use crate::llm::chat::{ ApiMessage, ApiPart, ChatGateway, ImageUrl };
use crate::models::chat::{ Part, Role, Turn };

/// The ordered turn history for one session.
///
/// Exclusively owned by its session: every mutation goes through the methods
/// here, callers only ever see `&[Turn]`. Created empty at session start and
/// dropped with the session; nothing is persisted.
pub struct Transcript {
    id: String,
    created_at: i64,
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        let id = Uuid::new_v4().to_string();
        debug!("new transcript {}", id);
        Self {
            id,
            created_at: Utc::now().timestamp(),
            turns: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Read-only view for rendering.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Append a user turn and return the new transcript length.
    ///
    /// Roles are not required to alternate: a second user turn in a row is
    /// legal (e.g. rapid resubmission before any reply arrived).
    pub fn append_user(&mut self, turn: Turn) -> usize {
        self.turns.push(turn);
        self.turns.len()
    }

    fn append_assistant(&mut self, content: String) -> Turn {
        let reply = Turn::assistant(content);
        self.turns.push(reply.clone());
        reply
    }

    /// Send the current transcript to the gateway and append the reply.
    ///
    /// Every stored turn is wrapped into the wire multi-part array the same
    /// way, whether it holds one text part or a text-plus-image pair. The
    /// gateway is only ever handed a transcript ending in a user turn; an
    /// empty or assistant-ended transcript errors before any call goes out.
    /// On any failure the transcript is left untouched.
    pub async fn request_completion(
        &mut self,
        gateway: &dyn ChatGateway
    ) -> Result<Turn, ChatError> {
        if self.is_empty() || self.turns.last().map(Turn::role) != Some(Role::User) {
            return Err(ChatError::NoPendingUserTurn);
        }
        let messages = self.to_wire();
        debug!("requesting completion for {} turns (transcript {})", messages.len(), self.id);
        let content = gateway.complete(&messages).await?;
        Ok(self.append_assistant(content))
    }

    /// Drop the last assistant turn and ask the gateway again.
    ///
    /// No-ops (returning `Ok(None)`) unless the transcript has at least two
    /// turns and ends with an assistant turn, so a duplicate invocation can
    /// never pop a user turn. If the gateway call then fails, the popped turn
    /// is not restored: the transcript stays one turn shorter and the error
    /// is surfaced. Callers wanting rollback can clone `turns()` first.
    pub async fn regenerate_last(
        &mut self,
        gateway: &dyn ChatGateway
    ) -> Result<Option<Turn>, ChatError> {
        let eligible = self.turns.len() >= 2
            && self.turns.last().map(Turn::role) == Some(Role::Assistant);
        if !eligible {
            info!("regenerate skipped: transcript {} does not end with a reply", self.id);
            return Ok(None);
        }
        self.turns.pop();
        self.request_completion(gateway).await.map(Some)
    }

    /// Normalize the stored turns into the gateway's wire schema.
    pub fn to_wire(&self) -> Vec<ApiMessage> {
        self.turns
            .iter()
            .map(|turn| ApiMessage {
                role: turn.role(),
                content: turn
                    .parts()
                    .iter()
                    .map(|part| match part {
                        Part::Text { text } => ApiPart::Text { text: text.clone() },
                        Part::Image { .. } => ApiPart::ImageUrl {
                            image_url: ImageUrl {
                                // data_url() is Some for every image part
                                url: part.data_url().unwrap_or_default(),
                            },
                        },
                    })
                    .collect(),
            })
            .collect()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
