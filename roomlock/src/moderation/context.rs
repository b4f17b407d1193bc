use crate::error::Error;

/// Identifies who issued a moderation command and for which room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    room_id: String,
    requester_id: String,
    is_admin: bool,
}

impl CallerContext {
    pub fn new(room_id: impl Into<String>, requester_id: impl Into<String>, is_admin: bool) -> Self {
        Self {
            room_id: room_id.into(),
            requester_id: requester_id.into(),
            is_admin,
        }
    }

    /// Context of an admin of `room_id`
    pub fn admin(room_id: impl Into<String>, requester_id: impl Into<String>) -> Self {
        Self::new(room_id, requester_id, true)
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn requester_id(&self) -> &str {
        &self.requester_id
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !self.is_admin {
            return Err(Error::AdminRequired);
        }
        if self.room_id.trim().is_empty() {
            return Err(Error::MissingRoomId);
        }
        Ok(())
    }
}
