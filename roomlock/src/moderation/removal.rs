use crate::error::Error;
use crate::gateway::ParticipantStateGateway;
use crate::participant::Participant;

use super::CallerContext;

pub struct ParticipantRemovalService<G> {
    gateway: G,
}

impl<G: ParticipantStateGateway> ParticipantRemovalService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Removes an active participant from the room
    #[tracing::instrument(skip(self, ctx), fields(room_id = %ctx.room_id()))]
    pub async fn remove(&self, ctx: &CallerContext, target: &str) -> Result<(), Error> {
        let participant = self
            .gateway
            .load_participant(ctx.room_id(), target)
            .await?
            .filter(Participant::is_active)
            .ok_or(Error::TargetNotActive)?;

        self.gateway
            .remove_participant(ctx.room_id(), participant.identity())
            .await?;

        tracing::info!(identity = %participant.identity(), "participant removed");
        Ok(())
    }
}
