use crate::config::Config;
use crate::error::Error;
use crate::gateway::ParticipantStateGateway;
use crate::lock::{self, Capability, LockDirection, LockSettings};
use crate::metadata::{self, ParticipantMetadata, RoomMetadata};
use crate::participant::Participant;

use super::fanout::fan_out;
use super::report::{BulkReport, Outcome, SkipReason};
use super::{CallerContext, BULK_TARGET};

/// Applies lock toggles to participant metadata and to the room default
pub struct LockPropagationService<G> {
    gateway: G,
    config: Config,
}

impl<G: ParticipantStateGateway> LockPropagationService<G> {
    pub fn new(gateway: G, config: Config) -> Self {
        Self { gateway, config }
    }

    /// Lock or unlock `capability` for `target`, or for every participant but the requester
    /// when `target` is [`BULK_TARGET`].
    #[tracing::instrument(skip(self, ctx), fields(room_id = %ctx.room_id()))]
    pub async fn update_lock(
        &self,
        ctx: &CallerContext,
        capability: Capability,
        direction: LockDirection,
        target: &str,
    ) -> Result<Outcome, Error> {
        self.update_with(ctx, target, move |settings| {
            lock::apply(settings, capability, direction)
        })
        .await
    }

    /// Same as [`Self::update_lock`] with the command given by its names (eg `"mic"` and
    /// `"lock"`).
    ///
    /// Unrecognized names merge as a no-op. The target is still checked and the blobs are
    /// still rewritten, so an inactive target fails with [`Error::TargetNotActive`] and a
    /// rejected room default with [`Error::PolicyPersistFailed`].
    #[tracing::instrument(skip(self, ctx), fields(room_id = %ctx.room_id()))]
    pub async fn update_lock_command(
        &self,
        ctx: &CallerContext,
        service: &str,
        direction: &str,
        target: &str,
    ) -> Result<Outcome, Error> {
        self.update_with(ctx, target, move |settings| {
            lock::apply_command(settings, service, direction)
        })
        .await
    }

    async fn update_with<F>(
        &self,
        ctx: &CallerContext,
        target: &str,
        merge: F,
    ) -> Result<Outcome, Error>
    where
        F: Fn(LockSettings) -> LockSettings + Copy,
    {
        if target == BULK_TARGET {
            return self.update_all_with(ctx, merge).await.map(Outcome::Bulk);
        }

        let participant = self
            .gateway
            .load_participant(ctx.room_id(), target)
            .await?
            .filter(Participant::is_active)
            .ok_or(Error::TargetNotActive)?;

        self.write_participant(ctx.room_id(), participant, merge).await?;

        Ok(Outcome::Applied)
    }

    /// Updates every participant on a best-effort basis, then persists the new room default
    /// so later joiners inherit it. Only a failure to persist the room default is returned.
    pub async fn update_all(
        &self,
        ctx: &CallerContext,
        capability: Capability,
        direction: LockDirection,
    ) -> Result<BulkReport, Error> {
        self.update_all_with(ctx, move |settings| {
            lock::apply(settings, capability, direction)
        })
        .await
    }

    async fn update_all_with<F>(
        &self,
        ctx: &CallerContext,
        merge: F,
    ) -> Result<BulkReport, Error>
    where
        F: Fn(LockSettings) -> LockSettings + Copy,
    {
        let room_id = ctx.room_id();
        let participants = self.gateway.load_participants(room_id).await?;

        let mut report = BulkReport::default();
        let mut targets = vec![];
        for participant in participants {
            if participant.identity() == ctx.requester_id() {
                continue;
            }
            if !participant.is_active() {
                report.skip(participant.identity(), SkipReason::Inactive);
                continue;
            }
            targets.push((participant.identity().to_string(), participant));
        }

        let results = fan_out(&self.config, targets, |participant| {
            self.write_participant(room_id, participant, merge)
        })
        .await;

        for (identity, result) in results {
            report.record(identity, result);
        }

        let blob = self.gateway.load_room_metadata(room_id).await?;
        let blob = metadata::rewrite_with::<RoomMetadata, _>(&blob, merge)?;
        self.gateway
            .write_room_metadata(room_id, blob)
            .await
            .map_err(|e| Error::PolicyPersistFailed {
                source: Box::new(e),
            })?;

        tracing::info!(
            %room_id,
            updated = report.updated().len(),
            skipped = report.skipped().len(),
            failed = report.failed().len(),
            "room lock settings updated"
        );

        Ok(report)
    }

    async fn write_participant<F>(
        &self,
        room_id: &str,
        participant: Participant,
        merge: F,
    ) -> Result<(), Error>
    where
        F: FnOnce(LockSettings) -> LockSettings,
    {
        let blob =
            metadata::rewrite_with::<ParticipantMetadata, _>(participant.metadata(), merge)?;
        tracing::debug!(identity = %participant.identity(), "writing participant lock settings");
        self.gateway
            .write_participant_metadata(room_id, participant.identity(), blob)
            .await
    }
}
