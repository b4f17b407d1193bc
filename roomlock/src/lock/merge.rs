use super::{Capability, LockDirection, LockSettings};

/// Apply a lock toggle to `settings`.
///
/// `Lock` sets the flag to [`LockFlag::Locked`](super::LockFlag::Locked), `Unlock` to
/// [`LockFlag::Unlocked`](super::LockFlag::Unlocked). A touched flag never returns to unset.
/// Every other capability is left as is.
pub fn apply(
    mut settings: LockSettings,
    capability: Capability,
    direction: LockDirection,
) -> LockSettings {
    settings.set(capability, direction.flag());
    settings
}

/// Apply a lock toggle given by its command names (eg `"mic"`, `"lock"`).
///
/// Unrecognized names leave `settings` unchanged.
pub fn apply_command(settings: LockSettings, service: &str, direction: &str) -> LockSettings {
    match (service.parse::<Capability>(), direction.parse::<LockDirection>()) {
        (Ok(capability), Ok(direction)) => apply(settings, capability, direction),
        _ => {
            tracing::debug!(%service, %direction, "ignoring unrecognized lock command");
            settings
        }
    }
}
