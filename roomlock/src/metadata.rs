//! Room and participant metadata as stored in the shared cache.
//!
//! Only the lock settings are modelled. Every other field of a blob is carried through
//! untouched so that a full blob rewrite does not drop data owned by other services.
use bytes::Bytes;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::lock::{self, Capability, LockDirection, LockSettings};

/// Metadata blob that embeds a set of [`LockSettings`]
pub trait LockMetadata: Serialize + DeserializeOwned + Default {
    fn lock_settings(&self) -> &LockSettings;

    fn lock_settings_mut(&mut self) -> &mut LockSettings;

    /// Decode a blob. An empty blob is treated as metadata with nothing set.
    fn decode(blob: &[u8]) -> Result<Self, Error> {
        if blob.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(blob).map_err(Error::InvalidMetadata)
    }

    fn encode(&self) -> Result<Bytes, Error> {
        let blob = serde_json::to_vec(self)?;
        Ok(Bytes::from(blob))
    }
}

/// Decode `blob`, apply the lock toggle and encode the result
pub fn rewrite<M: LockMetadata>(
    blob: &[u8],
    capability: Capability,
    direction: LockDirection,
) -> Result<Bytes, Error> {
    rewrite_with::<M, _>(blob, |settings| lock::apply(settings, capability, direction))
}

/// Decode `blob`, pass its lock settings through `merge` and encode the result
pub fn rewrite_with<M, F>(blob: &[u8], merge: F) -> Result<Bytes, Error>
where
    M: LockMetadata,
    F: FnOnce(LockSettings) -> LockSettings,
{
    let mut metadata = M::decode(blob)?;
    let settings = metadata.lock_settings_mut();
    *settings = merge(*settings);
    metadata.encode()
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomMetadata {
    #[serde(default)]
    default_lock_settings: LockSettings,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl RoomMetadata {
    pub fn new(default_lock_settings: LockSettings) -> Self {
        Self {
            default_lock_settings,
            ..Default::default()
        }
    }

    pub fn default_lock_settings(&self) -> &LockSettings {
        &self.default_lock_settings
    }

    /// Fields not modelled by this crate
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

impl LockMetadata for RoomMetadata {
    fn lock_settings(&self) -> &LockSettings {
        &self.default_lock_settings
    }

    fn lock_settings_mut(&mut self) -> &mut LockSettings {
        &mut self.default_lock_settings
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantMetadata {
    #[serde(default)]
    lock_settings: LockSettings,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ParticipantMetadata {
    pub fn new(lock_settings: LockSettings) -> Self {
        Self {
            lock_settings,
            ..Default::default()
        }
    }

    /// Fields not modelled by this crate
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

impl LockMetadata for ParticipantMetadata {
    fn lock_settings(&self) -> &LockSettings {
        &self.lock_settings
    }

    fn lock_settings_mut(&mut self) -> &mut LockSettings {
        &mut self.lock_settings
    }
}
