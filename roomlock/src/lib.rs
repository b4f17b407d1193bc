pub mod sync {
    pub use parking_lot::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
    pub use std::sync::Arc;
}

pub mod config;
pub mod error;
pub mod gateway;
pub mod lock;
pub mod metadata;
pub mod moderation;
pub mod participant;
pub mod track;

pub use moderation::Moderation;

pub trait Extension {
    /// Returns an id of the extension. Should be the crate name (eg in a `roomlock-gateway-ext` format)
    fn id(&self) -> String;

    /// Returns the name of an extension
    fn name(&self) -> String;

    /// Returns the description of the extension
    fn description(&self) -> String {
        format!(
            "{} is an extension that provides participant state to roomlock",
            self.name()
        )
    }
}
