//! Lock settings restrict what a participant may use during a session. They exist at two
//! scopes:
//! - the room default, stored in the room metadata and inherited by participants who join later
//! - the participant override, stored in each participant's own metadata
//!
//! A participant flag that is [`LockFlag::Unset`] inherits the room default.
pub mod merge;

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub use merge::{apply, apply_command};

/// Tri-state capability flag
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum LockFlag {
    /// Inherit from the higher scope
    #[default]
    Unset,
    Locked,
    Unlocked,
}

impl LockFlag {
    pub fn is_unset(&self) -> bool {
        matches!(self, LockFlag::Unset)
    }

    pub fn as_option(&self) -> Option<bool> {
        match self {
            LockFlag::Unset => None,
            LockFlag::Locked => Some(true),
            LockFlag::Unlocked => Some(false),
        }
    }
}

impl From<Option<bool>> for LockFlag {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => LockFlag::Unset,
            Some(true) => LockFlag::Locked,
            Some(false) => LockFlag::Unlocked,
        }
    }
}

impl From<LockFlag> for Option<bool> {
    fn from(flag: LockFlag) -> Self {
        flag.as_option()
    }
}

/// Capabilities that can be locked. The display form is the name used in lock commands.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    #[display(fmt = "mic")]
    Microphone,
    #[display(fmt = "webcam")]
    Webcam,
    #[display(fmt = "screenShare")]
    ScreenShare,
    #[display(fmt = "chat")]
    Chat,
    #[display(fmt = "sendChatMsg")]
    ChatSendMessage,
    #[display(fmt = "chatFile")]
    ChatFileShare,
}

impl Capability {
    pub fn values() -> [Capability; 6] {
        [
            Capability::Microphone,
            Capability::Webcam,
            Capability::ScreenShare,
            Capability::Chat,
            Capability::ChatSendMessage,
            Capability::ChatFileShare,
        ]
    }
}

impl FromStr for Capability {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let capability = match s {
            "mic" => Capability::Microphone,
            "webcam" => Capability::Webcam,
            "screenShare" => Capability::ScreenShare,
            "chat" => Capability::Chat,
            "sendChatMsg" => Capability::ChatSendMessage,
            "chatFile" => Capability::ChatFileShare,
            _ => return Err(Error::InvalidCapability(s.into())),
        };
        Ok(capability)
    }
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockDirection {
    #[display(fmt = "lock")]
    Lock,
    #[display(fmt = "unlock")]
    Unlock,
}

impl LockDirection {
    /// Flag a capability ends up with once this direction is applied
    pub fn flag(&self) -> LockFlag {
        match self {
            LockDirection::Lock => LockFlag::Locked,
            LockDirection::Unlock => LockFlag::Unlocked,
        }
    }
}

impl FromStr for LockDirection {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lock" => Ok(LockDirection::Lock),
            "unlock" => Ok(LockDirection::Unlock),
            _ => Err(Error::InvalidDirection(s.into())),
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockSettings {
    #[serde(default, skip_serializing_if = "LockFlag::is_unset")]
    lock_microphone: LockFlag,
    #[serde(default, skip_serializing_if = "LockFlag::is_unset")]
    lock_webcam: LockFlag,
    #[serde(default, skip_serializing_if = "LockFlag::is_unset")]
    lock_screen_sharing: LockFlag,
    #[serde(default, skip_serializing_if = "LockFlag::is_unset")]
    lock_chat: LockFlag,
    #[serde(default, skip_serializing_if = "LockFlag::is_unset")]
    lock_chat_send_message: LockFlag,
    #[serde(default, skip_serializing_if = "LockFlag::is_unset")]
    lock_chat_file_share: LockFlag,
}

impl LockSettings {
    pub fn get(&self, capability: Capability) -> LockFlag {
        match capability {
            Capability::Microphone => self.lock_microphone,
            Capability::Webcam => self.lock_webcam,
            Capability::ScreenShare => self.lock_screen_sharing,
            Capability::Chat => self.lock_chat,
            Capability::ChatSendMessage => self.lock_chat_send_message,
            Capability::ChatFileShare => self.lock_chat_file_share,
        }
    }

    pub fn set(&mut self, capability: Capability, flag: LockFlag) {
        *self.flag_mut(capability) = flag;
    }

    pub fn with(mut self, capability: Capability, flag: LockFlag) -> Self {
        self.set(capability, flag);
        self
    }

    /// Effective lock state of `capability` for a participant holding these settings,
    /// falling back to `room_default` when the participant flag is unset
    pub fn is_locked(&self, capability: Capability, room_default: &LockSettings) -> bool {
        match self.get(capability) {
            LockFlag::Locked => true,
            LockFlag::Unlocked => false,
            LockFlag::Unset => room_default.get(capability) == LockFlag::Locked,
        }
    }

    fn flag_mut(&mut self, capability: Capability) -> &mut LockFlag {
        match capability {
            Capability::Microphone => &mut self.lock_microphone,
            Capability::Webcam => &mut self.lock_webcam,
            Capability::ScreenShare => &mut self.lock_screen_sharing,
            Capability::Chat => &mut self.lock_chat,
            Capability::ChatSendMessage => &mut self.lock_chat_send_message,
            Capability::ChatFileShare => &mut self.lock_chat_file_share,
        }
    }
}
