/// Errors surfaced by the moderation core and its gateways
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    //Moderation Errors
    #[error("User isn't active now")]
    TargetNotActive,
    #[error("Unable to persist room default lock settings: {source}")]
    PolicyPersistFailed { source: Box<Error> },
    #[error("Only admin can send this request")]
    AdminRequired,
    #[error("No room id supplied")]
    MissingRoomId,
    #[error("Lock service \"{0}\" is not recognized")]
    InvalidCapability(String),
    #[error("Lock direction \"{0}\" is not recognized")]
    InvalidDirection(String),

    //Metadata Errors
    #[error("Metadata blob is invalid: {0}")]
    InvalidMetadata(#[source] serde_json::Error),

    //Gateway Errors
    #[error("Room does not exist")]
    RoomNotFound,
    #[error("Participant does not exist")]
    ParticipantNotFound,
    #[error("Track could not be found")]
    TrackNotFound,
    #[error("Request to the gateway timed out")]
    Timeout,
    #[error("Gateway failure: {0}")]
    Gateway(String),

    //Config Errors
    #[error("Config file could not be found")]
    ConfigNotFound,

    //Misc
    #[error("{0}")]
    SerdeJsonError(#[from] serde_json::Error),
    #[error("{0}")]
    TomlError(#[from] toml::de::Error),
    #[error("{0}")]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
    #[error("An unknown error has occurred")]
    Other,
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Error::Timeout
    }
}
