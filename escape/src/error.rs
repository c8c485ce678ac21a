use crate::room::RoomKey;

/// Card data could not be turned into a person.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    #[error("expected 2 comma separated fields, got {fields}")]
    Malformed { fields: usize },
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PrisonError {
    #[error("no room with key {0}")]
    UnknownRoom(RoomKey),
}

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("failed to read layout: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse layout: {0}")]
    Json(#[from] serde_json::Error),
    #[error("room id {0} declared twice")]
    DuplicateRoom(i32),
    #[error("room id {0} is referenced but not declared")]
    UnknownRoom(i32),
    #[error(transparent)]
    Prison(#[from] PrisonError),
}
