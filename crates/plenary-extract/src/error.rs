use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unknown session {0}: only sessions 52 to 55 publish HTML transcripts")]
    UnknownSession(u32),

    #[error("unparseable meeting date: {0:?}")]
    Date(String),

    #[error("vote {vote}: agenda item disagrees between languages (FR {fr:?}, NL {nl:?})")]
    AgendaItemMismatch {
        vote: u32,
        fr: Option<u32>,
        nl: Option<u32>,
    },

    #[error("vote {vote}: no agenda item {item} in this meeting")]
    MissingTopic { vote: u32, item: u32 },

    #[error("vote {vote}: {reason}")]
    Structure { vote: u32, reason: String },
}
