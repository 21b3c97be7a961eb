//! Client error definitions.

use thiserror::Error;

/// Errors that end the client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid relay url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },

    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors in a typed input line. Reported and then ignored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (try /roster or /quit)")]
    UnknownCommand(String),

    #[error("start a message with @<identity>")]
    MissingRecipient,

    #[error("nothing to send to {0}")]
    MissingMessage(String),
}
