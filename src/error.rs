use thiserror::Error;

/// Errors raised by transcript operations and the model gateway.
///
/// Every variant is per-operation and recoverable: nothing here is fatal to
/// the process, and retrying the same operation is always legal.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Neither prompt text nor an image was supplied.
    #[error("nothing to send: enter a prompt or attach an image")]
    EmptyInput,

    /// The declared image MIME type is not one the gateway accepts.
    #[error("unsupported image type: {0}")]
    InvalidImage(String),

    /// Bad caller-supplied configuration (missing key, unknown model, ...).
    #[error("{0}")]
    Config(String),

    /// The transcript does not end with a user turn, so there is nothing the
    /// gateway could complete.
    #[error("nothing to send: the conversation does not end with a user message")]
    NoPendingUserTurn,

    /// Transport, auth, or model failure while calling the gateway.
    ///
    /// Display is deliberately generic; the detailed cause is carried in the
    /// payload for logging and must never be shown verbatim to the end user.
    #[error("model gateway call failed")]
    Gateway(String),

    /// The gateway returned a success envelope with no usable choice/message.
    #[error("model gateway returned an incomplete response: {0}")]
    MalformedResponse(&'static str),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
