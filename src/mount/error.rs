use crate::protocol;
use crate::{ASCOMError, ASCOMErrorCode};
use thiserror::Error;

/// Mount driver errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The command exchange itself failed.
    #[error(transparent)]
    Protocol(#[from] protocol::Error),
    /// The response length didn't match what the command always returns.
    #[error("Command {command:?} expected a {expected}-byte response, got {actual} bytes")]
    InvalidResponseSize {
        /// Opcode of the command.
        command: char,
        /// Fixed response size of the command.
        expected: usize,
        /// Size that actually arrived.
        actual: usize,
    },
    /// The response had the right size but couldn't be decoded.
    #[error("Malformed response to {command:?}: {reason}")]
    MalformedResponse {
        /// Opcode of the command.
        command: char,
        /// What was wrong with it.
        reason: String,
    },
    /// The slew rate doesn't fit into the 16-bit wire field.
    #[error("Slew rate {rate} deg/s can't be encoded")]
    RateOutOfRange {
        /// Requested rate in degrees per second.
        rate: f64,
    },
}

/// Result type for mount operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for ASCOMError {
    fn from(error: Error) -> Self {
        let code = match error {
            Error::RateOutOfRange { .. } => ASCOMErrorCode::INVALID_VALUE,
            Error::Protocol(protocol::Error::Busy) => ASCOMErrorCode::new_for_driver(0),
            Error::Protocol(protocol::Error::Timeout { .. }) => ASCOMErrorCode::new_for_driver(1),
            Error::Protocol(protocol::Error::Io(_)) => ASCOMErrorCode::new_for_driver(2),
            Error::InvalidResponseSize { .. } => ASCOMErrorCode::new_for_driver(3),
            Error::MalformedResponse { .. } => ASCOMErrorCode::new_for_driver(4),
        };
        Self::new(code, error)
    }
}
