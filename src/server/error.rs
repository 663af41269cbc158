use crate::ASCOMError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error("Invalid {name}")]
    InvalidTransactionId { name: &'static str },
    #[error("Not implemented")]
    UnknownAction { action: String },
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Missing parameter {name:?}")]
    MissingParameter { name: &'static str },
    #[error("Couldn't parse parameter {name:?}: {err:#}")]
    BadParameter {
        name: &'static str,
        #[source]
        err: serde_plain::Error,
    },
    #[error(transparent)]
    Ascom(#[from] ASCOMError),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidTransactionId { .. } => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            Self::UnknownAction { ref action } => {
                tracing::warn!(action, "Unknown Alpaca action");
                (StatusCode::METHOD_NOT_ALLOWED, self.to_string()).into_response()
            }
            Self::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, self.to_string()).into_response()
            }
            // The client only ever sees the generic message, operators get the cause.
            Self::MissingParameter { .. } | Self::BadParameter { .. } | Self::Ascom(_) => {
                tracing::error!(error = %self, "Alpaca request failed");
                (StatusCode::BAD_REQUEST, "Bad parameter").into_response()
            }
        }
    }
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
