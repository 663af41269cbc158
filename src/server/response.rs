use super::ResponseTransaction;
use crate::ASCOMError;
use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Successful Alpaca response body.
///
/// Operations that don't produce a value report `"Value": null`.
#[derive(Debug, Serialize)]
pub(crate) struct ValueResponse {
    #[serde(flatten)]
    transaction: ResponseTransaction,
    #[serde(flatten)]
    error: ASCOMError,
    #[serde(rename = "Value")]
    value: serde_json::Value,
}

impl ValueResponse {
    pub(crate) fn new(transaction: ResponseTransaction, value: &impl Serialize) -> Self {
        Self {
            transaction,
            error: ASCOMError::OK,
            value: serde_json::to_value(value).unwrap_or_else(|err| {
                tracing::error!(%err, "Couldn't serialize Alpaca response value");
                serde_json::Value::Null
            }),
        }
    }
}

impl IntoResponse for ValueResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    fn transaction() -> ResponseTransaction {
        ResponseTransaction {
            client_transaction_id: 3,
            server_transaction_id: NonZeroU32::MIN,
        }
    }

    #[test]
    fn envelope_carries_value_and_ids() -> eyre::Result<()> {
        let json = serde_json::to_value(ValueResponse::new(transaction(), &[1, 2, 3, 4]))?;
        assert_eq!(
            json,
            serde_json::json!({
                "ClientTransactionID": 3,
                "ServerTransactionID": 1,
                "ErrorNumber": 0,
                "ErrorMessage": "",
                "Value": [1, 2, 3, 4],
            })
        );
        Ok(())
    }

    #[test]
    fn unit_values_are_null() -> eyre::Result<()> {
        let json = serde_json::to_value(ValueResponse::new(transaction(), &()))?;
        assert_eq!(json.get("Value"), Some(&serde_json::Value::Null));
        assert_eq!(json["ErrorNumber"], 0);
        Ok(())
    }
}
