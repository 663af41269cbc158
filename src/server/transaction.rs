use super::params::OpaqueParams;
use super::{ActionParams, Error, Result};
use crate::macros::auto_increment;
use serde::Serialize;
use std::num::NonZeroU32;

#[derive(Debug, Serialize, Clone, Copy)]
pub(crate) struct ResponseTransaction {
    #[serde(rename = "ClientTransactionID")]
    pub(crate) client_transaction_id: u32,

    #[serde(rename = "ServerTransactionID")]
    pub(crate) server_transaction_id: NonZeroU32,
}

impl ResponseTransaction {
    pub(crate) fn new(client_transaction_id: u32) -> Self {
        Self {
            client_transaction_id,
            server_transaction_id: auto_increment!(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct RequestTransaction {
    pub(crate) client_id: Option<u32>,
    pub(crate) client_transaction_id: u32,
}

fn parse_id(value: Option<String>, name: &'static str) -> Result<Option<u32>> {
    value
        .map(|value| {
            value
                .trim()
                .parse::<u32>()
                .map_err(|_| Error::InvalidTransactionId { name })
        })
        .transpose()
}

impl RequestTransaction {
    /// Reads must identify both the client and the transaction.
    ///
    /// Writes take both ids from the body under their exact names only, so a
    /// mis-cased id is left alone like any other unknown parameter.
    pub(crate) fn extract(params: &mut ActionParams) -> Result<Self> {
        match params {
            ActionParams::Get(params) => {
                let client_id = parse_id(params.take_case_insensitive("ClientID"), "ClientID")?
                    .ok_or(Error::InvalidTransactionId { name: "ClientID" })?;
                let client_transaction_id = parse_id(
                    params.take_case_insensitive("ClientTransactionID"),
                    "ClientTransactionID",
                )?
                .ok_or(Error::InvalidTransactionId {
                    name: "ClientTransactionID",
                })?;
                Ok(Self {
                    client_id: Some(client_id),
                    client_transaction_id,
                })
            }
            ActionParams::Put(params) => Ok(Self {
                client_id: parse_id(params.take("ClientID"), "ClientID")?,
                client_transaction_id: parse_id(
                    params.take("ClientTransactionID"),
                    "ClientTransactionID",
                )?
                .unwrap_or(0),
            }),
        }
    }

    /// Management queries: both ids are optional but must be valid when present.
    pub(crate) fn extract_lenient(params: &mut OpaqueParams) -> Result<Self> {
        Ok(Self {
            client_id: parse_id(params.take_case_insensitive("ClientID"), "ClientID")?,
            client_transaction_id: parse_id(
                params.take_case_insensitive("ClientTransactionID"),
                "ClientTransactionID",
            )?
            .unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(pairs: &[(&str, &str)]) -> ActionParams {
        ActionParams::Get(opaque(pairs))
    }

    fn opaque(pairs: &[(&str, &str)]) -> OpaqueParams {
        let object = pairs
            .iter()
            .map(|&(name, value)| (name.to_owned(), value.into()))
            .collect::<serde_json::Map<_, _>>();
        OpaqueParams::from(object)
    }

    #[test]
    fn reads_require_both_ids() {
        let err = RequestTransaction::extract(&mut get(&[("ClientTransactionID", "1")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid ClientID");

        let err = RequestTransaction::extract(&mut get(&[("ClientID", "1")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid ClientTransactionID");

        let err = RequestTransaction::extract(&mut get(&[
            ("ClientID", "-1"),
            ("ClientTransactionID", "1"),
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid ClientID");
    }

    #[test]
    fn id_names_are_case_insensitive() -> eyre::Result<()> {
        let transaction = RequestTransaction::extract(&mut get(&[
            ("clientid", "7"),
            ("CLIENTTRANSACTIONID", "42"),
        ]))?;
        assert_eq!(transaction.client_id, Some(7));
        assert_eq!(transaction.client_transaction_id, 42);
        Ok(())
    }

    #[test]
    fn writes_default_transaction_id_to_zero() -> eyre::Result<()> {
        let mut params = ActionParams::Put(opaque(&[("ClientID", "1")]));
        let transaction = RequestTransaction::extract(&mut params)?;
        assert_eq!(transaction.client_id, Some(1));
        assert_eq!(transaction.client_transaction_id, 0);

        let mut params = ActionParams::Put(opaque(&[("ClientID", "abc")]));
        assert!(RequestTransaction::extract(&mut params).is_err());
        Ok(())
    }

    #[test]
    fn writes_ignore_miscased_ids() -> eyre::Result<()> {
        let mut params = ActionParams::Put(opaque(&[
            ("clientid", "abc"),
            ("clienttransactionid", "5"),
        ]));
        let transaction = RequestTransaction::extract(&mut params)?;
        assert_eq!(transaction.client_id, None);
        assert_eq!(transaction.client_transaction_id, 0);
        Ok(())
    }

    #[test]
    fn management_ids_are_case_insensitive() -> eyre::Result<()> {
        let transaction = RequestTransaction::extract_lenient(&mut opaque(&[
            ("clienttransactionid", "3"),
        ]))?;
        assert_eq!(transaction.client_id, None);
        assert_eq!(transaction.client_transaction_id, 3);
        Ok(())
    }
}
