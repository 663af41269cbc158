/*!
ASCOM Alpaca telescope API.

Each operation is declared once in the [`Device`] or [`Telescope`] trait
together with its Alpaca name, HTTP method and parameter names. The
declarations generate the request decoding and dispatch used by the server.

Operation names in URLs are lower case. For GET requests parameters come from
the query string, for PUT requests from the body. `ClientID` and
`ClientTransactionID` are matched in any casing in a query string, all other
parameter names are matched exactly.
*/

mod server_info;
pub use server_info::*;

mod bool_param;

mod time_repr;
pub use time_repr::UtcDate;

#[macro_use]
mod macros;

/// Types related to the general [`Device`] trait.
pub mod device;
pub use device::Device;

/// Types related to the [`Telescope`] trait.
pub mod telescope;
pub use telescope::{
    AlignmentMode, AxisRate, DriveRate, EquatorialCoordinateType, GuideDirection, PierSide,
    Telescope,
};

use crate::ASCOMResult;
use crate::server::{ActionParams, Error, Result};
use serde::Serialize;

/// A decoded request for the telescope.
#[derive(Debug)]
pub(crate) enum TelescopeAction {
    Device(device::Action),
    Telescope(telescope::Action),
}

#[derive(Serialize)]
#[serde(untagged)]
pub(crate) enum TelescopeResponse {
    Device(device::Response),
    Telescope(telescope::Response),
}

impl TelescopeAction {
    pub(crate) fn is_known(action: &str) -> bool {
        telescope::Action::is_known(action) || device::Action::is_known(action)
    }

    /// Decodes `action` with its parameters.
    ///
    /// Whatever parameters are left over are reported when `params` is dropped.
    pub(crate) fn from_parts(action: &str, mut params: ActionParams) -> Result<Self> {
        if let Some(action) = telescope::Action::from_parts(action, &mut params)? {
            return Ok(Self::Telescope(action));
        }
        if let Some(action) = device::Action::from_parts(action, &mut params)? {
            return Ok(Self::Device(action));
        }
        Err(if Self::is_known(action) {
            Error::MethodNotAllowed
        } else {
            Error::UnknownAction {
                action: action.to_owned(),
            }
        })
    }

    pub(crate) async fn handle(self, device: &dyn Telescope) -> ASCOMResult<TelescopeResponse> {
        Ok(match self {
            Self::Device(action) => TelescopeResponse::Device(action.handle(device).await?),
            Self::Telescope(action) => TelescopeResponse::Telescope(action.handle(device).await?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mount::Precision;
    use crate::server::OpaqueParams;
    use crate::test_utils::simulated_telescope;

    fn put(pairs: &[(&str, &str)]) -> ActionParams {
        let object = pairs
            .iter()
            .map(|&(name, value)| (name.to_owned(), value.into()))
            .collect::<serde_json::Map<_, _>>();
        ActionParams::Put(OpaqueParams::from(object))
    }

    fn get() -> ActionParams {
        ActionParams::Get(OpaqueParams::default())
    }

    #[test]
    fn knows_operations_of_both_tables() {
        assert!(TelescopeAction::is_known("connected"));
        assert!(TelescopeAction::is_known("moveaxis"));
        assert!(!TelescopeAction::is_known("frobnicate"));
    }

    #[test]
    fn wrong_direction_is_not_allowed() {
        let err = TelescopeAction::from_parts("declination", put(&[])).unwrap_err();
        assert!(matches!(err, Error::MethodNotAllowed), "{err:?}");

        let err = TelescopeAction::from_parts("frobnicate", get()).unwrap_err();
        assert!(matches!(err, Error::UnknownAction { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn dispatches_through_trait_objects() -> eyre::Result<()> {
        let (telescope, _simulator) = simulated_telescope(Precision::Coarse);
        let device: &dyn Telescope = &telescope;

        let action = TelescopeAction::from_parts("connected", put(&[("Connected", "TRUE")]))?;
        assert!(matches!(action, TelescopeAction::Device(_)), "{action:?}");
        let _ = action.handle(device).await?;

        let response = TelescopeAction::from_parts("connected", get())?
            .handle(device)
            .await?;
        assert_eq!(serde_json::to_value(response)?, serde_json::json!(true));

        let response = TelescopeAction::from_parts("axisrates", ActionParams::Get(
            OpaqueParams::from(serde_json::Map::from_iter([(
                "Axis".to_owned(),
                serde_json::Value::from(0),
            )])),
        ))?
        .handle(device)
        .await?;
        assert_eq!(serde_json::to_value(response)?.as_array().map(Vec::len), Some(9));
        Ok(())
    }
}
