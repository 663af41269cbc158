use crate::api::bool_param::BoolParam;
use crate::ASCOMResult;
use macro_rules_attribute::apply;
use std::fmt::Debug;

/// ASCOM Methods Common To All Devices.
#[apply(rpc_trait)]
pub trait Device: Debug + Send + Sync {
    /// Retrieves the connected state of the device.
    #[http("connected", method = Get)]
    async fn connected(&self) -> ASCOMResult<bool>;

    /// Sets the connected state of the device.
    #[http("connected", method = Put)]
    async fn set_connected(
        &self,
        #[http("Connected", via = BoolParam)] connected: bool,
    ) -> ASCOMResult<()>;

    /// The description of the device.
    #[http("description", method = Get)]
    async fn description(&self) -> ASCOMResult<String>;

    /// The description of the driver.
    #[http("driverinfo", method = Get)]
    async fn driver_info(&self) -> ASCOMResult<String>;

    /// A string containing only the major and minor version of the driver.
    #[http("driverversion", method = Get)]
    async fn driver_version(&self) -> ASCOMResult<String>;

    /// The name of the device.
    #[http("name", method = Get)]
    async fn name(&self) -> ASCOMResult<String> {
        Ok(self.static_name().to_owned())
    }

    /// Returns the list of action names supported by this driver.
    #[http("supportedactions", method = Get)]
    async fn supported_actions(&self) -> ASCOMResult<Vec<String>> {
        Ok(vec![])
    }
}
