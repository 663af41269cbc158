use serde::Serialize;
use std::borrow::Cow;

/// Entry of the `configureddevices` management listing.
#[derive(Debug, Serialize)]
pub(crate) struct ConfiguredDevice {
    #[serde(rename = "DeviceName")]
    pub(crate) name: String,
    #[serde(rename = "DeviceType")]
    pub(crate) ty: &'static str,
    #[serde(rename = "DeviceNumber")]
    pub(crate) number: usize,
    #[serde(rename = "UniqueID")]
    pub(crate) unique_id: String,
}

/// General information about the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerInfo {
    /// Server name.
    pub server_name: Cow<'static, str>,
    /// Manufacturer name.
    pub manufacturer: Cow<'static, str>,
    /// Manufacturer version.
    pub manufacturer_version: Cow<'static, str>,
    /// Server location.
    pub location: Cow<'static, str>,
}

// Namespaced `macro_export` so the macro lives under `api::` instead of the crate root.
#[doc(hidden)]
#[macro_export]
macro_rules! CargoServerInfo_6b0f3c52_93de_4d0a_a0e4_1f7f2ad5c1e3 {
    () => {
        const {
            use std::borrow::Cow;

            $crate::api::ServerInfo {
                server_name: Cow::Borrowed(env!("CARGO_PKG_NAME")),
                manufacturer: Cow::Borrowed(env!("CARGO_PKG_AUTHORS")),
                manufacturer_version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
                location: {
                    let homepage = env!("CARGO_PKG_HOMEPAGE");
                    Cow::Borrowed(if homepage.is_empty() {
                        "Unknown"
                    } else {
                        homepage
                    })
                },
            }
        }
    };
}

/// Constructs a [`ServerInfo`](crate::api::ServerInfo) populated with metadata from the caller's `Cargo.toml`.
#[doc(inline)]
pub use crate::CargoServerInfo_6b0f3c52_93de_4d0a_a0e4_1f7f2ad5c1e3 as CargoServerInfo;
