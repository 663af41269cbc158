use crate::Server;
use crate::mount::codec::SET_TRACKING_MODE;
use crate::mount::{Precision, Simulator, TrackingMode};
use crate::test_utils::simulated_telescope;
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::net::{Ipv4Addr, SocketAddr};

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    simulator: Simulator,
}

impl TestServer {
    async fn start() -> eyre::Result<Self> {
        let (telescope, simulator) = simulated_telescope(Precision::Coarse);

        let server = Server {
            listen_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 0)),
            discovery_port: None,
            ..Server::new(telescope)
        };

        let server = server.bind().await?;

        // Get the random port assigned by the OS.
        let base_url = format!("http://{}", server.listen_addr()?);

        drop(tokio::spawn(server.start()));

        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
            simulator,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn device_url(&self, action: &str) -> String {
        self.url(&format!("/api/v1/telescope/0/{action}"))
    }

    async fn get(&self, action: &str, query: &[(&str, &str)]) -> eyre::Result<Value> {
        let response = self
            .client
            .get(self.device_url(action))
            .query(&[("ClientID", "1"), ("ClientTransactionID", "7")])
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn put_form(&self, action: &str, form: &[(&str, &str)]) -> eyre::Result<reqwest::Response> {
        Ok(self
            .client
            .put(self.device_url(action))
            .form(form)
            .send()
            .await?)
    }
}

#[tokio::test]
async fn lists_supported_api_versions() -> eyre::Result<()> {
    let server = TestServer::start().await?;

    let body: Value = server
        .client
        .get(server.url("/management/apiversions"))
        .query(&[("ClientID", "1"), ("ClientTransactionID", "3")])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    assert_eq!(body["Value"], json!([1, 2, 3, 4]));
    assert_eq!(body["ClientTransactionID"], 3);
    assert_eq!(body["ErrorNumber"], 0);
    assert_eq!(body["ErrorMessage"], "");
    Ok(())
}

#[tokio::test]
async fn describes_the_server_and_its_device() -> eyre::Result<()> {
    let server = TestServer::start().await?;

    let description: Value = server
        .client
        .get(server.url("/management/v1/description"))
        .query(&[("ClientTransactionID", "3")])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert_eq!(description["Value"]["ServerName"], env!("CARGO_PKG_NAME"));
    assert_eq!(description["ClientTransactionID"], 3);

    let devices: Value = server
        .client
        .get(server.url("/management/v1/configureddevices"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert_eq!(devices["Value"][0]["DeviceName"], "Advanced VX");
    assert_eq!(devices["Value"][0]["DeviceType"], "Telescope");
    assert_eq!(devices["Value"][0]["DeviceNumber"], 0);
    Ok(())
}

#[tokio::test]
async fn connects_via_json_body() -> eyre::Result<()> {
    let server = TestServer::start().await?;

    let body: Value = server
        .client
        .put(server.device_url("connected"))
        .json(&json!({ "Connected": "true", "ClientID": 1 }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert_eq!(body["ClientTransactionID"], 0);
    assert_eq!(body["ErrorNumber"], 0);
    assert_eq!(body.get("Value"), Some(&Value::Null), "{body}");

    let body = server.get("connected", &[]).await?;
    assert_eq!(body["Value"], true);
    assert_eq!(body["ClientTransactionID"], 7);
    Ok(())
}

#[tokio::test]
async fn writes_ignore_miscased_transaction_ids() -> eyre::Result<()> {
    let server = TestServer::start().await?;

    let response = server
        .put_form("connected", &[("Connected", "true"), ("clienttransactionid", "5")])
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    assert_eq!(body["ClientTransactionID"], 0);

    let response = server
        .put_form("connected", &[("Connected", "false"), ("clientid", "abc")])
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(server.get("connected", &[]).await?["Value"], false);

    // Correctly cased ids are still validated.
    let response = server
        .put_form("connected", &[("Connected", "true"), ("ClientID", "abc")])
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await?, "Invalid ClientID");
    Ok(())
}

#[tokio::test]
async fn move_axis_over_http() -> eyre::Result<()> {
    let server = TestServer::start().await?;

    let response = server
        .put_form(
            "moveaxis",
            &[("Axis", "0"), ("Rate", "2"), ("ClientID", "1"), ("ClientTransactionID", "9")],
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(server.get("slewing", &[]).await?["Value"], true);
    assert_eq!(server.get("tracking", &[]).await?["Value"], false);

    let commands = server.simulator.commands();
    assert_eq!(commands[0], [SET_TRACKING_MODE, u8::from(TrackingMode::Off)]);
    assert_eq!(server.simulator.tracking_mode(), TrackingMode::Off);
    Ok(())
}

#[tokio::test]
async fn lists_axis_rates() -> eyre::Result<()> {
    let server = TestServer::start().await?;

    let body = server.get("axisrates", &[("Axis", "1")]).await?;
    let rates = body["Value"].as_array().map_or(0, Vec::len);
    assert_eq!(rates, 9);
    assert_eq!(body["Value"][8], json!({ "Minimum": 4.0, "Maximum": 4.0 }));
    Ok(())
}

#[tokio::test]
async fn reads_require_transaction_ids() -> eyre::Result<()> {
    let server = TestServer::start().await?;

    let response = server
        .client
        .get(server.device_url("connected"))
        .query(&[("ClientTransactionID", "1")])
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await?, "Invalid ClientID");

    let response = server
        .client
        .get(server.device_url("connected"))
        .query(&[("clientid", "1"), ("ClientTransactionID", "-1")])
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await?, "Invalid ClientTransactionID");
    Ok(())
}

#[tokio::test]
async fn rejects_unknown_devices_and_operations() -> eyre::Result<()> {
    let server = TestServer::start().await?;

    let response = server
        .client
        .get(server.url("/api/v1/camera/0/connected"))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await?, "Invalid device type");

    let response = server
        .client
        .get(server.url("/api/v1/telescope/1/connected"))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await?, "Invalid device number");

    let response = server
        .client
        .get(server.device_url("frobnicate"))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.text().await?, "Not implemented");

    let response = server
        .client
        .post(server.device_url("connected"))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.text().await?, "Method not allowed");

    let response = server.put_form("declination", &[("ClientID", "1")]).await?;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.text().await?, "Method not allowed");

    let response = server.client.get(server.url("/setup")).send().await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text().await?, "Endpoint not registered");
    Ok(())
}

#[tokio::test]
async fn bad_parameters_are_reported_generically() -> eyre::Result<()> {
    let server = TestServer::start().await?;

    let response = server
        .put_form("moveaxis", &[("Axis", "0"), ("Rate", "fast")])
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await?, "Bad parameter");

    // Only the transaction fields are case-insensitive.
    let response = server.put_form("connected", &[("connected", "true")]).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await?, "Bad parameter");

    // Driver-level validation failures take the same path.
    let response = server
        .put_form("targetdeclination", &[("TargetDeclination", "91")])
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await?, "Bad parameter");

    assert!(server.simulator.commands().is_empty());
    Ok(())
}
