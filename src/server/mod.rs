mod discovery;
pub use discovery::{DEFAULT_DISCOVERY_PORT, Server as DiscoveryServer};

mod transaction;
pub(crate) use transaction::*;

mod params;
pub(crate) use params::ActionParams;
#[cfg(test)]
pub(crate) use params::OpaqueParams;

mod response;
use response::ValueResponse;

mod error;
pub(crate) use error::{Error, Result};

use crate::api::{CargoServerInfo, ConfiguredDevice, ServerInfo, Telescope, TelescopeAction};
use axum::Router;
use axum::extract::{FromRequest, Path, Request};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use std::convert::Infallible;
use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::Instrument;

/// Device kind served under `/api/v1/{device_type}/...`.
const DEVICE_TYPE: &str = "telescope";

/// Default HTTP listen address.
pub const DEFAULT_LISTEN_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3000);

/// The Alpaca server.
#[derive(Debug)]
pub struct Server {
    /// The served telescope.
    pub device: Arc<dyn Telescope>,
    /// General server information.
    pub info: ServerInfo,
    /// Address for the server to listen on.
    pub listen_addr: SocketAddr,
    /// Port for the discovery server to listen on, or `None` to skip discovery.
    pub discovery_port: Option<u16>,
}

/// Alpaca server with its listeners already bound.
#[derive(derive_more::Debug)]
pub struct BoundServer {
    listener: TcpListener,
    #[debug(skip)]
    router: Router,
    #[debug(skip)]
    discovery: Option<Pin<Box<dyn Future<Output = Infallible> + Send>>>,
}

/// How a request identifies itself.
#[derive(Clone, Copy)]
enum TransactionRule {
    /// Device reads: both ids required.
    Strict,
    /// Management endpoints: both ids optional.
    Lenient,
}

struct ServerHandler {
    path: String,
    params: ActionParams,
}

impl ServerHandler {
    async fn from_request(req: Request) -> std::result::Result<Self, axum::response::Response> {
        let path = req.uri().path().to_owned();
        let params = ActionParams::from_request(req, &()).await?;
        Ok(Self { path, params })
    }

    async fn exec<T: Serialize, Fut: Future<Output = Result<T>>>(
        mut self,
        rule: TransactionRule,
        make_response: impl FnOnce(ActionParams) -> Fut,
    ) -> axum::response::Response {
        let request_transaction = match rule {
            TransactionRule::Strict => RequestTransaction::extract(&mut self.params),
            TransactionRule::Lenient => {
                RequestTransaction::extract_lenient(self.params.opaque_mut())
            }
        };
        let request_transaction = match request_transaction {
            Ok(transaction) => transaction,
            Err(err) => return err.into_response(),
        };
        let response_transaction =
            ResponseTransaction::new(request_transaction.client_transaction_id);

        let span = tracing::error_span!(
            "Alpaca transaction",
            path = self.path,
            client_id = request_transaction.client_id,
            client_transaction_id = request_transaction.client_transaction_id,
            server_transaction_id = response_transaction.server_transaction_id,
        );

        async move {
            match make_response(self.params).await {
                Ok(value) => ValueResponse::new(response_transaction, &value).into_response(),
                Err(err) => err.into_response(),
            }
        }
        .instrument(span)
        .await
    }
}

impl Server {
    /// Server for `device` with the default listen address and discovery port.
    pub fn new(device: impl Telescope + 'static) -> Self {
        Self {
            device: Arc::new(device),
            info: CargoServerInfo!(),
            listen_addr: DEFAULT_LISTEN_ADDR,
            discovery_port: Some(DEFAULT_DISCOVERY_PORT),
        }
    }

    /// Binds the HTTP listener and, if enabled, the discovery socket.
    ///
    /// The discovery responder advertises the port the HTTP listener actually got,
    /// which matters when listening on port 0.
    pub async fn bind(self) -> eyre::Result<BoundServer> {
        tracing::debug!(addr = %self.listen_addr, "Binding Alpaca server");

        let listener = TcpListener::bind(self.listen_addr).await?;
        let addr = listener.local_addr()?;

        tracing::info!(%addr, "Bound Alpaca server");

        let discovery = match self.discovery_port {
            Some(discovery_port) => {
                let discovery = DiscoveryServer::for_alpaca_server_at(addr, discovery_port).bind()?;
                Some(Box::pin(discovery.start()) as Pin<Box<dyn Future<Output = _> + Send>>)
            }
            None => None,
        };

        Ok(BoundServer {
            listener,
            router: self.into_router(),
            discovery,
        })
    }

    fn into_router(self) -> Router {
        let device = self.device;
        let server_info = Arc::new(self.info);

        Router::new()
            .route(
                "/management/apiversions",
                axum::routing::get(|req: Request| async move {
                    match ServerHandler::from_request(req).await {
                        Ok(handler) => {
                            handler
                                .exec(TransactionRule::Lenient, |_params| async move {
                                    Ok([1_u32, 2, 3, 4])
                                })
                                .await
                        }
                        Err(rejection) => rejection,
                    }
                }),
            )
            .route("/management/v1/configureddevices", {
                let device = Arc::clone(&device);

                axum::routing::get(|req: Request| async move {
                    match ServerHandler::from_request(req).await {
                        Ok(handler) => {
                            handler
                                .exec(TransactionRule::Lenient, |_params| async move {
                                    Ok(vec![ConfiguredDevice {
                                        name: device.device_name().await,
                                        ty: "Telescope",
                                        number: 0,
                                        unique_id: device.unique_id().to_owned(),
                                    }])
                                })
                                .await
                        }
                        Err(rejection) => rejection,
                    }
                })
            })
            .route(
                "/management/v1/description",
                axum::routing::get(move |req: Request| async move {
                    match ServerHandler::from_request(req).await {
                        Ok(handler) => {
                            handler
                                .exec(TransactionRule::Lenient, |_params| async move {
                                    Ok(Arc::clone(&server_info))
                                })
                                .await
                        }
                        Err(rejection) => rejection,
                    }
                }),
            )
            .route(
                "/api/v1/{device_type}/{device_number}/{action}",
                axum::routing::any(
                    move |Path((device_type, device_number, action)): Path<(
                        String,
                        String,
                        String,
                    )>,
                          req: Request| async move {
                        if device_type != DEVICE_TYPE {
                            return (StatusCode::BAD_REQUEST, "Invalid device type").into_response();
                        }
                        if device_number != "0" {
                            return (StatusCode::BAD_REQUEST, "Invalid device number")
                                .into_response();
                        }
                        let handler = match ServerHandler::from_request(req).await {
                            Ok(handler) => handler,
                            Err(rejection) => return rejection,
                        };
                        if !TelescopeAction::is_known(&action) {
                            return Error::UnknownAction { action }.into_response();
                        }
                        handler
                            .exec(TransactionRule::Strict, |params| async move {
                                let action = TelescopeAction::from_parts(&action, params)?;
                                tracing::debug!(?action, "Handling Alpaca action");
                                Ok(action.handle(&*device).await?)
                            })
                            .await
                    },
                ),
            )
            .fallback(|| async {
                (StatusCode::INTERNAL_SERVER_ERROR, "Endpoint not registered")
            })
    }
}

impl BoundServer {
    /// Address the HTTP listener is bound to.
    pub fn listen_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves requests until the listener fails.
    ///
    /// Note: this function starts an infinite async loop and it's your responsibility
    /// to spawn it off via [`tokio::spawn`] if necessary.
    pub async fn start(self) -> eyre::Result<()> {
        tracing::debug!("Starting Alpaca main and discovery servers");

        let server = axum::serve(self.listener, self.router).into_future();

        match self.discovery {
            Some(discovery) => tokio::select! {
                result = server => result?,
                never_returns = discovery => match never_returns {},
            },
            None => server.await?,
        }

        Ok(())
    }
}
