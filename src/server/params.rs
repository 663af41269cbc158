use super::{Error, Result};
use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::{Method, StatusCode, header};
use axum::response::IntoResponse;
use axum::Form;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;

/// Request parameters that haven't been consumed yet.
///
/// Names are matched exactly; only the transaction fields of a query string
/// are looked up case-insensitively.
#[derive(Debug, Default)]
pub(crate) struct OpaqueParams(IndexMap<String, String>);

impl Drop for OpaqueParams {
    fn drop(&mut self) {
        if !self.0.is_empty() {
            tracing::warn!("Unused parameters: {:?}", self.0);
        }
    }
}

impl OpaqueParams {
    pub(crate) fn take(&mut self, name: &str) -> Option<String> {
        self.0.shift_remove(name)
    }

    pub(crate) fn take_case_insensitive(&mut self, name: &str) -> Option<String> {
        let index = self.0.keys().position(|key| key.eq_ignore_ascii_case(name))?;
        self.0.shift_remove_index(index).map(|(_, value)| value)
    }

    pub(crate) fn maybe_extract<T: DeserializeOwned>(
        &mut self,
        name: &'static str,
    ) -> Result<Option<T>> {
        self.take(name)
            .map(|value| {
                serde_plain::from_str(&value).map_err(|err| Error::BadParameter { name, err })
            })
            .transpose()
    }

    pub(crate) fn extract<T: DeserializeOwned>(&mut self, name: &'static str) -> Result<T> {
        self.maybe_extract(name)?
            .ok_or(Error::MissingParameter { name })
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for OpaqueParams {
    fn from(object: serde_json::Map<String, serde_json::Value>) -> Self {
        Self(
            object
                .into_iter()
                .map(|(name, value)| {
                    let value = match value {
                        serde_json::Value::String(value) => value,
                        other => other.to_string(),
                    };
                    (name, value)
                })
                .collect(),
        )
    }
}

#[derive(Debug)]
pub(crate) enum ActionParams {
    Get(OpaqueParams),
    Put(OpaqueParams),
}

impl ActionParams {
    pub(crate) fn opaque_mut(&mut self) -> &mut OpaqueParams {
        match self {
            Self::Get(params) | Self::Put(params) => params,
        }
    }
}

impl<S: Send + Sync> FromRequest<S> for ActionParams {
    type Rejection = axum::response::Response;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        match *req.method() {
            Method::GET => {
                let (mut parts, _body) = req.into_parts();
                let Query(params) = Query::<IndexMap<String, String>>::from_request_parts(
                    &mut parts, state,
                )
                .await
                .map_err(IntoResponse::into_response)?;
                Ok(Self::Get(OpaqueParams(params)))
            }
            Method::PUT => {
                let content_type = req
                    .headers()
                    .get(header::CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_ascii_lowercase);

                let params = match content_type {
                    None => OpaqueParams::default(),
                    Some(content_type) if content_type.starts_with("application/json") => {
                        Json::<serde_json::Map<String, serde_json::Value>>::from_request(
                            req, state,
                        )
                        .await
                        .map_err(IntoResponse::into_response)?
                        .0
                        .into()
                    }
                    Some(_) => OpaqueParams(
                        Form::<IndexMap<String, String>>::from_request(req, state)
                            .await
                            .map_err(IntoResponse::into_response)?
                            .0,
                    ),
                };
                Ok(Self::Put(params))
            }
            _ => Err((StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response()),
        }
    }
}
