//! The request/response envelope shared by every remote operation.
//!
//! # Design
//! Each service method reduces to a single call here: serialize the body,
//! execute the round trip through the transport, time it, classify the
//! outcome, and log each stage under the operation name. The same mapping
//! holds everywhere:
//!
//! - body fails to serialize → [`ApiError::InvalidBody`], transport untouched
//! - transport fails → [`ApiError::Internal`]
//! - status 200 → decode the body as `T`
//! - any other status → the structured remote error verbatim if the body
//!   carries one, [`ApiError::Internal`] otherwise
//!
//! One attempt per call; retries and timeouts belong to the transport.

use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::metrics::MetricsSink;

/// Error payload the remote service uses for non-200 answers.
#[derive(Debug, Deserialize)]
struct RemoteErrorBody {
    status_code: u16,
    message: String,
}

/// Per-service call machinery: one fixed endpoint, API key, and controller
/// name, plus the shared transport and metrics collaborators.
#[derive(Clone)]
pub(crate) struct Envelope {
    endpoint: String,
    api_key: String,
    controller: &'static str,
    transport: Arc<dyn Transport>,
    metrics: Arc<dyn MetricsSink>,
}

impl Envelope {
    pub(crate) fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        controller: &'static str,
        transport: Arc<dyn Transport>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            controller,
            transport,
            metrics,
        }
    }

    /// POST `body` to `action` and decode the 200 payload as `T`.
    pub(crate) fn post<B, T>(
        &self,
        operation: &'static str,
        action: &'static str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let encoded = serde_json::to_string(body).map_err(|e| {
            error!(
                operation,
                controller = self.controller,
                error = %e,
                "failed to serialize request body"
            );
            ApiError::InvalidBody
        })?;
        let request = HttpRequest {
            method: HttpMethod::Post,
            endpoint: self.endpoint.clone(),
            params: self.routing(action, Vec::new()),
            headers: vec![
                ("x-api-key".to_string(), self.api_key.clone()),
                ("content-type".to_string(), "application/json".to_string()),
            ],
            body: Some(encoded),
        };
        self.execute(operation, request)
    }

    /// GET `action` with extra query params and decode the 200 payload as `T`.
    pub(crate) fn get<T>(
        &self,
        operation: &'static str,
        action: &'static str,
        query: Vec<(String, String)>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let request = HttpRequest {
            method: HttpMethod::Get,
            endpoint: self.endpoint.clone(),
            params: self.routing(action, query),
            headers: vec![("x-api-key".to_string(), self.api_key.clone())],
            body: None,
        };
        self.execute(operation, request)
    }

    fn routing(&self, action: &'static str, extra: Vec<(String, String)>) -> Vec<(String, String)> {
        let mut params = vec![
            ("controller".to_string(), self.controller.to_string()),
            ("action".to_string(), action.to_string()),
        ];
        params.extend(extra);
        params
    }

    fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: HttpRequest,
    ) -> Result<T, ApiError> {
        debug!(operation, controller = self.controller, "started");

        let started = Instant::now();
        let outcome = self.transport.execute(request);
        self.metrics.record(operation, started.elapsed());

        let result = match outcome {
            Ok(response) => {
                debug!(operation, status = response.status, "network response");
                self.classify(operation, response)
            }
            Err(e) => {
                error!(operation, error = %e, "transport failure");
                Err(ApiError::Internal)
            }
        };
        debug!(operation, ok = result.is_ok(), "completed");
        result
    }

    fn classify<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        response: HttpResponse,
    ) -> Result<T, ApiError> {
        if response.status != 200 {
            return match serde_json::from_str::<RemoteErrorBody>(&response.body) {
                Ok(remote) => {
                    info!(
                        operation,
                        status = remote.status_code,
                        message = %remote.message,
                        "remote error"
                    );
                    Err(ApiError::Remote {
                        status: remote.status_code,
                        message: remote.message,
                    })
                }
                Err(_) => {
                    error!(
                        operation,
                        status = response.status,
                        body = %response.body,
                        "unstructured error"
                    );
                    Err(ApiError::Internal)
                }
            };
        }
        match serde_json::from_str(&response.body) {
            Ok(data) => {
                info!(operation, "success");
                Ok(data)
            }
            Err(e) => {
                error!(operation, error = %e, "failed to decode response body");
                Err(ApiError::Internal)
            }
        }
    }
}
