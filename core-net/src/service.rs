//! Transport: executes endpoint descriptors through the host HTTP client.

use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::decoding;
use crate::endpoint::ApiEndpoint;
use crate::error::{NetworkError, Result};

/// Stateless executor shared by every caller.
///
/// Each call makes exactly one attempt. Failures come back classified as
/// [`NetworkError`]; nothing is retried here.
#[derive(Clone)]
pub struct NetworkService {
    http_client: Arc<dyn HttpClient>,
}

impl NetworkService {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    /// Send the request described by `endpoint` and return the raw
    /// response. Only transport failures are classified; any status passes.
    #[instrument(skip(self, endpoint), fields(method = %endpoint.method(), path = endpoint.path()))]
    pub async fn execute<E: ApiEndpoint>(&self, endpoint: &E) -> Result<HttpResponse> {
        let request = endpoint.to_request()?;
        self.send(request).await
    }

    /// Execute, validate the status, then decode the body as JSON.
    pub async fn request<T, E>(&self, endpoint: &E) -> Result<T>
    where
        T: DeserializeOwned,
        E: ApiEndpoint,
    {
        let response = self.execute(endpoint).await?;
        let response = validate_response(response)?;
        decoding::decode(&response.body)
    }

    /// Execute and validate the status, ignoring the body.
    pub async fn request_empty<E: ApiEndpoint>(&self, endpoint: &E) -> Result<()> {
        let response = self.execute(endpoint).await?;
        validate_response(response)?;
        Ok(())
    }

    /// Execute and validate the status, returning the raw body.
    pub async fn download_data<E: ApiEndpoint>(&self, endpoint: &E) -> Result<Bytes> {
        let response = self.execute(endpoint).await?;
        let response = validate_response(response)?;
        debug!(bytes = response.body.len(), "Downloaded response body");
        Ok(response.body)
    }

    /// Send `data` as the request body with the given MIME type, validate
    /// the status and decode the JSON response.
    ///
    /// The endpoint's own body and content headers, whatever their case, are
    /// replaced.
    #[instrument(skip(self, data, endpoint), fields(path = endpoint.path(), size = data.len()))]
    pub async fn upload_data<T, E>(&self, data: Bytes, endpoint: &E, mime_type: &str) -> Result<T>
    where
        T: DeserializeOwned,
        E: ApiEndpoint,
    {
        let length = data.len();
        let mut request = endpoint.to_request()?;
        request.headers.retain(|key, _| {
            !key.eq_ignore_ascii_case("Content-Type") && !key.eq_ignore_ascii_case("Content-Length")
        });
        let request = request
            .header("Content-Type", mime_type)
            .header("Content-Length", length.to_string())
            .body(data);

        let response = self.send(request).await?;
        let response = validate_response(response)?;
        decoding::decode(&response.body)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(method = %request.method, url = %request.url, "Sending request");

        match self.http_client.execute(request).await {
            Ok(response) => {
                debug!(status = response.status, "Received response");
                Ok(response)
            }
            Err(err) => {
                let err = NetworkError::from(err);
                warn!(error = %err, "Request failed before a response arrived");
                Err(err)
            }
        }
    }
}

/// Map a received response onto success or a status error.
///
/// `401` always becomes [`NetworkError::Unauthorized`] whatever the body;
/// other statuses outside 2xx keep their body for the caller.
pub fn validate_response(response: HttpResponse) -> Result<HttpResponse> {
    match response.status {
        200..=299 => Ok(response),
        401 => {
            warn!("Server rejected the credentials (401)");
            Err(NetworkError::Unauthorized)
        }
        status @ 100..=599 => {
            warn!(status, "Request returned an error status");
            let body = (!response.body.is_empty()).then_some(response.body);
            Err(NetworkError::HttpError { status, body })
        }
        status => {
            warn!(status, "Response carried an impossible status code");
            Err(NetworkError::InvalidResponse)
        }
    }
}
