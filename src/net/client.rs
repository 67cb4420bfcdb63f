//! The request pipeline: authenticate, send, classify, decode.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use serde::de::DeserializeOwned;

use super::authenticator::RequestAuthenticator;
use super::classifier::ResponseClassifier;
use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::error::ApiError;

pub struct HttpClient {
    transport: Box<dyn Transport>,
    authenticator: RequestAuthenticator,
    classifier: ResponseClassifier,
}

impl HttpClient {
    pub fn new(
        transport: Box<dyn Transport>,
        authenticator: RequestAuthenticator,
        classifier: ResponseClassifier,
    ) -> Self {
        Self { transport, authenticator, classifier }
    }

    /// Issue `request` and decode the success payload as `T`.
    ///
    /// # Errors
    ///
    /// Every failure, including a payload that does not decode as `T`, has
    /// already been through the classifier when it is returned.
    pub async fn execute<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        let request = self.authenticator.authorize(request);
        tracing::debug!(method = request.method.as_str(), path = %request.path, "sending request");

        let outcome = match self.transport.send(request).await {
            Ok(response) => decode(response),
            Err(e) => Err(e),
        };
        outcome.map_err(|e| self.classifier.observe(e))
    }
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Status { status: response.status, body: response.body });
    }
    serde_json::from_value(response.body).map_err(|e| ApiError::Decode { message: e.to_string() })
}
