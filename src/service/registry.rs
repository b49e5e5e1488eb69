//! Service registry client

use crate::service::ServiceError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REGISTRY_TIMEOUT: Duration = Duration::from_secs(10);

/// Body of a registration request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub uri: String,
}

/// Announces a service to the registry with `POST {registry_url}/register`
///
/// Any transport failure or non-2xx response is a registration failure.
pub async fn register(registry_url: &str, registration: &Registration) -> Result<(), ServiceError> {
    let endpoint = format!("{}/register", registry_url.trim_end_matches('/'));
    let failed = |e: reqwest::Error| ServiceError::Registry {
        url: endpoint.clone(),
        message: e.to_string(),
    };

    let client = reqwest::Client::builder()
        .timeout(REGISTRY_TIMEOUT)
        .build()
        .map_err(failed)?;

    client
        .post(&endpoint)
        .json(registration)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(failed)?;

    Ok(())
}
