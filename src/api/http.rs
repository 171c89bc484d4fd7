//! HTTP implementation of the fleet service clients

use super::{ApiError, DroneApi, OrderApi};
use async_trait::async_trait;
use bytes::Bytes;
use dashboard_shared::{
    codec, CreateOrderRequest, Drone, Order, Position, ProvisionRequest,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, Url};
use std::time::Duration;
use tracing::debug;

/// Client for the `/drones` and `/orders` endpoints sharing one connection pool
pub struct HttpServiceClient {
    client: Client,
    base_url: Url,
}

impl HttpServiceClient {
    /// Create a client for the service at `base_url`. Every request fails
    /// after `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut url = Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "not a hierarchical URL".into(),
            });
        }

        // Url::join replaces the last segment unless the path ends with a slash
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn get(&self, path: &str) -> Result<Bytes, ApiError> {
        let url = self.endpoint(path)?;
        debug!("GET {}", url);

        let response = check_status(self.client.get(url).send().await?)?;
        Ok(response.bytes().await?)
    }

    async fn post(&self, path: &str, body: Bytes) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        debug!("POST {} ({} bytes)", url, body.len());

        check_status(
            self.client
                .post(url)
                .header(CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await?,
        )?;
        Ok(())
    }
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(status.as_u16()))
    }
}

#[async_trait]
impl DroneApi for HttpServiceClient {
    async fn fetch_drones(&self) -> Result<Vec<Drone>, ApiError> {
        let body = self.get("drones").await?;
        Ok(codec::decode_drones(&body)?)
    }

    async fn provision_drones(&self, count: u32) -> Result<(), ApiError> {
        let body = codec::encode(&ProvisionRequest { number: count })?;
        self.post("drones", body).await
    }
}

#[async_trait]
impl OrderApi for HttpServiceClient {
    async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError> {
        let body = self.get("orders").await?;
        Ok(codec::decode_orders(&body)?)
    }

    async fn create_order(&self, location: Position, id: Option<String>) -> Result<(), ApiError> {
        let request = match id {
            Some(id) => CreateOrderRequest::with_id(location, id),
            None => CreateOrderRequest::server_assigned(location),
        };
        let body = codec::encode(&request)?;
        self.post("orders", body).await
    }
}
