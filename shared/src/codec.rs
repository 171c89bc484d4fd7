//! JSON body codec for the fleet service
//!
//! Request bodies are encoded to `Bytes` up front and response bodies are
//! decoded from the raw bytes, so oversized or malformed payloads surface as a
//! single error type regardless of the HTTP layer.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::{Drone, Order};

/// Maximum body size (10 MB) to prevent memory exhaustion
pub const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Errors that can occur during encoding/decoding
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Body too large: {0} bytes (max: {MAX_BODY_SIZE})")]
    BodyTooLarge(usize),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode a request body
pub fn encode<T: Serialize>(body: &T) -> Result<Bytes, CodecError> {
    let buf = serde_json::to_vec(body)?;

    if buf.len() > MAX_BODY_SIZE {
        return Err(CodecError::BodyTooLarge(buf.len()));
    }

    Ok(Bytes::from(buf))
}

/// Decode a response body
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, CodecError> {
    if body.len() > MAX_BODY_SIZE {
        return Err(CodecError::BodyTooLarge(body.len()));
    }

    Ok(serde_json::from_slice(body)?)
}

/// Decode the body of `GET /drones`
pub fn decode_drones(body: &[u8]) -> Result<Vec<Drone>, CodecError> {
    decode(body)
}

/// Decode the body of `GET /orders`
pub fn decode_orders(body: &[u8]) -> Result<Vec<Order>, CodecError> {
    decode(body)
}
