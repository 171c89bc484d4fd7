//! Fleet service clients
//!
//! The dashboard talks to the fleet service through two narrow traits so the
//! polling logic can be driven by a scripted service in tests.

mod error;
mod http;
mod traits;

#[cfg(test)]
pub mod fake;

pub use error::ApiError;
pub use http::HttpServiceClient;
pub use traits::{DroneApi, OrderApi};
