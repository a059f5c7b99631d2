// cellgate-api: Async client for the Cellgate device-action cloud API

pub mod client;
pub mod error;
pub mod transport;

pub use client::{ACTUATION_URL, ActuationClient, ActuationReceipt};
pub use error::Error;
pub use transport::TransportConfig;
