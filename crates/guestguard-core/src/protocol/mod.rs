//! Controller protocol definitions.
//!
//! - `params`: the `getConnectParams` response payload and its decoded record.

pub mod params;

pub use params::{decode, ConnectParams, CONNECT_PARAMS_ENDPOINT, CONTROLLER_PORT};
