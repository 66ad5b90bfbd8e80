//! `getConnectParams` payload.
//!
//! The controller answers with a flat JSON object carrying three booleans. Field
//! names are a compatibility boundary and must not change. All three are
//! mandatory: a missing (or `null`) field is reported as
//! [`FetchFailure::MissingField`] rather than defaulted.

use serde_json::{Map, Value};

use crate::error::FetchFailure;

/// Endpoint path served by the controller.
pub const CONNECT_PARAMS_ENDPOINT: &str = "getConnectParams";
/// Fixed HTTPS port of the controller.
pub const CONTROLLER_PORT: u16 = 8443;

pub const FIELD_IS_GUEST: &str = "is_guest_extension";
pub const FIELD_GUEST_TO_ADMIN_MESSAGING: &str = "is_guest_to_admin_messaging_enabled";
pub const FIELD_GUEST_TO_GUEST_CALLING: &str = "is_guest_to_guest_calling_enabled";

/// Access rights granted to one extension at fetch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectParams {
    pub is_guest: bool,
    pub guest_to_admin_messaging_enabled: bool,
    pub guest_to_guest_calling_enabled: bool,
}

impl ConnectParams {
    /// Non-guest record with every grant enabled.
    pub fn admin() -> Self {
        Self {
            is_guest: false,
            guest_to_admin_messaging_enabled: true,
            guest_to_guest_calling_enabled: true,
        }
    }

    pub fn guest(
        guest_to_admin_messaging_enabled: bool,
        guest_to_guest_calling_enabled: bool,
    ) -> Self {
        Self {
            is_guest: true,
            guest_to_admin_messaging_enabled,
            guest_to_guest_calling_enabled,
        }
    }
}

/// Decode a controller response body.
///
/// The body must be a JSON object; arrays and scalars are `ParseError` even
/// when they happen to hold three booleans.
pub fn decode(body: &[u8]) -> Result<ConnectParams, FetchFailure> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(FetchFailure::EmptyBody);
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| FetchFailure::ParseError(e.to_string()))?;
    let obj = value
        .as_object()
        .ok_or_else(|| FetchFailure::ParseError("expected a json object".into()))?;

    Ok(ConnectParams {
        is_guest: required(obj, FIELD_IS_GUEST)?,
        guest_to_admin_messaging_enabled: required(obj, FIELD_GUEST_TO_ADMIN_MESSAGING)?,
        guest_to_guest_calling_enabled: required(obj, FIELD_GUEST_TO_GUEST_CALLING)?,
    })
}

/// Absent or `null` is missing; any other non-bool is malformed.
fn required(obj: &Map<String, Value>, name: &'static str) -> Result<bool, FetchFailure> {
    match obj.get(name) {
        None | Some(Value::Null) => Err(FetchFailure::MissingField { name }),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(FetchFailure::ParseError(format!(
            "field `{name}` must be a bool, got {other}"
        ))),
    }
}
