//! Policy layer (guest/admin/group-chat rules).
//!
//! Pure decision functions over zero, one or two connect-params records. Missing
//! data always resolves to an allow (fail-open).

pub mod engine;

pub use engine::{chat_page, outgoing_call, outgoing_chat, PolicyDecision};
