use guestguard_core::protocol::params::ConnectParams;

/// Decision from policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Records were available and no rule denied.
    Pass,
    /// At least one record was unavailable; allowed without evaluation.
    FailOpen,
    Deny { reason: &'static str },
}

impl PolicyDecision {
    pub fn is_allowed(&self) -> bool {
        !matches!(self, PolicyDecision::Deny { .. })
    }

    pub fn outcome(&self) -> &'static str {
        match self {
            PolicyDecision::Pass => "pass",
            PolicyDecision::FailOpen => "fail_open",
            PolicyDecision::Deny { .. } => "deny",
        }
    }
}

/// Message history visibility for one extension.
pub fn chat_page(params: Option<&ConnectParams>) -> PolicyDecision {
    let Some(p) = params else {
        return PolicyDecision::FailOpen;
    };

    if p.is_guest && !p.guest_to_admin_messaging_enabled {
        return PolicyDecision::Deny { reason: "guest messaging disabled" };
    }
    PolicyDecision::Pass
}

/// May `from` originate a chat to `to`.
pub fn outgoing_chat(
    from: Option<&ConnectParams>,
    to: Option<&ConnectParams>,
    is_group_chat: bool,
) -> PolicyDecision {
    let (Some(from), Some(to)) = (from, to) else {
        return PolicyDecision::FailOpen;
    };

    if from.is_guest && to.is_guest {
        return PolicyDecision::Deny { reason: "guest to guest chat" };
    }
    if from.is_guest && is_group_chat {
        return PolicyDecision::Deny { reason: "guest group chat" };
    }
    if from.is_guest && !from.guest_to_admin_messaging_enabled {
        return PolicyDecision::Deny { reason: "guest messaging disabled" };
    }
    PolicyDecision::Pass
}

/// May `from` place a call to `to`.
pub fn outgoing_call(from: Option<&ConnectParams>, to: Option<&ConnectParams>) -> PolicyDecision {
    let (Some(from), Some(to)) = (from, to) else {
        return PolicyDecision::FailOpen;
    };

    if from.is_guest && to.is_guest && !from.guest_to_guest_calling_enabled {
        return PolicyDecision::Deny { reason: "guest to guest calling disabled" };
    }
    PolicyDecision::Pass
}
