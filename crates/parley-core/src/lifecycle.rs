//! Conversation lifecycle state.
//!
//! `Uninitialized → TenantResolved → ConversationCreated → Completing →
//! ConversationCreated → Deleted`. After a deletion the session may
//! create a new conversation.

use tracing::debug;

use crate::SessionError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    TenantResolved,
    ConversationCreated(String),
    Completing(String),
    Deleted(String),
}

impl LifecycleState {
    /// Whether the tenant has been resolved (every state but the first).
    pub fn has_tenant(&self) -> bool {
        !matches!(self, LifecycleState::Uninitialized)
    }

    /// The conversation currently referenced by this state, if any.
    pub fn conversation(&self) -> Option<&str> {
        match self {
            LifecycleState::ConversationCreated(id) | LifecycleState::Completing(id) => Some(id),
            _ => None,
        }
    }

    pub(crate) fn require_tenant(&self) -> Result<(), SessionError> {
        if self.has_tenant() {
            Ok(())
        } else {
            Err(SessionError::TenantNotSet)
        }
    }

    fn transition(&mut self, next: LifecycleState) {
        debug!(from = ?self, to = ?next, "lifecycle transition");
        *self = next;
    }

    pub(crate) fn tenant_resolved(&mut self) {
        if !self.has_tenant() {
            self.transition(LifecycleState::TenantResolved);
        }
    }

    pub(crate) fn conversation_created(&mut self, id: &str) {
        self.transition(LifecycleState::ConversationCreated(id.to_string()));
    }

    pub(crate) fn completion_started(&mut self, id: &str) {
        self.transition(LifecycleState::Completing(id.to_string()));
    }

    /// Back to ready once a completion ends, on every exit path.
    pub(crate) fn completion_finished(&mut self) {
        if let LifecycleState::Completing(id) = self {
            let id = std::mem::take(id);
            self.transition(LifecycleState::ConversationCreated(id));
        }
    }

    pub(crate) fn conversation_deleted(&mut self, id: &str) {
        self.transition(LifecycleState::Deleted(id.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uninitialized_without_tenant() {
        let state = LifecycleState::default();
        assert!(!state.has_tenant());
        assert!(matches!(state.require_tenant(), Err(SessionError::TenantNotSet)));
    }

    #[test]
    fn full_cycle() {
        let mut state = LifecycleState::default();
        state.tenant_resolved();
        assert_eq!(state, LifecycleState::TenantResolved);

        state.conversation_created("c1");
        assert_eq!(state.conversation(), Some("c1"));

        state.completion_started("c1");
        assert_eq!(state, LifecycleState::Completing("c1".into()));

        state.completion_finished();
        assert_eq!(state, LifecycleState::ConversationCreated("c1".into()));

        state.conversation_deleted("c1");
        assert_eq!(state, LifecycleState::Deleted("c1".into()));
        assert!(state.has_tenant());
        assert_eq!(state.conversation(), None);

        state.conversation_created("c2");
        assert_eq!(state.conversation(), Some("c2"));
    }

    #[test]
    fn resolving_twice_keeps_conversation() {
        let mut state = LifecycleState::default();
        state.tenant_resolved();
        state.conversation_created("c1");
        state.tenant_resolved();
        assert_eq!(state.conversation(), Some("c1"));
    }

    #[test]
    fn finishing_without_completion_is_a_no_op() {
        let mut state = LifecycleState::TenantResolved;
        state.completion_finished();
        assert_eq!(state, LifecycleState::TenantResolved);
    }
}
