//!
//! Session change notifications.
//!
//! The store publishes a `SessionEvent` after every mutation has been applied and
//! persisted; observers such as the route guard hold a `Subscription` and drain it
//! before they read session state.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::types::{Session, User};

/// A committed change to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The session was (re)loaded from storage.
    Restored(Session),
    /// A login replaced the session with this user.
    LoggedIn(User),
    /// The session was cleared. Also sent for a logout while already signed out.
    LoggedOut,
}

impl SessionEvent {
    /// The session as it stands after this event.
    pub fn session(&self) -> Session {
        match self {
            SessionEvent::Restored(session) => session.clone(),
            SessionEvent::LoggedIn(user) => Session::authenticated(user.clone()),
            SessionEvent::LoggedOut => Session::anonymous(),
        }
    }
}

/// Fan-out of session events to every live subscription.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<SessionEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new observer. It only sees events published after this call.
    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        Subscription { rx }
    }

    /// Delivers `event` to every subscriber, dropping the ones that went away.
    pub fn publish(&mut self, event: SessionEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        tracing::trace!(subscribers = self.subscribers.len(), ?event, "session event published");
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Receiving end of an `EventBus` registration.
#[derive(Debug)]
pub struct Subscription {
    rx: Receiver<SessionEvent>,
}

impl Subscription {
    /// Returns the next pending event without blocking.
    pub fn try_next(&self) -> Option<SessionEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Takes every pending event, oldest first.
    pub fn drain(&self) -> Vec<SessionEvent> {
        self.rx.try_iter().collect()
    }

    /// Takes every pending event and returns the last one, if any.
    pub fn latest(&self) -> Option<SessionEvent> {
        self.rx.try_iter().last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn user() -> User {
        User {
            id: "u-1".to_string(),
            username: "alice".to_string(),
            role: Role::Admin,
            email: None,
        }
    }

    #[test]
    fn late_subscribers_miss_earlier_events() {
        let mut bus = EventBus::new();
        let early = bus.subscribe();
        bus.publish(SessionEvent::LoggedOut);
        let late = bus.subscribe();
        bus.publish(SessionEvent::LoggedIn(user()));

        assert_eq!(early.drain(), vec![SessionEvent::LoggedOut, SessionEvent::LoggedIn(user())]);
        assert_eq!(late.drain(), vec![SessionEvent::LoggedIn(user())]);
        assert_eq!(early.try_next(), None);
    }

    #[test]
    fn dropped_subscriptions_are_pruned() {
        let mut bus = EventBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());
        bus.publish(SessionEvent::LoggedOut);
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(kept.latest(), Some(SessionEvent::LoggedOut));
    }

    #[test]
    fn event_session_reflects_outcome() {
        assert_eq!(SessionEvent::LoggedOut.session(), Session::anonymous());
        let session = SessionEvent::LoggedIn(user()).session();
        assert!(session.is_authenticated);
        assert_eq!(session.role(), Some(Role::Admin));
    }
}
