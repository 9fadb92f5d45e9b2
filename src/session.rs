use serde::Serialize;
use tokio::sync::watch;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
}

/// What the identity provider reports on every change.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub loading: bool,
}

impl SessionSnapshot {
    pub fn loading() -> Self {
        Self { user: None, loading: true }
    }
}

/// Identity collaborator. Dropping the receiver returned by `subscribe` is the
/// unsubscribe; `login`/`logout` are fire-and-forget.
pub trait SessionProvider: Send + Sync {
    fn subscribe(&self) -> watch::Receiver<SessionSnapshot>;
    fn login(&self, email: &str);
    fn logout(&self);
}

/// In-process provider: starts loading, resolves once `ready` is called.
pub struct LocalSessionProvider {
    tx: watch::Sender<SessionSnapshot>,
}

impl Default for LocalSessionProvider {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::loading());
        Self { tx }
    }
}

impl LocalSessionProvider {
    pub fn new() -> Self { Self::default() }

    /// Publishes the first resolved state, optionally with a signed-in user.
    pub fn ready(&self, email: Option<&str>) {
        let user = email.map(new_user);
        self.tx.send_replace(SessionSnapshot { user, loading: false });
    }
}

fn new_user(email: &str) -> User {
    User { id: Uuid::new_v4(), email: email.trim().to_string() }
}

impl SessionProvider for LocalSessionProvider {
    fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    fn login(&self, email: &str) {
        info!("👤 Signing in {}", email);
        self.tx.send_replace(SessionSnapshot { user: Some(new_user(email)), loading: false });
    }

    fn logout(&self) {
        info!("👋 Signing out");
        self.tx.send_replace(SessionSnapshot { user: None, loading: false });
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionGate {
    #[default]
    Loading,
    Resolved(Option<User>),
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionView {
    Loading,
    SignedOut,
    SignedIn { user: User },
}

impl SessionGate {
    /// Applying the same snapshot twice leaves the gate where it was.
    pub fn apply(&mut self, snapshot: &SessionSnapshot) {
        // Unlike the browser client, a late loading flag does not send a
        // resolved page back to the placeholder; the gate only moves forward.
        if snapshot.loading {
            return;
        }
        *self = Self::Resolved(snapshot.user.clone());
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Resolved(user) => user.as_ref(),
            Self::Loading => None,
        }
    }

    pub fn view(&self) -> SessionView {
        match self {
            Self::Loading => SessionView::Loading,
            Self::Resolved(None) => SessionView::SignedOut,
            Self::Resolved(Some(user)) => SessionView::SignedIn { user: user.clone() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn gate_waits_for_first_resolution() {
        let mut gate = SessionGate::default();
        gate.apply(&SessionSnapshot::loading());
        assert_eq!(gate.view(), SessionView::Loading);

        gate.apply(&SessionSnapshot { user: None, loading: false });
        assert_eq!(gate.view(), SessionView::SignedOut);
    }

    #[test]
    fn reapplying_is_idempotent() {
        let user = new_user("ada@example.com");
        let snap = SessionSnapshot { user: Some(user.clone()), loading: false };
        let mut gate = SessionGate::default();
        gate.apply(&snap);
        let once = gate.clone();
        gate.apply(&snap);
        assert_eq!(gate, once);
        assert_eq!(gate.user(), Some(&user));
    }

    #[test]
    fn loading_after_resolution_is_ignored() {
        let mut gate = SessionGate::Resolved(None);
        gate.apply(&SessionSnapshot::loading());
        assert_eq!(gate, SessionGate::Resolved(None));
    }

    #[tokio::test]
    async fn local_provider_notifies_subscribers() {
        let provider = LocalSessionProvider::new();
        let mut rx = provider.subscribe();
        assert!(rx.borrow().loading);

        provider.login("  ada@example.com ");
        rx.changed().await.unwrap();
        let snap = rx.borrow_and_update().clone();
        assert!(!snap.loading);
        assert_eq!(snap.user.map(|u| u.email), Some("ada@example.com".to_string()));

        provider.logout();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().user, None);
    }
}
