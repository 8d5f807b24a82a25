//! Session Management
//!
//! One [`Session`] per end user, held in process memory only. Sessions are
//! created lazily on the first message and are never persisted; a restart
//! loses every in-progress flow.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};

use crate::dialog::StepId;
use crate::menu::MenuId;
use crate::params::{
    DateInput, Resolution, SortCriteria, SortOrder, TimeRange, VolumeInterval,
};

/// Transport-level user identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Slot a step writes its validated answer into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScratchKey {
    Address,
    Days,
    Resolution,
    Start,
    End,
    Range,
    Sort,
    Order,
    Limit,
    Interval,
}

/// A validated answer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Address(String),
    Days(u32),
    Date(DateInput),
    Range(TimeRange),
    Resolution(Resolution),
    Sort(SortCriteria),
    Order(SortOrder),
    Limit(u64),
    Interval(VolumeInterval),
}

/// Flow-scoped accumulator of validated answers
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scratch {
    values: HashMap<ScratchKey, Value>,
}

impl Scratch {
    pub fn insert(&mut self, key: ScratchKey, value: Value) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: ScratchKey) -> Option<&Value> {
        self.values.get(&key)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn address(&self) -> Option<&str> {
        match self.get(ScratchKey::Address)? {
            Value::Address(address) => Some(address),
            _ => None,
        }
    }

    pub fn days(&self) -> Option<u32> {
        match self.get(ScratchKey::Days)? {
            Value::Days(days) => Some(*days),
            _ => None,
        }
    }

    pub fn date(&self, key: ScratchKey) -> Option<&DateInput> {
        match self.get(key)? {
            Value::Date(date) => Some(date),
            _ => None,
        }
    }

    pub fn range(&self) -> Option<TimeRange> {
        match self.get(ScratchKey::Range)? {
            Value::Range(range) => Some(*range),
            _ => None,
        }
    }

    pub fn resolution(&self) -> Option<Resolution> {
        match self.get(ScratchKey::Resolution)? {
            Value::Resolution(resolution) => Some(*resolution),
            _ => None,
        }
    }

    pub fn sort(&self) -> Option<SortCriteria> {
        match self.get(ScratchKey::Sort)? {
            Value::Sort(sort) => Some(*sort),
            _ => None,
        }
    }

    pub fn order(&self) -> Option<SortOrder> {
        match self.get(ScratchKey::Order)? {
            Value::Order(order) => Some(*order),
            _ => None,
        }
    }

    pub fn limit(&self) -> Option<u64> {
        match self.get(ScratchKey::Limit)? {
            Value::Limit(limit) => Some(*limit),
            _ => None,
        }
    }

    pub fn interval(&self) -> Option<VolumeInterval> {
        match self.get(ScratchKey::Interval)? {
            Value::Interval(interval) => Some(*interval),
            _ => None,
        }
    }
}

/// Dialog state for one user
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub user: UserId,

    /// Step awaiting input; `None` means idle, waiting for a menu command
    pub current_step: Option<StepId>,

    /// Answers collected so far in the current flow
    pub scratch: Scratch,

    /// Menu restored by Back
    pub last_menu: MenuId,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user: UserId) -> Self {
        let now = Utc::now();
        Self {
            user,
            current_step: None,
            scratch: Scratch::default(),
            last_menu: MenuId::Main,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Drop any in-progress flow
    pub fn abandon_flow(&mut self) {
        self.current_step = None;
        self.scratch.clear();
    }

    /// Start a flow at `entry`, discarding whatever came before
    pub fn begin(&mut self, entry: StepId) {
        self.abandon_flow();
        self.current_step = Some(entry);
    }

    pub fn is_idle(&self) -> bool {
        self.current_step.is_none()
    }

    /// Scratch must be empty whenever no step is pending
    pub fn is_consistent(&self) -> bool {
        self.current_step.is_some() || self.scratch.is_empty()
    }
}

/// Concurrency-safe table of sessions keyed by user.
///
/// Each session sits behind its own mutex, so two users never contend and
/// one user's messages are handled strictly in order.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<UserId, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the user's session, creating it on first contact
    pub async fn get_or_create(&self, user: &UserId) -> Arc<Mutex<Session>> {
        if let Some(session) = self.sessions.read().await.get(user) {
            return Arc::clone(session);
        }

        let mut sessions = self.sessions.write().await;
        Arc::clone(
            sessions
                .entry(user.clone())
                .or_insert_with(|| Arc::new(Mutex::new(Session::new(user.clone())))),
        )
    }

    /// Copy of the user's current state, if any
    pub async fn snapshot(&self, user: &UserId) -> Option<Session> {
        let session = self.sessions.read().await.get(user).cloned()?;
        let guard = session.lock().await;
        Some(guard.clone())
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle_and_consistent() {
        let session = Session::new(UserId::from_string("1"));
        assert!(session.is_idle());
        assert!(session.is_consistent());
        assert_eq!(session.last_menu, MenuId::Main);
    }

    #[test]
    fn test_abandon_clears_scratch() {
        let mut session = Session::new(UserId::from_string("1"));
        session.begin(StepId::AwaitingPnlWallet);
        session
            .scratch
            .insert(ScratchKey::Address, Value::Address("a".repeat(44)));
        assert!(session.is_consistent());

        session.abandon_flow();
        assert!(session.scratch.is_empty());
        assert!(session.is_consistent());
    }

    #[test]
    fn test_typed_getters_reject_wrong_variant() {
        let mut scratch = Scratch::default();
        scratch.insert(ScratchKey::Days, Value::Limit(3));
        assert_eq!(scratch.days(), None);
        scratch.insert(ScratchKey::Days, Value::Days(3));
        assert_eq!(scratch.days(), Some(3));
    }

    #[tokio::test]
    async fn test_store_creates_lazily_and_isolates_users() {
        let store = SessionStore::new();
        assert!(store.is_empty().await);

        let alice = UserId::from_string("alice");
        let bob = UserId::from_string("bob");

        store.get_or_create(&alice).await.lock().await.begin(StepId::AwaitingSplWallet);
        let _ = store.get_or_create(&bob).await;
        assert_eq!(store.len().await, 2);

        let alice_state = store.snapshot(&alice).await.unwrap();
        let bob_state = store.snapshot(&bob).await.unwrap();
        assert_eq!(alice_state.current_step, Some(StepId::AwaitingSplWallet));
        assert!(bob_state.is_idle());

        let again = store.get_or_create(&alice).await;
        assert_eq!(again.lock().await.current_step, Some(StepId::AwaitingSplWallet));
        assert_eq!(store.len().await, 2);
    }
}
