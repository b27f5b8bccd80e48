use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::types::{PkceToken, Token};

pub const SESSION_COOKIE: &str = "recordrecs_session";

/// Idle time after which a session is forgotten.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Upper bound on live sessions. When full, the least recently seen one is evicted.
pub const MAX_SESSIONS: usize = 10_000;

/// Per-browser state: the pending login handshake and the obtained token.
#[derive(Debug, Clone)]
pub struct Session {
    pub pkce: Option<PkceToken>,
    pub token: Option<Token>,
    /// Last time a request touched this session.
    pub last_seen: DateTime<Utc>,
}

impl Session {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            pkce: None,
            token: None,
            last_seen: now,
        }
    }
}

/// In-memory session store shared by all request handlers.
///
/// Sessions only live as long as the process; nothing is written to disk. The store
/// is bounded twice over:
///
/// - Sessions idle for longer than the TTL are pruned, both whenever a session is
///   created and from the periodic task started by the server.
/// - Creating a session while the store is at capacity evicts the least recently
///   seen one, so clients that drop cookies cannot grow it without limit.
#[derive(Debug, Clone)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
    ttl: Duration,
    capacity: usize,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::with_limits(Duration::hours(SESSION_TTL_HOURS), MAX_SESSIONS)
    }
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with a custom idle TTL and capacity. A capacity of 0 is
    /// treated as 1.
    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Starts an empty session and returns its id.
    ///
    /// Expired sessions are pruned first. If the store is still full, the least
    /// recently seen session makes room for the new one.
    pub async fn create(&self) -> String {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().await;

        self.prune_locked(&mut sessions, now);
        while sessions.len() >= self.capacity {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, s)| s.last_seen)
                .map(|(id, _)| id.clone());
            match oldest {
                Some(id) => sessions.remove(&id),
                None => break,
            };
        }

        let id = Uuid::new_v4().to_string();
        sessions.insert(id.clone(), Session::new(now));
        id
    }

    /// Returns `id` when it names a live session, otherwise a freshly created one.
    pub async fn ensure(&self, id: Option<&str>) -> String {
        if let Some(id) = id {
            if let Some(session) = self.sessions.lock().await.get_mut(id) {
                session.last_seen = Utc::now();
                return id.to_string();
            }
        }
        self.create().await
    }

    pub async fn get(&self, id: &str) -> Option<Session> {
        self.sessions.lock().await.get_mut(id).map(|s| {
            s.last_seen = Utc::now();
            s.clone()
        })
    }

    pub async fn token(&self, id: &str) -> Option<Token> {
        self.sessions.lock().await.get_mut(id).and_then(|s| {
            s.last_seen = Utc::now();
            s.token.clone()
        })
    }

    pub async fn set_pkce(&self, id: &str, pkce: PkceToken) {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .entry(id.to_string())
            .or_insert_with(|| Session::new(now));
        session.pkce = Some(pkce);
        session.last_seen = now;
    }

    /// Removes and returns the pending handshake so a callback can only be used once.
    pub async fn take_pkce(&self, id: &str) -> Option<PkceToken> {
        self.sessions.lock().await.get_mut(id).and_then(|s| {
            s.last_seen = Utc::now();
            s.pkce.take()
        })
    }

    pub async fn set_token(&self, id: &str, token: Token) {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .entry(id.to_string())
            .or_insert_with(|| Session::new(now));
        session.token = Some(token);
        session.last_seen = now;
    }

    pub async fn remove(&self, id: &str) {
        self.sessions.lock().await.remove(id);
    }

    pub async fn count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Drops every session idle for longer than the TTL and returns how many went.
    pub async fn prune(&self) -> usize {
        self.prune_at(Utc::now()).await
    }

    /// Same as [`SessionManager::prune`], measured against `now`.
    pub async fn prune_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.lock().await;
        self.prune_locked(&mut sessions, now)
    }

    fn prune_locked(&self, sessions: &mut HashMap<String, Session>, now: DateTime<Utc>) -> usize {
        let before = sessions.len();
        sessions.retain(|_, s| now - s.last_seen <= self.ttl);
        before - sessions.len()
    }
}
