use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use sapper_core::Game;
use uuid::Uuid;

use crate::error::{ApiError, Result};

pub type GameId = Uuid;

#[derive(Debug)]
struct Session {
    game: Game,
    /// `None` when the ttl is too large to represent, which means the session never expires.
    expires_at: Option<Instant>,
}

impl Session {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|deadline| now < deadline)
    }
}

/// In-memory games keyed by id, each expiring `ttl` after its last successful write.
///
/// The map lock is only held to look sessions up or drop them. Moves on one game are serialized
/// by that game's own lock, which is never held while taking the map lock.
#[derive(Debug)]
pub struct SessionStore {
    ttl: Duration,
    sessions: Mutex<HashMap<GameId, Arc<Mutex<Session>>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.sessions).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn insert(&self, id: GameId, game: Game) {
        self.insert_at(id, game, Instant::now());
    }

    pub fn insert_at(&self, id: GameId, game: Game, now: Instant) {
        let session = Session {
            game,
            expires_at: self.deadline(now),
        };
        lock(&self.sessions).insert(id, Arc::new(Mutex::new(session)));
        log::debug!("Session {} stored, expires in {:?}", id, self.ttl);
    }

    /// Runs `f` on the game while holding its lock; success pushes the expiry forward.
    pub fn with_game<T>(&self, id: GameId, f: impl FnOnce(&mut Game) -> Result<T>) -> Result<T> {
        self.with_game_at(id, Instant::now(), f)
    }

    pub fn with_game_at<T>(
        &self,
        id: GameId,
        now: Instant,
        f: impl FnOnce(&mut Game) -> Result<T>,
    ) -> Result<T> {
        let entry = lock(&self.sessions)
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))?;

        {
            let mut session = lock(entry.as_ref());
            if session.is_live(now) {
                let value = f(&mut session.game)?;
                session.expires_at = self.deadline(now);
                return Ok(value);
            }
        }

        self.remove(id);
        log::debug!("Session {} expired", id);
        Err(ApiError::SessionExpired(id.to_string()))
    }

    pub fn remove(&self, id: GameId) -> bool {
        lock(&self.sessions).remove(&id).is_some()
    }

    /// Drops every expired session, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let mut sessions = lock(&self.sessions);
        let before = sessions.len();
        sessions.retain(|_, entry| lock(entry.as_ref()).is_live(now));
        before - sessions.len()
    }

    fn deadline(&self, now: Instant) -> Option<Instant> {
        now.checked_add(self.ttl)
    }
}
