//! Core trait definitions for session storage and randomness.
//!
//! The engine depends only on these seams, so the in-memory store and the
//! seeded random source can be swapped for other backends.

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use crate::session::Session;

// ---------------------------------------------------------------------------
// Session repository
// ---------------------------------------------------------------------------

/// Exclusive handle on one session. Dropping it releases the session.
pub type SessionGuard = OwnedMutexGuard<Session>;

/// Storage for assessment sessions.
///
/// Mutation goes through [`SessionRepository::checkout`], which serializes
/// read-modify-write cycles per session. Sessions with different ids never
/// wait on each other.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store a newly created session.
    async fn insert(&self, session: Session);

    /// Take the session's lock for a read-modify-write cycle.
    async fn checkout(&self, id: &str) -> Option<SessionGuard>;

    /// A point-in-time copy of the session.
    async fn snapshot(&self, id: &str) -> Option<Session>;

    /// Number of stored sessions.
    async fn count(&self) -> usize;
}

// ---------------------------------------------------------------------------
// Random source
// ---------------------------------------------------------------------------

/// Source of uniform choices for item selection.
pub trait RandomSource: Send + Sync {
    /// A uniformly distributed index in `0..len`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}
