//! Request-scoped current actor.
//!
//! An [`ActorSession`] lives for exactly one request. Code that needs to act
//! as somebody else takes an [`ActorGuard`] from it; the guard puts the
//! previous actor back when it goes out of scope, so early returns and `?`
//! cannot leak an elevated identity.

use tracing::debug;

use crate::context::SecurityContext;

/// Holder of the actor the current request runs as.
#[derive(Debug, Clone)]
pub struct ActorSession {
    current: SecurityContext,
}

impl ActorSession {
    #[must_use]
    pub fn new(initial: SecurityContext) -> Self {
        Self { current: initial }
    }

    /// Session of an unauthenticated request.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::new(SecurityContext::anonymous())
    }

    /// The actor operations currently run as.
    #[must_use]
    pub fn current(&self) -> &SecurityContext {
        &self.current
    }

    /// Consume the session, returning the final actor.
    #[must_use]
    pub fn into_current(self) -> SecurityContext {
        self.current
    }

    /// Act as the system actor until the returned guard is dropped.
    ///
    /// The guard restores the previous actor unconditionally.
    pub fn elevate_to_system(&mut self) -> ActorGuard<'_> {
        debug!("elevating to system actor");
        self.replace(SecurityContext::system())
    }

    /// Act as `actor` until the returned guard is dropped.
    ///
    /// Call [`ActorGuard::commit`] to keep `actor` as the current actor.
    pub fn switch_to(&mut self, actor: SecurityContext) -> ActorGuard<'_> {
        debug!(subject_id = %actor.subject_id(), "switching actor");
        self.replace(actor)
    }

    fn replace(&mut self, actor: SecurityContext) -> ActorGuard<'_> {
        let previous = std::mem::replace(&mut self.current, actor);
        ActorGuard {
            session: self,
            previous: Some(previous),
        }
    }
}

/// Scoped actor switch. Restores the previous actor on drop unless committed.
#[must_use = "dropping the guard immediately restores the previous actor"]
#[derive(Debug)]
pub struct ActorGuard<'a> {
    session: &'a mut ActorSession,
    previous: Option<SecurityContext>,
}

impl ActorGuard<'_> {
    /// The actor in effect while the guard is alive.
    #[must_use]
    pub fn context(&self) -> &SecurityContext {
        &self.session.current
    }

    /// Keep the switched-to actor after the guard is gone.
    pub fn commit(mut self) {
        self.previous = None;
    }
}

impl Drop for ActorGuard<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            debug!(subject_id = %previous.subject_id(), "restoring previous actor");
            self.session.current = previous;
        }
    }
}
