//! Collaborator traits for the game world the engine dispatches into.
//!
//! The engine only references world entities; it never owns them and never
//! mutates them directly. All calls are synchronous from the dispatcher's
//! point of view.

use std::sync::Arc;

pub type ActorId = u64;

/// An entity that can issue commands and receive messages.
pub trait Actor: Send + Sync {
    fn id(&self) -> ActorId;
    fn name(&self) -> String;

    /// Deliver one line of text to whoever controls this actor.
    fn msg(&self, text: &str);

    /// The locus this actor currently stands in, if any.
    fn location(&self) -> Option<Arc<dyn Locus>>;

    /// Resolve a free-text token against this actor's visibility scope.
    /// Implementations own any "not found" messaging; callers treat `None`
    /// as already reported.
    fn search(&self, token: &str) -> Option<Arc<dyn Actor>>;

    /// Whether this actor holds a named permission. Matching should be
    /// ASCII case-insensitive (lock strings write `perm(Builders)`).
    fn has_perm(&self, perm: &str) -> bool;
}

/// A spatial context that can fan a message out to everyone present.
pub trait Locus: Send + Sync {
    /// Send `text` to all actors in this locus except those in `exclude`.
    fn msg_contents(&self, text: &str, exclude: &[ActorId]);
}

/// Global object creation, e.g. spawning an NPC into a locus.
pub trait ObjectFactory: Send + Sync {
    fn create(
        &self,
        type_tag: &str,
        key: &str,
        location: &Arc<dyn Locus>,
        locks: &str,
    ) -> anyhow::Result<ActorId>;
}
