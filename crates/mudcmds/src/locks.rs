//! Lock evaluation at the dispatch boundary.
//!
//! The dispatcher only sees the [`LockEvaluator`] trait; the default
//! implementation hands the lock string to `mudlocks` with the actor adapted
//! into a lock subject. Hosts with their own permission machinery can swap
//! in a different evaluator.

use crate::world::Actor;

/// Evaluate a descriptor's lock string for one access type. Malformed or
/// undefined lock input must deny.
pub trait LockEvaluator: Send + Sync {
    fn check(&self, lockstr: &str, access: &str, subject: &dyn Actor) -> bool;
}

struct ActorSubject<'a>(&'a dyn Actor);

impl mudlocks::Subject for ActorSubject<'_> {
    fn subject_id(&self) -> u64 {
        self.0.id()
    }

    fn has_perm(&self, perm: &str) -> bool {
        self.0.has_perm(perm)
    }
}

/// The stock evaluator: parse with `mudlocks`, fail closed on bad input.
#[derive(Debug, Default)]
pub struct MudlocksEvaluator;

impl LockEvaluator for MudlocksEvaluator {
    fn check(&self, lockstr: &str, access: &str, subject: &dyn Actor) -> bool {
        mudlocks::check_str(lockstr, access, &ActorSubject(subject))
    }
}
