//! The dispatcher: one input line through the four-phase lifecycle.

use std::fmt;
use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use crate::descriptor::Command;
use crate::descriptor::Invocation;
use crate::locks::LockEvaluator;
use crate::locks::MudlocksEvaluator;
use crate::registry::CommandRegistry;
use crate::world::Actor;

/// The access types checked before a command may run. Both must pass; a
/// lock with neither clause is open. Descriptors gate dispatch with either
/// spelling (`cmd:all()`, `call:not perm(nonpcs)`).
pub const CMD_ACCESS: &str = "cmd";
pub const CALL_ACCESS: &str = "call";

/// How one dispatch ended. Everything here is non-fatal; real failures come
/// back as [`DispatchError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `func` and the post-hook completed.
    Done { key: String },
    /// No registered name matched the line. The actor has been told.
    NotFound { token: String },
    /// The lock denied the actor. Reported unless the descriptor says
    /// `silent_deny`.
    Denied { key: String },
    /// The pre-hook refused; parse, func and post-hook were skipped.
    Aborted { key: String },
}

#[derive(Debug)]
pub enum DispatchError {
    /// `func` returned an error. The post-hook did not run. Surfaced to the
    /// caller so an operator sees it; never silently dropped.
    Execution { key: String, source: anyhow::Error },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::Execution { key, source } => {
                write!(f, "command {key:?} failed: {source}")
            }
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Execution { source, .. } => Some(source.as_ref()),
        }
    }
}

pub struct Dispatcher {
    registry: CommandRegistry,
    locks: Arc<dyn LockEvaluator>,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry) -> Self {
        Self::with_evaluator(registry, Arc::new(MudlocksEvaluator))
    }

    pub fn with_evaluator(registry: CommandRegistry, locks: Arc<dyn LockEvaluator>) -> Self {
        Self { registry, locks }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Run one input line for one actor.
    ///
    /// RESOLVE -> AUTHORIZE -> EXECUTE(pre, tokenize, parse, func) ->
    /// FINALIZE(post), strictly in that order, no backtracking. A miss or a
    /// deny terminates before any command code runs.
    pub fn dispatch(
        &self,
        line: &str,
        actor: &Arc<dyn Actor>,
    ) -> Result<Outcome, DispatchError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Outcome::NotFound {
                token: String::new(),
            });
        }

        // RESOLVE
        let Some(hit) = self.registry.resolve(line) else {
            let token = line.split_whitespace().next().unwrap_or("").to_string();
            debug!("no command matches {token:?}");
            actor.msg(&format!("Command '{token}' is not available."));
            return Ok(Outcome::NotFound { token });
        };
        let spec = hit.cmd.spec();
        let key = spec.key.clone();

        // AUTHORIZE: strictly before any command side effect.
        let allowed = self.locks.check(&spec.locks, CMD_ACCESS, actor.as_ref())
            && self.locks.check(&spec.locks, CALL_ACCESS, actor.as_ref());
        if !allowed {
            debug!("lock denied {key:?} for actor {}", actor.id());
            if !spec.silent_deny {
                actor.msg("You are not allowed to do that.");
            }
            return Ok(Outcome::Denied { key });
        }

        // EXECUTE
        if !hit.cmd.at_pre_cmd(actor) {
            debug!("pre-hook aborted {key:?}");
            return Ok(Outcome::Aborted { key });
        }

        let mut inv = Invocation {
            cmdstring: hit.matched,
            raw: hit.remainder.clone(),
            actor: actor.clone(),
            args: mudargs::parse(&hit.remainder),
        };
        hit.cmd.parse(&mut inv);

        if let Err(source) = hit.cmd.func(&inv) {
            warn!("command {key:?} failed for actor {}: {source:#}", actor.id());
            return Err(DispatchError::Execution { key, source });
        }

        // FINALIZE: only after normal completion of func.
        hit.cmd.at_post_cmd(actor);
        Ok(Outcome::Done { key })
    }
}
