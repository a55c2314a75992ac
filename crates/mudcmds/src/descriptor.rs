//! Command descriptors: static metadata plus the lifecycle callbacks.

use std::sync::Arc;

use mudargs::ParsedArgs;
use regex::Regex;

use crate::world::Actor;

/// Static metadata for one registered command. Immutable after
/// registration; the registry holds it for the process lifetime.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Primary name, matched before any alias. Case-sensitive, any script.
    pub key: String,
    /// Alternate names, matched in declaration order. May contain spaces
    /// ("grin at") and non-Latin text.
    pub aliases: Vec<String>,
    /// Lock string gating dispatch; the `cmd` access type is checked.
    pub locks: String,
    pub help_category: String,
    /// Whether this command appears in the generated help index.
    pub auto_help: bool,
    /// When set, the remainder after the command name must match for the
    /// name to bind at all. When unset, the remainder must be empty or
    /// start with whitespace.
    pub arg_regex: Option<Regex>,
    /// Deny without messaging the actor.
    pub silent_deny: bool,
}

impl CommandSpec {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            aliases: Vec::new(),
            locks: "cmd:all()".to_string(),
            help_category: "general".to_string(),
            auto_help: true,
            arg_regex: None,
            silent_deny: false,
        }
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn locks(mut self, locks: &str) -> Self {
        self.locks = locks.to_string();
        self
    }

    pub fn help_category(mut self, category: &str) -> Self {
        self.help_category = category.to_string();
        self
    }

    pub fn arg_regex(mut self, re: Regex) -> Self {
        self.arg_regex = Some(re);
        self
    }

    pub fn no_auto_help(mut self) -> Self {
        self.auto_help = false;
        self
    }

    pub fn silent_deny(mut self) -> Self {
        self.silent_deny = true;
        self
    }
}

/// Everything one dispatch carries through the EXECUTE phase. Built fresh
/// per input line, dropped when dispatch returns.
pub struct Invocation {
    /// The name the actor actually typed (key or alias).
    pub cmdstring: String,
    /// The raw remainder after the command name.
    pub raw: String,
    pub actor: Arc<dyn Actor>,
    pub args: ParsedArgs,
}

/// One command: metadata plus the four lifecycle callbacks.
///
/// Commands are shared (`Arc<dyn Command>`) and must not keep per-invocation
/// state; anything derived from the input belongs on the [`Invocation`].
pub trait Command: Send + Sync {
    fn spec(&self) -> &CommandSpec;

    /// Runs before anything else in the EXECUTE phase. Returning `false`
    /// aborts the invocation: `parse`, `func` and `at_post_cmd` are all
    /// skipped.
    fn at_pre_cmd(&self, _actor: &Arc<dyn Actor>) -> bool {
        true
    }

    /// Refine the already-tokenized arguments. Most commands take the MUX
    /// decomposition as-is and leave this alone.
    fn parse(&self, _inv: &mut Invocation) {}

    /// The command body. Malformed arguments are a usage problem for the
    /// command itself: message the actor and return `Ok`. An `Err` is an
    /// execution failure and skips the post-hook.
    fn func(&self, inv: &Invocation) -> anyhow::Result<()>;

    /// Runs after `func` completed normally, and only then.
    fn at_post_cmd(&self, _actor: &Arc<dyn Actor>) {}
}
