//! `mudcmds`: command registry and dispatch for a MUD shard.
//!
//! One player input line flows through a fixed four-phase lifecycle:
//!
//! - RESOLVE: match the line against registered command names
//!   (longest name wins, so multi-word names like `grin at` work),
//! - AUTHORIZE: evaluate the descriptor's lock string against the actor,
//! - EXECUTE: pre-hook, tokenize the remainder into [`mudargs::ParsedArgs`],
//!   run the command's own `parse` refinement, then `func`,
//! - FINALIZE: post-hook, only after `func` completed normally.
//!
//! A failed resolve or a denied lock never reaches `func`; an error out of
//! `func` skips the post-hook and propagates to the caller.
//!
//! The engine owns no game state. Actors, locations and object creation are
//! reached through the collaborator traits in [`world`].

pub mod descriptor;
pub mod dispatch;
pub mod help;
pub mod locks;
pub mod registry;
pub mod world;

pub use descriptor::{Command, CommandSpec, Invocation};
pub use dispatch::{DispatchError, Dispatcher, Outcome};
pub use help::HelpIndex;
pub use locks::{LockEvaluator, MudlocksEvaluator};
pub use registry::{CommandRegistry, RegistryError};
pub use world::{Actor, ActorId, Locus, ObjectFactory};
