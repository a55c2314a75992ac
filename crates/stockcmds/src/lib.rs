//! `stockcmds`: the stock command set plus an in-memory world harness.
//!
//! Two command shapes live here: socials (`smile`, `поклон`) that message
//! the actor, an optional target and the surrounding room, and `+createnpc`
//! which spawns a named NPC through the [`mudcmds::ObjectFactory`]
//! collaborator. [`memworld`] provides a self-contained world (rooms,
//! actors, factory, captured outboxes) that backs the tests and any local
//! experimentation.

pub mod creation;
pub mod memworld;
pub mod social;

use std::sync::Arc;

use mudcmds::{CommandRegistry, ObjectFactory, RegistryError};

pub use creation::CmdCreateNpc;
pub use memworld::{MemActor, MemRoom, MemWorld};
pub use social::SocialCmd;

/// Register the whole stock set on a fresh registry.
pub fn register_stock(
    registry: &mut CommandRegistry,
    factory: Arc<dyn ObjectFactory>,
) -> Result<(), RegistryError> {
    registry.register(Arc::new(SocialCmd::smile()))?;
    registry.register(Arc::new(SocialCmd::bow()))?;
    registry.register(Arc::new(CmdCreateNpc::new(factory)))?;
    Ok(())
}
