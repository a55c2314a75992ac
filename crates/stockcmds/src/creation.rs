//! `+createnpc`: spawn a named NPC through the object factory.

use std::sync::Arc;

use mudcmds::{Actor, Command, CommandSpec, Invocation, Locus, ObjectFactory};

pub struct CmdCreateNpc {
    spec: CommandSpec,
    factory: Arc<dyn ObjectFactory>,
}

impl CmdCreateNpc {
    pub fn new(factory: Arc<dyn ObjectFactory>) -> Self {
        Self {
            spec: CommandSpec::new("+createnpc")
                .alias("+createNPC")
                .locks("call:not perm(nonpcs)")
                .help_category("mush"),
            factory,
        }
    }
}

impl Command for CmdCreateNpc {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn func(&self, inv: &Invocation) -> anyhow::Result<()> {
        let caller = &inv.actor;
        if inv.args.args.is_empty() {
            caller.msg("Usage: +createnpc <name>");
            return Ok(());
        }
        let Some(location) = caller.location() else {
            // no creating NPCs while out of character
            caller.msg("You must have a location to create an npc.");
            return Ok(());
        };

        let name = capitalize(&inv.args.args);
        let locks = format!("edit:id({}) and perm(Builders)", caller.id());
        self.factory.create("character", &name, &location, &locks)?;

        caller.msg(&format!("You created the NPC '{name}'."));
        location.msg_contents(
            &format!("{} created the NPC '{name}'.", caller.name()),
            &[caller.id()],
        );
        Ok(())
    }
}

/// First letter uppercased, the rest lowercased, any script.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}
