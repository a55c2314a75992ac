//! Social commands: emote at the room, or at one target in it.

use mudcmds::{Actor, Command, CommandSpec, Invocation, Locus};

/// One social verb. The second/third person pair drives every message, so
/// new socials are a constructor away.
pub struct SocialCmd {
    spec: CommandSpec,
    /// "smile" as in "You smile."
    second: String,
    /// "smiles" as in "Alice smiles."
    third: String,
}

impl SocialCmd {
    pub fn new(spec: CommandSpec, second: &str, third: &str) -> Self {
        Self {
            spec,
            second: second.to_string(),
            third: third.to_string(),
        }
    }

    pub fn smile() -> Self {
        Self::new(
            CommandSpec::new("smile").alias("приветик").alias("grin at"),
            "smile",
            "smiles",
        )
    }

    pub fn bow() -> Self {
        Self::new(CommandSpec::new("поклон").alias("bow"), "bow", "bows")
    }

    /// The target token: the argument body with an optional leading `at`
    /// dropped, so `smile at Bob` and `grin at Bob` land on `Bob`.
    fn target_token<'a>(&self, inv: &'a Invocation) -> &'a str {
        let t = inv.args.args.trim();
        match t.strip_prefix("at ") {
            Some(rest) => rest.trim(),
            None => t,
        }
    }
}

impl Command for SocialCmd {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn func(&self, inv: &Invocation) -> anyhow::Result<()> {
        let actor = &inv.actor;
        let target = self.target_token(inv);

        if target.is_empty() || target == "here" {
            if let Some(locus) = actor.location() {
                locus.msg_contents(&format!("{} {}.", actor.name(), self.third), &[actor.id()]);
            }
            actor.msg(&format!("You {}.", self.second));
            return Ok(());
        }

        // search owns the miss message; an unresolved target is a no-op
        let Some(target) = actor.search(target) else {
            return Ok(());
        };
        target.msg(&format!("{} {} to you.", actor.name(), self.third));
        actor.msg(&format!("You {} to {}.", self.second, target.name()));
        if let Some(locus) = actor.location() {
            locus.msg_contents(
                &format!("{} {} to {}.", actor.name(), self.third, target.name()),
                &[actor.id(), target.id()],
            );
        }
        Ok(())
    }
}
