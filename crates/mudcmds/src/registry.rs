//! The command registry: name -> descriptor, fixed after startup.
//!
//! Registration happens once, before any dispatch; afterwards the registry
//! is read-only and safe to share across threads by reference.

use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::descriptor::Command;

#[derive(Debug)]
pub enum RegistryError {
    /// A key or alias is already taken by an earlier registration. Fatal at
    /// startup; colliding names are never silently overwritten.
    DuplicateCommand { name: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateCommand { name } => {
                write!(f, "duplicate command name: {name:?}")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// One successful line match: the command, the name as typed, and what was
/// left of the line after it.
pub struct ResolvedLine {
    pub cmd: Arc<dyn Command>,
    pub matched: String,
    pub remainder: String,
}

#[derive(Default)]
pub struct CommandRegistry {
    cmds: Vec<Arc<dyn Command>>,
    by_key: HashMap<String, usize>,
    // (alias, command index), in registration order
    aliases: Vec<(String, usize)>,
    taken: HashSet<String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, cmd: Arc<dyn Command>) -> Result<(), RegistryError> {
        let spec = cmd.spec();
        let mut fresh = HashSet::new();
        for name in std::iter::once(&spec.key).chain(spec.aliases.iter()) {
            if self.taken.contains(name) || !fresh.insert(name.clone()) {
                return Err(RegistryError::DuplicateCommand { name: name.clone() });
            }
        }

        let idx = self.cmds.len();
        self.taken.extend(fresh);
        self.by_key.insert(spec.key.clone(), idx);
        for a in &spec.aliases {
            self.aliases.push((a.clone(), idx));
        }
        self.cmds.push(cmd);
        Ok(())
    }

    pub fn commands(&self) -> impl Iterator<Item = &Arc<dyn Command>> {
        self.cmds.iter()
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Exact, case-sensitive lookup: key first, then aliases in
    /// registration order.
    pub fn lookup(&self, token: &str) -> Option<&Arc<dyn Command>> {
        if let Some(&i) = self.by_key.get(token) {
            return Some(&self.cmds[i]);
        }
        self.aliases
            .iter()
            .find(|(a, _)| a == token)
            .map(|&(_, i)| &self.cmds[i])
    }

    /// Match a whole input line against registered names.
    ///
    /// The longest name that prefixes the line wins, so `grin at Bob`
    /// reaches a command named `grin at` even when a plain `grin` exists.
    /// Ties prefer keys over aliases, then earlier registrations. A name
    /// only binds if the remainder is empty or starts with whitespace,
    /// unless the descriptor carries an `arg_regex`, which then decides
    /// alone.
    pub fn resolve(&self, line: &str) -> Option<ResolvedLine> {
        let line = line.trim_start();
        // (name_len, is_key, cmd index, alias position)
        let mut best: Option<(usize, bool, usize, usize)> = None;
        let mut best_name = "";

        let keys = self.by_key.iter().map(|(k, &i)| (k.as_str(), i, true, 0));
        let aliases = self
            .aliases
            .iter()
            .enumerate()
            .map(|(pos, (a, i))| (a.as_str(), *i, false, pos));
        for (name, idx, is_key, pos) in keys.chain(aliases) {
            let Some(rem) = line.strip_prefix(name) else {
                continue;
            };
            let binds = match &self.cmds[idx].spec().arg_regex {
                Some(re) => re.is_match(rem),
                None => rem.is_empty() || rem.starts_with(char::is_whitespace),
            };
            if !binds {
                continue;
            }
            let better = match best {
                None => true,
                Some((blen, bkey, bidx, bpos)) => {
                    if name.len() != blen {
                        name.len() > blen
                    } else if is_key != bkey {
                        is_key
                    } else {
                        (idx, pos) < (bidx, bpos)
                    }
                }
            };
            if better {
                best = Some((name.len(), is_key, idx, pos));
                best_name = name;
            }
        }

        best.map(|(len, _, idx, _)| ResolvedLine {
            cmd: self.cmds[idx].clone(),
            matched: best_name.to_string(),
            remainder: line[len..].trim_start().to_string(),
        })
    }
}
