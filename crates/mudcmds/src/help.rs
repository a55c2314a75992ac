//! Auto-generated help index over the registry.
//!
//! Commands registered with `auto_help` show up here, grouped by help
//! category. The index serializes cleanly so a host can ship it to a web
//! portal or admin tool as JSON.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::descriptor::Command;
use crate::registry::CommandRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpEntry {
    pub key: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpIndex {
    /// category -> entries, categories sorted, entries in registration
    /// order.
    pub categories: BTreeMap<String, Vec<HelpEntry>>,
}

impl HelpIndex {
    pub fn build(registry: &CommandRegistry) -> Self {
        let mut categories: BTreeMap<String, Vec<HelpEntry>> = BTreeMap::new();
        for cmd in registry.commands() {
            let spec = cmd.spec();
            if !spec.auto_help {
                continue;
            }
            categories
                .entry(spec.help_category.clone())
                .or_default()
                .push(HelpEntry {
                    key: spec.key.clone(),
                    aliases: spec.aliases.clone(),
                });
        }
        Self { categories }
    }

    pub fn render_text(&self) -> String {
        let mut s = String::new();
        for (category, entries) in &self.categories {
            s.push_str(&format!("-- {category} --\r\n"));
            for e in entries {
                if e.aliases.is_empty() {
                    s.push_str(&format!("  {}\r\n", e.key));
                } else {
                    s.push_str(&format!("  {} ({})\r\n", e.key, e.aliases.join(", ")));
                }
            }
        }
        s
    }
}
