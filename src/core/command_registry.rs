//! Two-layer command registry with alias and prefix resolution.
//!
//! Each layer keeps its commands sorted by canonical name and a lowercase
//! alias map (names included). A token is resolved in this order:
//!
//! 1. exact match in the local alias map
//! 2. exact match in the global alias map
//! 3. prefix of a local command name, then prefix of a local alias
//! 4. prefix of a global command name, then prefix of a global alias
//!
//! Alias maps are `BTreeMap`s, so when several aliases share a prefix the
//! lexicographically smallest one wins.

use crate::core::command::CommandRef;
use std::collections::BTreeMap;
use std::ops::Bound;

#[derive(Default)]
struct CommandLayer {
    commands: Vec<CommandRef>,
    aliases: BTreeMap<String, String>,
}

impl CommandLayer {
    fn register(&mut self, mut commands: Vec<CommandRef>) {
        commands.sort_by(|a, b| a.name().cmp(b.name()));
        self.aliases.clear();
        for cmd in &commands {
            let name = cmd.name().to_string();
            self.aliases.insert(name.to_lowercase(), name.clone());
            for alias in cmd.aliases() {
                if let Some(previous) = self.aliases.insert(alias.to_lowercase(), name.clone()) {
                    if previous != name {
                        log::warn!("Alias '{alias}' of '{name}' shadows command '{previous}'");
                    }
                }
            }
        }
        self.commands = commands;
    }

    fn by_name(&self, name: &str) -> Option<CommandRef> {
        self.commands
            .binary_search_by(|cmd| cmd.name().cmp(name))
            .ok()
            .map(|index| self.commands[index].clone())
    }

    fn exact(&self, token: &str) -> Option<CommandRef> {
        self.aliases.get(token).and_then(|name| self.by_name(name))
    }

    fn by_prefix(&self, prefix: &str) -> Option<CommandRef> {
        let index = self.commands.partition_point(|cmd| cmd.name() < prefix);
        if let Some(cmd) = self.commands.get(index) {
            if cmd.name().starts_with(prefix) {
                return Some(cmd.clone());
            }
        }

        let (alias, name) = self
            .aliases
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .next()?;
        if alias.starts_with(prefix) {
            self.by_name(name)
        } else {
            None
        }
    }
}

/// Resolves typed tokens to global or local commands
#[derive(Default)]
pub struct CommandRegistry {
    global: CommandLayer,
    local: CommandLayer,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the global layer
    pub fn register_global_commands(&mut self, commands: Vec<CommandRef>) {
        self.global.register(commands);
    }

    /// Replace the local layer wholesale
    pub fn register_local_commands(&mut self, commands: Vec<CommandRef>) {
        self.local.register(commands);
    }

    pub fn global_commands(&self) -> &[CommandRef] {
        &self.global.commands
    }

    pub fn local_commands(&self) -> &[CommandRef] {
        &self.local.commands
    }

    /// Resolve a single token to a command
    pub fn get_command(&self, token: &str) -> Option<CommandRef> {
        let token = token.to_lowercase();
        if token.is_empty() {
            return None;
        }
        self.local
            .exact(&token)
            .or_else(|| self.global.exact(&token))
            .or_else(|| self.local.by_prefix(&token))
            .or_else(|| self.global.by_prefix(&token))
    }

    /// Split a line into a command and its arguments
    ///
    /// Returns `None` when the first word does not resolve, in which case the
    /// whole line belongs to the current state.
    pub fn parse_input(&self, input: &str) -> Option<(CommandRef, Vec<String>)> {
        let mut words = input.split_whitespace();
        let first = words.next()?.to_lowercase();
        let cmd = self.get_command(&first)?;
        let mut args = Vec::with_capacity(4);
        args.push(first);
        args.extend(words.map(str::to_string));
        Some((cmd, args))
    }
}
