//! Command registry — a flat collection of descriptors keyed by name.

use crate::command::spec::CommandSpec;

/// Holds the registered command set. Duplicate names are tolerated; lookup
/// returns the first registration, so later duplicates are shadowed rather
/// than rejected.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, spec: CommandSpec) {
        self.commands.push(spec);
    }

    /// First registered command with this name, if any.
    pub fn lookup(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|spec| spec.name == name)
    }

    /// All registered commands, in registration order.
    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }
}
