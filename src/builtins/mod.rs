//! The built-in command set.
//!
//! Built-ins reach the filesystem and session only through the handler
//! boundary ([`crate::command::CommandContext`]). The registry is built by
//! an explicit factory so tests and embedders can assemble isolated
//! instances, or start from an empty registry and pick commands one by one.

mod file;
mod shell;
mod user;

use crate::command::CommandRegistry;

/// Build a registry holding every built-in command.
pub fn default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    for spec in [
        file::cd(),
        file::pwd(),
        file::ls(),
        file::mkdir(),
        file::touch(),
        file::cat(),
        file::edit(),
        file::rm(),
        user::whoami(),
        user::listusers(),
        user::useradd(),
        user::su(),
        shell::help(),
        shell::history(),
        shell::clear(),
        shell::exit(),
    ] {
        registry.register(spec);
    }
    registry
}
