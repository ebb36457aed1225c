//! Shell built-ins: `help`, `history`, `clear`, `exit`.

use crate::command::{
    ArgSpec, CommandContext, CommandSpec, FlagSpec, HandlerError, Value, ValueKind,
};
use crate::report::Severity;
use crate::session::Privilege;

pub fn help() -> CommandSpec {
    CommandSpec {
        name: "help",
        description: "Show help for a command",
        args: vec![ArgSpec {
            name: "command",
            description: "The command to show help for",
            kind: ValueKind::Str,
            default: Some(Value::Str(String::new())),
            required: false,
        }],
        flags: vec![FlagSpec {
            names: &["all", "A", "a"],
            description: "Show help for all commands",
            kind: ValueKind::Bool,
            default: Value::Bool(false),
        }],
        privilege: Privilege::User,
        handler: help_handler,
    }
}

fn help_handler(ctx: &mut CommandContext<'_>) -> Result<(), HandlerError> {
    if ctx.flag_truthy("all") {
        for spec in ctx.registry.commands() {
            ctx.report(Severity::Info, &spec.help_text());
        }
        return Ok(());
    }

    let name = ctx.arg_text(0, "");
    if !name.is_empty() {
        match ctx.registry.lookup(&name) {
            Some(spec) => ctx.report(Severity::Info, &spec.help_text()),
            None => ctx.report(Severity::Error, &format!("Command not found: {name}")),
        }
        return Ok(());
    }

    ctx.report(
        Severity::Info,
        "nebsh is a simulated computer shell. Type 'help -a' to see a list of commands.",
    );
    Ok(())
}

pub fn history() -> CommandSpec {
    CommandSpec {
        name: "history",
        description: "Show the command history",
        args: Vec::new(),
        flags: vec![FlagSpec {
            names: &["clear", "c", "C"],
            description: "Clear the history without showing it",
            kind: ValueKind::Bool,
            default: Value::Bool(false),
        }],
        privilege: Privilege::User,
        handler: history_handler,
    }
}

fn history_handler(ctx: &mut CommandContext<'_>) -> Result<(), HandlerError> {
    if ctx.flag_truthy("clear") {
        ctx.session.clear_history();
        ctx.report(Severity::Plain, "History cleared");
        return Ok(());
    }

    let lines: Vec<String> = ctx
        .session
        .history()
        .iter()
        .enumerate()
        .map(|(index, line)| format!("{} {line}", index + 1))
        .collect();
    for line in lines {
        ctx.report(Severity::Plain, &line);
    }
    Ok(())
}

pub fn clear() -> CommandSpec {
    CommandSpec {
        name: "clear",
        description: "Clear the console",
        args: Vec::new(),
        flags: Vec::new(),
        privilege: Privilege::User,
        handler: clear_handler,
    }
}

/// The core never touches a screen; the front end decides what clearing
/// means for its medium.
fn clear_handler(ctx: &mut CommandContext<'_>) -> Result<(), HandlerError> {
    ctx.report(Severity::Control, "clear-screen");
    Ok(())
}

pub fn exit() -> CommandSpec {
    CommandSpec {
        name: "exit",
        description: "Exit the shell",
        args: Vec::new(),
        flags: Vec::new(),
        privilege: Privilege::User,
        handler: exit_handler,
    }
}

fn exit_handler(ctx: &mut CommandContext<'_>) -> Result<(), HandlerError> {
    ctx.session.request_exit();
    Ok(())
}
