//! User built-ins: `whoami`, `listusers`, `useradd`, `su`.

use crate::command::{ArgSpec, CommandContext, CommandSpec, HandlerError, Value, ValueKind};
use crate::report::Severity;
use crate::session::{Privilege, User};

pub fn whoami() -> CommandSpec {
    CommandSpec {
        name: "whoami",
        description: "Print the current user",
        args: Vec::new(),
        flags: Vec::new(),
        privilege: Privilege::User,
        handler: whoami_handler,
    }
}

fn whoami_handler(ctx: &mut CommandContext<'_>) -> Result<(), HandlerError> {
    let name = ctx.session.current_user().name.clone();
    ctx.report(Severity::Plain, &name);
    Ok(())
}

pub fn listusers() -> CommandSpec {
    CommandSpec {
        name: "listusers",
        description: "List all users",
        args: Vec::new(),
        flags: Vec::new(),
        privilege: Privilege::User,
        handler: listusers_handler,
    }
}

fn listusers_handler(ctx: &mut CommandContext<'_>) -> Result<(), HandlerError> {
    let names: Vec<String> = ctx
        .session
        .users()
        .iter()
        .map(|user| user.name.clone())
        .collect();
    for name in names {
        ctx.report(Severity::Plain, &name);
    }
    Ok(())
}

pub fn useradd() -> CommandSpec {
    CommandSpec {
        name: "useradd",
        description: "Add a user to the system",
        args: vec![
            ArgSpec {
                name: "name",
                description: "The name of the user",
                kind: ValueKind::Str,
                default: None,
                required: true,
            },
            ArgSpec {
                name: "privileges",
                description: "The privileges of the user (User, Admin, Root)",
                kind: ValueKind::Str,
                default: Some(Value::Str("User".into())),
                required: false,
            },
        ],
        flags: Vec::new(),
        privilege: Privilege::User,
        handler: useradd_handler,
    }
}

fn useradd_handler(ctx: &mut CommandContext<'_>) -> Result<(), HandlerError> {
    let name = ctx.arg_text(0, "");
    let privilege_name = ctx.arg_text(1, "User");

    if ctx.session.find_user(&name).is_some() {
        ctx.report(Severity::Error, &format!("User \"{name}\" already exists"));
        return Ok(());
    }

    let Some(privilege) = Privilege::parse(&privilege_name) else {
        ctx.report(
            Severity::Error,
            &format!("Invalid privileges \"{privilege_name}\""),
        );
        let valid: Vec<&str> = Privilege::ALL.iter().map(|level| level.name()).collect();
        ctx.report(
            Severity::Error,
            &format!("Valid privileges are: {}", valid.join(", ")),
        );
        return Ok(());
    };

    // Nobody may mint a user above their own level.
    if !ctx.privilege.satisfies(privilege) {
        ctx.report(
            Severity::Error,
            &format!("Insufficient privileges to add user with privileges \"{privilege_name}\""),
        );
        return Ok(());
    }

    ctx.session.add_user(User::new(name, privilege));
    Ok(())
}

pub fn su() -> CommandSpec {
    CommandSpec {
        name: "su",
        description: "Switch user",
        args: vec![ArgSpec {
            name: "user",
            description: "The user to switch to",
            kind: ValueKind::Str,
            default: Some(Value::Str("root".into())),
            required: false,
        }],
        flags: Vec::new(),
        privilege: Privilege::User,
        handler: su_handler,
    }
}

fn su_handler(ctx: &mut CommandContext<'_>) -> Result<(), HandlerError> {
    let name = ctx.arg_text(0, "root");
    if !ctx.session.switch_user(&name) {
        ctx.report(Severity::Error, &format!("User \"{name}\" not found"));
    }
    Ok(())
}
