//! Filesystem built-ins: `cd`, `pwd`, `ls`, `mkdir`, `touch`, `cat`,
//! `edit`, `rm`.

use crate::command::{
    ArgSpec, CommandContext, CommandSpec, FlagSpec, HandlerError, Value, ValueKind,
};
use crate::fs::{Filesystem, NodeId, TokenPath};
use crate::report::{Reporter, Severity};
use crate::session::Privilege;

fn path_arg(description: &'static str) -> ArgSpec {
    ArgSpec {
        name: "path",
        description,
        kind: ValueKind::Str,
        default: None,
        required: true,
    }
}

pub fn cd() -> CommandSpec {
    CommandSpec {
        name: "cd",
        description: "Change directory",
        args: vec![ArgSpec {
            name: "path",
            description: "The path to change to",
            kind: ValueKind::Str,
            default: Some(Value::Str(".".into())),
            required: true,
        }],
        flags: Vec::new(),
        privilege: Privilege::User,
        handler: cd_handler,
    }
}

fn cd_handler(ctx: &mut CommandContext<'_>) -> Result<(), HandlerError> {
    let raw = ctx.arg_text(0, ".");
    match ctx.fs.resolve_dir(ctx.cwd, &TokenPath::parse(&raw)) {
        Ok(directory) => ctx.session.set_cwd(directory),
        Err(_) => ctx.report(
            Severity::Error,
            &format!("Directory \"{raw}\" not found"),
        ),
    }
    Ok(())
}

pub fn pwd() -> CommandSpec {
    CommandSpec {
        name: "pwd",
        description: "Print working directory",
        args: Vec::new(),
        flags: Vec::new(),
        privilege: Privilege::User,
        handler: pwd_handler,
    }
}

fn pwd_handler(ctx: &mut CommandContext<'_>) -> Result<(), HandlerError> {
    let path = ctx.fs.path_of(ctx.cwd);
    ctx.report(Severity::Plain, &path);
    Ok(())
}

pub fn ls() -> CommandSpec {
    CommandSpec {
        name: "ls",
        description: "List directory contents",
        args: vec![ArgSpec {
            name: "directory",
            description: "The directory to list",
            kind: ValueKind::Str,
            default: Some(Value::Str(".".into())),
            required: false,
        }],
        flags: vec![FlagSpec {
            names: &["recursive", "recurse", "R", "r"],
            description: "List subdirectories recursively",
            kind: ValueKind::Bool,
            default: Value::Bool(false),
        }],
        privilege: Privilege::User,
        handler: ls_handler,
    }
}

fn ls_handler(ctx: &mut CommandContext<'_>) -> Result<(), HandlerError> {
    let raw = ctx.arg_text(0, ".");
    let recurse = ctx.flag_truthy("recursive");
    let Ok(directory) = ctx.fs.resolve_dir(ctx.cwd, &TokenPath::parse(&raw)) else {
        ctx.report(Severity::Error, &format!("Directory \"{raw}\" not found"));
        return Ok(());
    };
    list_contents(ctx.fs, ctx.reporter, directory, recurse, 0);
    Ok(())
}

/// One line per entry, in insertion order; recursion indents children with
/// a branch marker.
fn list_contents(
    fs: &Filesystem,
    reporter: &dyn Reporter,
    directory: NodeId,
    recurse: bool,
    depth: usize,
) {
    for &child in fs.children(directory) {
        let mut line = "  ".repeat(depth);
        if depth > 0 {
            line.push_str("└─ ");
        }
        line.push_str(fs.name_of(child));
        reporter.report(Severity::Plain, &line);

        if recurse && fs.is_dir(child) {
            list_contents(fs, reporter, child, recurse, depth + 1);
        }
    }
}

pub fn mkdir() -> CommandSpec {
    CommandSpec {
        name: "mkdir",
        description: "Create a directory",
        args: vec![path_arg("The path of the directory to create")],
        flags: Vec::new(),
        privilege: Privilege::User,
        handler: mkdir_handler,
    }
}

fn mkdir_handler(ctx: &mut CommandContext<'_>) -> Result<(), HandlerError> {
    let raw = ctx.arg_text(0, "");
    ctx.fs.make_directory(ctx.cwd, &TokenPath::parse(&raw))?;
    Ok(())
}

pub fn touch() -> CommandSpec {
    CommandSpec {
        name: "touch",
        description: "Create an empty file",
        args: vec![path_arg("The path of the file to create")],
        flags: Vec::new(),
        privilege: Privilege::User,
        handler: touch_handler,
    }
}

fn touch_handler(ctx: &mut CommandContext<'_>) -> Result<(), HandlerError> {
    let raw = ctx.arg_text(0, "");
    let path = TokenPath::parse(&raw);
    let Some(name) = path.last_name().map(str::to_owned) else {
        ctx.report(
            Severity::Error,
            &format!("Path \"{raw}\" does not name a file"),
        );
        return Ok(());
    };
    ctx.fs.add_file(ctx.cwd, &path.parent(), &name, "")?;
    Ok(())
}

pub fn cat() -> CommandSpec {
    CommandSpec {
        name: "cat",
        description: "Print the contents of a file",
        args: vec![path_arg("The path of the file to read")],
        flags: Vec::new(),
        privilege: Privilege::User,
        handler: cat_handler,
    }
}

fn cat_handler(ctx: &mut CommandContext<'_>) -> Result<(), HandlerError> {
    let raw = ctx.arg_text(0, "");
    let path = TokenPath::parse(&raw);
    match ctx.fs.resolve_file(ctx.cwd, &path) {
        Ok(file) => {
            let content = ctx.fs.file(file).map(|f| f.content.clone()).unwrap_or_default();
            ctx.report(Severity::Plain, &content);
        }
        Err(_) => {
            let name = path.last_name().unwrap_or(&raw);
            ctx.report(Severity::Error, &format!("File \"{name}\" not found"));
        }
    }
    Ok(())
}

pub fn edit() -> CommandSpec {
    CommandSpec {
        name: "edit",
        description: "Replace the contents of a file",
        args: vec![
            path_arg("The path of the file to edit"),
            ArgSpec {
                name: "content",
                description: "The new content",
                kind: ValueKind::Str,
                default: Some(Value::Str(String::new())),
                required: false,
            },
        ],
        flags: Vec::new(),
        privilege: Privilege::User,
        handler: edit_handler,
    }
}

fn edit_handler(ctx: &mut CommandContext<'_>) -> Result<(), HandlerError> {
    let raw = ctx.arg_text(0, "");
    let content = ctx.arg_text(1, "");
    let path = TokenPath::parse(&raw);
    match ctx.fs.resolve_file(ctx.cwd, &path) {
        Ok(file) => {
            ctx.fs.write_file(file, &content)?;
        }
        Err(_) => {
            let name = path.last_name().unwrap_or(&raw);
            ctx.report(Severity::Error, &format!("File \"{name}\" not found"));
        }
    }
    Ok(())
}

pub fn rm() -> CommandSpec {
    CommandSpec {
        name: "rm",
        description: "Remove a file or directory",
        args: vec![path_arg("The path of the file or directory to remove")],
        flags: vec![
            FlagSpec {
                names: &["recursive", "recurse", "r", "R"],
                description: "Recursively remove the file or directory",
                kind: ValueKind::Bool,
                default: Value::Bool(false),
            },
            FlagSpec {
                names: &["force", "f"],
                description: "Force the removal of the file or directory",
                kind: ValueKind::Bool,
                default: Value::Bool(false),
            },
            FlagSpec {
                names: &["rf"],
                description: "Recursively and forcefully remove the file or directory",
                kind: ValueKind::Bool,
                default: Value::Bool(false),
            },
        ],
        privilege: Privilege::User,
        handler: rm_handler,
    }
}

fn rm_handler(ctx: &mut CommandContext<'_>) -> Result<(), HandlerError> {
    // TODO: wire up --recursive and --force; removal currently detaches the
    // target whole and never cascades into children.
    let _recursive = ctx.flag_truthy("recursive") || ctx.flag_truthy("rf");
    let _force = ctx.flag_truthy("force") || ctx.flag_truthy("rf");

    let raw = ctx.arg_text(0, "");
    let path = TokenPath::parse(&raw);
    if ctx.fs.resolve_parent(ctx.cwd, &path).is_err() {
        ctx.report(Severity::Error, &format!("Directory \"{raw}\" not found"));
        return Ok(());
    }
    // A file shadows a directory of the same name, matching lookup order.
    if ctx.fs.remove_file(ctx.cwd, &path).is_ok() {
        return Ok(());
    }
    // Neither a file nor a directory: a silent no-op.
    let _ = ctx.fs.remove_directory(ctx.cwd, &path);
    Ok(())
}
