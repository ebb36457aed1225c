//! Integration tests for the dispatch pipeline: tokenizing, binding,
//! privilege gating, and handler invocation through a full `Computer`.

use nebsh::builtins::default_registry;
use nebsh::command::{
    ArgSpec, CommandContext, CommandRegistry, CommandSpec, FlagSpec, HandlerError, Value,
    ValueKind,
};
use nebsh::computer::Computer;
use nebsh::report::{MemoryReporter, Severity};
use nebsh::session::{Privilege, User};

fn computer() -> Computer {
    Computer::with_defaults()
}

fn run_all(computer: &mut Computer, reporter: &MemoryReporter, lines: &[&str]) {
    for line in lines {
        computer.run_line(line, reporter);
    }
}

/// A command that reports its bound recursive flag, used to observe binding
/// without going through a real built-in.
fn probe_registry(privilege: Privilege) -> CommandRegistry {
    fn probe_handler(ctx: &mut CommandContext<'_>) -> Result<(), HandlerError> {
        let recursive = ctx.flag_truthy("recursive");
        let target = ctx.arg_text(0, "<none>");
        ctx.report(
            Severity::Plain,
            &format!("recursive={recursive} target={target}"),
        );
        Ok(())
    }

    let mut registry = CommandRegistry::new();
    registry.register(CommandSpec {
        name: "probe",
        description: "Reports its own bindings",
        args: vec![ArgSpec {
            name: "target",
            description: "Probe target",
            kind: ValueKind::Str,
            default: Some(Value::Str("<none>".into())),
            required: false,
        }],
        flags: vec![FlagSpec {
            names: &["recursive", "recurse", "R", "r"],
            description: "Recurse",
            kind: ValueKind::Bool,
            default: Value::Bool(false),
        }],
        privilege,
        handler: probe_handler,
    });
    registry
}

// =============================================================================
// TOKENIZING AND BINDING
// =============================================================================

#[test]
fn quoted_arguments_keep_embedded_spaces() {
    let mut computer = computer();
    let reporter = MemoryReporter::new();
    run_all(&mut computer, &reporter, &[r#"mkdir "my folder""#, "ls"]);
    assert_eq!(reporter.messages_at(Severity::Plain), ["my folder"]);
}

#[test]
fn extra_whitespace_is_ignored() {
    let mut computer = computer();
    let reporter = MemoryReporter::new();
    run_all(&mut computer, &reporter, &["  mkdir   a  ", "ls"]);
    assert_eq!(reporter.messages_at(Severity::Plain), ["a"]);
}

#[test]
fn numeric_looking_names_stay_names() {
    // The path argument is string-kinded, so "42" binds verbatim.
    let mut computer = computer();
    let reporter = MemoryReporter::new();
    run_all(&mut computer, &reporter, &["mkdir 42", "cd 42", "pwd"]);
    assert_eq!(reporter.messages_at(Severity::Plain), ["/42"]);
}

#[test]
fn flag_aliases_bind_the_primary_name() {
    for alias in ["-r", "--recursive", "--recurse", "-R"] {
        let mut computer = Computer::new(probe_registry(Privilege::User), User::new("u", Privilege::User));
        let reporter = MemoryReporter::new();
        computer.run_line(&format!("probe {alias}"), &reporter);
        assert_eq!(
            reporter.messages(),
            ["recursive=true target=<none>"],
            "alias {alias} must fold into the primary flag"
        );
    }
}

#[test]
fn explicit_empty_flag_value_binds_true() {
    // `--recursive=` carries a value segment with nothing in it; an empty
    // value means the flag is present, same as giving no value at all.
    let mut computer = Computer::new(probe_registry(Privilege::User), User::new("u", Privilege::User));
    let reporter = MemoryReporter::new();
    computer.run_line("probe --recursive=", &reporter);
    assert_eq!(reporter.messages(), ["recursive=true target=<none>"]);
}

#[test]
fn repeated_flags_last_one_wins() {
    let mut computer = Computer::new(probe_registry(Privilege::User), User::new("u", Privilege::User));
    let reporter = MemoryReporter::new();
    computer.run_line("probe --recursive=false -r", &reporter);
    computer.run_line("probe -r --recursive=false", &reporter);
    assert_eq!(
        reporter.messages(),
        [
            "recursive=true target=<none>",
            "recursive=false target=<none>"
        ]
    );
}

#[test]
fn optional_argument_falls_back_to_default() {
    let mut computer = Computer::new(probe_registry(Privilege::User), User::new("u", Privilege::User));
    let reporter = MemoryReporter::new();
    computer.run_line("probe", &reporter);
    computer.run_line("probe thing", &reporter);
    assert_eq!(
        reporter.messages(),
        ["recursive=false target=<none>", "recursive=false target=thing"]
    );
}

// =============================================================================
// REJECTION PATHS
// =============================================================================

#[test]
fn unknown_command_reports_one_error_and_no_history() {
    let mut computer = computer();
    let reporter = MemoryReporter::new();
    computer.run_line("frobnicate", &reporter);

    let errors = reporter.messages_at(Severity::Error);
    assert_eq!(errors, ["Command \"frobnicate\" not found"]);
    assert!(computer.session().history().is_empty());
}

#[test]
fn missing_required_argument_aborts_before_the_handler() {
    let mut computer = computer();
    let reporter = MemoryReporter::new();
    computer.run_line("mkdir", &reporter);

    assert_eq!(
        reporter.messages_at(Severity::Error),
        ["Argument \"path\" is required"]
    );
    // The tree is untouched and nothing landed in history.
    assert!(computer.fs().children(computer.fs().root()).is_empty());
    assert!(computer.session().history().is_empty());
}

#[test]
fn empty_lines_are_ignored() {
    let mut computer = computer();
    let reporter = MemoryReporter::new();
    run_all(&mut computer, &reporter, &["", "   "]);
    assert!(reporter.messages().is_empty());
    assert!(computer.session().history().is_empty());
}

// =============================================================================
// PRIVILEGE GATE
// =============================================================================

#[test]
fn insufficient_privilege_skips_the_handler() {
    let mut computer = Computer::new(
        probe_registry(Privilege::Admin),
        User::new("guest", Privilege::User),
    );
    let reporter = MemoryReporter::new();
    computer.run_line("probe", &reporter);

    assert_eq!(
        reporter.messages_at(Severity::Error),
        ["Insufficient privileges to run command \"probe\""]
    );
    assert!(reporter.messages_at(Severity::Plain).is_empty());
    assert!(computer.session().history().is_empty());
}

#[test]
fn sufficient_privilege_invokes_the_handler() {
    for level in [Privilege::Admin, Privilege::Root] {
        let mut computer =
            Computer::new(probe_registry(Privilege::Admin), User::new("op", level));
        let reporter = MemoryReporter::new();
        computer.run_line("probe", &reporter);
        assert_eq!(
            reporter.messages_at(Severity::Plain),
            ["recursive=false target=<none>"]
        );
    }
}

// =============================================================================
// HISTORY SEMANTICS
// =============================================================================

#[test]
fn completed_commands_land_in_history_even_after_handler_errors() {
    let mut computer = computer();
    let reporter = MemoryReporter::new();
    computer.run_line("cd missing", &reporter);

    assert_eq!(
        reporter.messages_at(Severity::Error),
        ["Directory \"missing\" not found"]
    );
    assert_eq!(computer.session().history(), ["cd missing"]);
}

#[test]
fn history_command_numbers_prior_lines() {
    let mut computer = computer();
    let reporter = MemoryReporter::new();
    run_all(&mut computer, &reporter, &["pwd", "whoami"]);
    reporter.clear();

    computer.run_line("history", &reporter);
    // The history line itself is appended after its own dispatch completes.
    assert_eq!(reporter.messages_at(Severity::Plain), ["1 pwd", "2 whoami"]);
    assert_eq!(computer.session().history(), ["pwd", "whoami", "history"]);
}

#[test]
fn history_clear_flag_empties_the_log() {
    let mut computer = computer();
    let reporter = MemoryReporter::new();
    run_all(&mut computer, &reporter, &["pwd", "history --clear"]);
    // Only the clearing command itself remains.
    assert_eq!(computer.session().history(), ["history --clear"]);
    assert!(reporter
        .messages_at(Severity::Plain)
        .contains(&"History cleared".to_owned()));
}

// =============================================================================
// DEFAULT REGISTRY SHAPE
// =============================================================================

#[test]
fn default_registry_contains_the_builtins() {
    let registry = default_registry();
    for name in [
        "cd", "pwd", "ls", "mkdir", "touch", "cat", "edit", "rm", "whoami", "listusers",
        "useradd", "su", "help", "history", "clear", "exit",
    ] {
        assert!(registry.lookup(name).is_some(), "missing builtin {name}");
    }
}
