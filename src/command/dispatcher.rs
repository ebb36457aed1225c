//! Dispatch pipeline — raw command line → bound options → handler.
//!
//! ```text
//! raw line → tokenize → lookup → classify → bind flags/args → gate → invoke
//! ```
//!
//! Dispatch fails soft: every failure is reported through the sink and the
//! session stays usable. The caller learns only whether the handler was
//! reached, which drives history bookkeeping.

use std::collections::HashMap;

use tracing::debug;

use crate::command::registry::CommandRegistry;
use crate::command::spec::{CommandContext, CommandSpec, Value};
use crate::command::tokenizer::{classify, coerce, coerce_as, tokenize, Token};
use crate::fs::Filesystem;
use crate::report::{Reporter, Severity};
use crate::session::Session;

/// How far a dispatch attempt got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The line held no tokens; nothing happened.
    Empty,
    /// Dispatch aborted before the handler ran (unknown command, binding
    /// failure, insufficient privilege).
    Rejected,
    /// The handler was invoked. It may still have reported its own errors.
    Completed,
}

/// Run one command line against the registry.
pub fn dispatch(
    line: &str,
    registry: &CommandRegistry,
    fs: &mut Filesystem,
    session: &mut Session,
    reporter: &dyn Reporter,
) -> DispatchOutcome {
    let tokens = tokenize(line);
    let Some((name, rest)) = tokens.split_first() else {
        return DispatchOutcome::Empty;
    };

    let Some(spec) = registry.lookup(name) else {
        reporter.report(Severity::Error, &format!("Command \"{name}\" not found"));
        return DispatchOutcome::Rejected;
    };
    debug!(command = %spec.name, tokens = rest.len(), "dispatching");

    // Classify the remaining tokens, keeping raw text so binding can coerce
    // against each spec's declared kind.
    let mut positional: Vec<String> = Vec::new();
    let mut given_flags: Vec<(String, Option<String>)> = Vec::new();
    for token in rest {
        match classify(token) {
            Token::Flag { name, value } => given_flags.push((name, value)),
            Token::Positional(raw) => positional.push(raw),
        }
    }

    let flags = bind_flags(spec, &given_flags, reporter);
    let Some(args) = bind_args(spec, &positional, reporter) else {
        return DispatchOutcome::Rejected;
    };

    if !session.privilege().satisfies(spec.privilege) {
        reporter.report(
            Severity::Error,
            &format!("Insufficient privileges to run command \"{}\"", spec.name),
        );
        return DispatchOutcome::Rejected;
    }

    let handler = spec.handler;
    let mut context = CommandContext {
        args,
        flags,
        cwd: session.cwd(),
        privilege: session.privilege(),
        fs,
        session,
        registry,
        reporter,
    };
    if let Err(error) = handler(&mut context) {
        reporter.report(Severity::Error, &error.to_string());
    }
    DispatchOutcome::Completed
}

/// Fold given flags into primary-name slots, apply declared defaults.
///
/// A flag token with no value segment, or an explicitly empty one
/// (`--name=`), means boolean true. When several tokens target the same
/// primary through any alias, the last one wins. Given flags matching no
/// spec are dropped.
fn bind_flags(
    spec: &CommandSpec,
    given: &[(String, Option<String>)],
    reporter: &dyn Reporter,
) -> HashMap<&'static str, Value> {
    let mut flags = HashMap::with_capacity(spec.flags.len());
    for flag_spec in &spec.flags {
        let mut bound = flag_spec.default.clone();
        for (name, raw) in given {
            if flag_spec.matches(name) {
                bound = match raw.as_deref() {
                    None | Some("") => Value::Bool(true),
                    Some(raw) => {
                        warn_on_quotes(raw, reporter);
                        coerce_as(flag_spec.kind, raw)
                    }
                };
            }
        }
        flags.insert(flag_spec.primary(), bound);
    }
    flags
}

/// Bind positional tokens to argument specs in order, applying defaults.
/// Returns `None` when a required argument is missing, which aborts
/// dispatch before the handler is reached.
fn bind_args(spec: &CommandSpec, positional: &[String], reporter: &dyn Reporter) -> Option<Vec<Value>> {
    let mut args = Vec::with_capacity(positional.len().max(spec.args.len()));
    for (index, arg_spec) in spec.args.iter().enumerate() {
        match positional.get(index) {
            Some(raw) => {
                warn_on_quotes(raw, reporter);
                args.push(coerce_as(arg_spec.kind, raw));
            }
            None => match &arg_spec.default {
                Some(default) => args.push(default.clone()),
                None if arg_spec.required => {
                    reporter.report(
                        Severity::Error,
                        &format!("Argument \"{}\" is required", arg_spec.name),
                    );
                    return None;
                }
                // An optional argument with no default ends positional
                // binding; later specs cannot be addressed positionally.
                None => break,
            },
        }
    }
    // Surplus tokens beyond the declared specs are passed through with
    // generic coercion.
    for raw in positional.iter().skip(spec.args.len()) {
        warn_on_quotes(raw, reporter);
        args.push(coerce(raw));
    }
    Some(args)
}

/// Quote characters inside a bound value mean the user tried to nest
/// quoting, which the grammar does not support.
fn warn_on_quotes(raw: &str, reporter: &dyn Reporter) {
    if raw.contains(['"', '\'']) {
        reporter.report(
            Severity::Warn,
            &format!("Quotes are not supported inside values: {raw}"),
        );
    }
}
