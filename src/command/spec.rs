//! Command descriptors — the static metadata binding a name to a handler.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::command::registry::CommandRegistry;
use crate::fs::{Filesystem, FsError, NodeId};
use crate::report::{Reporter, Severity};
use crate::session::{Privilege, Session};

/// Primitive type tag for argument and flag values.
///
/// Declared explicitly on every spec; the dispatcher coerces raw tokens
/// against the declared kind exactly once, during binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Str,
    Num,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Bool => "boolean",
            ValueKind::Str => "string",
            ValueKind::Num => "number",
        }
    }
}

/// A coerced command-line value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Num(f64),
    Str(String),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Loose boolean view used by flag handlers: `false`, zero, and the
    /// empty string are false; everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Num(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            // Whole numbers print without a trailing ".0" so paths and
            // counts read naturally.
            Value::Num(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{}", *n as i64),
            Value::Num(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

/// Specification of one positional argument.
#[derive(Debug, Clone)]
pub struct ArgSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ValueKind,
    /// Bound when the argument is not supplied. A required argument with no
    /// default aborts dispatch when omitted.
    pub default: Option<Value>,
    pub required: bool,
}

/// Specification of one flag. The first name is the primary; the rest are
/// aliases folded into it.
#[derive(Debug, Clone)]
pub struct FlagSpec {
    pub names: &'static [&'static str],
    pub description: &'static str,
    pub kind: ValueKind,
    pub default: Value,
}

impl FlagSpec {
    pub fn primary(&self) -> &'static str {
        self.names.first().copied().unwrap_or_default()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.names.contains(&name)
    }
}

/// Failure signalled by a command handler. Reported at the dispatch
/// boundary, never propagated past it.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("{0}")]
    Message(String),
}

/// The options record a handler receives — the only contract built-in
/// operations may rely on.
pub struct CommandContext<'a> {
    /// Positional arguments, typed, defaults applied.
    pub args: Vec<Value>,
    /// Flags keyed by primary name, typed, defaults applied.
    pub flags: HashMap<&'static str, Value>,
    /// The session's working directory at dispatch time.
    pub cwd: NodeId,
    /// The active privilege at dispatch time.
    pub privilege: Privilege,
    pub fs: &'a mut Filesystem,
    pub session: &'a mut Session,
    pub registry: &'a CommandRegistry,
    pub reporter: &'a dyn Reporter,
}

impl CommandContext<'_> {
    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    /// The argument rendered as text, or the given fallback when absent.
    pub fn arg_text(&self, index: usize, fallback: &str) -> String {
        match self.args.get(index) {
            Some(value) => value.to_string(),
            None => fallback.to_owned(),
        }
    }

    pub fn flag(&self, primary: &str) -> Option<&Value> {
        self.flags.get(primary)
    }

    /// Loose boolean view of a flag, false when the flag is unknown.
    pub fn flag_truthy(&self, primary: &str) -> bool {
        self.flags.get(primary).is_some_and(Value::is_truthy)
    }

    /// Shorthand for the injected reporting sink.
    pub fn report(&self, severity: Severity, message: &str) {
        self.reporter.report(severity, message);
    }
}

/// Handler function invoked with the bound options record.
pub type Handler = fn(&mut CommandContext<'_>) -> Result<(), HandlerError>;

/// Static metadata for one operation.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// Positional argument specs, in binding order.
    pub args: Vec<ArgSpec>,
    pub flags: Vec<FlagSpec>,
    /// Minimum privilege required to dispatch this command.
    pub privilege: Privilege,
    pub handler: Handler,
}

impl CommandSpec {
    /// Multi-line help text derived from the descriptor.
    pub fn help_text(&self) -> String {
        let mut text = format!("{}: {}", self.name, self.description);
        if !self.args.is_empty() {
            let usage: Vec<String> = self
                .args
                .iter()
                .map(|arg| {
                    if arg.required {
                        format!("<{}>", arg.name)
                    } else {
                        format!("[{}]", arg.name)
                    }
                })
                .collect();
            text.push_str(&format!("\n  usage: {} {}", self.name, usage.join(" ")));
            for arg in &self.args {
                text.push_str(&format!(
                    "\n    {} ({}): {}",
                    arg.name,
                    arg.kind.name(),
                    arg.description
                ));
                if let Some(default) = &arg.default {
                    text.push_str(&format!(" (default: {default})"));
                }
            }
        }
        if !self.flags.is_empty() {
            text.push_str("\n  flags:");
            for flag in &self.flags {
                text.push_str(&format!(
                    "\n    --{} ({}): {}",
                    flag.primary(),
                    flag.kind.name(),
                    flag.description
                ));
                if flag.names.len() > 1 {
                    let aliases: Vec<String> = flag.names[1..]
                        .iter()
                        .map(|alias| format!("--{alias}"))
                        .collect();
                    text.push_str(&format!(" (aliases: {})", aliases.join(", ")));
                }
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_display() {
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Num(3.0).to_string(), "3");
        assert_eq!(Value::Num(3.5).to_string(), "3.5");
        assert_eq!(Value::Str("abc".into()).to_string(), "abc");
    }

    #[test]
    fn value_truthiness() {
        assert!(Value::Bool(true).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Num(1.0).is_truthy());
        assert!(!Value::Num(0.0).is_truthy());
        assert!(Value::Str("x".into()).is_truthy());
        assert!(!Value::Str(String::new()).is_truthy());
    }

    #[test]
    fn help_text_lists_usage_and_aliases() {
        fn noop(_: &mut CommandContext<'_>) -> Result<(), HandlerError> {
            Ok(())
        }
        let spec = CommandSpec {
            name: "probe",
            description: "A probe",
            args: vec![ArgSpec {
                name: "target",
                description: "The target",
                kind: ValueKind::Str,
                default: None,
                required: true,
            }],
            flags: vec![FlagSpec {
                names: &["recursive", "r"],
                description: "Recurse",
                kind: ValueKind::Bool,
                default: Value::Bool(false),
            }],
            privilege: Privilege::User,
            handler: noop,
        };
        let help = spec.help_text();
        assert!(help.contains("probe: A probe"));
        assert!(help.contains("usage: probe <target>"));
        assert!(help.contains("--recursive (boolean)"));
        assert!(help.contains("aliases: --r"));
    }
}
