//! The computer: filesystem, registry, and session wired together.

use tracing::debug;

use crate::builtins::default_registry;
use crate::command::{dispatch, CommandRegistry, DispatchOutcome};
use crate::fs::Filesystem;
use crate::report::Reporter;
use crate::session::{Privilege, Session, User};

/// A complete simulated computer. Hosts drive it one line at a time; all
/// output flows through the reporter passed to [`Computer::run_line`].
#[derive(Debug)]
pub struct Computer {
    fs: Filesystem,
    registry: CommandRegistry,
    session: Session,
}

impl Computer {
    /// A computer with the given command set, a fresh tree, and `user`
    /// active at the root directory.
    pub fn new(registry: CommandRegistry, user: User) -> Self {
        let fs = Filesystem::new();
        let session = Session::new(fs.root(), user);
        Computer {
            fs,
            registry,
            session,
        }
    }

    /// A computer with every built-in registered and the stock root user.
    pub fn with_defaults() -> Self {
        Computer::new(
            default_registry(),
            User::new("root", Privilege::Admin),
        )
    }

    /// Run one raw command line. The line lands in history only when
    /// dispatch reached a handler; a rejected or empty line leaves the
    /// session untouched.
    pub fn run_line(&mut self, line: &str, reporter: &dyn Reporter) {
        if line.is_empty() {
            return;
        }
        let outcome = dispatch(
            line,
            &self.registry,
            &mut self.fs,
            &mut self.session,
            reporter,
        );
        if outcome == DispatchOutcome::Completed {
            self.session.push_history(line);
        }
    }

    /// The REPL prompt, uncolored: `nebsh user:path$ `.
    pub fn prompt(&self) -> String {
        format!(
            "nebsh {}:{}$ ",
            self.session.current_user().name,
            self.fs.path_of(self.session.cwd())
        )
    }

    /// Discard the tree and history, keeping users and the registry. The
    /// working directory moves to the fresh root.
    pub fn reset(&mut self) {
        debug!("resetting computer state");
        self.fs = Filesystem::new();
        self.session.set_cwd(self.fs.root());
        self.session.clear_history();
    }

    pub fn fs(&self) -> &Filesystem {
        &self.fs
    }

    pub fn fs_mut(&mut self) -> &mut Filesystem {
        &mut self.fs
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }
}

impl Default for Computer {
    fn default() -> Self {
        Computer::with_defaults()
    }
}
