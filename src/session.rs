//! Session state: users, privileges, working directory, and history.

use std::fmt;

use crate::fs::NodeId;

/// Privilege scale. "Sufficient" always means current >= required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Privilege {
    User = 0,
    Admin = 1,
    Root = 2,
}

impl Privilege {
    pub const ALL: [Privilege; 3] = [Privilege::User, Privilege::Admin, Privilege::Root];

    pub fn name(self) -> &'static str {
        match self {
            Privilege::User => "User",
            Privilege::Admin => "Admin",
            Privilege::Root => "Root",
        }
    }

    /// Parse a privilege by its display name.
    pub fn parse(name: &str) -> Option<Self> {
        Privilege::ALL.into_iter().find(|level| level.name() == name)
    }

    /// True when this level satisfies `required`.
    pub fn satisfies(self, required: Privilege) -> bool {
        self >= required
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A registered user of the simulated computer.
#[derive(Debug, Clone)]
pub struct User {
    pub name: String,
    pub privilege: Privilege,
}

impl User {
    pub fn new(name: impl Into<String>, privilege: Privilege) -> Self {
        User {
            name: name.into(),
            privilege,
        }
    }
}

/// Mutable per-console state driving dispatch: the working directory, the
/// user roster, the active user, and the append-only command history.
#[derive(Debug)]
pub struct Session {
    cwd: NodeId,
    users: Vec<User>,
    current: usize,
    history: Vec<String>,
    exit_requested: bool,
}

impl Session {
    /// A session rooted at `cwd` with a single initial user, who starts
    /// active.
    pub fn new(cwd: NodeId, initial_user: User) -> Self {
        Session {
            cwd,
            users: vec![initial_user],
            current: 0,
            history: Vec::new(),
            exit_requested: false,
        }
    }

    pub fn cwd(&self) -> NodeId {
        self.cwd
    }

    pub fn set_cwd(&mut self, cwd: NodeId) {
        self.cwd = cwd;
    }

    pub fn current_user(&self) -> &User {
        &self.users[self.current]
    }

    /// The active user's privilege level.
    pub fn privilege(&self) -> Privilege {
        self.current_user().privilege
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find_user(&self, name: &str) -> Option<&User> {
        self.users.iter().find(|user| user.name == name)
    }

    pub fn add_user(&mut self, user: User) {
        self.users.push(user);
    }

    /// Make the named user active. Returns false if no such user exists.
    pub fn switch_user(&mut self, name: &str) -> bool {
        match self.users.iter().position(|user| user.name == name) {
            Some(index) => {
                self.current = index;
                true
            }
            None => false,
        }
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn push_history(&mut self, line: &str) {
        self.history.push(line.to_owned());
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Ask the host loop to terminate after the current command.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}
