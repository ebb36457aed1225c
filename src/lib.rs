//! nebsh — a simulated single-user computer.
//!
//! An in-memory hierarchical filesystem plus a command-line interpreter:
//! registered operations inspect and mutate the tree under a small privilege
//! model. The library is front-end agnostic; all output flows through an
//! injected [`report::Reporter`], and the [`computer::Computer`] type is the
//! orchestration point hosts drive one line at a time.
//!
//! ```
//! use nebsh::computer::Computer;
//! use nebsh::report::MemoryReporter;
//!
//! let mut computer = Computer::with_defaults();
//! let reporter = MemoryReporter::new();
//! computer.run_line("mkdir /projects", &reporter);
//! computer.run_line("ls", &reporter);
//! assert_eq!(reporter.messages(), ["projects"]);
//! ```

pub mod builtins;
pub mod command;
pub mod computer;
pub mod config;
pub mod fs;
pub mod report;
pub mod session;
