//! Command handling: descriptors, registry, tokenizer, and dispatcher.
//!
//! ```text
//! raw line → tokenize → classify → bind → privilege gate → handler
//! ```
//!
//! Each stage is a pure function over the descriptor metadata in
//! [`spec`], so the stages can be unit-tested independently.

mod dispatcher;
mod registry;
pub mod spec;
pub mod tokenizer;

pub use dispatcher::{dispatch, DispatchOutcome};
pub use registry::CommandRegistry;
pub use spec::{
    ArgSpec, CommandContext, CommandSpec, FlagSpec, Handler, HandlerError, Value, ValueKind,
};
