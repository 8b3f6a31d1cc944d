//! Output Module
//!
//! Precedence bookkeeping and literal/comment emission for generated source.

pub mod emitter;
pub mod precedence;

pub use emitter::{format_comment, quote, CommentStyle};
pub use precedence::{needs_parens, Order};
