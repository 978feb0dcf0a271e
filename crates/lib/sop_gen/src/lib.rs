//! Generator for the unrolled sum-of-products kernel of `sum_of_products.zig`.
//!
//! For every arity `k` in `2..=64` a `switch` arm of `k` nested loops is
//! emitted; the arms are spliced between two marker lines of the target file.

pub mod codegen;
pub mod error;
pub mod eval;
pub mod formatter;
pub mod ir;
pub mod splice;

pub use codegen::{generate, generate_body, generate_module};
pub use error::{Error, Result};
pub use formatter::Formatter;
pub use ir::{Arity, LoopNest, MAX_ARITY, MIN_ARITY};
pub use splice::{Document, Markers, SpliceOutcome};
