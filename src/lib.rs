//! Generates AST node declarations plus a visitor interface from compact
//! grammar tables (`"Binary : Expr left, Token oprtr, Expr right"`).
pub mod cli;
pub mod emit;
pub mod error;
pub mod grammar;
pub mod output;
pub mod spec;

pub use error::{OutputError, SpecError};
pub use grammar::GrammarTable;
pub use spec::{parse_spec, FieldSpec, TypeSpec};
