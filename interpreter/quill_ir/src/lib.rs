//! Shared IR for the Quill interpreter.
//!
//! Home of the types every pipeline stage agrees on: source spans,
//! tokens, and the AST the parser produces and the evaluator walks.

mod ast;
mod span;
mod token;

pub use ast::{BinaryOp, Block, Expr, Program, Stmt, UnaryOp};
pub use span::Span;
pub use token::{Token, TokenKind};
