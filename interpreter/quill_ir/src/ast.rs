//! AST for Quill.
//!
//! A strict tree: every node owns its children through `Box`/`Vec`,
//! nothing is shared. `Display` renders the canonical fully-parenthesized
//! form, which is what the parser tests assert against.

use std::fmt;

/// A parsed program: the ordered list of top-level statements.
///
/// The parser always produces one, even for input riddled with errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new() -> Self {
        Program {
            statements: Vec::new(),
        }
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

/// Statements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    /// `let <name> = <value>;`
    Let { name: String, value: Expr },
    /// `return <value>;`
    Return { value: Expr },
    /// A bare expression in statement position.
    Expr { expr: Expr },
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let { name, value } => write!(f, "let {name} = {value};"),
            Stmt::Return { value } => write!(f, "return {value};"),
            Stmt::Expr { expr } => write!(f, "{expr}"),
        }
    }
}

/// A brace-delimited statement list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

/// Unary operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `!x`
    Not,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Gt,
    Eq,
    NotEq,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expressions.
///
/// `Illegal` is the recovery sentinel: it stands in for a sub-expression
/// the parser could not make sense of, letting the rest of the program
/// parse normally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Ident(String),
    Int(i64),
    Bool(bool),
    Str(String),
    Prefix {
        op: UnaryOp,
        right: Box<Expr>,
    },
    Infix {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    If {
        condition: Box<Expr>,
        consequence: Block,
        alternative: Option<Block>,
    },
    /// A function literal. Both `fn(x) { ... }` and `(x) => { ... }`
    /// produce this node; the surface syntax is not recorded.
    Function {
        parameters: Vec<String>,
        body: Block,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
    Illegal,
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(name) => f.write_str(name),
            Expr::Int(value) => write!(f, "{value}"),
            Expr::Bool(value) => write!(f, "{value}"),
            Expr::Str(value) => f.write_str(value),
            Expr::Prefix { op, right } => write!(f, "({op}{right})"),
            Expr::Infix { op, left, right } => write!(f, "({left} {op} {right})"),
            Expr::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if {condition} {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {alternative}")?;
                }
                Ok(())
            }
            Expr::Function { parameters, body } => {
                // Braces form, re-parsable. The runtime value inspect
                // form renders functions identically.
                write!(f, "fn({}) {{ {body} }}", parameters.join(", "))
            }
            Expr::Call { callee, arguments } => {
                let args: Vec<String> = arguments.iter().map(ToString::to_string).collect();
                write!(f, "{callee}({})", args.join(", "))
            }
            Expr::Illegal => f.write_str("<illegal>"),
        }
    }
}
