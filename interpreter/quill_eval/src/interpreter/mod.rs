//! The tree walker.
//!
//! `eval` walks a [`Program`] against an [`Environment`]. Two values
//! carry control flow: `Value::Error` short-circuits every construct on
//! its way out, and `Value::Return` does the same until a call boundary
//! (or the program itself) unwraps it. Blocks pass both through intact,
//! which is what makes `return` inside nested blocks reach the right
//! frame.

mod operators;

#[cfg(test)]
mod tests;

use crate::{builtins, Environment, Value};
use quill_ir::{Block, Expr, Program, Stmt};

/// An evaluator with a persistent global environment.
///
/// The REPL holds one of these across lines; embedders can use it to
/// keep definitions alive between programs.
pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            env: Environment::new(),
        }
    }

    /// The global environment.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Evaluate a program in the global environment.
    pub fn eval_program(&self, program: &Program) -> Value {
        eval(program, &self.env)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate a program.
///
/// A travelling `return` is unwrapped here: `return 10; 9;` at the top
/// level yields `10`, not a `RETURN_VALUE` wrapper.
pub fn eval(program: &Program, env: &Environment) -> Value {
    let mut result = Value::NULL;
    for stmt in &program.statements {
        result = eval_statement(stmt, env);
        match result {
            Value::Return(value) => return (*value).clone(),
            Value::Error(_) => return result,
            _ => {}
        }
    }
    result
}

fn eval_statement(stmt: &Stmt, env: &Environment) -> Value {
    tracing::trace!(statement = %stmt, "eval_statement");
    match stmt {
        Stmt::Let { name, value } => {
            let value = eval_expression(value, env);
            if value.is_error() {
                return value;
            }
            env.set(name.clone(), value);
            Value::NULL
        }
        Stmt::Return { value } => {
            let value = eval_expression(value, env);
            if value.is_error() {
                return value;
            }
            Value::returned(value)
        }
        Stmt::Expr { expr } => eval_expression(expr, env),
    }
}

/// Evaluate a block without unwrapping `Return`: the wrapper must keep
/// travelling so an outer block or call boundary can see it.
fn eval_block(block: &Block, env: &Environment) -> Value {
    let mut result = Value::NULL;
    for stmt in &block.statements {
        result = eval_statement(stmt, env);
        if matches!(result, Value::Return(_) | Value::Error(_)) {
            return result;
        }
    }
    result
}

fn eval_expression(expr: &Expr, env: &Environment) -> Value {
    match expr {
        Expr::Ident(name) => eval_identifier(name, env),
        Expr::Int(value) => Value::int(*value),
        Expr::Bool(value) => Value::bool_from(*value),
        Expr::Str(value) => Value::string(value.clone()),
        Expr::Prefix { op, right } => {
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            operators::unary(*op, right)
        }
        Expr::Infix { op, left, right } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            operators::binary(*op, left, right)
        }
        Expr::If {
            condition,
            consequence,
            alternative,
        } => eval_if(condition, consequence, alternative.as_ref(), env),
        Expr::Function { parameters, body } => {
            Value::function(parameters.clone(), body.clone(), env.clone())
        }
        Expr::Call { callee, arguments } => {
            let callee = eval_expression(callee, env);
            if callee.is_error() {
                return callee;
            }
            match eval_expressions(arguments, env) {
                Ok(arguments) => apply_function(callee, &arguments),
                Err(error) => error,
            }
        }
        Expr::Illegal => Value::error("illegal expression"),
    }
}

fn eval_identifier(name: &str, env: &Environment) -> Value {
    if let Some(value) = env.get(name) {
        return value;
    }
    if let Some(builtin) = builtins::lookup(name) {
        return Value::Builtin(builtin);
    }
    Value::error(format!("identifier not found: {name}"))
}

fn eval_if(
    condition: &Expr,
    consequence: &Block,
    alternative: Option<&Block>,
    env: &Environment,
) -> Value {
    let condition = eval_expression(condition, env);
    if condition.is_error() {
        return condition;
    }
    if condition.is_truthy() {
        eval_block(consequence, env)
    } else if let Some(alternative) = alternative {
        eval_block(alternative, env)
    } else {
        Value::NULL
    }
}

/// Evaluate arguments left to right, stopping at the first error.
fn eval_expressions(exprs: &[Expr], env: &Environment) -> Result<Vec<Value>, Value> {
    let mut values = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let value = eval_expression(expr, env);
        if value.is_error() {
            return Err(value);
        }
        values.push(value);
    }
    Ok(values)
}

fn apply_function(callee: Value, arguments: &[Value]) -> Value {
    match callee {
        Value::Function(func) => {
            let extended = Environment::enclosed(&func.env);
            // Positional binding with no arity check: extra arguments
            // are dropped, missing parameters stay unbound and surface
            // later as "identifier not found".
            for (parameter, argument) in func.parameters.iter().zip(arguments) {
                extended.set(parameter.clone(), argument.clone());
            }
            unwrap_return(eval_block(&func.body, &extended))
        }
        Value::Builtin(builtin) => (builtin.func)(arguments),
        other => Value::error(format!("not a function: {}", other.type_name())),
    }
}

/// A `return` stops here: the call boundary strips the wrapper.
fn unwrap_return(value: Value) -> Value {
    match value {
        Value::Return(inner) => (*inner).clone(),
        other => other,
    }
}
