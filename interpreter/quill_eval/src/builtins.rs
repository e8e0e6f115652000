//! Builtin functions.
//!
//! Consulted only after the environment chain misses, so user code can
//! shadow any builtin with a `let`.

use crate::value::{Builtin, Value};

/// Look up a builtin by name.
pub(crate) fn lookup(name: &str) -> Option<Builtin> {
    match name {
        "len" => Some(Builtin {
            name: "len",
            func: builtin_len,
        }),
        _ => None,
    }
}

/// `len(s)`: byte length of a string.
fn builtin_len(args: &[Value]) -> Value {
    if args.len() != 1 {
        return Value::error(format!(
            "wrong number of arguments. got={}, want=1",
            args.len()
        ));
    }
    match &args[0] {
        Value::Str(s) => Value::int(i64::try_from(s.len()).unwrap_or(i64::MAX)),
        other => Value::error(format!(
            "argument to `len` not supported, got {}",
            other.type_name()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn len_counts_bytes() {
        let len = lookup("len").map(|b| b.func).unwrap_or(builtin_len);
        assert_eq!(len(&[Value::string("")]), Value::int(0));
        assert_eq!(len(&[Value::string("four")]), Value::int(4));
        assert_eq!(len(&[Value::string("hello world")]), Value::int(11));
    }

    #[test]
    fn len_rejects_bad_arguments() {
        assert_eq!(
            builtin_len(&[Value::int(1)]),
            Value::error("argument to `len` not supported, got INTEGER")
        );
        assert_eq!(
            builtin_len(&[Value::string("one"), Value::string("two")]),
            Value::error("wrong number of arguments. got=2, want=1")
        );
    }

    #[test]
    fn unknown_names_miss() {
        assert!(lookup("first").is_none());
        assert!(lookup("").is_none());
    }
}
