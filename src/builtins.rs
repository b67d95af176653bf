use crate::object::{Builtin, Object};
use lazy_static::lazy_static;
use std::collections::HashMap;

fn wrong_arity(got: usize, want: usize) -> Object {
    Object::Error(format!(
        "wrong number of arguments. got={}, want={}",
        got, want
    ))
}

fn builtin_len(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Object::Str(s) => Object::Integer(s.len() as i64),
        Object::Array(elements) => Object::Integer(elements.len() as i64),
        other => Object::Error(format!(
            "argument to `len` not supported, got {}",
            other.type_name()
        )),
    }
}

fn builtin_first(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Object::Array(elements) => elements.first().cloned().unwrap_or(Object::Null),
        other => Object::Error(format!(
            "argument to `first` must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

fn builtin_last(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Object::Array(elements) => elements.last().cloned().unwrap_or(Object::Null),
        other => Object::Error(format!(
            "argument to `last` must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

fn builtin_rest(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Object::Array(elements) => {
            if elements.is_empty() {
                Object::Null
            } else {
                Object::Array(elements[1..].to_vec())
            }
        }
        other => Object::Error(format!(
            "argument to `rest` must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

// Persistent append: the argument array is left untouched.
fn builtin_push(args: Vec<Object>) -> Object {
    if args.len() != 2 {
        return wrong_arity(args.len(), 2);
    }
    match &args[0] {
        Object::Array(elements) => {
            let mut extended = elements.clone();
            extended.push(args[1].clone());
            Object::Array(extended)
        }
        other => Object::Error(format!(
            "argument to `push` must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

fn builtin_puts(args: Vec<Object>) -> Object {
    for arg in &args {
        println!("{}", arg.inspect());
    }
    Object::Null
}

lazy_static! {
    pub static ref BUILTINS: HashMap<&'static str, Builtin> = {
        let mut m = HashMap::new();
        m.insert("len", Builtin { func: builtin_len });
        m.insert("first", Builtin { func: builtin_first });
        m.insert("last", Builtin { func: builtin_last });
        m.insert("rest", Builtin { func: builtin_rest });
        m.insert("push", Builtin { func: builtin_push });
        m.insert("puts", Builtin { func: builtin_puts });
        m
    };
}
