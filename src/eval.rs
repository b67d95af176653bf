use crate::ast::{
    BlockStatement, CallExpression, Expression, HashLiteral, Identifier, IfExpression, Node,
    Program, Statement,
};
use crate::builtins::BUILTINS;
use crate::env::{Env, Environment};
use crate::object::{Function, HashKey, HashPair, Object};
use crate::quote::quote;
use std::collections::HashMap;

/// Evaluates `node` against `env`. `None` is the no-value outcome of a
/// binding statement; the REPL prints nothing for it.
pub fn eval(node: &Node, env: &Env) -> Option<Object> {
    match node {
        Node::Program(program) => eval_program(program, env),
        Node::Statement(stmt) => eval_statement(stmt, env),
        Node::Expression(expr) => Some(eval_expression(expr, env)),
    }
}

fn eval_program(program: &Program, env: &Env) -> Option<Object> {
    let mut result = None;
    for stmt in &program.statements {
        match eval_statement(stmt, env) {
            Some(Object::ReturnValue(value)) => return Some(*value),
            err @ Some(Object::Error(_)) => return err,
            other => result = other,
        }
    }
    result
}

// Unlike at program level, a ReturnValue keeps its wrapper here so the
// enclosing call site (or program) decides what to do with it.
fn eval_block_statement(block: &BlockStatement, env: &Env) -> Option<Object> {
    let mut result = None;
    for stmt in &block.statements {
        match eval_statement(stmt, env) {
            terminal @ Some(Object::ReturnValue(_) | Object::Error(_)) => return terminal,
            other => result = other,
        }
    }
    result
}

fn eval_statement(stmt: &Statement, env: &Env) -> Option<Object> {
    match stmt {
        Statement::Expression(s) => Some(eval_expression(&s.expression, env)),
        Statement::Block(s) => eval_block_statement(s, env),
        Statement::Return(s) => {
            let value = eval_expression(&s.return_value, env);
            if is_error(&value) {
                return Some(value);
            }
            Some(Object::ReturnValue(Box::new(value)))
        }
        Statement::Let(s) => {
            let value = eval_expression(&s.value, env);
            if is_error(&value) {
                return Some(value);
            }
            env.borrow_mut().set(s.name.value.clone(), value);
            None
        }
    }
}

pub(crate) fn eval_expression(expr: &Expression, env: &Env) -> Object {
    match expr {
        Expression::IntegerLiteral(lit) => Object::Integer(lit.value),
        Expression::StringLiteral(lit) => Object::Str(lit.value.clone()),
        Expression::Boolean(lit) => Object::Boolean(lit.value),
        Expression::Identifier(ident) => eval_identifier(ident, env),
        Expression::Prefix(e) => {
            let right = eval_expression(&e.right, env);
            if is_error(&right) {
                return right;
            }
            eval_prefix_expression(&e.operator, right)
        }
        Expression::Infix(e) => {
            let left = eval_expression(&e.left, env);
            if is_error(&left) {
                return left;
            }
            let right = eval_expression(&e.right, env);
            if is_error(&right) {
                return right;
            }
            eval_infix_expression(&e.operator, left, right)
        }
        Expression::If(e) => eval_if_expression(e, env),
        Expression::Function(e) => Object::Function(Function {
            parameters: e.parameters.clone(),
            body: e.body.clone(),
            env: env.clone(),
        }),
        Expression::Call(e) => eval_call_expression(e, env),
        Expression::Array(e) => match eval_expressions(&e.elements, env) {
            Ok(elements) => Object::Array(elements),
            Err(err) => err,
        },
        Expression::Index(e) => {
            let left = eval_expression(&e.left, env);
            if is_error(&left) {
                return left;
            }
            let index = eval_expression(&e.index, env);
            if is_error(&index) {
                return index;
            }
            eval_index_expression(left, index)
        }
        Expression::Hash(e) => eval_hash_literal(e, env),
        // Macro literals are consumed by the definition pass; a stray one
        // has no runtime value.
        Expression::Macro(_) => Object::Null,
    }
}

fn eval_call_expression(call: &CallExpression, env: &Env) -> Object {
    // quote suppresses evaluation of its argument, so it is recognized
    // from the callee token before anything is evaluated.
    if call.function.token_literal() == "quote" {
        if call.arguments.len() != 1 {
            return Object::Error(format!(
                "wrong number of arguments. got={}, want=1",
                call.arguments.len()
            ));
        }
        return quote(Node::Expression(call.arguments[0].clone()), env);
    }

    let function = eval_expression(&call.function, env);
    if is_error(&function) {
        return function;
    }
    let args = match eval_expressions(&call.arguments, env) {
        Ok(args) => args,
        Err(err) => return err,
    };
    apply_function(function, args)
}

fn eval_expressions(exprs: &[Expression], env: &Env) -> Result<Vec<Object>, Object> {
    let mut results = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let value = eval_expression(expr, env);
        if is_error(&value) {
            return Err(value);
        }
        results.push(value);
    }
    Ok(results)
}

fn eval_identifier(ident: &Identifier, env: &Env) -> Object {
    if let Some(value) = env.borrow().get(&ident.value) {
        return value;
    }
    if let Some(builtin) = BUILTINS.get(ident.value.as_str()) {
        return Object::Builtin(*builtin);
    }
    Object::Error(format!("identifier not found: {}", ident.value))
}

fn eval_prefix_expression(operator: &str, right: Object) -> Object {
    match operator {
        "!" => eval_bang_operator(right),
        "-" => eval_minus_prefix_operator(right),
        _ => Object::Error(format!(
            "unknown operator: {}{}",
            operator,
            right.type_name()
        )),
    }
}

fn eval_bang_operator(right: Object) -> Object {
    match right {
        Object::Boolean(value) => Object::Boolean(!value),
        Object::Null => Object::Boolean(true),
        _ => Object::Boolean(false),
    }
}

fn eval_minus_prefix_operator(right: Object) -> Object {
    match right {
        Object::Integer(value) => Object::Integer(-value),
        other => Object::Error(format!("unknown operator: -{}", other.type_name())),
    }
}

fn eval_infix_expression(operator: &str, left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Integer(l), Object::Integer(r)) => {
            eval_integer_infix_expression(operator, l, r)
        }
        (Object::Str(l), Object::Str(r)) => eval_string_infix_expression(operator, l, r),
        (left, right) => match operator {
            "==" => Object::Boolean(objects_identical(&left, &right)),
            "!=" => Object::Boolean(!objects_identical(&left, &right)),
            _ if left.type_name() != right.type_name() => Object::Error(format!(
                "type mismatch: {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            )),
            _ => Object::Error(format!(
                "unknown operator: {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            )),
        },
    }
}

// Identity comparison for the mixed-type equality branch. Booleans and
// null are process-wide singletons; every other object is a fresh value,
// so two of them are never the same one.
fn objects_identical(left: &Object, right: &Object) -> bool {
    match (left, right) {
        (Object::Boolean(l), Object::Boolean(r)) => l == r,
        (Object::Null, Object::Null) => true,
        _ => false,
    }
}

fn eval_integer_infix_expression(operator: &str, left: i64, right: i64) -> Object {
    match operator {
        "+" => Object::Integer(left + right),
        "-" => Object::Integer(left - right),
        "*" => Object::Integer(left * right),
        "/" => Object::Integer(left / right),
        "<" => Object::Boolean(left < right),
        ">" => Object::Boolean(left > right),
        "==" => Object::Boolean(left == right),
        "!=" => Object::Boolean(left != right),
        _ => Object::Error(format!(
            "unknown operator: INTEGER {} INTEGER",
            operator
        )),
    }
}

fn eval_string_infix_expression(operator: &str, left: String, right: String) -> Object {
    match operator {
        "+" => Object::Str(format!("{}{}", left, right)),
        "==" => Object::Boolean(left == right),
        "!=" => Object::Boolean(left != right),
        _ => Object::Error(format!("unknown operator: STRING {} STRING", operator)),
    }
}

fn eval_if_expression(expr: &IfExpression, env: &Env) -> Object {
    let condition = eval_expression(&expr.condition, env);
    if is_error(&condition) {
        return condition;
    }

    if is_truthy(&condition) {
        eval_block_statement(&expr.consequence, env).unwrap_or(Object::Null)
    } else if let Some(alternative) = &expr.alternative {
        eval_block_statement(alternative, env).unwrap_or(Object::Null)
    } else {
        Object::Null
    }
}

fn eval_index_expression(left: Object, index: Object) -> Object {
    match (left, index) {
        (Object::Array(elements), Object::Integer(i)) => {
            eval_array_index_expression(elements, i)
        }
        (Object::Hash(pairs), index) => eval_hash_index_expression(&pairs, &index),
        (left, _) => Object::Error(format!(
            "index operator not supported: {}",
            left.type_name()
        )),
    }
}

fn eval_array_index_expression(elements: Vec<Object>, index: i64) -> Object {
    if index < 0 || index >= elements.len() as i64 {
        return Object::Null;
    }
    elements[index as usize].clone()
}

fn eval_hash_index_expression(pairs: &HashMap<HashKey, HashPair>, index: &Object) -> Object {
    match index.hash_key() {
        Some(key) => pairs
            .get(&key)
            .map(|pair| pair.value.clone())
            .unwrap_or(Object::Null),
        None => Object::Error(format!("unusable as hash key: {}", index.type_name())),
    }
}

fn eval_hash_literal(hash: &HashLiteral, env: &Env) -> Object {
    let mut pairs = HashMap::new();
    for (key_expr, value_expr) in &hash.pairs {
        let key = eval_expression(key_expr, env);
        if is_error(&key) {
            return key;
        }
        let hash_key = match key.hash_key() {
            Some(hash_key) => hash_key,
            None => {
                return Object::Error(format!("unusable as hash key: {}", key.type_name()))
            }
        };
        let value = eval_expression(value_expr, env);
        if is_error(&value) {
            return value;
        }
        pairs.insert(hash_key, HashPair { key, value });
    }
    Object::Hash(pairs)
}

fn apply_function(function: Object, args: Vec<Object>) -> Object {
    match function {
        Object::Function(func) => {
            let extended = extend_function_env(&func, args);
            let evaluated =
                eval_block_statement(&func.body, &extended).unwrap_or(Object::Null);
            unwrap_return_value(evaluated)
        }
        Object::Builtin(builtin) => (builtin.func)(args),
        other => Object::Error(format!("not a function: {}", other.type_name())),
    }
}

// Positional binding over the *captured* environment: excess arguments are
// dropped, missing ones stay unbound.
fn extend_function_env(func: &Function, args: Vec<Object>) -> Env {
    let env = Environment::new_enclosed(func.env.clone());
    for (param, arg) in func.parameters.iter().zip(args) {
        env.borrow_mut().set(param.value.clone(), arg);
    }
    env
}

fn unwrap_return_value(obj: Object) -> Object {
    match obj {
        Object::ReturnValue(value) => *value,
        other => other,
    }
}

fn is_truthy(obj: &Object) -> bool {
    !matches!(obj, Object::Boolean(false) | Object::Null)
}

fn is_error(obj: &Object) -> bool {
    matches!(obj, Object::Error(_))
}
