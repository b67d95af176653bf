use crate::ast::{CallExpression, Expression, LetStatement, Node, Program, Statement};
use crate::env::{Env, Environment};
use crate::eval::eval;
use crate::modify::modify;
use crate::object::{MacroObject, Object};

/// First pass: pull every top-level `let <name> = macro(...) {...}` out of
/// the program and bind it into `env`. Everything else stays, in order.
pub fn define_macros(program: &mut Program, env: &Env) {
    let mut kept = Vec::with_capacity(program.statements.len());

    for stmt in program.statements.drain(..) {
        match stmt {
            Statement::Let(LetStatement {
                name,
                value: Expression::Macro(literal),
                ..
            }) => {
                let mac = Object::Macro(MacroObject {
                    parameters: literal.parameters,
                    body: literal.body,
                    env: env.clone(),
                });
                env.borrow_mut().set(name.value, mac);
            }
            other => kept.push(other),
        }
    }

    program.statements = kept;
}

/// Second pass: rewrite every call to a defined macro into its expansion.
/// Arguments are handed to the macro body unevaluated, as quote objects;
/// the body must produce a quote object back.
pub fn expand_macros(program: Program, env: &Env) -> Node {
    modify(Node::Program(program), &mut |node| match node {
        Node::Expression(Expression::Call(call)) => match macro_for_call(&call, env) {
            Some(mac) => {
                let args = quote_args(&call);
                let eval_env = extend_macro_env(&mac, args);

                let body = Node::Statement(Statement::Block(mac.body.clone()));
                match eval(&body, &eval_env) {
                    Some(Object::Quote(quoted)) => quoted,
                    other => panic!("macros must return quoted code, got {:?}", other),
                }
            }
            None => Node::Expression(Expression::Call(call)),
        },
        other => other,
    })
}

fn macro_for_call(call: &CallExpression, env: &Env) -> Option<MacroObject> {
    let ident = match call.function.as_ref() {
        Expression::Identifier(ident) => ident,
        _ => return None,
    };
    match env.borrow().get(&ident.value) {
        Some(Object::Macro(mac)) => Some(mac),
        _ => None,
    }
}

fn quote_args(call: &CallExpression) -> Vec<Object> {
    call.arguments
        .iter()
        .map(|arg| Object::Quote(Node::Expression(arg.clone())))
        .collect()
}

fn extend_macro_env(mac: &MacroObject, args: Vec<Object>) -> Env {
    let extended = Environment::new_enclosed(mac.env.clone());
    for (param, arg) in mac.parameters.iter().zip(args) {
        extended.borrow_mut().set(param.value.clone(), arg);
    }
    extended
}
