use crate::ast::{BooleanLiteral, Expression, IntegerLiteral, Node, StringLiteral};
use crate::env::Env;
use crate::eval::eval_expression;
use crate::modify::modify;
use crate::object::Object;
use crate::token::{Token, TokenType};

/// Wraps the argument AST in a quote object, after interpolating every
/// nested `unquote(...)` call with the AST form of its evaluated argument.
pub fn quote(node: Node, env: &Env) -> Object {
    let node = eval_unquote_calls(node, env);
    Object::Quote(node)
}

fn eval_unquote_calls(quoted: Node, env: &Env) -> Node {
    modify(quoted, &mut |node| match node {
        Node::Expression(Expression::Call(call))
            if call.function.token_literal() == "unquote" && call.arguments.len() == 1 =>
        {
            let value = eval_expression(&call.arguments[0], env);
            match convert_object_to_ast(value) {
                Some(expr) => Node::Expression(expr),
                // No AST form for this value; the call stays as written.
                None => Node::Expression(Expression::Call(call)),
            }
        }
        other => other,
    })
}

fn convert_object_to_ast(obj: Object) -> Option<Expression> {
    match obj {
        Object::Integer(value) => Some(Expression::IntegerLiteral(IntegerLiteral {
            token: Token::new(TokenType::Int, value.to_string()),
            value,
        })),
        Object::Boolean(value) => {
            let token = if value {
                Token::new(TokenType::True, "true")
            } else {
                Token::new(TokenType::False, "false")
            };
            Some(Expression::Boolean(BooleanLiteral { token, value }))
        }
        Object::Str(value) => Some(Expression::StringLiteral(StringLiteral {
            token: Token::new(TokenType::String, value.clone()),
            value,
        })),
        Object::Quote(Node::Expression(expr)) => Some(expr),
        _ => None,
    }
}
