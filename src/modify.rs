use crate::ast::{BlockStatement, Expression, Identifier, Node, Statement};

/// Post-order rewrite: every child slot of `node` is replaced by its own
/// rewritten subtree, then `f` is applied to the node itself. Macro-literal
/// bodies are quoted code and are not descended into.
pub fn modify(node: Node, f: &mut dyn FnMut(Node) -> Node) -> Node {
    let node = match node {
        Node::Program(mut program) => {
            program.statements = program
                .statements
                .into_iter()
                .map(|s| subtree_statement(s, f))
                .collect();
            Node::Program(program)
        }

        Node::Statement(stmt) => Node::Statement(match stmt {
            Statement::Let(mut s) => {
                s.value = subtree_expression(s.value, f);
                Statement::Let(s)
            }
            Statement::Return(mut s) => {
                s.return_value = subtree_expression(s.return_value, f);
                Statement::Return(s)
            }
            Statement::Expression(mut s) => {
                s.expression = subtree_expression(s.expression, f);
                Statement::Expression(s)
            }
            Statement::Block(mut s) => {
                s.statements = s
                    .statements
                    .into_iter()
                    .map(|inner| subtree_statement(inner, f))
                    .collect();
                Statement::Block(s)
            }
        }),

        Node::Expression(expr) => Node::Expression(match expr {
            Expression::Prefix(mut e) => {
                e.right = Box::new(subtree_expression(*e.right, f));
                Expression::Prefix(e)
            }
            Expression::Infix(mut e) => {
                e.left = Box::new(subtree_expression(*e.left, f));
                e.right = Box::new(subtree_expression(*e.right, f));
                Expression::Infix(e)
            }
            Expression::Index(mut e) => {
                e.left = Box::new(subtree_expression(*e.left, f));
                e.index = Box::new(subtree_expression(*e.index, f));
                Expression::Index(e)
            }
            Expression::If(mut e) => {
                e.condition = Box::new(subtree_expression(*e.condition, f));
                e.consequence = subtree_block(e.consequence, f);
                e.alternative = e.alternative.map(|alt| subtree_block(alt, f));
                Expression::If(e)
            }
            Expression::Call(mut e) => {
                e.function = Box::new(subtree_expression(*e.function, f));
                e.arguments = e
                    .arguments
                    .into_iter()
                    .map(|a| subtree_expression(a, f))
                    .collect();
                Expression::Call(e)
            }
            Expression::Function(mut e) => {
                e.parameters = e
                    .parameters
                    .into_iter()
                    .map(|p| subtree_identifier(p, f))
                    .collect();
                e.body = subtree_block(e.body, f);
                Expression::Function(e)
            }
            Expression::Array(mut e) => {
                e.elements = e
                    .elements
                    .into_iter()
                    .map(|el| subtree_expression(el, f))
                    .collect();
                Expression::Array(e)
            }
            Expression::Hash(mut e) => {
                // Key identity may change, so the pair list is rebuilt.
                e.pairs = e
                    .pairs
                    .into_iter()
                    .map(|(k, v)| (subtree_expression(k, f), subtree_expression(v, f)))
                    .collect();
                Expression::Hash(e)
            }
            leaf @ (Expression::Identifier(_)
            | Expression::IntegerLiteral(_)
            | Expression::StringLiteral(_)
            | Expression::Boolean(_)
            | Expression::Macro(_)) => leaf,
        }),
    };

    f(node)
}

fn subtree_statement(stmt: Statement, f: &mut dyn FnMut(Node) -> Node) -> Statement {
    match modify(Node::Statement(stmt), f) {
        Node::Statement(s) => s,
        other => panic!("statement slot rewritten to non-statement: {}", other),
    }
}

fn subtree_expression(expr: Expression, f: &mut dyn FnMut(Node) -> Node) -> Expression {
    match modify(Node::Expression(expr), f) {
        Node::Expression(e) => e,
        other => panic!("expression slot rewritten to non-expression: {}", other),
    }
}

fn subtree_block(block: BlockStatement, f: &mut dyn FnMut(Node) -> Node) -> BlockStatement {
    match modify(Node::Statement(Statement::Block(block)), f) {
        Node::Statement(Statement::Block(b)) => b,
        other => panic!("block slot rewritten to non-block: {}", other),
    }
}

fn subtree_identifier(ident: Identifier, f: &mut dyn FnMut(Node) -> Node) -> Identifier {
    match modify(Node::Expression(Expression::Identifier(ident)), f) {
        Node::Expression(Expression::Identifier(i)) => i,
        other => panic!("parameter slot rewritten to non-identifier: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;
    use crate::token::{Token, TokenType};

    fn int_lit(value: i64) -> Expression {
        Expression::IntegerLiteral(IntegerLiteral {
            token: Token::new(TokenType::Int, value.to_string()),
            value,
        })
    }

    fn one() -> Expression {
        int_lit(1)
    }

    fn two() -> Expression {
        int_lit(2)
    }

    fn turn_one_into_two(node: Node) -> Node {
        match node {
            Node::Expression(Expression::IntegerLiteral(lit)) if lit.value == 1 => {
                Node::Expression(two())
            }
            other => other,
        }
    }

    fn block_of(expr: Expression) -> BlockStatement {
        BlockStatement {
            token: Token::new(TokenType::LBrace, "{"),
            statements: vec![Statement::Expression(ExpressionStatement {
                token: Token::default(),
                expression: expr,
            })],
        }
    }

    fn infix(left: Expression, operator: &str, right: Expression) -> Expression {
        Expression::Infix(InfixExpression {
            token: Token::default(),
            operator: operator.to_string(),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    #[test]
    fn test_identity_preserves_structure() {
        let program = Node::Program(Program {
            statements: vec![
                Statement::Let(LetStatement {
                    token: Token::new(TokenType::Let, "let"),
                    name: Identifier {
                        token: Token::new(TokenType::Ident, "x"),
                        value: "x".to_string(),
                    },
                    value: infix(one(), "+", two()),
                }),
                Statement::Return(ReturnStatement {
                    token: Token::new(TokenType::Return, "return"),
                    return_value: Expression::Array(ArrayLiteral {
                        token: Token::new(TokenType::LBracket, "["),
                        elements: vec![one(), two()],
                    }),
                }),
            ],
        });

        let modified = modify(program.clone(), &mut |n| n);
        assert_eq!(modified, program);
    }

    #[test]
    fn test_modify_every_child_slot() {
        let tests: Vec<(Node, Node)> = vec![
            (one().into(), two().into()),
            (
                Node::Program(Program {
                    statements: vec![Statement::Expression(ExpressionStatement {
                        token: Token::default(),
                        expression: one(),
                    })],
                }),
                Node::Program(Program {
                    statements: vec![Statement::Expression(ExpressionStatement {
                        token: Token::default(),
                        expression: two(),
                    })],
                }),
            ),
            (
                infix(one(), "+", two()).into(),
                infix(two(), "+", two()).into(),
            ),
            (
                infix(two(), "+", one()).into(),
                infix(two(), "+", two()).into(),
            ),
            (
                Expression::Prefix(PrefixExpression {
                    token: Token::default(),
                    operator: "-".to_string(),
                    right: Box::new(one()),
                })
                .into(),
                Expression::Prefix(PrefixExpression {
                    token: Token::default(),
                    operator: "-".to_string(),
                    right: Box::new(two()),
                })
                .into(),
            ),
            (
                Expression::Index(IndexExpression {
                    token: Token::default(),
                    left: Box::new(one()),
                    index: Box::new(one()),
                })
                .into(),
                Expression::Index(IndexExpression {
                    token: Token::default(),
                    left: Box::new(two()),
                    index: Box::new(two()),
                })
                .into(),
            ),
            (
                Expression::If(IfExpression {
                    token: Token::default(),
                    condition: Box::new(one()),
                    consequence: block_of(one()),
                    alternative: Some(block_of(one())),
                })
                .into(),
                Expression::If(IfExpression {
                    token: Token::default(),
                    condition: Box::new(two()),
                    consequence: block_of(two()),
                    alternative: Some(block_of(two())),
                })
                .into(),
            ),
            (
                Statement::Return(ReturnStatement {
                    token: Token::default(),
                    return_value: one(),
                })
                .into(),
                Statement::Return(ReturnStatement {
                    token: Token::default(),
                    return_value: two(),
                })
                .into(),
            ),
            (
                Statement::Let(LetStatement {
                    token: Token::default(),
                    name: Identifier {
                        token: Token::new(TokenType::Ident, "x"),
                        value: "x".to_string(),
                    },
                    value: one(),
                })
                .into(),
                Statement::Let(LetStatement {
                    token: Token::default(),
                    name: Identifier {
                        token: Token::new(TokenType::Ident, "x"),
                        value: "x".to_string(),
                    },
                    value: two(),
                })
                .into(),
            ),
            (
                Expression::Function(FunctionLiteral {
                    token: Token::new(TokenType::Function, "fn"),
                    parameters: vec![],
                    body: block_of(one()),
                })
                .into(),
                Expression::Function(FunctionLiteral {
                    token: Token::new(TokenType::Function, "fn"),
                    parameters: vec![],
                    body: block_of(two()),
                })
                .into(),
            ),
            (
                Expression::Array(ArrayLiteral {
                    token: Token::default(),
                    elements: vec![one(), one()],
                })
                .into(),
                Expression::Array(ArrayLiteral {
                    token: Token::default(),
                    elements: vec![two(), two()],
                })
                .into(),
            ),
            (
                Expression::Call(CallExpression {
                    token: Token::default(),
                    function: Box::new(Expression::Identifier(Identifier {
                        token: Token::new(TokenType::Ident, "add"),
                        value: "add".to_string(),
                    })),
                    arguments: vec![one(), one()],
                })
                .into(),
                Expression::Call(CallExpression {
                    token: Token::default(),
                    function: Box::new(Expression::Identifier(Identifier {
                        token: Token::new(TokenType::Ident, "add"),
                        value: "add".to_string(),
                    })),
                    arguments: vec![two(), two()],
                })
                .into(),
            ),
        ];

        for (input, expected) in tests {
            let modified = modify(input, &mut turn_one_into_two);
            assert_eq!(modified, expected);
        }
    }

    #[test]
    fn test_modify_hash_pairs() {
        let input = Expression::Hash(HashLiteral {
            token: Token::default(),
            pairs: vec![(one(), one()), (one(), one())],
        });

        let modified = modify(input.into(), &mut turn_one_into_two);
        match modified {
            Node::Expression(Expression::Hash(hash)) => {
                for (key, value) in &hash.pairs {
                    assert_eq!(*key, two());
                    assert_eq!(*value, two());
                }
            }
            other => panic!("not a hash literal: {}", other),
        }
    }

    #[test]
    fn test_macro_bodies_are_left_quoted() {
        let input = Expression::Macro(MacroLiteral {
            token: Token::new(TokenType::Macro, "macro"),
            parameters: vec![],
            body: block_of(one()),
        });

        let modified = modify(Node::Expression(input.clone()), &mut turn_one_into_two);
        assert_eq!(modified, Node::Expression(input));
    }
}
