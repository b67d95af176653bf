use crate::token::Token;
use std::fmt;

/// Any node the rewriter or evaluator can be handed.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Program(Program),
    Statement(Statement),
    Expression(Expression),
}

impl From<Program> for Node {
    fn from(p: Program) -> Node {
        Node::Program(p)
    }
}

impl From<Statement> for Node {
    fn from(s: Statement) -> Node {
        Node::Statement(s)
    }
}

impl From<Expression> for Node {
    fn from(e: Expression) -> Node {
        Node::Expression(e)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
    Block(BlockStatement),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(IntegerLiteral),
    StringLiteral(StringLiteral),
    Boolean(BooleanLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    If(IfExpression),
    Function(FunctionLiteral),
    Call(CallExpression),
    Array(ArrayLiteral),
    Index(IndexExpression),
    Hash(HashLiteral),
    Macro(MacroLiteral),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    pub token: Token, // the `let` token
    pub name: Identifier,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub token: Token, // the `return` token
    pub return_value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub token: Token, // the first token of the expression
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub token: Token, // the `{` token
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpression {
    pub token: Token, // the operator token
    pub operator: String,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    pub token: Token, // the operator token
    pub operator: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfExpression {
    pub token: Token, // the `if` token
    pub condition: Box<Expression>,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub token: Token, // the `fn` token
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub token: Token, // the `(` token
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub token: Token, // the `[` token
    pub elements: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpression {
    pub token: Token, // the `[` token
    pub left: Box<Expression>,
    pub index: Box<Expression>,
}

/// Pair order is as written; duplicate keys are left for the evaluator,
/// where the last writer wins.
#[derive(Debug, Clone, PartialEq)]
pub struct HashLiteral {
    pub token: Token, // the `{` token
    pub pairs: Vec<(Expression, Expression)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MacroLiteral {
    pub token: Token, // the `macro` token
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

impl Node {
    pub fn token_literal(&self) -> String {
        match self {
            Node::Program(p) => p.token_literal(),
            Node::Statement(s) => s.token_literal(),
            Node::Expression(e) => e.token_literal(),
        }
    }
}

impl Program {
    pub fn token_literal(&self) -> String {
        self.statements
            .first()
            .map(Statement::token_literal)
            .unwrap_or_default()
    }
}

impl Statement {
    pub fn token_literal(&self) -> String {
        match self {
            Statement::Let(s) => s.token.literal.clone(),
            Statement::Return(s) => s.token.literal.clone(),
            Statement::Expression(s) => s.token.literal.clone(),
            Statement::Block(s) => s.token.literal.clone(),
        }
    }
}

impl Expression {
    pub fn token_literal(&self) -> String {
        match self {
            Expression::Identifier(e) => e.token.literal.clone(),
            Expression::IntegerLiteral(e) => e.token.literal.clone(),
            Expression::StringLiteral(e) => e.token.literal.clone(),
            Expression::Boolean(e) => e.token.literal.clone(),
            Expression::Prefix(e) => e.token.literal.clone(),
            Expression::Infix(e) => e.token.literal.clone(),
            Expression::If(e) => e.token.literal.clone(),
            Expression::Function(e) => e.token.literal.clone(),
            Expression::Call(e) => e.token.literal.clone(),
            Expression::Array(e) => e.token.literal.clone(),
            Expression::Index(e) => e.token.literal.clone(),
            Expression::Hash(e) => e.token.literal.clone(),
            Expression::Macro(e) => e.token.literal.clone(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Program(p) => p.fmt(f),
            Node::Statement(s) => s.fmt(f),
            Node::Expression(e) => e.fmt(f),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.statements {
            write!(f, "{}", s)?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let(s) => write!(f, "{} {} = {};", s.token.literal, s.name, s.value),
            Statement::Return(s) => write!(f, "{} {};", s.token.literal, s.return_value),
            Statement::Expression(s) => write!(f, "{}", s.expression),
            Statement::Block(s) => {
                for stmt in &s.statements {
                    write!(f, "{}", stmt)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(e) => write!(f, "{}", e.value),
            Expression::IntegerLiteral(e) => write!(f, "{}", e.token.literal),
            Expression::StringLiteral(e) => write!(f, "{}", e.token.literal),
            Expression::Boolean(e) => write!(f, "{}", e.token.literal),
            Expression::Prefix(e) => write!(f, "({}{})", e.operator, e.right),
            Expression::Infix(e) => write!(f, "({} {} {})", e.left, e.operator, e.right),
            Expression::If(e) => {
                write!(f, "if{} {}", e.condition, e.consequence)?;
                if let Some(alt) = &e.alternative {
                    write!(f, "else {}", alt)?;
                }
                Ok(())
            }
            Expression::Function(e) => {
                let params: Vec<String> =
                    e.parameters.iter().map(|p| p.value.clone()).collect();
                write!(f, "{}({}) {}", e.token.literal, params.join(", "), e.body)
            }
            Expression::Call(e) => {
                let args: Vec<String> = e.arguments.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", e.function, args.join(", "))
            }
            Expression::Array(e) => {
                let elems: Vec<String> = e.elements.iter().map(|el| el.to_string()).collect();
                write!(f, "[{}]", elems.join(", "))
            }
            Expression::Index(e) => write!(f, "({}[{}])", e.left, e.index),
            Expression::Hash(e) => {
                let pairs: Vec<String> = e
                    .pairs
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            Expression::Macro(e) => {
                let params: Vec<String> =
                    e.parameters.iter().map(|p| p.value.clone()).collect();
                write!(f, "{}({}) {}", e.token.literal, params.join(", "), e.body)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Token, TokenType};

    #[test]
    fn test_display() {
        let program = Program {
            statements: vec![Statement::Let(LetStatement {
                token: Token::new(TokenType::Let, "let"),
                name: Identifier {
                    token: Token::new(TokenType::Ident, "myVar"),
                    value: "myVar".to_string(),
                },
                value: Expression::Identifier(Identifier {
                    token: Token::new(TokenType::Ident, "anotherVar"),
                    value: "anotherVar".to_string(),
                }),
            })],
        };

        assert_eq!(program.to_string(), "let myVar = anotherVar;");
    }

    #[test]
    fn test_token_literal() {
        let program = Program {
            statements: vec![Statement::Return(ReturnStatement {
                token: Token::new(TokenType::Return, "return"),
                return_value: Expression::IntegerLiteral(IntegerLiteral {
                    token: Token::new(TokenType::Int, "5"),
                    value: 5,
                }),
            })],
        };

        assert_eq!(program.token_literal(), "return");
        assert_eq!(Program::default().token_literal(), "");
    }
}
