use crate::ast::{BlockStatement, Identifier, Node};
use crate::env::Env;
use fnv::FnvHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hasher;

#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    Str(String),
    Array(Vec<Object>),
    Hash(HashMap<HashKey, HashPair>),
    Function(Function),
    Builtin(Builtin),
    ReturnValue(Box<Object>),
    Error(String),
    Quote(Node),
    Macro(MacroObject),
}

/// Discriminated 64-bit key. Only integers, booleans, and strings can
/// produce one; strings hash with FNV-1a over their UTF-8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub kind: &'static str,
    pub value: u64,
}

/// The key object itself rides along for inspection output.
#[derive(Debug, Clone)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: Env,
}

#[derive(Clone)]
pub struct MacroObject {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: Env,
}

#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub func: fn(Vec<Object>) -> Object,
}

// The captured environment may reference this very function, so Debug
// stays on the signature.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body.to_string())
            .finish()
    }
}

impl fmt::Debug for MacroObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Macro")
            .field("parameters", &self.parameters)
            .field("body", &self.body.to_string())
            .finish()
    }
}

impl Object {
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Null => "NULL",
            Object::Str(_) => "STRING",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
            Object::Quote(_) => "QUOTE",
            Object::Macro(_) => "MACRO",
        }
    }

    pub fn hash_key(&self) -> Option<HashKey> {
        let value = match self {
            Object::Integer(v) => *v as u64,
            Object::Boolean(b) => *b as u64,
            Object::Str(s) => {
                let mut hasher = FnvHasher::default();
                hasher.write(s.as_bytes());
                hasher.finish()
            }
            _ => return None,
        };
        Some(HashKey {
            kind: self.type_name(),
            value,
        })
    }

    pub fn inspect(&self) -> String {
        match self {
            Object::Integer(v) => v.to_string(),
            Object::Boolean(b) => b.to_string(),
            Object::Null => "null".to_string(),
            Object::Str(s) => s.clone(),
            Object::Array(elements) => {
                let mut out = String::from("[\n");
                for e in elements {
                    out.push(' ');
                    out.push_str(&e.inspect());
                    out.push_str(",\n");
                }
                out.push(']');
                out
            }
            Object::Hash(pairs) => {
                let rendered: Vec<String> = pairs
                    .values()
                    .map(|p| format!("{}: {}", p.key.inspect(), p.value.inspect()))
                    .collect();
                format!("{{{}}}", rendered.join(", "))
            }
            Object::Function(func) => {
                let params: Vec<String> =
                    func.parameters.iter().map(|p| p.value.clone()).collect();
                format!("fn({}) {{\n{}\n}}", params.join(", "), func.body)
            }
            Object::Builtin(_) => "builtin function".to_string(),
            Object::ReturnValue(inner) => inner.inspect(),
            Object::Error(message) => format!("Error: {}", message),
            Object::Quote(node) => format!("QUOTE({})", node),
            Object::Macro(mac) => {
                let params: Vec<String> =
                    mac.parameters.iter().map(|p| p.value.clone()).collect();
                format!("macro({}) {{\n{}\n}}", params.join(", "), mac.body)
            }
        }
    }
}
