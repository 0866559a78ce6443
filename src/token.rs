use serde::{Deserialize, Serialize};

pub type TokenId = u32;

/// An immutable labeled puzzle piece. The engine only ever relocates tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub text: String,
}

impl Token {
    pub fn new(id: TokenId, text: impl Into<String>) -> Self { Self { id, text: text.into() } }
}
