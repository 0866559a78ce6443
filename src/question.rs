use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::state::PuzzleState;
use crate::token::{Token, TokenId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderRule {
    /// Target order is the keywords sorted by id.
    Asc,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectOrder {
    Rule(OrderRule),
    Explicit(Vec<TokenId>),
}

/// Puzzle content: the keywords to arrange and the order that solves it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub name: String,
    pub keywords: Vec<Token>,
    pub correct_order: CorrectOrder,
}

impl Question {
    pub fn builtin() -> Self {
        let words = [
            "export", "default", "async", "function", "programingo", "()", "{", "return", "\"programingo\"", ";", "}",
        ];
        Question {
            name: "JavaScript Arrow Function".to_string(),
            keywords: words.iter().enumerate().map(|(i, w)| Token::new(i as TokenId, *w)).collect(),
            correct_order: CorrectOrder::Rule(OrderRule::Asc),
        }
    }

    pub fn from_json(s: &str) -> Result<Self> {
        let q: Question = serde_json::from_str(s).context("invalid question JSON")?;
        q.validate()?;
        Ok(q)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&s).with_context(|| format!("loading question from {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for k in &self.keywords {
            if !ids.insert(k.id) { bail!("duplicate keyword id {}", k.id); }
        }
        if let CorrectOrder::Explicit(order) = &self.correct_order {
            let listed: HashSet<TokenId> = order.iter().copied().collect();
            if order.len() != self.keywords.len() || listed != ids {
                bail!("correctOrder must list every keyword id exactly once");
            }
        }
        Ok(())
    }

    pub fn target_order(&self) -> Vec<TokenId> {
        match &self.correct_order {
            CorrectOrder::Rule(OrderRule::Asc) => {
                let mut ids: Vec<TokenId> = self.keywords.iter().map(|k| k.id).collect();
                ids.sort_unstable();
                ids
            }
            CorrectOrder::Explicit(order) => order.clone(),
        }
    }

    /// Fisher-Yates shuffle of the keywords, reproducible per seed.
    pub fn shuffled_keywords(&self, seed: u64) -> Vec<Token> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut out = self.keywords.clone();
        out.shuffle(&mut rng);
        out
    }

    pub fn is_solved(&self, state: &PuzzleState) -> bool {
        let target = self.target_order();
        state.slot_count() == target.len()
            && state.answer_ids().iter().zip(&target).all(|(got, want)| *got == Some(*want))
    }
}
