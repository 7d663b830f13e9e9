use crate::domain::{board::ColumnId, card::CardId};
use uuid::Uuid;

/// Source of fresh identifiers for columns and cards
pub trait IdGenerator: Send {
    fn next_column_id(&mut self) -> ColumnId;

    fn next_card_id(&mut self) -> CardId;
}

/// Random short identifiers such as `col_k3x9a0z` and `c_81bq4d7`
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl RandomIds {
    const SUFFIX_LEN: usize = 7;
    const ALPHABET: &'static [u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    fn token(prefix: &str) -> String {
        let mut bits = Uuid::new_v4().as_u128();
        let mut suffix = String::with_capacity(Self::SUFFIX_LEN);
        for _ in 0..Self::SUFFIX_LEN {
            suffix.push(Self::ALPHABET[(bits % 36) as usize] as char);
            bits /= 36;
        }
        format!("{}_{}", prefix, suffix)
    }
}

impl IdGenerator for RandomIds {
    fn next_column_id(&mut self) -> ColumnId {
        ColumnId::new(Self::token(ColumnId::PREFIX))
    }

    fn next_card_id(&mut self) -> CardId {
        CardId::new(Self::token(CardId::PREFIX))
    }
}

/// Deterministic identifiers (`col_1`, `c_2`, ...) drawn from one counter
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u32,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    fn bump(&mut self) -> u32 {
        let n = self.next;
        self.next += 1;
        n
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_column_id(&mut self) -> ColumnId {
        let n = self.bump();
        ColumnId::new(format!("{}_{}", ColumnId::PREFIX, n))
    }

    fn next_card_id(&mut self) -> CardId {
        let n = self.bump();
        CardId::new(format!("{}_{}", CardId::PREFIX, n))
    }
}
