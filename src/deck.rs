use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::GameError;
use crate::player::{Role, ROLE_VARIANTS};

// start at 3 copies per role and add 2 until every player can be dealt 2
// cards with slack left for exchanges
pub(crate) fn copies_per_role(num_players: usize) -> usize {
    let mut copies = 3;
    while 2 * num_players >= 5 * copies {
        copies += 2;
    }
    copies
}

/// Shuffled multiset of role cards. Cards only ever move between the deck and
/// player hands, so `remaining() + Σ hand sizes` stays constant for the whole
/// game.
#[derive(Clone, Debug)]
pub struct Deck {
    pub(crate) cards: Vec<Role>,
}

impl Deck {
    pub fn new<R: Rng>(copies_per_role: usize, rng: &mut R) -> Self {
        let mut cards: Vec<Role> = ROLE_VARIANTS
            .iter()
            .flat_map(|&role| std::iter::repeat(role).take(copies_per_role))
            .collect();
        cards.shuffle(rng);
        Self { cards }
    }

    pub fn draw(&mut self, n: usize) -> Result<Vec<Role>, GameError> {
        if n > self.cards.len() {
            return Err(GameError::InsufficientCards {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..n).collect())
    }

    // reshuffles on every return so nobody can track deck order across
    // exchanges
    pub fn return_cards<R: Rng>(&mut self, cards: Vec<Role>, rng: &mut R) {
        self.cards.extend(cards);
        self.cards.shuffle(rng);
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}
