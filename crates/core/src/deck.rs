use crate::{Card, CardId, Rank, RngState, Suit};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One standard 52-card deck drawn front to back.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub draw: VecDeque<Card>,
    /// Cards passed over by an excluding draw.
    pub discard: Vec<Card>,
}

impl Deck {
    pub const SIZE: usize = 52;

    /// Builds an ordered deck whose ids start at `first_id`.
    pub fn standard52(first_id: u32) -> Self {
        let mut draw = VecDeque::with_capacity(Self::SIZE);
        let mut next_id = first_id;
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                draw.push_back(Card::new(CardId(next_id), suit, rank));
                next_id = next_id.saturating_add(1);
            }
        }
        Self {
            draw,
            discard: Vec::new(),
        }
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(self.draw.make_contiguous());
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.draw.pop_front()
    }

    /// Draws the next card whose rank is not `rank`. Every card of that rank
    /// found at the draw point is set aside in the discard pile, so the
    /// result never has the excluded rank.
    pub fn draw_excluding_rank(&mut self, rank: Rank) -> Option<Card> {
        while let Some(card) = self.draw.pop_front() {
            if card.rank != rank {
                return Some(card);
            }
            self.discard.push(card);
        }
        None
    }

    pub fn remaining(&self) -> usize {
        self.draw.len()
    }
}

/// Two decks' worth of cards. The first deck is exhausted entirely before
/// the second is touched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardSupply {
    pub decks: [Deck; 2],
}

impl Default for CardSupply {
    fn default() -> Self {
        Self::new()
    }
}

impl CardSupply {
    pub const SIZE: usize = Deck::SIZE * 2;

    /// Ordered, unshuffled supply with ids `1..=104`.
    pub fn new() -> Self {
        Self {
            decks: [
                Deck::standard52(1),
                Deck::standard52(1 + Deck::SIZE as u32),
            ],
        }
    }

    /// A fresh supply shuffled with `rng`.
    pub fn shuffled(rng: &mut RngState) -> Self {
        let mut supply = Self::new();
        supply.shuffle(rng);
        supply
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        for deck in &mut self.decks {
            deck.shuffle(rng);
        }
    }

    pub fn reset(&mut self, rng: &mut RngState) {
        *self = Self::shuffled(rng);
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.decks.iter_mut().find_map(Deck::draw)
    }

    pub fn draw_excluding_rank(&mut self, rank: Rank) -> Option<Card> {
        self.decks
            .iter_mut()
            .find_map(|deck| deck.draw_excluding_rank(rank))
    }

    pub fn remaining(&self) -> usize {
        self.decks.iter().map(Deck::remaining).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Deals round-robin: one card per hand per round, `hand_size` rounds.
    /// Stops early once the supply runs dry.
    pub fn deal(&mut self, hand_size: usize, hands: &mut [Vec<Card>]) {
        for _ in 0..hand_size {
            for hand in hands.iter_mut() {
                match self.draw() {
                    Some(card) => hand.push(card),
                    None => return,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_deck_is_exhausted_before_second() {
        let mut supply = CardSupply::new();
        for _ in 0..Deck::SIZE {
            let card = supply.draw().expect("card");
            assert!(card.id.0 <= Deck::SIZE as u32);
        }
        assert_eq!(supply.decks[0].remaining(), 0);
        let next = supply.draw().expect("card");
        assert_eq!(next.id, CardId(Deck::SIZE as u32 + 1));
    }

    #[test]
    fn excluding_draw_skips_consecutive_jacks() {
        let mut deck = Deck::standard52(1);
        deck.draw.clear();
        deck.draw.push_back(Card::new(CardId(1), Suit::Clubs, Rank::Jack));
        deck.draw.push_back(Card::new(CardId(2), Suit::Hearts, Rank::Jack));
        deck.draw.push_back(Card::new(CardId(3), Suit::Hearts, Rank::Two));
        let card = deck.draw_excluding_rank(Rank::Jack).expect("card");
        assert_eq!(card.id, CardId(3));
        assert_eq!(deck.discard.len(), 2);
    }

    #[test]
    fn deal_is_round_robin() {
        let mut supply = CardSupply::new();
        let mut hands = vec![Vec::new(), Vec::new()];
        supply.deal(2, &mut hands);
        assert_eq!(hands[0][0].id, CardId(1));
        assert_eq!(hands[1][0].id, CardId(2));
        assert_eq!(hands[0][1].id, CardId(3));
        assert_eq!(hands[1][1].id, CardId(4));
    }
}
