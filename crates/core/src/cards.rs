use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// Unique per physical card in a game; two cards with the same face have
/// different ids.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a card may be used against the board.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardRule {
    /// Two-eyed Jack: place on any open tile.
    PlaceAnywhere,
    /// One-eyed Jack: remove an unprotected marker.
    RemoveChip,
    /// Regular card: place on a tile seeded with the same face.
    Match,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(id: CardId, suit: Suit, rank: Rank) -> Self {
        Self { id, suit, rank }
    }

    /// Rank and suit equality, ignoring identity.
    pub fn same_face(&self, other: &Card) -> bool {
        self.rank == other.rank && self.suit == other.suit
    }

    pub fn rule(&self) -> CardRule {
        match (self.rank, self.suit) {
            (Rank::Jack, Suit::Clubs | Suit::Diamonds) => CardRule::PlaceAnywhere,
            (Rank::Jack, Suit::Hearts | Suit::Spades) => CardRule::RemoveChip,
            _ => CardRule::Match,
        }
    }

    pub fn is_two_eyed_jack(&self) -> bool {
        self.rule() == CardRule::PlaceAnywhere
    }

    pub fn is_one_eyed_jack(&self) -> bool {
        self.rule() == CardRule::RemoveChip
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jack_suits_split_into_wild_and_removal() {
        let wild = Card::new(CardId(1), Suit::Diamonds, Rank::Jack);
        let removal = Card::new(CardId(2), Suit::Spades, Rank::Jack);
        let plain = Card::new(CardId(3), Suit::Spades, Rank::Queen);
        assert_eq!(wild.rule(), CardRule::PlaceAnywhere);
        assert_eq!(removal.rule(), CardRule::RemoveChip);
        assert_eq!(plain.rule(), CardRule::Match);
    }

    #[test]
    fn identity_is_distinct_from_face() {
        let a = Card::new(CardId(1), Suit::Hearts, Rank::Four);
        let b = Card::new(CardId(2), Suit::Hearts, Rank::Four);
        assert!(a.same_face(&b));
        assert_ne!(a, b);
    }
}
