use crate::heuristics::{useful_positions, DecisionContext};
use crate::{Hard, Medium};
use rusequence_core::{Card, CardId, Difficulty, GameEngine, Position, RngState};

/// The two calls every automated player answers.
pub trait Decide {
    fn select_card(&self, hand: &[Card], engine: &GameEngine, rng: &mut RngState)
        -> Option<CardId>;

    fn select_position(
        &self,
        card: &Card,
        legal: &[Position],
        engine: &GameEngine,
        rng: &mut RngState,
    ) -> Option<Position>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Easy(Easy),
    Medium(Medium),
    Hard(Hard),
}

impl Strategy {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Strategy::Easy(Easy),
            Difficulty::Medium => Strategy::Medium(Medium),
            Difficulty::Hard => Strategy::Hard(Hard),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        match self {
            Strategy::Easy(_) => Difficulty::Easy,
            Strategy::Medium(_) => Difficulty::Medium,
            Strategy::Hard(_) => Difficulty::Hard,
        }
    }
}

impl Decide for Strategy {
    fn select_card(
        &self,
        hand: &[Card],
        engine: &GameEngine,
        rng: &mut RngState,
    ) -> Option<CardId> {
        match self {
            Strategy::Easy(tier) => tier.select_card(hand, engine, rng),
            Strategy::Medium(tier) => tier.select_card(hand, engine, rng),
            Strategy::Hard(tier) => tier.select_card(hand, engine, rng),
        }
    }

    fn select_position(
        &self,
        card: &Card,
        legal: &[Position],
        engine: &GameEngine,
        rng: &mut RngState,
    ) -> Option<Position> {
        match self {
            Strategy::Easy(tier) => tier.select_position(card, legal, engine, rng),
            Strategy::Medium(tier) => tier.select_position(card, legal, engine, rng),
            Strategy::Hard(tier) => tier.select_position(card, legal, engine, rng),
        }
    }
}

/// Cards in `hand` with at least one legal position.
pub(crate) fn playable<'a>(hand: &'a [Card], engine: &GameEngine) -> Vec<&'a Card> {
    hand.iter()
        .filter(|card| !engine.legal_positions(card).is_empty())
        .collect()
}

pub(crate) fn random_card(cards: &[&Card], rng: &mut RngState) -> Option<CardId> {
    rng.choose(cards).map(|card| card.id)
}

/// Random playable card, preferring ones that do not have to hit an own
/// marker.
pub(crate) fn fallback_card(
    cards: &[&Card],
    engine: &GameEngine,
    ctx: &DecisionContext,
    rng: &mut RngState,
) -> Option<CardId> {
    let useful: Vec<&Card> = cards
        .iter()
        .copied()
        .filter(|card| !useful_positions(engine, ctx, card).is_empty())
        .collect();
    random_card(&useful, rng).or_else(|| random_card(cards, rng))
}

/// Uniform choices, with no lookahead at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Easy;

impl Decide for Easy {
    fn select_card(
        &self,
        hand: &[Card],
        engine: &GameEngine,
        rng: &mut RngState,
    ) -> Option<CardId> {
        random_card(&playable(hand, engine), rng)
    }

    fn select_position(
        &self,
        _card: &Card,
        legal: &[Position],
        _engine: &GameEngine,
        rng: &mut RngState,
    ) -> Option<Position> {
        rng.choose(legal).copied()
    }
}
