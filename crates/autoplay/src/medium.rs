use crate::heuristics::{
    adjacent_count, best_by, opponent_adjacent_count, removal_target, useful_positions,
    DecisionContext,
};
use crate::strategy::{fallback_card, playable, Decide};
use rusequence_core::{Card, CardId, CardRule, GameEngine, Position, RngState};

/// Extends its own lines and blocks obvious clusters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Medium;

impl Decide for Medium {
    fn select_card(
        &self,
        hand: &[Card],
        engine: &GameEngine,
        rng: &mut RngState,
    ) -> Option<CardId> {
        let ctx = DecisionContext::for_current(engine)?;
        let cards = playable(hand, engine);
        if let Some(card) = cards.iter().find(|card| card.is_two_eyed_jack()) {
            return Some(card.id);
        }
        let board = engine.board();
        let extends = cards.iter().find(|card| {
            card.rule() == CardRule::Match
                && engine
                    .legal_positions(card)
                    .iter()
                    .any(|pos| adjacent_count(board, *pos, ctx.team) >= 1)
        });
        if let Some(card) = extends {
            return Some(card.id);
        }
        fallback_card(&cards, engine, &ctx, rng)
    }

    fn select_position(
        &self,
        card: &Card,
        legal: &[Position],
        engine: &GameEngine,
        rng: &mut RngState,
    ) -> Option<Position> {
        let ctx = DecisionContext::for_current(engine)?;
        let board = engine.board();
        if card.rule() == CardRule::RemoveChip {
            let targets: Vec<Position> = useful_positions(engine, &ctx, card)
                .into_iter()
                .filter(|pos| legal.contains(pos))
                .collect();
            return removal_target(engine, &targets).or_else(|| rng.choose(legal).copied());
        }
        if let Some(pos) = best_by(legal, 1, |pos| adjacent_count(board, pos, ctx.team)) {
            return Some(pos);
        }
        if let Some(pos) = legal
            .iter()
            .find(|pos| opponent_adjacent_count(board, **pos, ctx.team) >= 2)
        {
            return Some(*pos);
        }
        rng.choose(legal).copied()
    }
}
