use crate::heuristics::{
    adjacent_count, best_by, completes_run, is_fork, is_forming_line, is_near_complete,
    nearest_center, opponent_adjacent_count, removal_target, useful_positions, DecisionContext,
};
use crate::strategy::{fallback_card, playable, Decide};
use rusequence_core::{Card, CardId, CardRule, GameEngine, Position, RngState, TeamColor};

/// Looks for wins, blocks, Jack plays and forks before falling back to
/// adjacency and the board center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hard;

/// Regular cards first so Jacks are kept for when nothing else works.
fn placement_order<'a>(cards: &[&'a Card]) -> Vec<&'a Card> {
    let regular = cards.iter().copied().filter(|card| card.rule() == CardRule::Match);
    let wild = cards
        .iter()
        .copied()
        .filter(|card| card.rule() == CardRule::PlaceAnywhere);
    regular.chain(wild).collect()
}

/// Opponents exactly one sequence short of the win threshold.
fn opponents_on_the_brink(engine: &GameEngine, ctx: &DecisionContext) -> Vec<TeamColor> {
    let threshold = engine.win_threshold();
    ctx.opponents
        .iter()
        .copied()
        .filter(|team| engine.team_sequence_count(*team) + 1 == threshold)
        .collect()
}

fn blocks_opponent(engine: &GameEngine, pos: Position, opponents: &[TeamColor]) -> bool {
    opponents
        .iter()
        .any(|team| completes_run(engine, pos, *team))
}

impl Hard {
    /// A card whose run reaches the win threshold right away.
    fn winning_card(engine: &GameEngine, ctx: &DecisionContext, cards: &[&Card]) -> Option<CardId> {
        if engine.team_sequence_count(ctx.team) + 1 < engine.win_threshold() {
            return None;
        }
        placement_order(cards)
            .into_iter()
            .find(|card| {
                engine
                    .legal_positions(card)
                    .iter()
                    .any(|pos| completes_run(engine, *pos, ctx.team))
            })
            .map(|card| card.id)
    }

    fn blocking_card(engine: &GameEngine, ctx: &DecisionContext, cards: &[&Card]) -> Option<CardId> {
        let brink = opponents_on_the_brink(engine, ctx);
        if brink.is_empty() {
            return None;
        }
        let placement = placement_order(cards).into_iter().find(|card| {
            engine
                .legal_positions(card)
                .iter()
                .any(|pos| blocks_opponent(engine, *pos, &brink))
        });
        if let Some(card) = placement {
            return Some(card.id);
        }
        cards
            .iter()
            .find(|card| {
                card.is_one_eyed_jack()
                    && useful_positions(engine, ctx, card).iter().any(|pos| {
                        engine
                            .board()
                            .marker_team(*pos)
                            .is_some_and(|owner| brink.contains(&owner))
                            && is_near_complete(engine, *pos)
                    })
            })
            .map(|card| card.id)
    }

    fn removal_card(engine: &GameEngine, ctx: &DecisionContext, cards: &[&Card]) -> Option<CardId> {
        let board = engine.board();
        cards
            .iter()
            .find(|card| {
                card.is_one_eyed_jack()
                    && useful_positions(engine, ctx, card)
                        .iter()
                        .any(|pos| is_forming_line(board, *pos))
            })
            .map(|card| card.id)
    }

    fn wild_card(engine: &GameEngine, ctx: &DecisionContext, cards: &[&Card]) -> Option<CardId> {
        let board = engine.board();
        cards
            .iter()
            .find(|card| {
                card.is_two_eyed_jack()
                    && engine.legal_positions(card).iter().any(|pos| {
                        completes_run(engine, *pos, ctx.team)
                            || adjacent_count(board, *pos, ctx.team) >= 2
                    })
            })
            .map(|card| card.id)
    }

    fn adjacency_card(engine: &GameEngine, ctx: &DecisionContext, cards: &[&Card]) -> Option<CardId> {
        let board = engine.board();
        let mut best: Option<(CardId, usize)> = None;
        for card in cards.iter().filter(|card| card.rule() == CardRule::Match) {
            for pos in engine.legal_positions(card) {
                let score = adjacent_count(board, pos, ctx.team);
                if score >= 1 && best.map_or(true, |(_, top)| score > top) {
                    best = Some((card.id, score));
                }
            }
        }
        best.map(|(id, _)| id)
    }

    fn crowding_card(engine: &GameEngine, ctx: &DecisionContext, cards: &[&Card]) -> Option<CardId> {
        let board = engine.board();
        cards
            .iter()
            .find(|card| {
                card.rule() == CardRule::Match
                    && engine
                        .legal_positions(card)
                        .iter()
                        .any(|pos| opponent_adjacent_count(board, *pos, ctx.team) >= 2)
            })
            .map(|card| card.id)
    }
}

impl Decide for Hard {
    fn select_card(
        &self,
        hand: &[Card],
        engine: &GameEngine,
        rng: &mut RngState,
    ) -> Option<CardId> {
        let ctx = DecisionContext::for_current(engine)?;
        let cards = playable(hand, engine);
        if cards.is_empty() {
            return None;
        }
        Self::winning_card(engine, &ctx, &cards)
            .or_else(|| Self::blocking_card(engine, &ctx, &cards))
            .or_else(|| Self::removal_card(engine, &ctx, &cards))
            .or_else(|| Self::wild_card(engine, &ctx, &cards))
            .or_else(|| Self::adjacency_card(engine, &ctx, &cards))
            .or_else(|| Self::crowding_card(engine, &ctx, &cards))
            .or_else(|| fallback_card(&cards, engine, &ctx, rng))
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
        if let Some(pos) = legal
            .iter()
            .find(|pos| completes_run(engine, **pos, ctx.team))
        {
            return Some(*pos);
        }
        if let Some(pos) = legal
            .iter()
            .find(|pos| blocks_opponent(engine, **pos, &ctx.opponents))
        {
            return Some(*pos);
        }
        if let Some(pos) = legal.iter().find(|pos| is_fork(board, **pos, ctx.team)) {
            return Some(*pos);
        }
        if let Some(pos) = best_by(legal, 1, |pos| adjacent_count(board, pos, ctx.team)) {
            return Some(pos);
        }
        nearest_center(board, legal).or_else(|| rng.choose(legal).copied())
    }
}
