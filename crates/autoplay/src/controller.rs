use crate::{AutoplayError, Decide, Strategy, ThinkingDelay};
use rusequence_core::{
    Card, CardId, Difficulty, EngineError, EventBus, GameEngine, PlayOutcome, RngState,
};
use std::thread;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq)]
pub enum TurnReport {
    Played(PlayOutcome),
    DeadCardReplaced { card: CardId, drawn: Option<CardId> },
    /// Nothing in hand: the turn simply moves on.
    Passed,
}

/// Drives one automated seat: pause, decide, then apply to the engine in a
/// single synchronous chain.
#[derive(Debug, Clone)]
pub struct TurnController {
    strategy: Strategy,
    delay: ThinkingDelay,
    rng: RngState,
}

impl TurnController {
    pub fn new(difficulty: Difficulty, delay: ThinkingDelay, seed: u64) -> Self {
        Self {
            strategy: Strategy::for_difficulty(difficulty),
            delay,
            rng: RngState::from_seed(seed),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.strategy.difficulty()
    }

    fn think(&self) {
        let pause = self.delay.for_difficulty(self.difficulty());
        if !pause.is_zero() {
            thread::sleep(pause);
        }
    }

    #[instrument(skip(self, engine, events), fields(difficulty = ?self.difficulty()))]
    pub fn play_turn(
        &mut self,
        engine: &mut GameEngine,
        events: &mut EventBus,
    ) -> Result<TurnReport, AutoplayError> {
        self.think();
        let hand: Vec<Card> = engine
            .current_player()
            .map(|player| player.hand.clone())
            .ok_or(EngineError::NoPlayers)?;

        let Some(card_id) = self.strategy.select_card(&hand, engine, &mut self.rng) else {
            return Self::fallback_turn(&hand, engine, events);
        };
        engine.select_card(card_id, events)?;
        let legal = engine.legal_positions_for_selection();
        let Some(card) = engine.selected_card() else {
            return Self::fallback_turn(&hand, engine, events);
        };
        let Some(position) = self
            .strategy
            .select_position(&card, &legal, engine, &mut self.rng)
        else {
            engine.clear_selection(events);
            return Self::fallback_turn(&hand, engine, events);
        };
        debug!(card = %card, %position, "automated play");
        let outcome = engine.perform_play(position, card_id, events)?;
        Ok(TurnReport::Played(outcome))
    }

    /// Used when the strategy picked nothing: replaces the first dead card,
    /// otherwise plays the first legal move, otherwise passes.
    fn fallback_turn(
        hand: &[Card],
        engine: &mut GameEngine,
        events: &mut EventBus,
    ) -> Result<TurnReport, AutoplayError> {
        let dead = hand
            .iter()
            .find(|card| engine.legal_positions(card).is_empty());
        let Some(card) = dead else {
            let first_move = hand.iter().find_map(|card| {
                engine
                    .legal_positions(card)
                    .first()
                    .map(|position| (card.id, *position))
            });
            let Some((card_id, position)) = first_move else {
                debug!("empty hand, passing");
                engine.advance_turn(events);
                return Ok(TurnReport::Passed);
            };
            engine.select_card(card_id, events)?;
            let outcome = engine.perform_play(position, card_id, events)?;
            return Ok(TurnReport::Played(outcome));
        };
        engine.select_card(card.id, events)?;
        let drawn = engine.replace_dead_card(card.id, events)?;
        debug!(card = %card, ?drawn, "dead card replaced");
        Ok(TurnReport::DeadCardReplaced {
            card: card.id,
            drawn,
        })
    }
}
