use crate::{
    legal_positions, protected_tiles, team_sequence_count, teams_of, Board, Card, CardId,
    CardRule, CardSupply, EngineSnapshot, Event, EventBus, Phase, Player, Position, RngState,
    RulesConfig, Sequence, SequenceDetector, Team, TeamColor,
};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info};

const TABLE_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("no players to play with")]
    NoPlayers,
    #[error("game is over")]
    GameOver,
    #[error("card {0} is not in the current hand")]
    UnknownCard(CardId),
    #[error("{card} cannot be played at {position}")]
    IllegalPlacement { card: Card, position: Position },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayAction {
    Placed,
    Removed,
}

/// What a successful `perform_play` changed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayOutcome {
    pub player: usize,
    pub card: Card,
    pub position: Position,
    pub action: PlayAction,
    pub new_sequences: Vec<Sequence>,
    pub drawn: Option<CardId>,
    pub winner: Option<TeamColor>,
}

#[derive(Debug, Clone)]
pub struct GameEngine {
    config: RulesConfig,
    seed: u64,
    tables_dealt: u64,
    supply: CardSupply,
    board: Board,
    players: Vec<Player>,
    current: usize,
    phase: Phase,
    selected: Option<CardId>,
    detector: SequenceDetector,
    sequences: Vec<Sequence>,
    protected: BTreeSet<Position>,
    winner: Option<TeamColor>,
}

impl GameEngine {
    /// A player-less engine with a freshly seeded board.
    pub fn new(config: RulesConfig, seed: u64) -> Self {
        let (board, supply) = Self::fresh_table(&config, seed, 0);
        let detector = SequenceDetector::new(config.run_length);
        Self {
            config,
            seed,
            tables_dealt: 1,
            supply,
            board,
            players: Vec::new(),
            current: 0,
            phase: Phase::TurnStart,
            selected: None,
            detector,
            sequences: Vec::new(),
            protected: BTreeSet::new(),
            winner: None,
        }
    }

    /// The layout is drawn from its own shuffled supply so the play supply
    /// starts with all 104 cards. Every table gets its own stream, derived
    /// from the game seed and the table's ordinal.
    fn fresh_table(config: &RulesConfig, seed: u64, table: u64) -> (Board, CardSupply) {
        let mut rng = RngState::from_seed(seed.wrapping_add(table.wrapping_mul(TABLE_STRIDE)));
        let mut layout = CardSupply::shuffled(&mut rng);
        let board = Board::seeded(config.board_size, &mut layout);
        let supply = CardSupply::shuffled(&mut rng);
        (board, supply)
    }

    fn reset_table(&mut self) {
        let (board, supply) = Self::fresh_table(&self.config, self.seed, self.tables_dealt);
        self.tables_dealt += 1;
        self.board = board;
        self.supply = supply;
        self.current = 0;
        self.phase = Phase::TurnStart;
        self.selected = None;
        self.sequences.clear();
        self.protected.clear();
        self.winner = None;
    }

    fn deal_hands(&mut self) -> usize {
        let hand_size = self.config.hand_size_for(self.players.len());
        let mut hands: Vec<Vec<Card>> = vec![Vec::new(); self.players.len()];
        self.supply.deal(hand_size, &mut hands);
        for (player, hand) in self.players.iter_mut().zip(hands) {
            player.hand = hand;
        }
        hand_size
    }

    pub fn start_game(
        &mut self,
        players: Vec<Player>,
        events: &mut EventBus,
    ) -> Result<(), EngineError> {
        if players.is_empty() {
            return Err(EngineError::NoPlayers);
        }
        self.players = players;
        for player in &mut self.players {
            player.hand.clear();
        }
        self.reset_table();
        let hand_size = self.deal_hands();
        info!(
            players = self.players.len(),
            hand_size,
            remaining = self.supply.remaining(),
            "game started"
        );
        events.push(Event::GameStarted {
            players: self.players.len(),
            hand_size,
        });
        Ok(())
    }

    /// Same players, same seating, new board and hands.
    pub fn restart_game(&mut self, events: &mut EventBus) -> Result<(), EngineError> {
        if self.players.is_empty() {
            return Err(EngineError::NoPlayers);
        }
        for player in &mut self.players {
            player.hand.clear();
        }
        self.reset_table();
        self.deal_hands();
        info!(players = self.players.len(), "game restarted");
        events.push(Event::GameRestarted {
            players: self.players.len(),
        });
        Ok(())
    }

    pub fn reset_game(&mut self, events: &mut EventBus) {
        self.players.clear();
        self.reset_table();
        debug!("game reset");
        events.push(Event::GameReset);
    }

    pub fn select_card(
        &mut self,
        card_id: CardId,
        events: &mut EventBus,
    ) -> Result<Phase, EngineError> {
        if self.phase == Phase::GameOver {
            return Err(EngineError::GameOver);
        }
        let player = self.current_player().ok_or(EngineError::NoPlayers)?;
        let card = *player
            .card(card_id)
            .ok_or(EngineError::UnknownCard(card_id))?;
        let legal = self.legal_positions(&card).len();
        self.selected = Some(card_id);
        self.phase = if legal == 0 {
            Phase::DeadCard
        } else {
            match card.rule() {
                CardRule::PlaceAnywhere => Phase::WildJackSelected,
                CardRule::RemoveChip => Phase::RemovalJackSelected,
                CardRule::Match => Phase::CardSelected,
            }
        };
        debug!(player = self.current, card = %card, legal, phase = ?self.phase, "card selected");
        events.push(Event::CardSelected {
            player: self.current,
            card: card_id,
            phase: self.phase,
            legal,
        });
        Ok(self.phase)
    }

    pub fn clear_selection(&mut self, events: &mut EventBus) {
        if self.phase == Phase::GameOver || self.selected.is_none() {
            return;
        }
        self.selected = None;
        self.phase = Phase::TurnStart;
        events.push(Event::SelectionCleared {
            player: self.current,
        });
    }

    /// Plays `card_id` from the current hand at `position`. On error nothing
    /// changes and the card stays in hand.
    pub fn perform_play(
        &mut self,
        position: Position,
        card_id: CardId,
        events: &mut EventBus,
    ) -> Result<PlayOutcome, EngineError> {
        if self.phase == Phase::GameOver {
            return Err(EngineError::GameOver);
        }
        let player_index = self.current;
        let player = self.current_player().ok_or(EngineError::NoPlayers)?;
        let team = player.team;
        let card = *player
            .card(card_id)
            .ok_or(EngineError::UnknownCard(card_id))?;
        if !self.can_place(position, &card) {
            debug!(card = %card, %position, "placement rejected");
            return Err(EngineError::IllegalPlacement { card, position });
        }
        self.players[player_index].take_card(card_id);

        let mut outcome = PlayOutcome {
            player: player_index,
            card,
            position,
            action: PlayAction::Placed,
            new_sequences: Vec::new(),
            drawn: None,
            winner: None,
        };

        match card.rule() {
            CardRule::RemoveChip => {
                self.board.clear_marker(position);
                outcome.action = PlayAction::Removed;
                debug!(player = player_index, card = %card, %position, "marker removed");
                events.push(Event::MarkerRemoved {
                    player: player_index,
                    team,
                    card,
                    position,
                });
            }
            CardRule::PlaceAnywhere | CardRule::Match => {
                self.board.place_marker(position, team);
                debug!(player = player_index, %team, card = %card, %position, "marker placed");
                events.push(Event::MarkerPlaced {
                    player: player_index,
                    team,
                    card,
                    position,
                });
                let added = self
                    .detector
                    .register(&self.board, position, team, &mut self.sequences);
                if !added.is_empty() {
                    self.protected = protected_tiles(&self.sequences);
                    let team_total = self.team_sequence_count(team);
                    for sequence in &added {
                        info!(%team, axis = ?sequence.axis, anchor = %sequence.anchor, team_total, "sequence completed");
                        events.push(Event::SequenceCompleted {
                            sequence: sequence.clone(),
                            team_total,
                        });
                    }
                }
                outcome.new_sequences = added;

                if let Some(winner) = self.evaluate_game_state() {
                    self.winner = Some(winner);
                    self.selected = None;
                    self.phase = Phase::GameOver;
                    outcome.winner = Some(winner);
                    info!(team = %winner, "game won");
                    events.push(Event::GameWon { team: winner });
                    return Ok(outcome);
                }
            }
        }

        outcome.drawn = self.draw_for_current(events);
        self.advance_turn(events);
        Ok(outcome)
    }

    fn draw_for_current(&mut self, events: &mut EventBus) -> Option<CardId> {
        let card = self.supply.draw()?;
        let player = self.current;
        self.players[player].hand.push(card);
        events.push(Event::CardDrawn {
            player,
            card: card.id,
        });
        Some(card.id)
    }

    /// Discards a card and draws a replacement without ending the turn.
    pub fn replace_dead_card(
        &mut self,
        card_id: CardId,
        events: &mut EventBus,
    ) -> Result<Option<CardId>, EngineError> {
        if self.phase == Phase::GameOver {
            return Err(EngineError::GameOver);
        }
        let player = self.current;
        let discarded = self
            .players
            .get_mut(player)
            .ok_or(EngineError::NoPlayers)?
            .take_card(card_id)
            .ok_or(EngineError::UnknownCard(card_id))?;
        let drawn = self.supply.draw().map(|card| {
            self.players[player].hand.push(card);
            card.id
        });
        self.selected = None;
        self.phase = Phase::TurnStart;
        debug!(player, card = %discarded, ?drawn, "dead card replaced");
        events.push(Event::DeadCardReplaced {
            player,
            discarded,
            drawn,
        });
        Ok(drawn)
    }

    pub fn advance_turn(&mut self, events: &mut EventBus) {
        if self.players.is_empty() {
            return;
        }
        let from = self.current;
        self.current = (self.current + 1) % self.players.len();
        self.selected = None;
        if self.phase != Phase::GameOver {
            self.phase = Phase::TurnStart;
        }
        events.push(Event::TurnAdvanced {
            from,
            to: self.current,
        });
    }

    /// The team meeting the sequence threshold, if any.
    pub fn evaluate_game_state(&self) -> Option<TeamColor> {
        if self.winner.is_some() {
            return self.winner;
        }
        let threshold = self.win_threshold();
        teams_of(&self.players)
            .into_iter()
            .map(|team| team.color)
            .find(|color| self.team_sequence_count(*color) >= threshold)
    }

    pub fn legal_positions(&self, card: &Card) -> Vec<Position> {
        legal_positions(&self.board, &self.protected, card)
    }

    pub fn can_place(&self, position: Position, card: &Card) -> bool {
        self.legal_positions(card).contains(&position)
    }

    pub fn legal_positions_for_selection(&self) -> Vec<Position> {
        self.selected_card()
            .map(|card| self.legal_positions(&card))
            .unwrap_or_default()
    }

    pub fn selected_card(&self) -> Option<Card> {
        let id = self.selected?;
        self.current_player()?.card(id).copied()
    }

    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn teams(&self) -> Vec<Team> {
        teams_of(&self.players)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    pub fn protected(&self) -> &BTreeSet<Position> {
        &self.protected
    }

    pub fn detector(&self) -> SequenceDetector {
        self.detector
    }

    pub fn winner(&self) -> Option<TeamColor> {
        self.winner
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn supply_remaining(&self) -> usize {
        self.supply.remaining()
    }

    pub fn win_threshold(&self) -> usize {
        self.config.win_threshold(self.players.len())
    }

    pub fn team_sequence_count(&self, team: TeamColor) -> usize {
        team_sequence_count(&self.sequences, team)
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            config: self.config.clone(),
            rng_seed: self.seed,
            tables_dealt: self.tables_dealt,
            players: self.players.clone(),
            current: self.current,
            phase: self.phase,
            board: self.board.clone(),
            selected: self.selected,
            detector: self.detector,
            sequences: self.sequences.clone(),
            protected: self.protected.clone(),
            winner: self.winner,
            supply: self.supply.clone(),
        }
    }

    /// Resumes from a snapshot. Later restarts deal the same tables the
    /// snapshotted engine would have dealt.
    pub fn restore(snapshot: EngineSnapshot) -> Self {
        Self {
            config: snapshot.config,
            seed: snapshot.rng_seed,
            tables_dealt: snapshot.tables_dealt,
            supply: snapshot.supply,
            board: snapshot.board,
            players: snapshot.players,
            current: snapshot.current,
            phase: snapshot.phase,
            selected: snapshot.selected,
            detector: snapshot.detector,
            sequences: snapshot.sequences,
            protected: snapshot.protected,
            winner: snapshot.winner,
        }
    }

    /// Test and tooling hook: mutable board access outside of turn rules.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replaces the current player's hand, for scripted setups.
    pub fn set_hand(&mut self, player: usize, hand: Vec<Card>) {
        if let Some(slot) = self.players.get_mut(player) {
            slot.hand = hand;
        }
    }

    /// Runs detection at `position` for `team`, registering any new runs.
    pub fn detect_at(&mut self, position: Position, team: TeamColor) -> bool {
        let qualified = self
            .detector
            .detect(&self.board, position, team, &mut self.sequences);
        self.protected = protected_tiles(&self.sequences);
        qualified
    }
}
