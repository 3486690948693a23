use crate::{Card, CardId, Phase, Position, Sequence, TeamColor};
use serde::{Deserialize, Serialize};

/// State changes published by engine commands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    GameStarted {
        players: usize,
        hand_size: usize,
    },
    GameRestarted {
        players: usize,
    },
    GameReset,
    CardSelected {
        player: usize,
        card: CardId,
        phase: Phase,
        legal: usize,
    },
    SelectionCleared {
        player: usize,
    },
    MarkerPlaced {
        player: usize,
        team: TeamColor,
        card: Card,
        position: Position,
    },
    MarkerRemoved {
        player: usize,
        team: TeamColor,
        card: Card,
        position: Position,
    },
    SequenceCompleted {
        sequence: Sequence,
        team_total: usize,
    },
    CardDrawn {
        player: usize,
        card: CardId,
    },
    DeadCardReplaced {
        player: usize,
        discarded: Card,
        drawn: Option<CardId>,
    },
    TurnAdvanced {
        from: usize,
        to: usize,
    },
    GameWon {
        team: TeamColor,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
