//! Card instances and the capped hand.

use arrayvec::ArrayVec;

use super::CardId;
use crate::config::GameConfig;
use crate::env::{CardDefinition, CardEffect, CardKind};
use crate::rng::RngStream;

/// A concrete card instance.
///
/// The effect is copied from the definition at creation so ally-granted cards
/// keep their own effect regardless of instance id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub id: CardId,
    /// Definition id this card was created from.
    pub definition: String,
    pub name: String,
    pub kind: CardKind,
    pub effect: CardEffect,
}

impl Card {
    pub fn from_definition(id: CardId, definition_id: impl Into<String>, def: &CardDefinition) -> Self {
        Self {
            id,
            definition: definition_id.into(),
            name: def.name.clone(),
            kind: def.kind,
            effect: def.effect.clone(),
        }
    }
}

/// Result of offering a card to the hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The hand was full; the rejected card is handed back.
    Overflow(Card),
}

/// Ordered hand, oldest card first. Capacity is enforced by the container.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hand {
    cards: ArrayVec<Card, { GameConfig::HAND_CAP }>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, card: Card) -> AddOutcome {
        match self.cards.try_push(card) {
            Ok(()) => AddOutcome::Added,
            Err(err) => AddOutcome::Overflow(err.element()),
        }
    }

    pub fn remove(&mut self, id: CardId) -> Option<Card> {
        let index = self.cards.iter().position(|card| card.id == id)?;
        Some(self.cards.remove(index))
    }

    pub fn remove_oldest(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.get(id).is_some()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cards.is_full()
    }
}

/// Hand plus draw and discard pools.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardPiles {
    pub hand: Hand,
    pub deck: Vec<Card>,
    pub discard: Vec<Card>,
    /// Card waiting for the player to choose what to drop.
    pub pending_overflow: Option<Card>,
}

impl CardPiles {
    /// Draws a uniformly chosen deck card, reshuffling the discard pile into
    /// the deck when it runs dry.
    pub fn draw(&mut self, rng: &mut RngStream) -> Option<Card> {
        if self.deck.is_empty() {
            self.deck.append(&mut self.discard);
        }
        if self.deck.is_empty() {
            return None;
        }
        let index = rng.next_int(0, (self.deck.len() - 1) as u32) as usize;
        Some(self.deck.remove(index))
    }

    pub fn has_pending_overflow(&self) -> bool {
        self.pending_overflow.is_some()
    }
}
