//! Finite card decks that refill from their catalog when exhausted.
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, DoodadCard, MarketCard, OpportunityCard};

/// A shuffled draw pile backed by its full catalog.
///
/// Cards are drawn from the back. When the pile is empty a fresh copy of the
/// catalog is shuffled in first, so no card repeats before the pile runs out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck<T> {
    catalog: Vec<T>,
    cards: Vec<T>,
    #[serde(default)]
    reshuffles: u32,
}

impl<T: Clone> Deck<T> {
    /// Build a deck holding one shuffled copy of `catalog`.
    pub fn new<R: Rng + ?Sized>(catalog: Vec<T>, rng: &mut R) -> Self {
        let mut cards = catalog.clone();
        cards.shuffle(rng);
        Self {
            catalog,
            cards,
            reshuffles: 0,
        }
    }

    /// Draw one card, reshuffling the catalog into the deck if it is empty.
    ///
    /// Returns `None` only when the catalog itself has no cards.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<T> {
        if self.cards.is_empty() {
            if self.catalog.is_empty() {
                return None;
            }
            self.cards = self.catalog.clone();
            self.cards.shuffle(rng);
            self.reshuffles = self.reshuffles.saturating_add(1);
            log::debug!("deck exhausted; reshuffled {} cards", self.cards.len());
        }
        self.cards.pop()
    }

    /// Cards left before the next reshuffle.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Times the deck has refilled itself from the catalog.
    #[must_use]
    pub const fn reshuffles(&self) -> u32 {
        self.reshuffles
    }

    #[must_use]
    pub fn catalog(&self) -> &[T] {
        &self.catalog
    }
}

impl<T> Default for Deck<T> {
    fn default() -> Self {
        Self {
            catalog: Vec::new(),
            cards: Vec::new(),
            reshuffles: 0,
        }
    }
}

/// The three decks used on the Rat Race board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Decks {
    pub opportunity: Deck<OpportunityCard>,
    pub market: Deck<MarketCard>,
    pub doodad: Deck<DoodadCard>,
}

impl Decks {
    pub fn from_catalog<R: Rng + ?Sized>(catalog: &CardCatalog, rng: &mut R) -> Self {
        Self {
            opportunity: Deck::new(catalog.opportunities.clone(), rng),
            market: Deck::new(catalog.markets.clone(), rng),
            doodad: Deck::new(catalog.doodads.clone(), rng),
        }
    }

    pub fn draw_opportunity<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<OpportunityCard> {
        self.opportunity.draw(rng)
    }

    pub fn draw_market<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<MarketCard> {
        self.market.draw(rng)
    }

    pub fn draw_doodad<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<DoodadCard> {
        self.doodad.draw(rng)
    }
}
