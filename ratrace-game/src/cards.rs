//! Card catalogs for the opportunity, market, and doodad decks.
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEFAULT_CARD_DATA: &str = include_str!("../data/cards.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealSize {
    SmallDeal,
    BigDeal,
}

/// An investment offered on an Opportunity space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityCard {
    pub id: u32,
    pub name: String,
    pub deal: DealSize,
    pub down_payment: i64,
    pub total_cost: i64,
    pub monthly_income: i64,
    pub total_value: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_buyable")]
    pub buyable: bool,
}

const fn default_buyable() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketAssetType {
    RealEstate,
    Stocks,
    Business,
}

/// A buyer offer shown on a Market space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCard {
    pub id: u32,
    pub asset_type: MarketAssetType,
    pub asset_name: String,
    pub selling_price: i64,
    #[serde(default)]
    pub description: String,
}

/// An unplanned expense; some add a permanent monthly cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoodadCard {
    pub id: u32,
    pub name: String,
    pub cost: i64,
    #[serde(default)]
    pub expense_increase: i64,
    #[serde(default)]
    pub description: String,
}

/// Card drawn this turn, exposed read-only to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "card", rename_all = "snake_case")]
pub enum DrawnCard {
    Opportunity(OpportunityCard),
    Market(MarketCard),
    Doodad(DoodadCard),
}

impl DrawnCard {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Opportunity(card) => &card.name,
            Self::Market(card) => &card.asset_name,
            Self::Doodad(card) => &card.name,
        }
    }
}

/// All three card catalogs.
///
/// The catalog, not the deck, is the source of truth for card content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CardCatalog {
    #[serde(default)]
    pub opportunities: Vec<OpportunityCard>,
    #[serde(default)]
    pub markets: Vec<MarketCard>,
    #[serde(default)]
    pub doodads: Vec<DoodadCard>,
}

impl CardCatalog {
    /// Load card catalogs from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or a catalog is empty.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let catalog: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::parse("cards", &err))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Every deck needs at least one card to draw from.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCatalog`] naming the first empty catalog.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.opportunities.is_empty() {
            return Err(ConfigError::EmptyCatalog {
                catalog: "opportunity",
            });
        }
        if self.markets.is_empty() {
            return Err(ConfigError::EmptyCatalog { catalog: "market" });
        }
        if self.doodads.is_empty() {
            return Err(ConfigError::EmptyCatalog { catalog: "doodad" });
        }
        Ok(())
    }

    /// The standard card set shipped with the game.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_CARD_DATA).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_parses() {
        let catalog = CardCatalog::load_from_static();
        assert_eq!(catalog.opportunities.len(), 5);
        assert_eq!(catalog.markets.len(), 3);
        assert_eq!(catalog.doodads.len(), 5);
        let boat = catalog.doodads.iter().find(|d| d.name == "Boat Purchase").unwrap();
        assert_eq!(boat.cost, 5000);
        assert_eq!(boat.expense_increase, 300);
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let json = r#"{"opportunities": [], "markets": [], "doodads": []}"#;
        assert_eq!(
            CardCatalog::from_json(json),
            Err(ConfigError::EmptyCatalog {
                catalog: "opportunity"
            })
        );
    }

    #[test]
    fn drawn_card_serializes_with_type_tag() {
        let catalog = CardCatalog::load_from_static();
        let drawn = DrawnCard::Market(catalog.markets[0].clone());
        let value = serde_json::to_value(&drawn).unwrap();
        assert_eq!(value["type"], "market");
        assert_eq!(drawn.name(), "Apartment Building");
    }
}
