//! # Catalog Module
//!
//! Garment types, budget tiers and the static list of shops the bot links to
//! once a size is known.

use anyhow::Result;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::sizing::SizeLabel;

/// Garment type offered after the size is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GarmentType {
    Daily,
    Sports,
    Party,
}

impl GarmentType {
    pub const ALL: [GarmentType; 3] = [GarmentType::Daily, GarmentType::Sports, GarmentType::Party];

    /// Stable identifier used in callback data
    pub fn id(&self) -> &'static str {
        match self {
            GarmentType::Daily => "daily",
            GarmentType::Sports => "sports",
            GarmentType::Party => "party",
        }
    }

    /// Localization key of the button label
    pub fn label_key(&self) -> &'static str {
        match self {
            GarmentType::Daily => "garment-daily",
            GarmentType::Sports => "garment-sports",
            GarmentType::Party => "garment-party",
        }
    }

    /// Localization key of the advice shown with the product list
    pub fn tip_key(&self) -> &'static str {
        match self {
            GarmentType::Daily => "tip-daily",
            GarmentType::Sports => "tip-sports",
            GarmentType::Party => "tip-party",
        }
    }

    fn search_terms(&self) -> &'static str {
        match self {
            GarmentType::Daily => "cotton wireless bra",
            GarmentType::Sports => "sports bra",
            GarmentType::Party => "padded party wear bra",
        }
    }
}

impl fmt::Display for GarmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for GarmentType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(GarmentType::Daily),
            "sports" | "sport" => Ok(GarmentType::Sports),
            "party" => Ok(GarmentType::Party),
            _ => Err(()),
        }
    }
}

/// Price bracket chosen before the product list is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetTier {
    Low,
    Mid,
    High,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 3] = [BudgetTier::Low, BudgetTier::Mid, BudgetTier::High];

    pub fn id(&self) -> &'static str {
        match self {
            BudgetTier::Low => "low",
            BudgetTier::Mid => "mid",
            BudgetTier::High => "high",
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            BudgetTier::Low => "budget-low",
            BudgetTier::Mid => "budget-mid",
            BudgetTier::High => "budget-high",
        }
    }

    // Prices in INR
    fn search_terms(&self) -> &'static str {
        match self {
            BudgetTier::Low => "under 500",
            BudgetTier::Mid => "500 to 1000",
            BudgetTier::High => "above 1000",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for BudgetTier {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(BudgetTier::Low),
            "mid" | "medium" => Ok(BudgetTier::Mid),
            "high" => Ok(BudgetTier::High),
            _ => Err(()),
        }
    }
}

/// A shop searched for matching products
#[derive(Debug, Clone, Copy)]
pub struct Store {
    pub name: &'static str,
    pub search_url: &'static str,
    pub query_param: &'static str,
}

pub const STORES: [Store; 3] = [
    Store {
        name: "Amazon",
        search_url: "https://www.amazon.in/s",
        query_param: "k",
    },
    Store {
        name: "Flipkart",
        search_url: "https://www.flipkart.com/search",
        query_param: "q",
    },
    Store {
        name: "Ajio",
        search_url: "https://www.ajio.com/search/",
        query_param: "text",
    },
];

/// A shopping link annotated with the size it searches for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductLink {
    pub store: &'static str,
    pub url: Url,
}

/// Search query sent to every store
pub fn search_query(size: SizeLabel, garment: GarmentType, budget: BudgetTier) -> String {
    format!(
        "{} {} {}",
        size,
        garment.search_terms(),
        budget.search_terms()
    )
}

/// Build the product list for a completed session
pub fn shopping_links(
    size: SizeLabel,
    garment: GarmentType,
    budget: BudgetTier,
) -> Result<Vec<ProductLink>> {
    let query = search_query(size, garment, budget);

    STORES
        .iter()
        .map(|store| -> Result<ProductLink> {
            let url = Url::parse_with_params(store.search_url, &[(store.query_param, &query)])?;
            Ok(ProductLink {
                store: store.name,
                url,
            })
        })
        .collect()
}
