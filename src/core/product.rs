use serde::{Deserialize, Serialize};

/// Logical stall position on a market floor plan.
///
/// `z` is the floor index; payloads that omit it sit on the ground floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub z: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Ground-floor position
    pub fn flat(x: i32, y: i32) -> Self {
        Self { x, y, z: 0 }
    }
}

/// Price offered for a product at one stall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StallPrice {
    pub price: f64,
    pub stall_number: String,
    #[serde(default)]
    pub vendor_name: String,
}

/// A catalog product as served by the market API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique stable identifier
    pub id: String,

    /// Display name, the match target
    pub name: String,

    #[serde(default)]
    pub category: String,

    /// Sale unit (kg, bağ, adet)
    #[serde(default)]
    pub unit: String,

    /// Freshness label ("Taze" for fresh produce)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freshness: Option<String>,

    /// Lowest known price; `None` means unpriced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stall_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,

    /// Assigned stall cell, absent when the product has no stall
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GridPosition>,

    /// Per-stall price comparison
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_prices: Vec<StallPrice>,
}

impl Product {
    /// Create a new Product with required fields
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            unit: String::new(),
            freshness: None,
            min_price: None,
            stall_number: None,
            vendor_name: None,
            location: None,
            all_prices: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>, unit: impl Into<String>) -> Self {
        self.category = category.into();
        self.unit = unit.into();
        self
    }

    pub fn with_location(mut self, location: GridPosition) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.min_price = Some(price);
        self
    }

    /// Get display name (for logging/UI)
    pub fn display_name(&self) -> String {
        match &self.stall_number {
            Some(stall) => format!("{} [{}]", self.name, stall),
            None => self.name.clone(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// A physical market venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub is_open_today: bool,
    #[serde(default)]
    pub opening_hours: String,
}

impl Market {
    /// Short status line for listings
    pub fn display(&self) -> String {
        let status = if self.is_open_today { "open" } else { "closed" };
        if self.opening_hours.is_empty() {
            format!("{} ({})", self.name, status)
        } else {
            format!("{} ({}, {})", self.name, status, self.opening_hours)
        }
    }
}
