//! Typed admin/seller requests against the market API.
//!
//! Every operation is its own variant with its own payload and validation,
//! so a malformed request is rejected before it leaves the process.

use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::core::GridPosition;
use crate::error::{PazarError, Result};
use crate::mapping::MapConfig;
use crate::session::{AuthState, Role, Session};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    pub name: String,
    pub category: String,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freshness: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freshness: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketFields {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub is_open_today: bool,
    #[serde(default)]
    pub opening_hours: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_open_today: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
}

/// A product offered at a stall, with its price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketProductFields {
    pub product_id: String,
    pub price: f64,
    pub stall_number: String,
    #[serde(default)]
    pub vendor_name: String,
    #[serde(flatten)]
    pub location: GridPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StallFields {
    pub stall_number: String,
    #[serde(default)]
    pub vendor_name: String,
    #[serde(flatten)]
    pub location: GridPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum AdminRequest {
    CreateProduct { product: ProductFields },
    UpdateProduct { product_id: String, changes: ProductPatch },
    DeleteProduct { product_id: String },
    CreateMarket { market: MarketFields },
    UpdateMarket { market_id: String, changes: MarketPatch },
    DeleteMarket { market_id: String },
    AddProductToMarket { market_id: String, entry: MarketProductFields },
    RemoveProductFromMarket { market_id: String, product_id: String, stall_number: String },
    AddStall { market_id: String, stall: StallFields },
    RemoveStall { market_id: String, stall_id: String },
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PazarError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn require_patch(field: &str, value: &Option<String>) -> Result<()> {
    match value {
        Some(v) => require(field, v),
        None => Ok(()),
    }
}

fn require_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(PazarError::Validation(format!("price must be a non-negative number, got {}", price)));
    }
    Ok(())
}

fn require_on_map(location: GridPosition, map: &MapConfig) -> Result<()> {
    if !map.contains(location.x, location.y) || location.z < 0 {
        return Err(PazarError::Validation(format!(
            "stall position ({}, {}, {}) is outside the {}x{} map",
            location.x,
            location.y,
            location.z,
            map.columns(),
            map.rows()
        )));
    }
    Ok(())
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

impl AdminRequest {
    /// Check the payload before sending
    pub fn validate(&self, map: &MapConfig) -> Result<()> {
        match self {
            AdminRequest::CreateProduct { product } => {
                require("name", &product.name)?;
                require("category", &product.category)?;
                require("unit", &product.unit)
            }
            AdminRequest::UpdateProduct { product_id, changes } => {
                require("product id", product_id)?;
                require_patch("name", &changes.name)?;
                require_patch("category", &changes.category)?;
                require_patch("unit", &changes.unit)?;
                if changes == &ProductPatch::default() {
                    return Err(PazarError::Validation("update carries no changes".to_string()));
                }
                Ok(())
            }
            AdminRequest::DeleteProduct { product_id } => require("product id", product_id),
            AdminRequest::CreateMarket { market } => {
                require("name", &market.name)?;
                require("address", &market.address)?;
                if !(-90.0..=90.0).contains(&market.latitude) {
                    return Err(PazarError::Validation(format!("latitude {} out of range", market.latitude)));
                }
                if !(-180.0..=180.0).contains(&market.longitude) {
                    return Err(PazarError::Validation(format!("longitude {} out of range", market.longitude)));
                }
                Ok(())
            }
            AdminRequest::UpdateMarket { market_id, changes } => {
                require("market id", market_id)?;
                require_patch("name", &changes.name)?;
                require_patch("address", &changes.address)?;
                if changes == &MarketPatch::default() {
                    return Err(PazarError::Validation("update carries no changes".to_string()));
                }
                Ok(())
            }
            AdminRequest::DeleteMarket { market_id } => require("market id", market_id),
            AdminRequest::AddProductToMarket { market_id, entry } => {
                require("market id", market_id)?;
                require("product id", &entry.product_id)?;
                require("stall number", &entry.stall_number)?;
                require_price(entry.price)?;
                require_on_map(entry.location, map)
            }
            AdminRequest::RemoveProductFromMarket { market_id, product_id, stall_number } => {
                require("market id", market_id)?;
                require("product id", product_id)?;
                require("stall number", stall_number)
            }
            AdminRequest::AddStall { market_id, stall } => {
                require("market id", market_id)?;
                require("stall number", &stall.stall_number)?;
                require_on_map(stall.location, map)
            }
            AdminRequest::RemoveStall { market_id, stall_id } => {
                require("market id", market_id)?;
                require("stall id", stall_id)
            }
        }
    }

    pub fn method(&self) -> Method {
        match self {
            AdminRequest::CreateProduct { .. }
            | AdminRequest::CreateMarket { .. }
            | AdminRequest::AddProductToMarket { .. }
            | AdminRequest::AddStall { .. } => Method::POST,
            AdminRequest::UpdateProduct { .. } | AdminRequest::UpdateMarket { .. } => Method::PUT,
            AdminRequest::DeleteProduct { .. }
            | AdminRequest::DeleteMarket { .. }
            | AdminRequest::RemoveProductFromMarket { .. }
            | AdminRequest::RemoveStall { .. } => Method::DELETE,
        }
    }

    /// Route below the API root, path segments percent-encoded
    pub fn path(&self) -> String {
        match self {
            AdminRequest::CreateProduct { .. } => "/admin/products".to_string(),
            AdminRequest::UpdateProduct { product_id, .. } | AdminRequest::DeleteProduct { product_id } => {
                format!("/admin/products/{}", segment(product_id))
            }
            AdminRequest::CreateMarket { .. } => "/admin/markets".to_string(),
            AdminRequest::UpdateMarket { market_id, .. } | AdminRequest::DeleteMarket { market_id } => {
                format!("/admin/markets/{}", segment(market_id))
            }
            AdminRequest::AddProductToMarket { market_id, .. } => {
                format!("/admin/markets/{}/products", segment(market_id))
            }
            AdminRequest::RemoveProductFromMarket { market_id, product_id, stall_number } => format!(
                "/admin/markets/{}/products/{}/stalls/{}",
                segment(market_id),
                segment(product_id),
                segment(stall_number)
            ),
            AdminRequest::AddStall { market_id, .. } => {
                format!("/admin/markets/{}/stalls", segment(market_id))
            }
            AdminRequest::RemoveStall { market_id, stall_id } => {
                format!("/admin/markets/{}/stalls/{}", segment(market_id), segment(stall_id))
            }
        }
    }

    /// JSON body, `None` for requests addressed by path alone
    pub fn body(&self) -> Result<Option<serde_json::Value>> {
        let body = match self {
            AdminRequest::CreateProduct { product } => serde_json::to_value(product)?,
            AdminRequest::UpdateProduct { changes, .. } => serde_json::to_value(changes)?,
            AdminRequest::CreateMarket { market } => serde_json::to_value(market)?,
            AdminRequest::UpdateMarket { changes, .. } => serde_json::to_value(changes)?,
            AdminRequest::AddProductToMarket { entry, .. } => serde_json::to_value(entry)?,
            AdminRequest::AddStall { stall, .. } => serde_json::to_value(stall)?,
            AdminRequest::DeleteProduct { .. }
            | AdminRequest::DeleteMarket { .. }
            | AdminRequest::RemoveProductFromMarket { .. }
            | AdminRequest::RemoveStall { .. } => return Ok(None),
        };
        Ok(Some(body))
    }

    /// Catalog and market records are admin-only; sellers manage their stalls
    pub fn requires_admin(&self) -> bool {
        !matches!(
            self,
            AdminRequest::AddProductToMarket { .. }
                | AdminRequest::RemoveProductFromMarket { .. }
                | AdminRequest::AddStall { .. }
                | AdminRequest::RemoveStall { .. }
        )
    }

    /// Check the session's role against this operation
    pub fn authorize(&self, state: &AuthState) -> Result<()> {
        let user = state
            .user()
            .ok_or_else(|| PazarError::Auth("login required".to_string()))?;

        let allowed = match user.role {
            Role::Admin => true,
            Role::Seller => !self.requires_admin(),
            Role::User => false,
        };

        if !allowed {
            return Err(PazarError::Auth(format!(
                "{:?} may not {} {}",
                user.role,
                self.method(),
                self.path()
            )));
        }
        Ok(())
    }
}

/// Sends admin requests with the session's bearer token
pub struct AdminClient {
    client: Client,
    base_url: String,
    map: MapConfig,
    session: Arc<Session>,
}

impl AdminClient {
    pub fn new(config: &ClientConfig, session: Arc<Session>) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            map: config.map,
            session,
        })
    }

    /// Validate, authorize and send; returns the response JSON
    pub async fn execute(&self, request: &AdminRequest) -> Result<serde_json::Value> {
        request.validate(&self.map)?;
        request.authorize(&self.session.current())?;

        let url = format!("{}{}", self.base_url, request.path());
        let mut builder = self.client.request(request.method(), &url);
        if let Some(header) = self.session.bearer_header() {
            builder = builder.header(reqwest::header::AUTHORIZATION, header);
        }
        if let Some(body) = request.body()? {
            builder = builder.json(&body);
        }

        tracing::debug!("{} {}", request.method(), url);
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(PazarError::Other(format!("HTTP {}: {}", status, text)));
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}
