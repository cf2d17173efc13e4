//! Dining Table Model

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Restaurant table, owned by one restaurant.
///
/// Tables are soft-deactivated, never deleted from the client's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub seats: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<i64>,
}

fn default_active() -> bool {
    true
}

impl DiningTable {
    /// Name for pickers: the table name, or "Table {id}" when unnamed
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Table {}", self.id),
        }
    }
}

/// Table as embedded in a reservation's join rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub seats: u32,
}

/// Create table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTableCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub seats: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl DiningTableCreate {
    pub fn new(name: Option<String>, seats: u32) -> ModelResult<Self> {
        if seats == 0 {
            return Err(ModelError::NoSeats);
        }
        // blank names are sent as absent
        let name = name.filter(|n| !n.trim().is_empty());
        Ok(Self {
            name,
            seats,
            is_active: None,
        })
    }
}

/// Update table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl DiningTableUpdate {
    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Default::default()
        }
    }
}
