// types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Drink name mapped to its ordered preparation steps.
pub type Directory = BTreeMap<String, Vec<String>>;

/// Body of `POST /drinks`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewDrink {
    #[schema(example = "Cocoa")]
    pub name: String,
    pub steps: Vec<String>,
}

/// Error payload returned by the drinks API on non-2xx responses.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Drink already exists")]
    pub detail: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    #[schema(example = "Drink added successfully")]
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Popup,
    CreateDrink,
    ViewLogs,
}

pub enum ScrollDirection {
    Up,
    Down,
    PageUp,
    PageDown,
    Bottom,
    Top,
}
