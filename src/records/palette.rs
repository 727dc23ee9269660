use crate::records::Keyed;
use serde::{Deserialize, Serialize};

/// A colour palette extracted from one listing row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteRecord {
    #[serde(rename = "favoriteNumber")]
    pub favorite_number: u64,

    /// `#RRGGBB` colours, left to right, without repeats
    pub colors: Vec<String>,
}

impl Keyed for PaletteRecord {
    /// The ordered colour list as a JSON array string
    fn unique_key(&self) -> String {
        serde_json::to_string(&self.colors).unwrap_or_else(|_| self.colors.join(","))
    }
}
