//! Place, category and raw-record types
//!
//! `RawRecord` mirrors the subset of an Overpass element this backend
//! consumes; `Place` is the normalized output unit of the listing pipeline.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Region label used for templated descriptions and address fallbacks
pub const REGION_NAME: &str = "Tamil Nadu";

/// Closed category enumeration for a place's primary type
///
/// The declaration order matters: the classifier tries categories in this
/// order and the first satisfied rule wins (see `services::classifier`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Temple,
    Beach,
    Peak,
    Castle,
    Park,
    Wildlife,
    Waterfall,
    Museum,
    Village,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Temple => "temple",
            Category::Beach => "beach",
            Category::Peak => "peak",
            Category::Castle => "castle",
            Category::Park => "park",
            Category::Wildlife => "wildlife",
            Category::Waterfall => "waterfall",
            Category::Museum => "museum",
            Category::Village => "village",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "temple" => Ok(Category::Temple),
            "beach" => Ok(Category::Beach),
            "peak" => Ok(Category::Peak),
            "castle" => Ok(Category::Castle),
            "park" => Ok(Category::Park),
            "wildlife" => Ok(Category::Wildlife),
            "waterfall" => Ok(Category::Waterfall),
            "museum" => Ok(Category::Museum),
            "village" => Ok(Category::Village),
            "other" => Ok(Category::Other),
            unknown => Err(format!("unknown category '{unknown}'")),
        }
    }
}

/// Longitude/latitude pair (Overpass order is lat/lon; the API emits lon/lat)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lon: f64,
    pub lat: f64,
}

/// Centroid of a way/relation as returned by Overpass `out center`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Centroid {
    pub lat: f64,
    pub lon: f64,
}

/// One unprocessed element from the geodata provider
///
/// Any field except `id` may be absent; no invariants are enforced here.
/// The mandatory-field filter in the classifier decides what survives.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub id: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<Centroid>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl RawRecord {
    /// Name tag, if present and non-empty
    pub fn name(&self) -> Option<&str> {
        self.tags.get("name").map(String::as_str).filter(|n| !n.trim().is_empty())
    }

    /// Direct coordinate, falling back to the `out center` centroid
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinates { lon, lat }),
            _ => self.center.map(|c| Coordinates { lon: c.lon, lat: c.lat }),
        }
    }
}

/// Normalized point of interest, the pipeline's output unit
///
/// Field names on the wire match the original REST contract (camelCase for
/// `imageUrl` / `externalId`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub description: String,
    pub coordinates: Coordinates,
    pub category: Category,
    pub tags: Vec<String>,
    pub address: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    pub source: String,
}
