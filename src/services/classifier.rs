//! Category and tag classification
//!
//! Maps provider-native tag vocabulary (OSM keys/values) onto the internal
//! taxonomy. Pure functions, no I/O.
//!
//! Category assignment is first-match over `CATEGORY_RULES` in declaration
//! order; two categories may cover overlapping native tags, so the order is a
//! load-bearing, testable constant. Tag derivation uses the separate flat
//! `TAG_RULES` table and is independent of the assigned category.

use std::collections::BTreeSet;

use crate::models::{Category, RawRecord};

/// One match condition: native key plus an exact value or `|`-alternation
pub type Condition = (&'static str, &'static str);

/// Ordered category rules; first category with a satisfied condition wins.
///
/// Conditions within a category are OR'd. A record matching nothing gets
/// `Category::Other`.
pub const CATEGORY_RULES: &[(Category, &[Condition])] = &[
    (Category::Temple, &[("amenity", "place_of_worship"), ("building", "temple")]),
    (Category::Beach, &[("natural", "beach"), ("leisure", "beach_resort")]),
    (Category::Peak, &[("natural", "peak|hill|ridge")]),
    (Category::Castle, &[("historic", "castle|fort|palace")]),
    (Category::Park, &[("leisure", "park|garden")]),
    (Category::Wildlife, &[("tourism", "zoo"), ("boundary", "national_park")]),
    (Category::Waterfall, &[("waterway", "waterfall"), ("natural", "waterfall")]),
    (Category::Museum, &[("tourism", "museum")]),
    (Category::Village, &[("place", "village|hamlet")]),
];

/// Flat (key, value) → display tag table, evaluated independently of category
pub const TAG_RULES: &[(&str, &str, &str)] = &[
    ("amenity", "place_of_worship", "Culture"),
    ("historic", "castle", "History"),
    ("historic", "fort", "History"),
    ("historic", "palace", "History"),
    ("historic", "monument", "History"),
    ("tourism", "museum", "History"),
    ("natural", "beach", "Relaxation"),
    ("leisure", "beach_resort", "Relaxation"),
    ("natural", "peak", "Nature"),
    ("natural", "hill", "Nature"),
    ("natural", "waterfall", "Nature"),
    ("waterway", "waterfall", "Nature"),
    ("leisure", "park", "Nature"),
    ("leisure", "garden", "Nature"),
    ("tourism", "zoo", "Wildlife"),
    ("boundary", "national_park", "Wildlife"),
    ("leisure", "nature_reserve", "Wildlife"),
    ("place", "village", "Village"),
    ("place", "hamlet", "Village"),
    ("tourism", "attraction", "Recreation"),
    ("leisure", "sports_centre", "Recreation"),
];

/// Match a native value against an exact value or `a|b|c` alternation
fn value_matches(pattern: &str, value: &str) -> bool {
    pattern.split('|').any(|alt| alt == value)
}

/// Mandatory-field filter: a record must carry a name and a resolvable
/// position (direct lat/lon or centroid) to enter the pipeline
pub fn passes_mandatory_filter(record: &RawRecord) -> bool {
    record.name().is_some() && record.coordinates().is_some()
}

/// Assign the internal category for a record (first-match policy)
pub fn categorize(record: &RawRecord) -> Category {
    for (category, conditions) in CATEGORY_RULES {
        for (key, pattern) in *conditions {
            if let Some(value) = record.tags.get(*key) {
                if value_matches(pattern, value) {
                    return *category;
                }
            }
        }
    }
    Category::Other
}

/// Collect display tags for a record, deduplicated
pub fn derive_tags(record: &RawRecord) -> BTreeSet<&'static str> {
    let mut tags = BTreeSet::new();
    for (key, value, tag) in TAG_RULES {
        if record.tags.get(*key).map(String::as_str) == Some(*value) {
            tags.insert(*tag);
        }
    }
    tags
}

/// Classify a record: category plus independent tag set
pub fn classify(record: &RawRecord) -> (Category, BTreeSet<&'static str>) {
    (categorize(record), derive_tags(record))
}
