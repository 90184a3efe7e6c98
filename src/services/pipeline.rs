//! Place listing pipeline: fetch → classify → resolve image → assemble
//!
//! Data flows strictly forward. Fetch failures abort the request; everything
//! downstream is recovered per record, so by assembly there is no error path.
//! Image lookups for a batch run with unordered fan-out and a single join;
//! the output preserves provider order regardless of completion order.

use futures::future::join_all;

use crate::models::place::REGION_NAME;
use crate::models::{Category, Place, RawRecord};
use crate::services::classifier::{classify, passes_mandatory_filter};
use crate::services::images::ImageResolver;
use crate::services::overpass_client::{FetchError, OverpassClient};

/// Run the full pipeline for one listing request
pub async fn list_places(
    overpass: &OverpassClient,
    images: &ImageResolver,
    category: Option<Category>,
) -> Result<Vec<Place>, FetchError> {
    let records = overpass.fetch(category).await?;

    let classified: Vec<_> = records
        .into_iter()
        .filter(passes_mandatory_filter)
        .map(|record| {
            let (category, tags) = classify(&record);
            (record, category, tags)
        })
        .collect();

    // One lookup per place, all issued up front; the join is the only
    // barrier and blocks for the slowest member.
    let lookups = classified
        .iter()
        .map(|(record, _, _)| images.resolve(record.name().unwrap_or_default()));
    let image_urls = join_all(lookups).await;

    let places = classified
        .into_iter()
        .zip(image_urls)
        .filter_map(|((record, category, tags), image_url)| {
            let tags = tags.into_iter().map(String::from).collect();
            assemble_place(record, category, tags, image_url)
        })
        .collect();

    Ok(places)
}

/// Merge classification and image result into the output shape
///
/// Re-applies the mandatory-field filter defensively; a record that slipped
/// through without a name or position is dropped, not an error.
fn assemble_place(
    record: RawRecord,
    category: Category,
    tags: Vec<String>,
    image_url: String,
) -> Option<Place> {
    let name = record.name()?.to_string();
    let coordinates = record.coordinates()?;

    let description = record
        .tags
        .get("description")
        .cloned()
        .unwrap_or_else(|| format!("Explore {name} in {REGION_NAME}."));
    let address =
        record.tags.get("addr:city").cloned().unwrap_or_else(|| REGION_NAME.to_string());

    Some(Place {
        description,
        address,
        external_id: format!("osm-{}", record.id),
        source: "overpass".to_string(),
        name,
        coordinates,
        category,
        tags,
        image_url,
    })
}
