// ABOUTME: Maps one raw directory entry to the flat 13-field output record.
// ABOUTME: Pure and total: missing nested data becomes null, never an error.

use serde_json::Value;
use url::Url;

use crate::models::{non_empty, NormalizedRecord, RawEntry};

/// Builds the output record for `entry`, resolving its photo against the
/// scheme and host of `directory_url`.
pub fn to_record(entry: &RawEntry, directory_url: &Url) -> NormalizedRecord {
    let headquarters = entry.headquarters.as_ref();
    let ratings = entry.ratings_summary.as_ref();
    let root = site_root(directory_url);

    NormalizedRecord {
        id: non_empty(entry.short_id.as_deref())
            .or(non_empty(entry.raw_id.as_deref()))
            .map(str::to_string),
        name: full_name(entry),
        specialty: entry.specialty_name().unwrap_or_default().to_string(),
        city: headquarters
            .and_then(|hq| hq.city.as_ref())
            .and_then(|city| city.name.clone()),
        address: headquarters.and_then(|hq| hq.address.clone()),
        medical_center: headquarters.and_then(|hq| hq.medical_center.clone()),
        office: headquarters.and_then(|hq| hq.office.clone()),
        highlighted_services: entry
            .highlighted_services_english
            .clone()
            .filter(|v| is_truthy(Some(v)))
            .or_else(|| entry.highlighted_services.clone()),
        consult_value: entry.consult_value.clone(),
        premium: is_truthy(entry.premium.as_ref()),
        rating_average: ratings.and_then(|r| r.average_rating),
        rating_count: ratings.and_then(|r| r.number_of_ratings),
        photo_url: entry
            .photo
            .as_deref()
            .and_then(|photo| resolve_photo_url(photo, &root)),
    }
}

/// `<scheme>://<host[:port]>/` of the directory URL.
pub fn site_root(directory_url: &Url) -> Url {
    let mut root = directory_url.clone();
    root.set_path("/");
    root.set_query(None);
    root.set_fragment(None);
    root
}

/// Resolves a possibly relative photo path against the site root.
/// Absolute URLs are returned as given; blank paths yield None.
pub fn resolve_photo_url(photo: &str, root: &Url) -> Option<String> {
    let photo = photo.trim();
    if photo.is_empty() {
        return None;
    }
    if photo.starts_with("http://") || photo.starts_with("https://") {
        return Some(photo.to_string());
    }
    match root.join(photo) {
        Ok(resolved) => Some(resolved.to_string()),
        // Keep the raw path rather than dropping data the origin sent.
        Err(_) => Some(photo.to_string()),
    }
}

fn full_name(entry: &RawEntry) -> String {
    let first = entry.first_name.as_deref().unwrap_or_default().trim();
    let last = entry.last_name.as_deref().unwrap_or_default().trim();
    format!("{first} {last}").trim().to_string()
}

/// JSON truthiness: null, false, zero, and empty strings/arrays/objects are false.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}
