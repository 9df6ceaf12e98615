// ABOUTME: Typed models for directory listing entries, pages, pagination state, and output records.
// ABOUTME: Origin JSON is read leniently once here; everything downstream sees named optional fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Output field names, in the fixed order used by every writer.
pub const RECORD_FIELDS: [&str; 13] = [
    "id",
    "name",
    "specialty",
    "city",
    "address",
    "medical_center",
    "office",
    "highlighted_services",
    "consult_value",
    "premium",
    "rating_average",
    "rating_count",
    "photo_url",
];

/// Deserializers that treat a member of an unexpected JSON type as absent.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).ok())
    }

    /// Accepts strings and numbers; numbers keep their JSON spelling.
    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Accepts JSON numbers and numeric strings.
    pub fn float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok().filter(|n: &f64| n.is_finite()),
            _ => None,
        })
    }

    /// Accepts non-negative integers in any JSON spelling (`12`, `12.0`, `"12"`).
    pub fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let number = match Value::deserialize(deserializer)? {
            Value::Number(n) => match n.as_u64() {
                Some(n) => return Ok(Some(n)),
                None => n.as_f64(),
            },
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        Ok(number
            .filter(|n| n.is_finite() && *n >= 0.0 && n.fract() == 0.0 && *n <= u64::MAX as f64)
            .map(|n| n as u64))
    }

    pub fn page_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let count = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        Ok(count.unwrap_or(1))
    }
}

fn one() -> u32 {
    1
}

/// One listing entry as served by the origin.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawEntry {
    #[serde(rename = "_id", default, deserialize_with = "lenient::string")]
    pub raw_id: Option<String>,
    #[serde(rename = "ShortId", default, deserialize_with = "lenient::string")]
    pub short_id: Option<String>,
    #[serde(rename = "Name", default, deserialize_with = "lenient::string")]
    pub first_name: Option<String>,
    #[serde(rename = "LastName", default, deserialize_with = "lenient::string")]
    pub last_name: Option<String>,
    #[serde(rename = "SubSpecialties", default, deserialize_with = "lenient::option")]
    pub sub_specialties: Option<SubSpecialties>,
    #[serde(rename = "Headquarters", default, deserialize_with = "lenient::option")]
    pub headquarters: Option<Headquarters>,
    #[serde(rename = "HighlightedServicesEnglish", default)]
    pub highlighted_services_english: Option<Value>,
    #[serde(rename = "HighlightedServices", default)]
    pub highlighted_services: Option<Value>,
    #[serde(rename = "ConsultValue", default)]
    pub consult_value: Option<Value>,
    #[serde(rename = "Premium", default)]
    pub premium: Option<Value>,
    #[serde(rename = "RatingsSummary", default, deserialize_with = "lenient::option")]
    pub ratings_summary: Option<RatingsSummary>,
    #[serde(rename = "Photos", default, deserialize_with = "lenient::string")]
    pub photo: Option<String>,
}

impl RawEntry {
    /// Category name used for filtering: English first, then the localized name.
    ///
    /// Empty names count as missing.
    pub fn specialty_name(&self) -> Option<&str> {
        let specialty = self.sub_specialties.as_ref()?.specialty.as_ref()?;
        non_empty(specialty.english_name.as_deref()).or(non_empty(specialty.name.as_deref()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SubSpecialties {
    #[serde(rename = "Specialty", default, deserialize_with = "lenient::option")]
    pub specialty: Option<Specialty>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Specialty {
    #[serde(rename = "SpecialityNameEnglish", default, deserialize_with = "lenient::string")]
    pub english_name: Option<String>,
    #[serde(rename = "SpecialityName", default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Headquarters {
    #[serde(rename = "CityId", default, deserialize_with = "lenient::option")]
    pub city: Option<City>,
    #[serde(rename = "Address", default, deserialize_with = "lenient::string")]
    pub address: Option<String>,
    #[serde(rename = "MedicalCenter", default, deserialize_with = "lenient::string")]
    pub medical_center: Option<String>,
    #[serde(rename = "Office", default, deserialize_with = "lenient::string")]
    pub office: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct City {
    #[serde(rename = "Name", default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RatingsSummary {
    #[serde(rename = "averageRating", default, deserialize_with = "lenient::float")]
    pub average_rating: Option<f64>,
    #[serde(rename = "numberOfRatings", default, deserialize_with = "lenient::count")]
    pub number_of_ratings: Option<u64>,
}

/// One page of the directory listing (`directoryDoctors` in the payload).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DirectoryPage {
    #[serde(default)]
    pub data: Vec<RawEntry>,
    #[serde(rename = "totalPages", default = "one", deserialize_with = "lenient::page_count")]
    pub total_pages: u32,
}

/// Everything needed to address the data endpoint of one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    pub build_id: String,
    pub resource_path: String,
    pub total_pages: u32,
}

impl PaginationState {
    /// Data endpoint for `page`, on the same scheme and host as the directory.
    pub fn data_url(&self, directory_url: &Url, page: u32) -> Url {
        let mut url = directory_url.clone();
        url.set_path(&format!(
            "/_next/data/{}/{}.json",
            self.build_id, self.resource_path
        ));
        url.set_query(None);
        url.set_fragment(None);
        url.query_pairs_mut().append_pair("page", &page.to_string());
        url
    }

    /// Last page to fetch, honoring an optional cap.
    pub fn last_page(&self, max_pages: Option<u32>) -> u32 {
        match max_pages {
            Some(cap) => self.total_pages.min(cap),
            None => self.total_pages,
        }
    }
}

/// The flat output shape. Field order matches [`RECORD_FIELDS`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub id: Option<String>,
    pub name: String,
    pub specialty: String,
    pub city: Option<String>,
    pub address: Option<String>,
    pub medical_center: Option<String>,
    pub office: Option<String>,
    pub highlighted_services: Option<Value>,
    pub consult_value: Option<Value>,
    pub premium: bool,
    pub rating_average: Option<f64>,
    pub rating_count: Option<u64>,
    pub photo_url: Option<String>,
}

pub(crate) fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
