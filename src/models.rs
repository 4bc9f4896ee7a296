use serde::{Deserialize, Deserializer, Serialize};

/// Column header of the emitted table, in output order.
pub const CSV_HEADER: [&str; 10] = [
    "State",
    "name",
    "party",
    "district",
    "phone",
    "url",
    "twitter",
    "facebook",
    "youtube",
    "instagram",
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegislatorIds {
    #[serde(default)]
    pub bioguide: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegislatorName {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SeatType {
    #[serde(rename = "sen")]
    Senator,
    #[serde(rename = "rep")]
    Representative,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Term {
    #[serde(default, rename = "type")]
    pub seat_type: Option<SeatType>,
    #[serde(default)]
    pub state: Option<String>,
    /// Representatives only; 0 is an at-large seat.
    #[serde(default)]
    pub district: Option<i64>,
    #[serde(default)]
    pub party: Option<String>,
    /// ISO date the term ends, if known.
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegislatorRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: LegislatorIds,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: LegislatorName,
    #[serde(default, deserialize_with = "null_as_default")]
    pub terms: Vec<Term>,
}

impl LegislatorRecord {
    /// The most recent term, which alone decides whether the member is serving.
    pub fn current_term(&self) -> Option<&Term> {
        self.terms.last()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SocialHandles {
    #[serde(default, deserialize_with = "scalar_string")]
    pub twitter: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub facebook: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub youtube: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub instagram: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocialMediaRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: LegislatorIds,
    #[serde(default, deserialize_with = "null_as_default")]
    pub social: SocialHandles,
}

/// One line of the output table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    #[serde(rename = "State")]
    pub state: String,
    pub name: String,
    pub party: String,
    pub district: String,
    pub phone: String,
    pub url: String,
    pub twitter: String,
    pub facebook: String,
    pub youtube: String,
    pub instagram: String,
}

#[derive(Debug, Clone)]
pub struct PartySummary {
    pub party: String,
    pub count: usize,
}

/// An explicit `~` is treated the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// YAML reads bare handles such as `12345` as numbers; keep their text.
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_yaml::Value::String(text)) => text,
        Some(serde_yaml::Value::Number(number)) => number.to_string(),
        Some(serde_yaml::Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    })
}
