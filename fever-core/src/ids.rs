use serde::{de, Deserialize, Deserializer};

/// Wire forms an id list can arrive in. Fever joins ids with commas in most
/// responses, but some deployments send real arrays.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdList {
    Joined(String),
    Ints(Vec<i64>),
    Strings(Vec<String>),
}

/// Normalize an id list to integers. An empty string is an empty list.
pub fn parse_ids(raw: IdList) -> Result<Vec<i64>, std::num::ParseIntError> {
    match raw {
        IdList::Joined(joined) => {
            if joined.is_empty() {
                return Ok(Vec::new());
            }
            joined.split(',').map(|part| part.trim().parse()).collect()
        }
        IdList::Ints(ids) => Ok(ids),
        IdList::Strings(parts) => parts.iter().map(|part| part.trim().parse()).collect(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IdList::deserialize(deserializer)?;
    parse_ids(raw).map_err(de::Error::custom)
}
