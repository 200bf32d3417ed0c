//! Geographic scope carried inside widget sub-requests.
//!
//! Upstream sends the `geo` field in three shapes: absent (or an empty map),
//! a bare region code, or a map such as `{"country": "US"}`. [`GeoScope`]
//! names each shape so encoding rules are decided per variant instead of by
//! inspecting an untyped value.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Geographic restriction of a widget comparison item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GeoScope {
    /// No restriction. Encodes as `{"": ""}` because upstream rejects a
    /// missing geo on widget-data endpoints but accepts an explicit empty one.
    #[default]
    Unset,
    /// A single region code, e.g. `"US"`.
    Region(String),
    /// Keyed regions, e.g. `{"country": "US"}`.
    Regions(BTreeMap<String, String>),
}

impl GeoScope {
    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    fn from_map(map: BTreeMap<String, String>) -> Self {
        if map.iter().all(|(k, v)| k.is_empty() && v.is_empty()) {
            Self::Unset
        } else {
            Self::Regions(map)
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawGeo {
    Code(String),
    Map(BTreeMap<String, String>),
}

impl<'de> Deserialize<'de> for GeoScope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<RawGeo>::deserialize(deserializer)? {
            None => Self::Unset,
            Some(RawGeo::Code(code)) if code.is_empty() => Self::Unset,
            Some(RawGeo::Code(code)) => Self::Region(code),
            Some(RawGeo::Map(map)) => Self::from_map(map),
        })
    }
}

impl Serialize for GeoScope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Unset => {
                let empty: BTreeMap<&str, &str> = BTreeMap::from([("", "")]);
                empty.serialize(serializer)
            }
            Self::Region(code) => serializer.serialize_str(code),
            Self::Regions(map) => map.serialize(serializer),
        }
    }
}
