//! Google Trends request and response types.
//!
//! Request types serialize into the compact JSON carried by the `req` query
//! parameter. Response types model the JSON bodies returned once the guard
//! prefix has been stripped; upstream wraps most payloads in a
//! `{"default": {...}}` envelope, captured here by the private `*Out` structs.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// explore request
// ---------------------------------------------------------------------------

/// Input to [`TrendsClient::explore`](crate::TrendsClient::explore).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreRequest {
    #[serde(rename = "comparisonItem")]
    pub comparison_items: Vec<ComparisonItem>,
    /// Category id from the category tree; `0` means all categories.
    #[serde(default)]
    pub category: u32,
    #[serde(default)]
    pub property: Property,
}

impl ExploreRequest {
    /// Creates a web-search request over all categories for a single term.
    #[must_use]
    pub fn new(item: ComparisonItem) -> Self {
        Self {
            comparison_items: vec![item],
            ..Self::default()
        }
    }

    /// Adds another term to compare against.
    #[must_use]
    pub fn compare(mut self, item: ComparisonItem) -> Self {
        self.comparison_items.push(item);
        self
    }

    #[must_use]
    pub fn category(mut self, category: u32) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn property(mut self, property: Property) -> Self {
        self.property = property;
        self
    }
}

/// One keyword plus its geographic and time scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonItem {
    pub keyword: String,
    /// Region code such as `"US"` or `"US-CA"`; empty means worldwide.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub geo: String,
    /// Time range such as `"today 12-m"`, `"now 7-d"` or `"2024-01-01 2024-06-30"`.
    pub time: String,
    #[serde(default)]
    pub granular_time_resolution: bool,
    /// Alternative range bounds; always sent, empty when unused.
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

impl ComparisonItem {
    #[must_use]
    pub fn new(keyword: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            time: time.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn geo(mut self, geo: impl Into<String>) -> Self {
        self.geo = geo.into();
        self
    }
}

/// Search property the interest data is drawn from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Property {
    #[default]
    #[serde(rename = "")]
    Web,
    #[serde(rename = "news")]
    News,
    #[serde(rename = "images")]
    Images,
    #[serde(rename = "froogle")]
    Shopping,
    #[serde(rename = "youtube")]
    YouTube,
}

// ---------------------------------------------------------------------------
// reference trees
// ---------------------------------------------------------------------------

/// A node of the category picker tree. The root is the "All categories" node
/// with id `0`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryNode {
    pub name: String,
    pub id: u32,
    #[serde(default)]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Depth-first lookup of a category by id, including `self`.
    #[must_use]
    pub fn find(&self, id: u32) -> Option<&CategoryNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }
}

/// A node of the location picker tree; `id` is a region code like `"US-CA"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocationNode {
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub children: Vec<LocationNode>,
}

impl LocationNode {
    /// Depth-first lookup of a location by code, including `self`.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&LocationNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }
}

// ---------------------------------------------------------------------------
// widgetdata/multiline
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct MultilineOut {
    pub default: Multiline,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Multiline {
    #[serde(default)]
    pub timeline_data: Vec<TimelinePoint>,
}

/// One point of an interest-over-time series.
///
/// `value`, `has_data` and `formatted_value` hold one entry per compared term,
/// in the order of the originating request's comparison items.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    /// Unix timestamp in seconds, as a string.
    pub time: String,
    pub formatted_time: String,
    #[serde(default)]
    pub formatted_axis_time: String,
    pub value: Vec<i64>,
    #[serde(default)]
    pub has_data: Vec<bool>,
    #[serde(default)]
    pub formatted_value: Vec<String>,
    /// Set on the trailing point while its period is still in progress.
    #[serde(default)]
    pub is_partial: bool,
}

// ---------------------------------------------------------------------------
// widgetdata/comparedgeo
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct GeoOut {
    pub default: GeoList,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeoList {
    #[serde(default)]
    pub geo_map_data: Vec<GeoPoint>,
}

/// Interest for one region, per compared term.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    #[serde(default)]
    pub geo_code: String,
    pub geo_name: String,
    pub value: Vec<i64>,
    #[serde(default)]
    pub formatted_value: Vec<String>,
    /// Index of the compared term with the highest value in this region.
    #[serde(default)]
    pub max_value_index: usize,
    #[serde(default)]
    pub has_data: Vec<bool>,
}

// ---------------------------------------------------------------------------
// widgetdata/relatedsearches
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct RelatedOut {
    pub default: RelatedList,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RelatedList {
    #[serde(default)]
    pub ranked_list: Vec<RankedList>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RankedList {
    #[serde(default)]
    pub ranked_keyword: Vec<RankedKeyword>,
}

/// What a ranked keyword refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankedTerm {
    /// A plain search query (`RELATED_QUERIES` widgets).
    Query(String),
    /// A Knowledge Graph topic (`RELATED_TOPICS` widgets).
    Topic(KeywordTopic),
}

/// A related query or topic with its relative interest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawRankedKeyword")]
pub struct RankedKeyword {
    pub term: RankedTerm,
    /// Relative interest (0-100 for "top", percentage growth for "rising").
    pub value: i64,
    /// Display form of `value`, e.g. `"100"`, `"+250%"` or `"Breakout"`.
    pub formatted_value: String,
    pub has_data: bool,
    /// Path of the explore page for this term.
    pub link: String,
}

impl RankedKeyword {
    /// Query text for queries, topic title for topics.
    #[must_use]
    pub fn label(&self) -> &str {
        match &self.term {
            RankedTerm::Query(q) => q,
            RankedTerm::Topic(t) => &t.title,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRankedKeyword {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    topic: Option<KeywordTopic>,
    #[serde(default)]
    value: i64,
    #[serde(default)]
    formatted_value: String,
    #[serde(default)]
    has_data: bool,
    #[serde(default)]
    link: String,
}

impl From<RawRankedKeyword> for RankedKeyword {
    fn from(raw: RawRankedKeyword) -> Self {
        let term = match (raw.query, raw.topic) {
            (_, Some(topic)) => RankedTerm::Topic(topic),
            (query, None) => RankedTerm::Query(query.unwrap_or_default()),
        };
        Self {
            term,
            value: raw.value,
            formatted_value: raw.formatted_value,
            has_data: raw.has_data,
            link: raw.link,
        }
    }
}

// ---------------------------------------------------------------------------
// autocomplete
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct SearchOut {
    pub default: SearchList,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchList {
    #[serde(default)]
    pub topics: Vec<KeywordTopic>,
}

/// A Knowledge Graph topic candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTopic {
    /// Machine id such as `"/m/05z1_"`; usable as an explore keyword.
    pub mid: String,
    pub title: String,
    /// Human label such as `"Programming language"`.
    #[serde(rename = "type", default)]
    pub topic_type: String,
}

// ---------------------------------------------------------------------------
// daily trending searches
// ---------------------------------------------------------------------------

/// Trending searches grouped under one day label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingSearchDay {
    pub formatted_date: String,
    #[serde(rename = "trendingSearches")]
    pub searches: Vec<TrendingSearch>,
}

/// A single trending search. The batch endpoint supplies only the query, so
/// `formatted_traffic` is empty and `image`/`articles` are unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingSearch {
    pub title: SearchTitle,
    pub formatted_traffic: String,
    pub image: Option<SearchImage>,
    pub articles: Vec<SearchArticle>,
}

impl TrendingSearch {
    pub(crate) fn from_query(query: String) -> Self {
        Self {
            title: SearchTitle { query },
            formatted_traffic: String::new(),
            image: None,
            articles: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchTitle {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchImage {
    pub news_url: String,
    pub source: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchArticle {
    pub title: String,
    pub time_ago: String,
    pub source: String,
    pub image: Option<SearchImage>,
    pub url: String,
    pub snippet: String,
}
