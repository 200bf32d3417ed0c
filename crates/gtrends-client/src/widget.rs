//! Explore widgets and the collection returned by
//! [`TrendsClient::explore`](crate::TrendsClient::explore).
//!
//! A widget id is either a bare kind (`TIMESERIES`, `GEO_MAP`) or a kind with a
//! numeric order suffix (`RELATED_QUERIES_1`). The suffix groups the related
//! widgets belonging to one comparison item.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::geo::GeoScope;

/// The four widget families upstream issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    TimeSeries,
    GeoMap,
    RelatedQueries,
    RelatedTopics,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 4] = [
        WidgetKind::TimeSeries,
        WidgetKind::GeoMap,
        WidgetKind::RelatedQueries,
        WidgetKind::RelatedTopics,
    ];

    /// The id prefix upstream uses for this kind.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            WidgetKind::TimeSeries => "TIMESERIES",
            WidgetKind::GeoMap => "GEO_MAP",
            WidgetKind::RelatedQueries => "RELATED_QUERIES",
            WidgetKind::RelatedTopics => "RELATED_TOPICS",
        }
    }

    /// Classifies a widget id by prefix.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| id.starts_with(k.prefix()))
    }
}

impl std::fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExploreOut {
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

/// One fetchable data view: an authorization token plus the sub-request
/// needed to fetch its detail data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    #[serde(default)]
    pub token: String,
    /// Display type tag such as `fe_line_chart` or `fe_geo_chart_explore`.
    #[serde(rename = "type", default)]
    pub widget_type: String,
    #[serde(default)]
    pub title: String,
    pub id: String,
    #[serde(default)]
    pub request: WidgetRequest,
}

impl Widget {
    #[must_use]
    pub fn kind(&self) -> Option<WidgetKind> {
        WidgetKind::from_id(&self.id)
    }

    /// Numeric order suffix of the id, or `None` for bare ids.
    #[must_use]
    pub fn order(&self) -> Option<u32> {
        order_suffix(&self.id)
    }
}

/// Parses the `_N` suffix of a widget id. Bare ids such as `GEO_MAP` contain
/// underscores too; their trailing segment is not numeric and yields `None`.
pub(crate) fn order_suffix(id: &str) -> Option<u32> {
    id.rsplit_once('_')
        .and_then(|(_, suffix)| suffix.parse::<u32>().ok())
}

/// Sub-request embedded in a widget, echoed back as the `req` parameter of
/// the widget-data endpoints.
///
/// Fields this crate does not interpret are kept in `extra` so the echo is
/// lossless.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetRequest {
    /// Top-level scope. Geo-map widgets carry `"geo": {}` and expect it back,
    /// so an empty map decodes to `Some(GeoScope::Unset)` and echoes as `{}`.
    /// `None` means the field was absent and is omitted.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_request_geo"
    )]
    pub geo: Option<GeoScope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default)]
    pub restriction: WidgetComparisonItem,
    #[serde(default)]
    pub comparison_item: Vec<WidgetComparisonItem>,
    #[serde(default)]
    pub request_options: RequestOptions,
    #[serde(default)]
    pub keyword_type: String,
    #[serde(default)]
    pub metric: Vec<String>,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub trendiness_settings: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_config: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_country_code: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// Unlike comparison items, the top-level field echoes an unset scope as `{}`.
#[allow(clippy::ref_option)]
fn serialize_request_geo<S>(geo: &Option<GeoScope>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match geo {
        Some(GeoScope::Unset) | None => serializer.serialize_map(Some(0))?.end(),
        Some(scope) => scope.serialize(serializer),
    }
}

/// A comparison item or restriction inside a widget sub-request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetComparisonItem {
    #[serde(default)]
    pub geo: GeoScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub complex_keywords_restriction: KeywordsRestriction,
    #[serde(
        default,
        rename = "originalTimeRangeForExploreUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_time_range_for_explore_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordsRestriction {
    #[serde(default)]
    pub keyword: Vec<KeywordRestriction>,
}

/// A keyword filter, e.g. `{"type": "BROAD", "value": "golang"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRestriction {
    #[serde(rename = "type")]
    pub restriction_type: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    #[serde(default)]
    pub property: String,
    #[serde(default)]
    pub backend: String,
    #[serde(default)]
    pub category: i64,
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

/// Ordered widget collection as returned by explore.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Widgets(Vec<Widget>);

impl Widgets {
    #[must_use]
    pub fn new(widgets: Vec<Widget>) -> Self {
        Self(widgets)
    }

    /// Returns a copy ordered by id suffix: bare ids first, then `_0`, `_1`, …
    /// Ties keep their original relative order.
    #[must_use]
    pub fn sorted(&self) -> Self {
        let mut out = self.0.clone();
        out.sort_by(|a, b| compare_order(&a.id, &b.id));
        Self(out)
    }

    /// Widgets whose id starts with the kind's prefix.
    #[must_use]
    pub fn by_kind(&self, kind: WidgetKind) -> Self {
        self.filtered(|w| w.id.starts_with(kind.prefix()))
    }

    /// Widgets with the given order suffix. Bare `TIMESERIES` and `GEO_MAP`
    /// carry no order and are never returned.
    #[must_use]
    pub fn by_order(&self, order: u32) -> Self {
        self.filtered(|w| order_suffix(&w.id) == Some(order))
    }

    /// First widget of the given kind, if any.
    #[must_use]
    pub fn first_of(&self, kind: WidgetKind) -> Option<&Widget> {
        self.0.iter().find(|w| w.id.starts_with(kind.prefix()))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Widget> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Widget> {
        self.0
    }

    fn filtered(&self, pred: impl Fn(&Widget) -> bool) -> Self {
        Self(self.0.iter().filter(|w| pred(w)).cloned().collect())
    }
}

/// Ordering key comparator for widget ids: ids without a numeric suffix sort
/// lowest, suffixed ids ascend by suffix.
#[must_use]
pub fn compare_order(a: &str, b: &str) -> std::cmp::Ordering {
    order_suffix(a).cmp(&order_suffix(b))
}

impl std::ops::Index<usize> for Widgets {
    type Output = Widget;

    fn index(&self, index: usize) -> &Widget {
        &self.0[index]
    }
}

impl IntoIterator for Widgets {
    type Item = Widget;
    type IntoIter = std::vec::IntoIter<Widget>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Widgets {
    type Item = &'a Widget;
    type IntoIter = std::slice::Iter<'a, Widget>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<Widget>> for Widgets {
    fn from(widgets: Vec<Widget>) -> Self {
        Self(widgets)
    }
}

#[cfg(test)]
#[path = "widget_test.rs"]
mod tests;
