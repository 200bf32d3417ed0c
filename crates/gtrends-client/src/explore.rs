//! Explore, widget-data, autocomplete, and picker endpoints.

use std::sync::Arc;

use crate::client::TrendsClient;
use crate::decode::{decode_guarded, EXPLORE_GUARD, WIDGET_GUARD};
use crate::error::TrendsError;
use crate::params::{self, PARAM_HL, PARAM_TZ, TZ_UTC};
use crate::types::{
    CategoryNode, ExploreRequest, GeoOut, GeoPoint, KeywordTopic, LocationNode, MultilineOut,
    RankedKeyword, RelatedOut, SearchOut, TimelinePoint,
};
use crate::widget::{ExploreOut, Widget, WidgetKind, Widgets};

const EXPLORE_PATH: &str = "/explore";
const CATEGORIES_PATH: &str = "/explore/pickers/category";
const LOCATIONS_PATH: &str = "/explore/pickers/geo";
const RELATED_PATH: &str = "/widgetdata/relatedsearches";
const TIMELINE_PATH: &str = "/widgetdata/multiline";
const GEO_PATH: &str = "/widgetdata/comparedgeo";

impl TrendsClient {
    /// Fetches the widgets for `request`, in the order upstream returns them.
    ///
    /// Each widget's token and embedded sub-request feed
    /// [`interest_over_time`](Self::interest_over_time),
    /// [`interest_by_location`](Self::interest_by_location) and
    /// [`related`](Self::related).
    ///
    /// # Errors
    ///
    /// - [`TrendsError::EmptyRequest`] if `request` has no comparison items.
    /// - [`TrendsError::InvalidRequest`] if the request cannot be encoded.
    /// - [`TrendsError::Transport`], [`TrendsError::Timeout`] or
    ///   [`TrendsError::RequestFailed`] from the HTTP round-trip.
    /// - [`TrendsError::Deserialize`] if the response shape is unexpected.
    pub async fn explore(
        &self,
        request: &ExploreRequest,
        hl: &str,
    ) -> Result<Widgets, TrendsError> {
        if request.comparison_items.is_empty() {
            return Err(TrendsError::EmptyRequest);
        }
        let params = params::explore_params(request, hl)?;
        let url = self.api_url(EXPLORE_PATH, &params)?;
        let body = self.get(url).await?;
        let out: ExploreOut = decode_guarded(&body, EXPLORE_GUARD, "explore")?;
        tracing::debug!(widgets = out.widgets.len(), "explore returned widgets");
        Ok(Widgets::new(out.widgets))
    }

    /// Fetches the interest-over-time series for a `TIMESERIES` widget.
    ///
    /// # Errors
    ///
    /// - [`TrendsError::InvalidWidgetType`] for any other widget kind; no
    ///   request is sent.
    /// - Transport, status, and decode errors as for [`explore`](Self::explore).
    pub async fn interest_over_time(
        &self,
        widget: &Widget,
        hl: &str,
    ) -> Result<Vec<TimelinePoint>, TrendsError> {
        require_kind(widget, &[WidgetKind::TimeSeries], "TIMESERIES")?;
        let body = self.widget_data(TIMELINE_PATH, widget, hl).await?;
        let out: MultilineOut = decode_guarded(&body, WIDGET_GUARD, "widgetdata/multiline")?;
        Ok(out.default.timeline_data)
    }

    /// Fetches per-region interest for a `GEO_MAP` widget.
    ///
    /// # Errors
    ///
    /// - [`TrendsError::InvalidWidgetType`] for any other widget kind; no
    ///   request is sent.
    /// - Transport, status, and decode errors as for [`explore`](Self::explore).
    pub async fn interest_by_location(
        &self,
        widget: &Widget,
        hl: &str,
    ) -> Result<Vec<GeoPoint>, TrendsError> {
        require_kind(widget, &[WidgetKind::GeoMap], "GEO_MAP")?;
        let body = self.widget_data(GEO_PATH, widget, hl).await?;
        let out: GeoOut = decode_guarded(&body, WIDGET_GUARD, "widgetdata/comparedgeo")?;
        Ok(out.default.geo_map_data)
    }

    /// Fetches related queries or topics, flattening the "top" and "rising"
    /// ranked lists into one sequence (top first).
    ///
    /// # Errors
    ///
    /// - [`TrendsError::InvalidWidgetType`] unless the widget is
    ///   `RELATED_QUERIES` or `RELATED_TOPICS`; no request is sent.
    /// - Transport, status, and decode errors as for [`explore`](Self::explore).
    pub async fn related(
        &self,
        widget: &Widget,
        hl: &str,
    ) -> Result<Vec<RankedKeyword>, TrendsError> {
        require_kind(
            widget,
            &[WidgetKind::RelatedQueries, WidgetKind::RelatedTopics],
            "RELATED_QUERIES or RELATED_TOPICS",
        )?;
        let body = self.widget_data(RELATED_PATH, widget, hl).await?;
        let out: RelatedOut =
            decode_guarded(&body, WIDGET_GUARD, "widgetdata/relatedsearches")?;
        Ok(out
            .default
            .ranked_list
            .into_iter()
            .flat_map(|list| list.ranked_keyword)
            .collect())
    }

    /// Suggests Knowledge Graph topics matching `term`.
    ///
    /// # Errors
    ///
    /// Transport, status, and decode errors as for [`explore`](Self::explore).
    pub async fn search_suggestions(
        &self,
        term: &str,
        hl: &str,
    ) -> Result<Vec<KeywordTopic>, TrendsError> {
        let params = [(PARAM_TZ, TZ_UTC.to_owned()), (PARAM_HL, hl.to_owned())];
        let url = self.autocomplete_url(term, &params)?;
        let body = self.get(url).await?;
        let out: SearchOut = decode_guarded(&body, WIDGET_GUARD, "autocomplete")?;
        Ok(out.default.topics)
    }

    /// Returns the category tree, fetching it on first use.
    ///
    /// # Errors
    ///
    /// Transport, status, and decode errors as for [`explore`](Self::explore).
    /// Failures are not cached.
    pub async fn categories(&self) -> Result<Arc<CategoryNode>, TrendsError> {
        if let Some(tree) = self.cache.categories() {
            return Ok(tree);
        }
        let url = self.api_url(CATEGORIES_PATH, &self.default_params())?;
        let body = self.get(url).await?;
        let tree: CategoryNode = decode_guarded(&body, EXPLORE_GUARD, "explore/pickers/category")?;
        let tree = Arc::new(tree);
        self.cache.set_categories(Arc::clone(&tree));
        Ok(tree)
    }

    /// Returns the location tree, fetching it on first use.
    ///
    /// # Errors
    ///
    /// Transport, status, and decode errors as for [`explore`](Self::explore).
    /// Failures are not cached.
    pub async fn locations(&self) -> Result<Arc<LocationNode>, TrendsError> {
        if let Some(tree) = self.cache.locations() {
            return Ok(tree);
        }
        let url = self.api_url(LOCATIONS_PATH, &self.default_params())?;
        let body = self.get(url).await?;
        let tree: LocationNode = decode_guarded(&body, EXPLORE_GUARD, "explore/pickers/geo")?;
        let tree = Arc::new(tree);
        self.cache.set_locations(Arc::clone(&tree));
        Ok(tree)
    }

    async fn widget_data(
        &self,
        path: &str,
        widget: &Widget,
        hl: &str,
    ) -> Result<Vec<u8>, TrendsError> {
        let params = params::widget_params(widget, hl)?;
        let url = self.api_url(path, &params)?;
        self.get(url).await
    }
}

fn require_kind(
    widget: &Widget,
    allowed: &[WidgetKind],
    expected: &'static str,
) -> Result<(), TrendsError> {
    if allowed.iter().any(|k| widget.id.starts_with(k.prefix())) {
        Ok(())
    } else {
        Err(TrendsError::InvalidWidgetType {
            expected,
            id: widget.id.clone(),
        })
    }
}

#[cfg(test)]
#[path = "explore_test.rs"]
mod tests;
