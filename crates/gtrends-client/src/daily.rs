//! Daily trending searches via the batch-execute endpoint.

use crate::batch::{batch_payload, extract_trending_terms};
use crate::client::TrendsClient;
use crate::error::TrendsError;
use crate::params::PARAM_HL;
use crate::types::{TrendingSearch, TrendingSearchDay};

/// Label of the single bucket returned by [`TrendsClient::daily_trends_by_day`].
pub const TODAY_LABEL: &str = "Today";

impl TrendsClient {
    /// Fetches today's trending searches for `geo` (e.g. `"US"`) as a flat list.
    ///
    /// Only the query text is available from this endpoint.
    ///
    /// # Errors
    ///
    /// - [`TrendsError::Transport`], [`TrendsError::Timeout`] or
    ///   [`TrendsError::RequestFailed`] from the HTTP round-trip.
    /// - [`TrendsError::NoValidJson`] if the response carries no trending terms.
    pub async fn daily_trends(
        &self,
        hl: &str,
        geo: &str,
    ) -> Result<Vec<TrendingSearch>, TrendsError> {
        let terms = self.trending_terms(hl, geo).await?;
        Ok(terms.into_iter().map(TrendingSearch::from_query).collect())
    }

    /// Same data as [`daily_trends`](Self::daily_trends), grouped under a
    /// single `"Today"` bucket.
    ///
    /// # Errors
    ///
    /// As for [`daily_trends`](Self::daily_trends).
    pub async fn daily_trends_by_day(
        &self,
        hl: &str,
        geo: &str,
    ) -> Result<Vec<TrendingSearchDay>, TrendsError> {
        let searches = self.daily_trends(hl, geo).await?;
        Ok(vec![TrendingSearchDay {
            formatted_date: TODAY_LABEL.to_owned(),
            searches,
        }])
    }

    async fn trending_terms(&self, hl: &str, geo: &str) -> Result<Vec<String>, TrendsError> {
        let url = self.batch_url(&[(PARAM_HL, hl.to_owned())])?;
        let body = self.post(url, batch_payload(geo)).await?;
        extract_trending_terms(&String::from_utf8_lossy(&body))
    }
}
