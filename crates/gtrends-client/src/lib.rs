//! Async client for the Google Trends web endpoints.
//!
//! ```no_run
//! # async fn run() -> Result<(), gtrends_client::TrendsError> {
//! use gtrends_client::{ComparisonItem, ExploreRequest, TrendsClient, WidgetKind};
//!
//! let client = TrendsClient::new()?;
//! let request = ExploreRequest::new(ComparisonItem::new("golang", "today 12-m"));
//! let widgets = client.explore(&request, "EN").await?;
//! if let Some(widget) = widgets.first_of(WidgetKind::TimeSeries) {
//!     let timeline = client.interest_over_time(widget, "EN").await?;
//!     println!("{} points", timeline.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod batch;
mod cache;
pub mod client;
mod daily;
pub mod decode;
pub mod error;
mod explore;
pub mod geo;
mod params;
pub mod transport;
pub mod types;
pub mod widget;

#[cfg(test)]
mod test_support;

pub use cache::ReferenceTreeCache;
pub use client::TrendsClient;
pub use daily::TODAY_LABEL;
pub use error::{BoxError, TrendsError};
pub use geo::GeoScope;
pub use gtrends_core::TrendsConfig;
pub use transport::{HttpSend, OutgoingRequest, RawResponse, ReqwestSender};
pub use types::{
    CategoryNode, ComparisonItem, ExploreRequest, GeoPoint, KeywordTopic, LocationNode, Property,
    RankedKeyword, RankedTerm, SearchArticle, SearchImage, SearchTitle, TimelinePoint,
    TrendingSearch, TrendingSearchDay,
};
pub use widget::{Widget, WidgetKind, WidgetRequest, Widgets};
