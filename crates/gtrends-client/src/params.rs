//! Query parameter construction for the widget API.
//!
//! Every widget API call carries `tz` and `hl`; structured requests travel as
//! compact JSON in `req`, and widget-data calls add the widget's `token`.

use serde::Serialize;

use crate::error::TrendsError;
use crate::types::ExploreRequest;
use crate::widget::{Widget, WidgetKind};

pub(crate) const PARAM_HL: &str = "hl";
pub(crate) const PARAM_CAT: &str = "cat";
pub(crate) const PARAM_REQ: &str = "req";
pub(crate) const PARAM_TZ: &str = "tz";
pub(crate) const PARAM_TOKEN: &str = "token";

/// UTC offset, in minutes, sent as `tz`.
pub(crate) const TZ_UTC: &str = "0";

/// Data mode upstream expects for multi-term geo comparisons.
pub(crate) const COMPARE_DATA_MODE: &str = "PERCENTAGES";

/// The fixed default parameter set, with `hl` set to `language`.
pub(crate) fn default_params(language: &str) -> Vec<(&'static str, String)> {
    vec![
        (PARAM_TZ, TZ_UTC.to_owned()),
        (PARAM_CAT, "all".to_owned()),
        ("fi", "0".to_owned()),
        ("fs", "0".to_owned()),
        (PARAM_HL, language.to_owned()),
        ("ri", "300".to_owned()),
        ("rs", "20".to_owned()),
    ]
}

/// Serializes `value` as compact JSON for the `req` parameter.
///
/// # Errors
///
/// Returns [`TrendsError::InvalidRequest`] if serialization fails.
pub(crate) fn encode_req<T: Serialize>(value: &T) -> Result<String, TrendsError> {
    serde_json::to_string(value).map_err(TrendsError::InvalidRequest)
}

/// Parameters for `/explore`.
///
/// Legacy time ranges written with `+` separators (`today+12-m`) are
/// rewritten to spaces before encoding; the caller's request is untouched.
pub(crate) fn explore_params(
    request: &ExploreRequest,
    hl: &str,
) -> Result<Vec<(&'static str, String)>, TrendsError> {
    let mut request = request.clone();
    for item in &mut request.comparison_items {
        item.time = item.time.replace('+', " ");
    }
    Ok(vec![
        (PARAM_TZ, TZ_UTC.to_owned()),
        (PARAM_HL, hl.to_owned()),
        (PARAM_REQ, encode_req(&request)?),
    ])
}

/// Parameters for a widget-data call.
///
/// Geo-map widgets comparing more than one term are switched to percentage
/// data mode. Unset comparison geos are encoded as `{"": ""}` by
/// [`GeoScope`](crate::GeoScope) itself.
pub(crate) fn widget_params(
    widget: &Widget,
    hl: &str,
) -> Result<Vec<(&'static str, String)>, TrendsError> {
    let req = if widget.kind() == Some(WidgetKind::GeoMap)
        && widget.request.comparison_item.len() > 1
    {
        let mut request = widget.request.clone();
        request.data_mode = Some(COMPARE_DATA_MODE.to_owned());
        encode_req(&request)?
    } else {
        encode_req(&widget.request)?
    };

    Ok(vec![
        (PARAM_TZ, TZ_UTC.to_owned()),
        (PARAM_HL, hl.to_owned()),
        (PARAM_TOKEN, widget.token.clone()),
        (PARAM_REQ, req),
    ])
}

#[cfg(test)]
#[path = "params_test.rs"]
mod tests;
