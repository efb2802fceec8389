//! Query string construction.

use url::form_urlencoded;

use crate::config::QueryParams;

/// Append `params` to `url` as an `application/x-www-form-urlencoded` query.
///
/// Absent or empty parameters leave `url` untouched, so no dangling `?`.
pub fn build_url(url: &str, params: Option<&QueryParams>) -> String {
    let Some(params) = params.filter(|p| !p.is_empty()) else {
        return url.to_string();
    };

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params.iter() {
        serializer.append_pair(key, &value.to_string());
    }
    format!("{url}?{}", serializer.finish())
}
