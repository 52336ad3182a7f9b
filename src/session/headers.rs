/******************************************************************************
   Author: rcm-nexus developers
   Date: 16/10/26
******************************************************************************/
use crate::constants::{DEFAULT_ACCEPT, DEFAULT_CONTENT_TYPE};
use crate::error::AppError;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

/// Headers every Nexus request carries unless overridden
#[must_use]
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    headers
}

/// Overlays `overrides` onto a copy of `defaults`.
///
/// A key present in `overrides` replaces every value the defaults hold for it;
/// keys the overrides do not mention are kept as they are. Neither input is
/// modified.
#[must_use]
pub fn merge_headers(defaults: &HeaderMap, overrides: Option<&HeaderMap>) -> HeaderMap {
    let mut merged = defaults.clone();
    let Some(overrides) = overrides else {
        return merged;
    };
    for name in overrides.keys() {
        merged.remove(name);
        for value in overrides.get_all(name) {
            merged.append(name.clone(), value.clone());
        }
    }
    merged
}

/// Builds a header map from string pairs
///
/// # Errors
/// `AppError::InvalidHeader` if a name or value is not valid HTTP
pub fn header_map<'a, I>(pairs: I) -> Result<HeaderMap, AppError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| AppError::InvalidHeader(format!("{name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| AppError::InvalidHeader(format!("{name}: {e}")))?;
        headers.append(name, value);
    }
    Ok(headers)
}
