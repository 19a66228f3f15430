//! Query-string parameter extraction

use url::form_urlencoded;

/// Reads parameter `name` from the query string of `uri`.
///
/// The whole URI is lower-cased first, so names and values are matched
/// case-insensitively. Pairs are separated by `&` and a `#` ends the query.
/// A `;` ends a value but never starts a new name, so `?guess=1;id=x` has no
/// `id`. Values are form-decoded (`+` is a space, `%XX` escapes are
/// expanded). The first non-empty value wins; a missing or empty parameter
/// yields `None`.
pub fn get_url_parameter(name: &str, uri: &str) -> Option<String> {
    let uri = uri.to_lowercase();
    let name = name.to_lowercase();

    let (_, query) = uri.split_once('?')?;
    let query = match query.split_once('#') {
        Some((query, _fragment)) => query,
        None => query,
    };

    query.split('&').find_map(|pair| {
        let pair = match pair.split_once(';') {
            Some((pair, _rest)) => pair,
            None => pair,
        };
        let (key, value) = form_urlencoded::parse(pair.as_bytes()).next()?;
        (key == name && !value.is_empty()).then(|| value.into_owned())
    })
}
