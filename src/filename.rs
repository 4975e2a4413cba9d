// Derives the name an image is stored under from its source URL.

use url::Url;

/// Used when a URL has no usable last path segment.
pub const FALLBACK_FILENAME: &str = "image.jpg";

/// Last path segment of `url`, or `image.jpg` when that segment is empty
/// or has no `.` in it. Query strings and fragments are ignored.
///
/// Anything without a `/`, or that is not a hierarchical URL, is treated
/// as a bare path. Names like `c:d.jpg` would otherwise parse with `c` as
/// a scheme, and feeding a result back in must return it unchanged.
pub fn filename_from_url(url: &str) -> String {
    let parsed = if url.contains('/') {
        Url::parse(url).ok().filter(|u| !u.cannot_be_a_base())
    } else {
        None
    };
    let segment = match parsed {
        Some(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .map(str::to_string),
        None => {
            let path = url.split(['?', '#']).next().unwrap_or_default();
            path.rsplit('/').next().map(str::to_string)
        }
    };

    match segment {
        Some(name) if !name.is_empty() && name.contains('.') => name,
        _ => FALLBACK_FILENAME.to_string(),
    }
}
