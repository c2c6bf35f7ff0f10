//! Embed markup builders shared by all services

use crate::config::Size;
use crate::fragment::Fragment;

/// An `<iframe>` player pointing at `url`
pub fn iframe(url: &str, size: &Size) -> Fragment {
    Fragment::new("iframe")
        .with_attr("width", size.width.as_str())
        .with_attr("height", size.height.as_str())
        .with_attr("src", url)
        .with_attr("frameborder", "0")
        .with_attr("webkitallowfullscreen", "true")
        .with_attr("mozallowfullscreen", "true")
        .with_attr("allowfullscreen", "true")
}

/// A legacy flash `<object>` with `movie` and `allowfullscreen` params
///
/// Services that need extra params or an `<embed>` fallback append them to
/// the returned fragment.
pub fn flash_object(url: &str, size: &Size) -> Fragment {
    let mut object = Fragment::new("object")
        .with_attr("width", size.width.as_str())
        .with_attr("height", size.height.as_str());
    object.push_child(param("movie", url));
    object.push_child(param("allowfullscreen", "true"));
    object
}

/// A `<param name=.. value=..>` child for flash objects
pub fn param(name: &str, value: &str) -> Fragment {
    Fragment::new("param")
        .with_attr("name", name)
        .with_attr("value", value)
}
