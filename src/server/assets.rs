//! Static asset constants (CSS).

/// Stylesheet for the web interface, including the star utility classes
/// and the twinkle keyframe animation.
pub const CSS: &str = include_str!("styles.css");
