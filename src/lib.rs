//! Starfield - decorative starfield generation and page serving.
//!
//! The `stars` module owns the numeric contract: sampling star
//! properties from uniform ranges and populating a container element in
//! an HTML document with the rendered points. The `server` module wraps
//! that in a small web interface that decorates its pages with a fresh
//! starfield on every request.

pub mod cli;
pub mod config;
pub mod server;
pub mod stars;
