//! Star model and starfield sampling.
//!
//! A star is five independently drawn uniform values: horizontal and
//! vertical position (percent of the container), size (pixels), opacity
//! and animation cycle duration (seconds). Sampling takes any
//! [`rand::Rng`], so a seeded [`rand::rngs::StdRng`] reproduces a layout
//! exactly while production callers draw from the thread RNG.

mod inject;

pub use inject::populate;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default number of stars in a field.
pub const DEFAULT_STAR_COUNT: usize = 50;

/// Default id of the container element the stars are appended to.
pub const DEFAULT_CONTAINER_ID: &str = "star-field";

/// Positions are percentages of the container, always `[0, 100)`.
const POSITION: Span = Span::new(0.0, 100.0);

/// A half-open sampling interval: draws land in `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Draw one uniform value from the interval.
    pub fn sample(&self, rng: &mut impl Rng) -> f64 {
        rng.random_range(self.min..self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }
}

/// Sampling configuration for a starfield.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarsConfig {
    /// Number of stars appended per population pass.
    #[serde(default = "default_count")]
    pub count: usize,
    /// Id of the container element to populate.
    #[serde(default = "default_container_id")]
    pub container_id: String,
    /// Star diameter range in pixels.
    #[serde(default = "default_size")]
    pub size: Span,
    /// Star opacity range as a fraction.
    #[serde(default = "default_opacity")]
    pub opacity: Span,
    /// Twinkle cycle duration range in seconds.
    #[serde(default = "default_duration")]
    pub duration: Span,
    /// Fixed seed for deterministic layouts (previews, tests).
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_count() -> usize {
    DEFAULT_STAR_COUNT
}

fn default_container_id() -> String {
    DEFAULT_CONTAINER_ID.to_string()
}

fn default_size() -> Span {
    Span::new(1.0, 3.0)
}

fn default_opacity() -> Span {
    Span::new(0.1, 0.6)
}

fn default_duration() -> Span {
    Span::new(2.0, 5.0)
}

impl Default for StarsConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            container_id: default_container_id(),
            size: default_size(),
            opacity: default_opacity(),
            duration: default_duration(),
            seed: None,
        }
    }
}

/// A single decorative point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// Horizontal position, percent of the container.
    pub x: f64,
    /// Vertical position, percent of the container.
    pub y: f64,
    /// Diameter in pixels.
    pub size: f64,
    /// Opacity as a fraction.
    pub opacity: f64,
    /// Twinkle cycle duration in seconds.
    pub duration: f64,
}

impl Star {
    /// Draw one star: five independent uniform values.
    pub fn sample(config: &StarsConfig, rng: &mut impl Rng) -> Self {
        Self {
            x: POSITION.sample(rng),
            y: POSITION.sample(rng),
            size: config.size.sample(rng),
            opacity: config.opacity.sample(rng),
            duration: config.duration.sample(rng),
        }
    }

    /// Render the star as one point element with its properties inlined.
    pub fn render(&self) -> String {
        format!(
            r#"<div class="absolute rounded-full bg-white animate-twinkle" style="left:{}%;top:{}%;width:{}px;height:{}px;opacity:{};animation-duration:{}s"></div>"#,
            self.x, self.y, self.size, self.size, self.opacity, self.duration
        )
    }
}

/// A generated set of stars, kept in insertion order.
#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    /// Sample `config.count` stars from the configured ranges.
    pub fn generate(config: &StarsConfig, rng: &mut impl Rng) -> Self {
        let stars = (0..config.count)
            .map(|_| Star::sample(config, rng))
            .collect();
        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Concatenated markup for all stars, insertion order.
    pub fn render(&self) -> String {
        let mut markup = String::new();
        for star in &self.stars {
            markup.push_str(&star.render());
            markup.push('\n');
        }
        markup
    }
}
