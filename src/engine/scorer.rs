/// Weight of content similarity in the final score
pub const SIMILARITY_WEIGHT: f64 = 0.7;
/// Weight of normalized popularity in the final score
pub const POPULARITY_WEIGHT: f64 = 0.2;
/// Weight of normalized quality in the final score
pub const QUALITY_WEIGHT: f64 = 0.1;

/// Quality assumed for items without a quality score
pub const NEUTRAL_QUALITY: f64 = 0.5;

/// Popularity range used when no reference range is known
pub const DEFAULT_MIN_POPULARITY: f64 = 0.0;
pub const DEFAULT_MAX_POPULARITY: f64 = 1000.0;

/// Cosine of the angle between two vectors.
///
/// Returns 0.0 when either vector has zero norm or when the lengths differ.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|y| y * y).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    // Rounding can push parallel vectors slightly past 1
    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Linearly rescales `popularity` into [0, 1] relative to `[min, max]`.
///
/// An empty or inverted range yields 1.0 for popularity at or above `max`
/// and 0.0 below it.
pub fn normalize_popularity(popularity: f64, min: f64, max: f64) -> f64 {
    if max <= min {
        return if popularity >= max { 1.0 } else { 0.0 };
    }
    ((popularity - min) / (max - min)).clamp(0.0, 1.0)
}

/// Maps a 0-10 quality score onto [0, 1], defaulting to neutral
pub fn normalize_quality(quality_score: Option<f64>) -> f64 {
    quality_score.map_or(NEUTRAL_QUALITY, |q| q / 10.0)
}

/// Popularity bounds for normalization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopularityRange {
    pub min: f64,
    pub max: f64,
}

impl Default for PopularityRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_POPULARITY,
            max: DEFAULT_MAX_POPULARITY,
        }
    }
}

impl PopularityRange {
    /// Range spanned by the positive popularities in `values`, or the
    /// default range if there are none.
    pub fn from_positive(values: impl IntoIterator<Item = f64>) -> Self {
        values
            .into_iter()
            .filter(|p| *p > 0.0)
            .fold(None, |range: Option<Self>, p| match range {
                None => Some(Self { min: p, max: p }),
                Some(r) => Some(Self {
                    min: r.min.min(p),
                    max: r.max.max(p),
                }),
            })
            .unwrap_or_default()
    }

    pub fn normalize(&self, popularity: f64) -> f64 {
        normalize_popularity(popularity, self.min, self.max)
    }
}

/// Composite relevance of one candidate: content match dominates, popularity
/// and quality act as boosts.
pub fn score(
    item_vector: &[f64],
    user_vector: &[f64],
    popularity: f64,
    quality_score: Option<f64>,
    range: PopularityRange,
) -> f64 {
    SIMILARITY_WEIGHT * cosine_similarity(item_vector, user_vector)
        + POPULARITY_WEIGHT * range.normalize(popularity)
        + QUALITY_WEIGHT * normalize_quality(quality_score)
}
