//! Content-based recommendation engine.
//!
//! Pure functions over caller-owned data: a category catalog, the user's
//! watch history and a pool of candidate items go in, a ranked and
//! explained list comes out. Nothing is cached between calls; the category
//! index and user profile are rebuilt for every [`recommend`] invocation.

pub mod explain;
pub mod index;
pub mod profile;
pub mod recommender;
pub mod scorer;

pub use explain::{explain, top_categories, Explainer};
pub use index::{CategoryIndex, CategoryVector};
pub use profile::build_profile;
pub use recommender::{recommend, DEFAULT_TOP_N};
pub use scorer::{cosine_similarity, score, PopularityRange};
