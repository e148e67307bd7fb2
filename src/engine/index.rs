use std::collections::HashMap;
use std::ops::Deref;

use crate::models::Category;

/// Binary (or weighted) vector over the category positions of one
/// [`CategoryIndex`].
///
/// Only an index can produce one, so every vector compared during a single
/// recommendation pass shares the same length and position mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryVector(Vec<f64>);

impl CategoryVector {
    pub(crate) fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    /// Component-wise `self + other * weight`
    pub(crate) fn add_scaled(mut self, other: &CategoryVector, weight: f64) -> Self {
        for (acc, v) in self.0.iter_mut().zip(other.0.iter()) {
            *acc += v * weight;
        }
        self
    }

    pub(crate) fn scale(mut self, factor: f64) -> Self {
        self.0.iter_mut().for_each(|v| *v *= factor);
        self
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl Deref for CategoryVector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

/// Maps category ids to vector positions for one category catalog.
///
/// Built fresh for every recommendation pass and never shared between
/// catalogs.
#[derive(Debug, Clone)]
pub struct CategoryIndex {
    positions: HashMap<i64, usize>,
    len: usize,
}

impl CategoryIndex {
    /// Assigns positions in input order. A repeated id keeps the position
    /// of its last occurrence; the vector length stays the input length.
    pub fn build(categories: &[Category]) -> Self {
        let positions = categories
            .iter()
            .enumerate()
            .map(|(pos, category)| (category.id, pos))
            .collect();

        Self {
            positions,
            len: categories.len(),
        }
    }

    /// Length of every vector produced by this index
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn position(&self, category_id: i64) -> Option<usize> {
        self.positions.get(&category_id).copied()
    }

    /// Builds the indicator vector for an item's categories.
    ///
    /// Categories unknown to this index are ignored.
    pub fn vectorize(&self, categories: &[Category]) -> CategoryVector {
        let mut vector = CategoryVector::zeros(self.len);
        for pos in categories.iter().filter_map(|c| self.position(c.id)) {
            vector.0[pos] = 1.0;
        }
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Category> {
        vec![
            Category::new(28, "Action"),
            Category::new(35, "Comedy"),
            Category::new(18, "Drama"),
        ]
    }

    #[test]
    fn test_positions_follow_input_order() {
        let index = CategoryIndex::build(&catalog());
        assert_eq!(index.len(), 3);
        assert_eq!(index.position(28), Some(0));
        assert_eq!(index.position(35), Some(1));
        assert_eq!(index.position(18), Some(2));
        assert_eq!(index.position(99), None);
    }

    #[test]
    fn test_duplicate_id_last_occurrence_wins() {
        let categories = vec![
            Category::new(1, "Action"),
            Category::new(2, "Comedy"),
            Category::new(1, "Action (again)"),
        ];
        let index = CategoryIndex::build(&categories);
        assert_eq!(index.position(1), Some(2));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_vectorize_marks_known_categories() {
        let index = CategoryIndex::build(&catalog());
        let vector = index.vectorize(&[Category::new(18, "Drama"), Category::new(28, "Action")]);
        assert_eq!(&*vector, &[1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_vectorize_ignores_unknown_categories() {
        let index = CategoryIndex::build(&catalog());
        let vector = index.vectorize(&[Category::new(10752, "War")]);
        assert_eq!(&*vector, &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_vectorize_empty_input() {
        let index = CategoryIndex::build(&catalog());
        assert_eq!(index.vectorize(&[]).into_inner(), vec![0.0; 3]);
    }

    #[test]
    fn test_empty_catalog() {
        let index = CategoryIndex::build(&[]);
        assert!(index.is_empty());
        assert!(index.vectorize(&[Category::new(1, "Action")]).is_empty());
    }
}
