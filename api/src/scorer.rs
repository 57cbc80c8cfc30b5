use std::ops::Range;
use std::sync::Arc;

use rand::seq::index;
use rand::Rng;

use crate::catalog::Catalog;
use crate::error::{AppError, AppResult};
use crate::model::ScoredPrediction;

pub const TOP_K: usize = 3;

/// Confidences are drawn uniformly from this half-open range.
pub const CONFIDENCE_RANGE: Range<f64> = 0.90..0.999;

#[derive(Debug, Clone)]
pub struct MockScorer {
    catalog: Arc<Catalog>,
}

impl MockScorer {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // the image is never inspected
    pub fn score(&self, _image: &[u8]) -> AppResult<Vec<ScoredPrediction>> {
        self.score_with(&mut rand::rng())
    }

    pub fn score_with<R: Rng>(&self, rng: &mut R) -> AppResult<Vec<ScoredPrediction>> {
        let available = self.catalog.len();
        if available < TOP_K {
            return Err(AppError::InsufficientCatalogSize {
                available,
                required: TOP_K,
            });
        }

        let picks = index::sample(rng, available, TOP_K);

        let mut confidences: Vec<f64> = (0..TOP_K)
            .map(|_| rng.random_range(CONFIDENCE_RANGE))
            .collect();
        confidences.sort_by(|a, b| b.total_cmp(a));

        let entries = self.catalog.all();
        Ok(picks
            .iter()
            .zip(confidences)
            .map(|(i, confidence)| ScoredPrediction {
                breed: entries[i].clone(),
                confidence,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    use super::*;
    use crate::catalog::BreedEntry;

    fn catalog_of(size: usize) -> Arc<Catalog> {
        Arc::new(Catalog::new(
            (0..size)
                .map(|i| BreedEntry::new(format!("Breed {i}"), "test breed", None))
                .collect(),
        ))
    }

    #[rstest]
    #[case(3)]
    #[case(4)]
    #[case(10)]
    #[case(50)]
    fn returns_three_distinct_breeds(#[case] size: usize) {
        let scorer = MockScorer::new(catalog_of(size));
        let mut rng = StdRng::seed_from_u64(size as u64);

        for _ in 0..200 {
            let predictions = scorer.score_with(&mut rng).unwrap();
            assert_eq!(predictions.len(), TOP_K);
            let names: HashSet<_> = predictions.iter().map(|p| &p.breed.name).collect();
            assert_eq!(names.len(), TOP_K);
        }
    }

    #[test]
    fn confidences_descend_within_range() {
        let scorer = MockScorer::new(Arc::new(Catalog::builtin()));
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let predictions = scorer.score_with(&mut rng).unwrap();
            for pair in predictions.windows(2) {
                assert!(pair[0].confidence >= pair[1].confidence);
            }
            for p in &predictions {
                assert!(CONFIDENCE_RANGE.contains(&p.confidence), "{}", p.confidence);
            }
        }
    }

    #[test]
    fn catalog_of_exactly_three_uses_every_breed() {
        let catalog = catalog_of(3);
        let scorer = MockScorer::new(catalog.clone());

        let predictions = scorer.score(b"not even an image").unwrap();
        let mut names: Vec<_> = predictions.iter().map(|p| p.breed.name.clone()).collect();
        names.sort();
        assert_eq!(names, vec!["Breed 0", "Breed 1", "Breed 2"]);
    }

    #[rstest]
    #[case(0)]
    #[case(2)]
    fn small_catalog_is_rejected(#[case] size: usize) {
        let scorer = MockScorer::new(catalog_of(size));
        match scorer.score(&[]) {
            Err(AppError::InsufficientCatalogSize {
                available,
                required,
            }) => {
                assert_eq!(available, size);
                assert_eq!(required, TOP_K);
            }
            other => panic!("expected InsufficientCatalogSize, got {other:?}"),
        }
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let scorer = MockScorer::new(Arc::new(Catalog::builtin()));
        let a = scorer.score_with(&mut StdRng::seed_from_u64(1)).unwrap();
        let b = scorer.score_with(&mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(a, b);
    }
}
