//! Nutritional similarity recommender
//!
//! Ranks every allowed food in the dataset by cosine similarity of its
//! scaled nutrition vector to the query food's, and keeps the top `k`.

use crate::scaler::MinMaxScaler;
use nutrisim_core::{AllergenFilter, Dataset, Error, Filter, FoodRecord, Result, Vector};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, trace};

/// Number of recommendations returned by default
pub const DEFAULT_TOP_K: usize = 10;

/// Which vectors the min-max scaler is fitted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingScope {
    /// Fit on the query vector alone (identity transform)
    #[default]
    Query,
    /// Fit on the query plus every scorable candidate
    Pool,
}

impl fmt::Display for ScalingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalingScope::Query => f.write_str("query"),
            ScalingScope::Pool => f.write_str("pool"),
        }
    }
}

impl FromStr for ScalingScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "query" => Ok(ScalingScope::Query),
            "pool" => Ok(ScalingScope::Pool),
            other => Err(format!("unknown scaling scope '{}', expected 'query' or 'pool'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommenderConfig {
    pub top_k: usize,
    pub scaling: ScalingScope,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            scaling: ScalingScope::default(),
        }
    }
}

/// A recommended food and its similarity to the query
#[derive(Debug, Clone, PartialEq)]
pub struct RankedFood<'a> {
    pub record: &'a FoodRecord,
    pub score: f32,
}

/// Recommends nutritionally similar foods from a shared, read-only dataset
#[derive(Debug, Clone)]
pub struct Recommender {
    dataset: Arc<Dataset>,
    config: RecommenderConfig,
}

impl Recommender {
    pub fn new(dataset: Arc<Dataset>, config: RecommenderConfig) -> Self {
        Self { dataset, config }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Rank foods similar to `query_name`, skipping any excluded by `allergens`
    ///
    /// # Returns
    /// * `Ok(None)` - the query food is not in the dataset
    /// * `Ok(Some(ranked))` - up to `top_k` foods, most similar first; ties keep dataset order
    /// * `Err(_)` - the query food has incomplete nutrition data
    ///
    /// The query food itself is a candidate and normally ranks first.
    /// Candidates without complete nutrition data are skipped.
    pub fn recommend(
        &self,
        query_name: &str,
        allergens: &AllergenFilter,
    ) -> Result<Option<Vec<RankedFood<'_>>>> {
        let query = match self.dataset.lookup(query_name) {
            Some(record) => record,
            None => {
                debug!("Food '{}' not found in dataset", query_name);
                return Ok(None);
            }
        };
        let query_vector = query
            .vector()
            .ok_or_else(|| Error::IncompleteNutrition(query.name.clone()))?;

        let candidates: Vec<(&FoodRecord, Vector)> = self
            .dataset
            .iter()
            .filter(|record| allergens.matches(record))
            .filter_map(|record| match record.vector() {
                Some(vector) => Some((record, vector)),
                None => {
                    debug!("Skipping '{}': incomplete nutrition data", record.name);
                    None
                }
            })
            .collect();

        if candidates.is_empty() {
            return Ok(Some(Vec::new()));
        }

        let scaler = match self.config.scaling {
            ScalingScope::Query => MinMaxScaler::fit([&query_vector])?,
            ScalingScope::Pool => MinMaxScaler::fit(
                std::iter::once(&query_vector).chain(candidates.iter().map(|(_, v)| v)),
            )?,
        };
        // a zero-range fit leaves every vector unchanged
        let identity = scaler.is_identity();
        let scaled_query = if identity {
            query_vector
        } else {
            scaler.transform(&query_vector)?
        };

        let mut ranked = candidates
            .par_iter()
            .map(|(record, vector)| {
                let score = if identity {
                    Ok(scaled_query.cosine_similarity(vector))
                } else {
                    scaler
                        .transform(vector)
                        .map(|scaled| scaled_query.cosine_similarity(&scaled))
                };
                score.map(|score| RankedFood {
                    record: *record,
                    score,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        // stable: equal scores keep dataset order
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(self.config.top_k);

        trace!(
            "Ranked for '{}': {:?}",
            query_name,
            ranked.iter().map(|r| (&r.record.name, r.score)).collect::<Vec<_>>()
        );

        Ok(Some(ranked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutrisim_core::NutritionFacts;

    fn food(name: &str, values: [f64; 9], allergens: Option<&str>) -> FoodRecord {
        let record = FoodRecord::new(name, NutritionFacts::from_values(values))
            .with_ingredients(name.to_lowercase());
        match allergens {
            Some(a) => record.with_allergens(a),
            None => record,
        }
    }

    fn create_test_dataset() -> Dataset {
        Dataset::new(vec![
            food("Apple", [52.0, 0.2, 0.0, 0.0, 1.0, 14.0, 2.4, 10.0, 0.3], None),
            food("Pear", [57.0, 0.1, 0.0, 0.0, 1.0, 15.0, 3.1, 10.0, 0.4], None),
            food("Cheddar", [403.0, 33.0, 21.0, 105.0, 621.0, 1.3, 0.0, 0.5, 25.0], Some("milk")),
            food("Peanut Butter", [588.0, 50.0, 10.0, 0.0, 459.0, 20.0, 6.0, 9.0, 25.0], Some("peanuts")),
            food("Almonds", [579.0, 50.0, 3.8, 0.0, 1.0, 22.0, 12.5, 4.4, 21.0], Some("tree nuts")),
            food("Omelette", [154.0, 12.0, 3.3, 313.0, 155.0, 0.6, 0.0, 0.4, 11.0], Some("eggs, milk")),
        ])
    }

    fn recommender(dataset: Dataset) -> Recommender {
        Recommender::new(Arc::new(dataset), RecommenderConfig::default())
    }

    fn names(ranked: &[RankedFood<'_>]) -> Vec<String> {
        ranked.iter().map(|r| r.record.name.clone()).collect()
    }

    #[test]
    fn test_query_ranks_itself_first() {
        let rec = recommender(create_test_dataset());
        let ranked = rec.recommend("Apple", &AllergenFilter::default()).unwrap().unwrap();

        assert_eq!(ranked.len(), 6);
        assert_eq!(ranked[0].record.name, "Apple");
        assert!((ranked[0].score - 1.0).abs() < 1e-5);
        assert_eq!(ranked[1].record.name, "Pear");
    }

    #[test]
    fn test_query_scope_scores_are_raw_cosine() {
        let dataset = create_test_dataset();
        let apple = dataset.lookup("Apple").unwrap().vector().unwrap();
        let rec = recommender(dataset);
        let ranked = rec.recommend("Apple", &AllergenFilter::default()).unwrap().unwrap();
        for r in &ranked {
            let raw = r.record.vector().unwrap();
            assert_eq!(r.score, apple.cosine_similarity(&raw));
        }
    }

    #[test]
    fn test_empty_allergen_token_keeps_only_foods_without_allergens() {
        let rec = recommender(create_test_dataset());
        let ranked = rec.recommend("Apple", &AllergenFilter::new([""])).unwrap().unwrap();
        assert_eq!(names(&ranked), vec!["Apple", "Pear"]);
    }

    #[test]
    fn test_out_of_range_candidate_is_skipped() {
        let mut records = create_test_dataset().records().to_vec();
        records.push(food("Typo", [1e300, 0.2, 0.0, 0.0, 1.0, 14.0, 2.4, 10.0, 0.3], None));
        let rec = recommender(Dataset::new(records));

        let ranked = rec.recommend("Apple", &AllergenFilter::default()).unwrap().unwrap();
        assert_eq!(ranked.len(), 6);
        assert!(ranked.iter().all(|r| r.record.name != "Typo"));
        assert!(ranked.iter().all(|r| r.score.is_finite()));
    }

    #[test]
    fn test_unknown_food_is_not_found() {
        let rec = recommender(create_test_dataset());
        let result = rec.recommend("Unicorn Meat", &AllergenFilter::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_scores_descending() {
        let rec = recommender(create_test_dataset());
        let ranked = rec.recommend("Cheddar", &AllergenFilter::default()).unwrap().unwrap();
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_allergens_are_excluded() {
        let rec = recommender(create_test_dataset());
        let filter = AllergenFilter::new(["nuts", "milk"]);
        let ranked = rec.recommend("Apple", &filter).unwrap().unwrap();

        assert_eq!(names(&ranked), vec!["Apple", "Pear"]);
        for r in &ranked {
            let text = r.record.allergens.as_deref().unwrap_or("");
            assert!(!text.contains("nuts") && !text.contains("milk"));
        }
    }

    #[test]
    fn test_query_food_may_be_filtered_out() {
        let rec = recommender(create_test_dataset());
        let ranked = rec
            .recommend("Cheddar", &AllergenFilter::new(["milk"]))
            .unwrap()
            .unwrap();
        assert!(ranked.iter().all(|r| r.record.name != "Cheddar"));
        assert_eq!(ranked.len(), 4);
    }

    #[test]
    fn test_empty_pool_is_empty_result() {
        let dataset = Dataset::new(vec![food(
            "Cheddar",
            [403.0, 33.0, 21.0, 105.0, 621.0, 1.3, 0.0, 0.5, 25.0],
            Some("milk"),
        )]);
        let rec = recommender(dataset);
        let ranked = rec
            .recommend("Cheddar", &AllergenFilter::new(["milk"]))
            .unwrap()
            .unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_top_k_limit() {
        let records = (0..25)
            .map(|i| {
                let x = i as f64;
                food(&format!("Food {}", i), [100.0 + x, x, 1.0, 0.0, 10.0 * x, 20.0, 1.0, x, 5.0], None)
            })
            .collect();
        let rec = recommender(Dataset::new(records));
        let ranked = rec.recommend("Food 3", &AllergenFilter::default()).unwrap().unwrap();
        assert_eq!(ranked.len(), DEFAULT_TOP_K);
        assert_eq!(ranked[0].record.name, "Food 3");

        let small = Recommender::new(
            rec.dataset.clone(),
            RecommenderConfig { top_k: 3, ..Default::default() },
        );
        assert_eq!(small.recommend("Food 3", &AllergenFilter::default()).unwrap().unwrap().len(), 3);
    }

    #[test]
    fn test_idempotent() {
        let rec = recommender(create_test_dataset());
        let filter = AllergenFilter::new(["eggs"]);
        let first = rec.recommend("Peanut Butter", &filter).unwrap();
        let second = rec.recommend("Peanut Butter", &filter).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_incomplete_candidate_is_skipped() {
        let mut dataset = create_test_dataset().records().to_vec();
        let mut broken = food("Mystery Stew", [1.0; 9], None);
        broken.nutrition.fat_content = None;
        dataset.insert(1, broken);

        let rec = recommender(Dataset::new(dataset));
        let ranked = rec.recommend("Apple", &AllergenFilter::default()).unwrap().unwrap();
        assert_eq!(ranked.len(), 6);
        assert!(ranked.iter().all(|r| r.record.name != "Mystery Stew"));
    }

    #[test]
    fn test_incomplete_query_is_an_error() {
        let mut broken = food("Mystery Stew", [1.0; 9], None);
        broken.nutrition.protein_content = None;
        let rec = recommender(Dataset::new(vec![broken]));

        let err = rec.recommend("Mystery Stew", &AllergenFilter::default()).unwrap_err();
        assert!(matches!(err, Error::IncompleteNutrition(ref name) if name == "Mystery Stew"));
    }

    #[test]
    fn test_zero_vector_scores_zero_and_ranks_last() {
        let mut records = create_test_dataset().records().to_vec();
        records.insert(0, food("Water", [0.0; 9], None));
        let rec = recommender(Dataset::new(records));

        let ranked = rec.recommend("Apple", &AllergenFilter::default()).unwrap().unwrap();
        let last = ranked.last().unwrap();
        assert_eq!(last.record.name, "Water");
        assert_eq!(last.score, 0.0);

        // querying water itself is well-defined: every score is zero
        let ranked = rec.recommend("Water", &AllergenFilter::default()).unwrap().unwrap();
        assert!(ranked.iter().all(|r| r.score == 0.0));
        assert_eq!(ranked[0].record.name, "Water");
    }

    #[test]
    fn test_ties_keep_dataset_order() {
        let values = [100.0, 5.0, 1.0, 0.0, 50.0, 10.0, 2.0, 3.0, 4.0];
        let doubled = values.map(|v| v * 2.0);
        let rec = recommender(Dataset::new(vec![
            food("Original", values, None),
            food("Copy B", doubled, None),
            food("Copy A", values, None),
        ]));

        let ranked = rec.recommend("Copy A", &AllergenFilter::default()).unwrap().unwrap();
        // identical directions, so scores tie; dataset order decides
        assert_eq!(names(&ranked), vec!["Original", "Copy B", "Copy A"]);
    }

    #[test]
    fn test_pool_scaling_still_ranks_query_first() {
        let rec = Recommender::new(
            Arc::new(create_test_dataset()),
            RecommenderConfig { scaling: ScalingScope::Pool, ..Default::default() },
        );
        let ranked = rec.recommend("Omelette", &AllergenFilter::default()).unwrap().unwrap();
        assert_eq!(ranked[0].record.name, "Omelette");
        assert!((ranked[0].score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_scaling_scope_parse() {
        assert_eq!("query".parse::<ScalingScope>().unwrap(), ScalingScope::Query);
        assert_eq!("POOL".parse::<ScalingScope>().unwrap(), ScalingScope::Pool);
        assert!("global".parse::<ScalingScope>().is_err());
        assert_eq!(ScalingScope::Pool.to_string(), "pool");
    }
}
