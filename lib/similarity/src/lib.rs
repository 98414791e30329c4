//! # NutriSim Similarity
//!
//! Nutritional similarity ranking over a NutriSim [`Dataset`](nutrisim_core::Dataset).
//!
//! ## Features
//!
//! - **Min-max scaling**: Per-dimension normalization fitted on the query or the whole pool
//! - **Cosine ranking**: Candidates scored against the query's nutrition vector
//! - **Allergen exclusion**: Foods matching any excluded allergen never reach ranking
//! - **Top-k**: Stable ordering, most similar first
//!
//! ## Example
//!
//! ```rust
//! use nutrisim_core::{AllergenFilter, Dataset, FoodRecord, NutritionFacts};
//! use nutrisim_similarity::{Recommender, RecommenderConfig};
//! use std::sync::Arc;
//!
//! let dataset = Dataset::new(vec![
//!     FoodRecord::new("Apple", NutritionFacts::from_values([52.0, 0.2, 0.0, 0.0, 1.0, 14.0, 2.4, 10.0, 0.3])),
//!     FoodRecord::new("Pear", NutritionFacts::from_values([57.0, 0.1, 0.0, 0.0, 1.0, 15.0, 3.1, 10.0, 0.4])),
//! ]);
//!
//! let recommender = Recommender::new(Arc::new(dataset), RecommenderConfig::default());
//! let ranked = recommender
//!     .recommend("Apple", &AllergenFilter::default())
//!     .unwrap()
//!     .expect("Apple is in the dataset");
//! assert_eq!(ranked[0].record.name, "Apple");
//! assert_eq!(ranked[1].record.name, "Pear");
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Lookup    │────>│  Allergen   │────>│   Scaler    │
//! │  (query)    │     │   Filter    │     │  (min-max)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │   Top-k     │<────│   Cosine    │
//!                     │ (stable)    │     │   Scoring   │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod recommender;
pub mod scaler;

pub use recommender::{RankedFood, Recommender, RecommenderConfig, ScalingScope, DEFAULT_TOP_K};
pub use scaler::MinMaxScaler;
