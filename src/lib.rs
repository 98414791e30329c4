//! # NutriSim
//!
//! Recommends nutritionally similar foods from a fixed dataset, excluding
//! foods that contain any of a caller's allergens.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! nutrisim --data-file ./data/foods.csv --http-port 5000
//! curl -X POST localhost:5000/recommend \
//!      -H 'Content-Type: application/json' \
//!      -d '{"food_name": "Apple", "allergens": ["nuts"]}'
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use nutrisim::prelude::*;
//! use std::sync::Arc;
//!
//! let dataset = Dataset::from_csv_path("./data/foods.csv").unwrap();
//! let recommender = Recommender::new(Arc::new(dataset), RecommenderConfig::default());
//!
//! let filter = AllergenFilter::new(["nuts"]);
//! if let Some(ranked) = recommender.recommend("Apple", &filter).unwrap() {
//!     for food in ranked {
//!         println!("{} ({:.3})", food.record.name, food.score);
//!     }
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `nutrisim-core` - Food records, CSV dataset, allergen filter, vectors
//! - `nutrisim-similarity` - Min-max scaling and cosine top-k ranking
//! - `nutrisim-api` - REST API

// Re-export core types
pub use nutrisim_core::{
    AllergenFilter, Dataset, Filter,
    FoodRecord, NutritionFacts, Vector,
    NUTRITION_DIM, NUTRITION_FIELDS,
    Error, Result,
};

// Re-export similarity
pub use nutrisim_similarity::{
    MinMaxScaler, RankedFood, Recommender, RecommenderConfig, ScalingScope, DEFAULT_TOP_K,
};

// Re-export API
pub use nutrisim_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AllergenFilter, Dataset, Filter,
        FoodRecord, NutritionFacts, Vector,
        Recommender, RecommenderConfig, RankedFood, ScalingScope,
        Error, Result,
        RestApi,
    };
}
