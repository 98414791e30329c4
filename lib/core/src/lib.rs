//! # NutriSim Core
//!
//! Core library for the NutriSim food recommender.
//!
//! This crate provides the dataset side of the system:
//!
//! - [`FoodRecord`] - A food with ingredients, allergens and nutrition facts
//! - [`NutritionFacts`] - The nine nutritional attributes used for similarity
//! - [`Dataset`] - Immutable, ordered table of foods loaded from CSV
//! - [`Vector`] - Dense vector with cosine similarity
//! - [`AllergenFilter`] - Excludes foods by allergen substring
//!
//! ## Example
//!
//! ```rust
//! use nutrisim_core::{AllergenFilter, Dataset, Filter, FoodRecord, NutritionFacts};
//!
//! let dataset = Dataset::new(vec![
//!     FoodRecord::new("Apple", NutritionFacts::from_values([52.0, 0.2, 0.0, 0.0, 1.0, 14.0, 2.4, 10.0, 0.3])),
//!     FoodRecord::new("Granola", NutritionFacts::from_values([471.0, 20.0, 4.0, 0.0, 26.0, 64.0, 7.0, 25.0, 10.0]))
//!         .with_allergens("tree nuts"),
//! ]);
//!
//! assert!(dataset.lookup("Apple").is_some());
//!
//! let filter = AllergenFilter::new(["nuts"]);
//! let allowed: Vec<_> = dataset.iter().filter(|r| filter.matches(r)).collect();
//! assert_eq!(allowed.len(), 1);
//! ```

pub mod dataset;
pub mod error;
pub mod filter;
pub mod food;
pub mod vector;

pub use dataset::Dataset;
pub use error::{Error, Result};
pub use filter::{AllergenFilter, Filter};
pub use food::{FoodRecord, NutritionFacts, NUTRITION_DIM, NUTRITION_FIELDS};
pub use vector::Vector;
