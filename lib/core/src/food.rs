use serde::{Deserialize, Serialize};
use crate::vector::Vector;

/// Number of nutritional attributes used for similarity
pub const NUTRITION_DIM: usize = 9;

/// Nutritional column names, in vector order
pub const NUTRITION_FIELDS: [&str; NUTRITION_DIM] = [
    "Calories",
    "FatContent",
    "SaturatedFatContent",
    "CholesterolContent",
    "SodiumContent",
    "CarbohydrateContent",
    "FiberContent",
    "SugarContent",
    "ProteinContent",
];

/// The nine nutritional attributes of a food.
///
/// Each value is optional because the source data may have empty or
/// non-numeric cells. Only a record with all nine values present can be
/// turned into a [`Vector`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NutritionFacts {
    pub calories: Option<f64>,
    pub fat_content: Option<f64>,
    pub saturated_fat_content: Option<f64>,
    pub cholesterol_content: Option<f64>,
    pub sodium_content: Option<f64>,
    pub carbohydrate_content: Option<f64>,
    pub fiber_content: Option<f64>,
    pub sugar_content: Option<f64>,
    pub protein_content: Option<f64>,
}

impl NutritionFacts {
    /// Build from a complete set of values in [`NUTRITION_FIELDS`] order
    pub fn from_values(values: [f64; NUTRITION_DIM]) -> Self {
        let [calories, fat_content, saturated_fat_content, cholesterol_content, sodium_content, carbohydrate_content, fiber_content, sugar_content, protein_content] =
            values;
        Self {
            calories: Some(calories),
            fat_content: Some(fat_content),
            saturated_fat_content: Some(saturated_fat_content),
            cholesterol_content: Some(cholesterol_content),
            sodium_content: Some(sodium_content),
            carbohydrate_content: Some(carbohydrate_content),
            fiber_content: Some(fiber_content),
            sugar_content: Some(sugar_content),
            protein_content: Some(protein_content),
        }
    }

    pub fn values(&self) -> [Option<f64>; NUTRITION_DIM] {
        [
            self.calories,
            self.fat_content,
            self.saturated_fat_content,
            self.cholesterol_content,
            self.sodium_content,
            self.carbohydrate_content,
            self.fiber_content,
            self.sugar_content,
            self.protein_content,
        ]
    }

    /// Returns the nutrition vector, or `None` if any value is missing or not finite
    pub fn vector(&self) -> Option<Vector> {
        self.values()
            .into_iter()
            .map(|v| v.map(|x| x as f32).filter(|x| x.is_finite()))
            .collect::<Option<Vec<f32>>>()
            .map(Vector::new)
    }

    pub fn is_complete(&self) -> bool {
        self.vector().is_some()
    }
}

/// A single food in the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FoodRecord {
    pub name: String,
    pub ingredients: Option<String>,
    pub allergens: Option<String>,
    #[serde(flatten)]
    pub nutrition: NutritionFacts,
}

impl FoodRecord {
    pub fn new(name: impl Into<String>, nutrition: NutritionFacts) -> Self {
        Self {
            name: name.into(),
            ingredients: None,
            allergens: None,
            nutrition,
        }
    }

    pub fn with_ingredients(mut self, ingredients: impl Into<String>) -> Self {
        self.ingredients = Some(ingredients.into());
        self
    }

    pub fn with_allergens(mut self, allergens: impl Into<String>) -> Self {
        self.allergens = Some(allergens.into());
        self
    }

    pub fn vector(&self) -> Option<Vector> {
        self.nutrition.vector()
    }
}
