use crate::{Error, FoodRecord, NutritionFacts, Result, NUTRITION_FIELDS};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// One CSV row as it appears on disk. Extra columns are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FoodRow {
    name: String,
    #[serde(default)]
    ingredients: Option<String>,
    #[serde(default)]
    allergens: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    calories: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    fat_content: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    saturated_fat_content: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    cholesterol_content: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    sodium_content: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    carbohydrate_content: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    fiber_content: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    sugar_content: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    protein_content: Option<f64>,
}

impl From<FoodRow> for FoodRecord {
    fn from(row: FoodRow) -> Self {
        FoodRecord {
            name: row.name,
            ingredients: row.ingredients,
            allergens: row.allergens,
            nutrition: NutritionFacts {
                calories: row.calories,
                fat_content: row.fat_content,
                saturated_fat_content: row.saturated_fat_content,
                cholesterol_content: row.cholesterol_content,
                sodium_content: row.sodium_content,
                carbohydrate_content: row.carbohydrate_content,
                fiber_content: row.fiber_content,
                sugar_content: row.sugar_content,
                protein_content: row.protein_content,
            },
        }
    }
}

/// Immutable, ordered table of foods.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<FoodRecord>,
}

impl Dataset {
    pub fn new(records: Vec<FoodRecord>) -> Self {
        Self { records }
    }

    /// Load a dataset from a headered CSV file
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = Self::from_csv_reader(file)?;
        info!(
            "Loaded {} foods from {:?} ({} scorable)",
            dataset.len(),
            path,
            dataset.scorable_count()
        );
        Ok(dataset)
    }

    /// Load a dataset from any CSV source.
    ///
    /// `Name` and every nutrition column must be present in the header.
    /// Rows that cannot be decoded, or that have an empty name, are skipped.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        for required in std::iter::once("Name").chain(NUTRITION_FIELDS) {
            if !headers.iter().any(|h| h == required) {
                return Err(Error::MissingColumn(required.to_string()));
            }
        }

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<FoodRow>().enumerate() {
            // header is line 1
            let line = index + 2;
            match row {
                Ok(row) if row.name.is_empty() => {
                    warn!("Skipping CSV line {}: empty name", line);
                }
                Ok(row) => records.push(FoodRecord::from(row)),
                Err(e) => {
                    warn!("Skipping CSV line {}: {}", line, e);
                }
            }
        }

        if records.is_empty() {
            return Err(Error::EmptyDataset);
        }

        debug!("Parsed {} CSV rows", records.len());
        Ok(Self::new(records))
    }

    /// First record whose name equals `name` exactly
    pub fn lookup(&self, name: &str) -> Option<&FoodRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FoodRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[FoodRecord] {
        &self.records
    }

    /// Number of records with complete nutritional data
    pub fn scorable_count(&self) -> usize {
        self.records.iter().filter(|r| r.nutrition.is_complete()).count()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a FoodRecord;
    type IntoIter = std::slice::Iter<'a, FoodRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
