// Allergen exclusion filter
use crate::FoodRecord;

pub trait Filter {
    fn matches(&self, record: &FoodRecord) -> bool;
}

/// Keeps records whose allergen text contains none of the excluded tokens.
///
/// Matching is a case-sensitive substring test. A record with no allergen
/// text always passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllergenFilter {
    tokens: Vec<String>,
}

impl AllergenFilter {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl Filter for AllergenFilter {
    fn matches(&self, record: &FoodRecord) -> bool {
        match record.allergens.as_deref() {
            Some(text) => !self.tokens.iter().any(|t| text.contains(t.as_str())),
            None => true,
        }
    }
}
