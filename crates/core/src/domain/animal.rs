// Animal Domain Model

use serde::{Deserialize, Serialize};

use crate::domain::age;
use crate::domain::error::{DomainError, Result};

/// Animal ID (UUID v4)
pub type AnimalId = String;

/// Age invariant bounds: `0 < age_years <= MAX_AGE_YEARS`
pub const MAX_AGE_YEARS: f64 = 50.0;

/// Species tag. Selects the age-conversion curve and the traits payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Species {
    Dog,
    Cat,
    Other,
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Species::Dog => write!(f, "DOG"),
            Species::Cat => write!(f, "CAT"),
            Species::Other => write!(f, "OTHER"),
        }
    }
}

/// Species-variant payload. One Animal type carrying a tagged union instead
/// of per-species subclasses; care logic dispatches on the tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpeciesTraits {
    Dog {
        /// Size class (small, medium, large) driving exercise guidance
        size: Option<String>,
    },
    Cat {
        /// Coat length (short, medium, long) driving grooming guidance
        coat: Option<String>,
        temperament: Option<String>,
    },
    Other,
}

impl SpeciesTraits {
    /// The species tag this payload belongs to
    pub fn species(&self) -> Species {
        match self {
            SpeciesTraits::Dog { .. } => Species::Dog,
            SpeciesTraits::Cat { .. } => Species::Cat,
            SpeciesTraits::Other => Species::Other,
        }
    }
}

/// Animal Entity
///
/// The species tag is derived from the traits payload and is immutable after
/// registration; updates may only replace the payload with one of the same tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: AnimalId,
    pub name: String,
    pub breed: Option<String>,
    /// Chronological age in fractional years (e.g. 0.5 = six months)
    pub age_years: f64,
    pub owner_name: String,
    pub owner_phone: String,
    pub traits: SpeciesTraits,
    pub created_at: i64, // epoch ms
}

/// Validate the age invariant: strictly positive, at most 50 years
pub fn validate_age(age_years: f64) -> Result<()> {
    if age_years > 0.0 && age_years <= MAX_AGE_YEARS {
        Ok(())
    } else {
        Err(DomainError::AgeOutOfRange(age_years))
    }
}

impl Animal {
    /// Create a new Animal
    ///
    /// # Arguments
    ///
    /// * `id` - Unique animal ID (injected, not generated)
    /// * `created_at` - Registration timestamp in epoch ms (injected, not system time)
    pub fn new(
        id: impl Into<String>,
        created_at: i64,
        name: impl Into<String>,
        breed: Option<String>,
        age_years: f64,
        owner_name: impl Into<String>,
        owner_phone: impl Into<String>,
        traits: SpeciesTraits,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            breed,
            age_years,
            owner_name: owner_name.into(),
            owner_phone: owner_phone.into(),
            traits,
            created_at,
        }
    }

    pub fn species(&self) -> Species {
        self.traits.species()
    }

    /// Total age in whole months (rounded)
    pub fn age_in_months(&self) -> i64 {
        (self.age_years * 12.0).round() as i64
    }

    /// Elapsed full years
    pub fn full_years(&self) -> i64 {
        self.age_years as i64
    }

    /// Months beyond the last full year
    pub fn extra_months(&self) -> i64 {
        self.age_in_months() - self.full_years() * 12
    }

    /// Human-readable age, e.g. "3 year(s) and 6 month(s)"
    pub fn formatted_age(&self) -> String {
        let years = self.full_years();
        let months = self.extra_months();

        if years == 0 {
            format!("{} month(s)", months)
        } else if months == 0 {
            format!("{} year(s)", years)
        } else {
            format!("{} year(s) and {} month(s)", years, months)
        }
    }

    /// Full record card: identity, owner contact, and the species-specific
    /// section (human-equivalent age and care recommendations)
    pub fn summary_card(&self) -> String {
        let mut card = String::new();
        card.push_str("========== ANIMAL RECORD ==========\n");
        card.push_str(&format!("ID: {}\n", self.id));
        card.push_str(&format!("Name: {}\n", self.name));
        card.push_str(&format!("Species: {}\n", self.species()));
        card.push_str(&format!(
            "Breed: {}\n",
            self.breed.as_deref().unwrap_or("not recorded")
        ));
        card.push_str(&format!(
            "Age: {} ({} months in total)\n",
            self.formatted_age(),
            self.age_in_months()
        ));
        card.push_str("--- Owner ---\n");
        card.push_str(&format!("Name: {}\n", self.owner_name));
        card.push_str(&format!("Phone: {}\n", self.owner_phone));
        card.push_str("--- Species Details ---\n");
        match age::human_equivalent_age(self.species(), self.age_years) {
            Some(human_age) => {
                card.push_str(&format!("Human-equivalent age: {} years\n", human_age))
            }
            None => card.push_str("Human-equivalent age: unsupported for this species\n"),
        }
        for line in age::care_recommendations(&self.traits) {
            card.push_str(&line);
            card.push('\n');
        }
        card.push_str("===================================");
        card
    }
}

impl Animal {
    /// Create a test animal with deterministic ID and timestamp.
    ///
    /// Uses a simple counter for deterministic test IDs (animal-1, animal-2, ...).
    /// Timestamps start at 1000 and increment by 1000.
    ///
    /// **Note**: This method should only be used in tests. For production code,
    /// always inject ID and time via providers.
    pub fn new_test(name: impl Into<String>, age_years: f64, traits: SpeciesTraits) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

        let counter = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let id = format!("animal-{}", counter);
        let created_at = (counter * 1000) as i64;

        Self::new(
            id,
            created_at,
            name,
            None,
            age_years,
            "Test Owner",
            "555-0000",
            traits,
        )
    }
}
