// Vaccination Domain Model - records, derived status, alerting

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::animal::AnimalId;

/// Vaccination record ID (UUID v4)
pub type RecordId = String;

/// Days ahead of the next dose that count as "due soon"
pub const DEFAULT_DUE_SOON_WINDOW_DAYS: i64 = 7;

/// Wider window used by the upcoming-doses report
pub const DEFAULT_UPCOMING_WINDOW_DAYS: i64 = 30;

/// Derived vaccination status. Never stored; recomputed on every read from
/// the record's dates, the completion flag and the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VaccinationStatus {
    Complete,
    NoNextDose,
    Overdue,
    DueSoon,
    OnTrack,
}

impl std::fmt::Display for VaccinationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VaccinationStatus::Complete => write!(f, "COMPLETE"),
            VaccinationStatus::NoNextDose => write!(f, "NO_NEXT_DOSE"),
            VaccinationStatus::Overdue => write!(f, "OVERDUE"),
            VaccinationStatus::DueSoon => write!(f, "DUE_SOON"),
            VaccinationStatus::OnTrack => write!(f, "ON_TRACK"),
        }
    }
}

/// Result of classifying a record against a reference date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub status: VaccinationStatus,
    /// Signed day distance to the next dose; `None` when complete or unscheduled
    pub days_until_next: Option<i64>,
    pub alert: String,
}

/// Vaccination Record Entity
///
/// Owned by exactly one animal; `animal_id` is immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaccinationRecord {
    pub id: RecordId,
    pub animal_id: AnimalId,
    pub vaccine_name: String,
    /// Date the dose was administered; never in the future
    pub applied_on: NaiveDate,
    /// Scheduled next dose, if the series continues
    pub next_dose: Option<NaiveDate>,
    pub lot: Option<String>,
    pub veterinarian: Option<String>,
    pub notes: Option<String>,
    /// All doses administered; mutually exclusive with a pending next dose
    pub completed: bool,
    pub created_at: i64, // epoch ms
}

impl VaccinationRecord {
    /// Create a new VaccinationRecord
    ///
    /// # Arguments
    ///
    /// * `id` - Unique record ID (injected, not generated)
    /// * `created_at` - Creation timestamp in epoch ms (injected, not system time)
    pub fn new(
        id: impl Into<String>,
        created_at: i64,
        animal_id: impl Into<String>,
        vaccine_name: impl Into<String>,
        applied_on: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            animal_id: animal_id.into(),
            vaccine_name: vaccine_name.into(),
            applied_on,
            next_dose: None,
            lot: None,
            veterinarian: None,
            notes: None,
            completed: false,
            created_at,
        }
    }

    /// Mark the series complete. Clears the scheduled next dose: completion
    /// and a pending dose are mutually exclusive.
    pub fn mark_complete(&mut self) {
        self.completed = true;
        self.next_dose = None;
    }

    /// Classify this record against `today` with the given due-soon window.
    ///
    /// Pure projection: never mutates the record, same inputs always produce
    /// the same output. `today` must be a single consistent date for a whole
    /// batch so classification cannot straddle a day boundary.
    pub fn classify(&self, today: NaiveDate, due_soon_window: i64) -> Classification {
        if self.completed {
            return Classification {
                status: VaccinationStatus::Complete,
                days_until_next: None,
                alert: "vaccination series complete".to_string(),
            };
        }

        let Some(next_dose) = self.next_dose else {
            return Classification {
                status: VaccinationStatus::NoNextDose,
                days_until_next: None,
                alert: "no next dose scheduled".to_string(),
            };
        };

        let days = (next_dose - today).num_days();

        // A dose due exactly today is never overdue
        let (status, alert) = if days < 0 {
            (
                VaccinationStatus::Overdue,
                format!("overdue by {} day(s)", -days),
            )
        } else if days == 0 {
            (VaccinationStatus::DueSoon, "due today".to_string())
        } else if days == 1 {
            (VaccinationStatus::DueSoon, "due tomorrow".to_string())
        } else if days <= due_soon_window {
            (VaccinationStatus::DueSoon, format!("due in {} days", days))
        } else {
            (
                VaccinationStatus::OnTrack,
                format!("next dose on {}", next_dose),
            )
        };

        Classification {
            status,
            days_until_next: Some(days),
            alert,
        }
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.classify(today, DEFAULT_DUE_SOON_WINDOW_DAYS).status == VaccinationStatus::Overdue
    }

    pub fn is_due_soon(&self, today: NaiveDate, window: i64) -> bool {
        self.classify(today, window).status == VaccinationStatus::DueSoon
    }
}

impl VaccinationRecord {
    /// Create a test record with deterministic ID and timestamp.
    ///
    /// Uses a simple counter for deterministic test IDs (rec-1, rec-2, ...).
    ///
    /// **Note**: This method should only be used in tests. For production code,
    /// always inject ID and time via providers.
    pub fn new_test(
        animal_id: impl Into<String>,
        vaccine_name: impl Into<String>,
        applied_on: NaiveDate,
        next_dose: Option<NaiveDate>,
    ) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

        let counter = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let mut record = Self::new(
            format!("rec-{}", counter),
            (counter * 1000) as i64,
            animal_id,
            vaccine_name,
            applied_on,
        );
        record.next_dose = next_dose;
        record
    }
}
