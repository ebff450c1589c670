// Vaccination Service - lifecycle operations and alerting queries

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{
    Classification, VaccinationRecord, VaccinationStatus, DEFAULT_DUE_SOON_WINDOW_DAYS,
    DEFAULT_UPCOMING_WINDOW_DAYS,
};
use crate::error::{AppError, Result};
use crate::port::{AnimalStore, Clock, IdProvider, VaccinationStore};

/// Request to register an administered dose
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterVaccinationRequest {
    pub animal_id: String,
    pub vaccine_name: String,
    pub applied_on: NaiveDate,
    #[serde(default)]
    pub next_dose: Option<NaiveDate>,
    #[serde(default)]
    pub lot: Option<String>,
    #[serde(default)]
    pub veterinarian: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Closed update-request type: only these fields can change, and `animal_id`
/// is deliberately absent (a record never moves between animals).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VaccinationUpdate {
    #[serde(default)]
    pub vaccine_name: Option<String>,
    #[serde(default)]
    pub applied_on: Option<NaiveDate>,
    #[serde(default)]
    pub next_dose: Option<NaiveDate>,
    #[serde(default)]
    pub lot: Option<String>,
    #[serde(default)]
    pub veterinarian: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Record plus its classification, for single-record detail views
#[derive(Debug, Clone, Serialize)]
pub struct VaccinationDetail {
    pub record: VaccinationRecord,
    pub classification: Classification,
}

/// Per-animal vaccination counters.
///
/// `on_track = total - overdue - due_soon`: complete and unscheduled records
/// land in the on-track bucket, so the three counters always sum to `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VaccinationStats {
    pub total: i64,
    pub overdue: i64,
    pub due_soon: i64,
    pub on_track: i64,
}

/// Vaccination Service
///
/// Every query computes a fresh snapshot: `today` is read once per call and
/// threaded through all classifications in that call.
pub struct VaccinationService {
    vaccines: Arc<dyn VaccinationStore>,
    animals: Arc<dyn AnimalStore>,
    id_provider: Arc<dyn IdProvider>,
    clock: Arc<dyn Clock>,
    due_soon_window: i64,
    upcoming_window: i64,
}

impl VaccinationService {
    pub fn new(
        vaccines: Arc<dyn VaccinationStore>,
        animals: Arc<dyn AnimalStore>,
        id_provider: Arc<dyn IdProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            vaccines,
            animals,
            id_provider,
            clock,
            due_soon_window: DEFAULT_DUE_SOON_WINDOW_DAYS,
            upcoming_window: DEFAULT_UPCOMING_WINDOW_DAYS,
        }
    }

    /// Override the default due-soon and upcoming windows (daemon config)
    pub fn with_windows(mut self, due_soon_window: i64, upcoming_window: i64) -> Self {
        self.due_soon_window = due_soon_window;
        self.upcoming_window = upcoming_window;
        self
    }

    async fn ensure_animal(&self, animal_id: &str) -> Result<()> {
        if self.animals.exists_by_id(animal_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!(
                "Animal {} not found",
                animal_id
            )))
        }
    }

    /// Register a newly administered dose
    pub async fn register(&self, req: RegisterVaccinationRequest) -> Result<VaccinationRecord> {
        if req.vaccine_name.trim().is_empty() {
            return Err(AppError::Validation(
                "vaccine name must not be blank".to_string(),
            ));
        }
        self.ensure_animal(&req.animal_id).await?;

        let today = self.clock.today();
        if req.applied_on > today {
            return Err(AppError::Validation(format!(
                "application date {} is in the future",
                req.applied_on
            )));
        }

        let mut record = VaccinationRecord::new(
            self.id_provider.generate_id(),
            self.clock.now_millis(),
            req.animal_id,
            req.vaccine_name,
            req.applied_on,
        );
        record.next_dose = req.next_dose;
        record.lot = req.lot;
        record.veterinarian = req.veterinarian;
        record.notes = req.notes;

        self.vaccines.insert(&record).await?;

        info!(
            record_id = %record.id,
            animal_id = %record.animal_id,
            vaccine = %record.vaccine_name,
            "Vaccination registered"
        );

        Ok(record)
    }

    pub async fn get(&self, id: &str) -> Result<VaccinationRecord> {
        self.vaccines
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vaccination record {} not found", id)))
    }

    /// Record plus classification under the default due-soon window
    pub async fn detail(&self, id: &str) -> Result<VaccinationDetail> {
        let record = self.get(id).await?;
        let today = self.clock.today();
        let classification = record.classify(today, self.due_soon_window);
        Ok(VaccinationDetail {
            record,
            classification,
        })
    }

    /// Apply a partial correction to a record
    pub async fn update(&self, id: &str, update: VaccinationUpdate) -> Result<VaccinationRecord> {
        let mut record = self.get(id).await?;
        let today = self.clock.today();

        if let Some(vaccine_name) = update.vaccine_name {
            if vaccine_name.trim().is_empty() {
                return Err(AppError::Validation(
                    "vaccine name must not be blank".to_string(),
                ));
            }
            record.vaccine_name = vaccine_name;
        }
        if let Some(applied_on) = update.applied_on {
            if applied_on > today {
                return Err(AppError::Validation(format!(
                    "application date {} is in the future",
                    applied_on
                )));
            }
            record.applied_on = applied_on;
        }
        if let Some(next_dose) = update.next_dose {
            record.next_dose = Some(next_dose);
        }
        if let Some(lot) = update.lot {
            record.lot = Some(lot);
        }
        if let Some(veterinarian) = update.veterinarian {
            record.veterinarian = Some(veterinarian);
        }
        if let Some(notes) = update.notes {
            record.notes = Some(notes);
        }
        if let Some(completed) = update.completed {
            record.completed = completed;
        }
        // Completion and a pending next dose are mutually exclusive
        if record.completed {
            record.next_dose = None;
        }

        self.vaccines.update(&record).await?;
        Ok(record)
    }

    /// Mark the series complete (clears the scheduled next dose)
    pub async fn mark_complete(&self, id: &str) -> Result<VaccinationRecord> {
        let mut record = self.get(id).await?;
        record.mark_complete();
        self.vaccines.update(&record).await?;

        info!(record_id = %record.id, "Vaccination series marked complete");
        Ok(record)
    }

    pub async fn remove(&self, id: &str) -> Result<()> {
        if !self.vaccines.exists_by_id(id).await? {
            return Err(AppError::NotFound(format!(
                "Vaccination record {} not found",
                id
            )));
        }
        self.vaccines.delete_by_id(id).await
    }

    pub async fn list_all(&self) -> Result<Vec<VaccinationRecord>> {
        let mut records = self.vaccines.find_all().await?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    /// All records of one animal, application date descending
    pub async fn list_for_animal(&self, animal_id: &str) -> Result<Vec<VaccinationRecord>> {
        self.ensure_animal(animal_id).await?;
        let mut records = self.vaccines.find_by_animal(animal_id).await?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    /// Incomplete records of one animal, application date descending
    pub async fn list_pending(&self, animal_id: &str) -> Result<Vec<VaccinationRecord>> {
        self.ensure_animal(animal_id).await?;
        let mut records = self.vaccines.find_incomplete_by_animal(animal_id).await?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    /// Incomplete records whose next dose is strictly before today
    pub async fn list_overdue(&self) -> Result<Vec<VaccinationRecord>> {
        let today = self.clock.today();
        let records = self.vaccines.find_incomplete().await?;
        Ok(records
            .into_iter()
            .filter(|r| r.classify(today, self.due_soon_window).status == VaccinationStatus::Overdue)
            .collect())
    }

    /// Incomplete records due within the window (default: configured due-soon days)
    pub async fn list_due_soon(&self, window: Option<i64>) -> Result<Vec<VaccinationRecord>> {
        self.list_due_within(window.unwrap_or(self.due_soon_window))
            .await
    }

    /// The wider upcoming-doses report (default: configured upcoming days)
    pub async fn list_upcoming(&self, window: Option<i64>) -> Result<Vec<VaccinationRecord>> {
        self.list_due_within(window.unwrap_or(self.upcoming_window))
            .await
    }

    async fn list_due_within(&self, window: i64) -> Result<Vec<VaccinationRecord>> {
        let today = self.clock.today();
        let records = self.vaccines.find_incomplete().await?;
        Ok(records
            .into_iter()
            .filter(|r| r.classify(today, window).status == VaccinationStatus::DueSoon)
            .collect())
    }

    /// The pending record with the soonest next dose; ties broken by lowest ID
    pub async fn next_upcoming(&self, animal_id: &str) -> Result<Option<VaccinationRecord>> {
        self.ensure_animal(animal_id).await?;
        let records = self.vaccines.find_incomplete_by_animal(animal_id).await?;
        Ok(records
            .into_iter()
            .filter(|r| r.next_dose.is_some())
            .min_by(|a, b| a.next_dose.cmp(&b.next_dose).then_with(|| a.id.cmp(&b.id))))
    }

    pub async fn count_for_animal(&self, animal_id: &str) -> Result<i64> {
        self.ensure_animal(animal_id).await?;
        self.vaccines.count_by_animal(animal_id).await
    }

    /// Counters over all records of one animal
    pub async fn statistics(&self, animal_id: &str) -> Result<VaccinationStats> {
        self.ensure_animal(animal_id).await?;
        let today = self.clock.today();
        let records = self.vaccines.find_by_animal(animal_id).await?;

        let mut overdue = 0;
        let mut due_soon = 0;
        for record in &records {
            match record.classify(today, self.due_soon_window).status {
                VaccinationStatus::Overdue => overdue += 1,
                VaccinationStatus::DueSoon => due_soon += 1,
                _ => {}
            }
        }

        let total = records.len() as i64;
        Ok(VaccinationStats {
            total,
            overdue,
            due_soon,
            on_track: total - overdue - due_soon,
        })
    }

    /// Alert lines for all incomplete records of one animal, newest first
    pub async fn alerts_for_animal(&self, animal_id: &str) -> Result<Vec<String>> {
        let records = self.list_pending(animal_id).await?;
        let today = self.clock.today();
        Ok(records
            .iter()
            .map(|r| {
                let c = r.classify(today, self.due_soon_window);
                format!("{}: {}", r.vaccine_name, c.alert)
            })
            .collect())
    }

    pub async fn find_by_name(&self, fragment: &str) -> Result<Vec<VaccinationRecord>> {
        let mut records = self.vaccines.find_by_vaccine_name(fragment).await?;
        sort_newest_first(&mut records);
        Ok(records)
    }
}

/// Application date descending, stable tie-break by record ID
fn sort_newest_first(records: &mut [VaccinationRecord]) {
    records.sort_by(|a, b| {
        b.applied_on
            .cmp(&a.applied_on)
            .then_with(|| a.id.cmp(&b.id))
    });
}
