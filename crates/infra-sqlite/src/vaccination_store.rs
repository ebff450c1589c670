// SQLite VaccinationStore Implementation

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

use healthpet_core::domain::VaccinationRecord;
use healthpet_core::error::Result;
use healthpet_core::port::VaccinationStore;

use crate::error_map::map_sqlx_error;

pub struct SqliteVaccinationStore {
    pool: SqlitePool,
}

impl SqliteVaccinationStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VaccinationStore for SqliteVaccinationStore {
    async fn insert(&self, record: &VaccinationRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO vaccinations (
                id, animal_id, vaccine_name, applied_on, next_dose,
                lot, veterinarian, notes, completed, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.animal_id)
        .bind(&record.vaccine_name)
        .bind(record.applied_on)
        .bind(record.next_dose)
        .bind(&record.lot)
        .bind(&record.veterinarian)
        .bind(&record.notes)
        .bind(if record.completed { 1 } else { 0 })
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<VaccinationRecord>> {
        let row = sqlx::query_as::<_, VaccinationRow>("SELECT * FROM vaccinations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_record()))
    }

    async fn find_all(&self) -> Result<Vec<VaccinationRecord>> {
        let rows: Vec<VaccinationRow> =
            sqlx::query_as("SELECT * FROM vaccinations ORDER BY applied_on DESC, id ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_record()).collect())
    }

    async fn update(&self, record: &VaccinationRecord) -> Result<()> {
        // animal_id and created_at are immutable after creation
        sqlx::query(
            r#"
            UPDATE vaccinations
            SET vaccine_name = ?, applied_on = ?, next_dose = ?,
                lot = ?, veterinarian = ?, notes = ?, completed = ?
            WHERE id = ?
            "#,
        )
        .bind(&record.vaccine_name)
        .bind(record.applied_on)
        .bind(record.next_dose)
        .bind(&record.lot)
        .bind(&record.veterinarian)
        .bind(&record.notes)
        .bind(if record.completed { 1 } else { 0 })
        .bind(&record.id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM vaccinations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vaccinations WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(count > 0)
    }

    async fn find_by_animal(&self, animal_id: &str) -> Result<Vec<VaccinationRecord>> {
        let rows: Vec<VaccinationRow> = sqlx::query_as(
            r#"
            SELECT * FROM vaccinations
            WHERE animal_id = ?
            ORDER BY applied_on DESC, id ASC
            "#,
        )
        .bind(animal_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_record()).collect())
    }

    async fn find_incomplete(&self) -> Result<Vec<VaccinationRecord>> {
        let rows: Vec<VaccinationRow> = sqlx::query_as(
            r#"
            SELECT * FROM vaccinations
            WHERE completed = 0
            ORDER BY applied_on DESC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_record()).collect())
    }

    async fn find_incomplete_by_animal(&self, animal_id: &str) -> Result<Vec<VaccinationRecord>> {
        let rows: Vec<VaccinationRow> = sqlx::query_as(
            r#"
            SELECT * FROM vaccinations
            WHERE animal_id = ? AND completed = 0
            ORDER BY applied_on DESC, id ASC
            "#,
        )
        .bind(animal_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_record()).collect())
    }

    async fn count_by_animal(&self, animal_id: &str) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM vaccinations WHERE animal_id = ?")
                .bind(animal_id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(count)
    }

    async fn find_by_vaccine_name(&self, fragment: &str) -> Result<Vec<VaccinationRecord>> {
        let rows: Vec<VaccinationRow> = sqlx::query_as(
            r#"
            SELECT * FROM vaccinations
            WHERE vaccine_name LIKE '%' || ? || '%'
            ORDER BY applied_on DESC, id ASC
            "#,
        )
        .bind(fragment)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_record()).collect())
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct VaccinationRow {
    id: String,
    animal_id: String,
    vaccine_name: String,
    applied_on: NaiveDate,
    next_dose: Option<NaiveDate>,
    lot: Option<String>,
    veterinarian: Option<String>,
    notes: Option<String>,
    completed: i32, // SQLite boolean as integer
    created_at: i64,
}

impl VaccinationRow {
    fn into_record(self) -> VaccinationRecord {
        VaccinationRecord {
            id: self.id,
            animal_id: self.animal_id,
            vaccine_name: self.vaccine_name,
            applied_on: self.applied_on,
            next_dose: self.next_dose,
            lot: self.lot,
            veterinarian: self.veterinarian,
            notes: self.notes,
            completed: self.completed != 0,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, run_migrations, SqliteAnimalStore};
    use healthpet_core::domain::{Animal, SpeciesTraits};
    use healthpet_core::port::AnimalStore;

    async fn setup() -> (SqliteVaccinationStore, SqliteAnimalStore, Animal) {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();

        let animals = SqliteAnimalStore::new(pool.clone());
        let animal = Animal::new_test("Rex", 3.0, SpeciesTraits::Dog { size: None });
        animals.insert(&animal).await.unwrap();

        (SqliteVaccinationStore::new(pool), animals, animal)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let (store, _, animal) = setup().await;

        let mut record =
            VaccinationRecord::new_test(&animal.id, "Rabies", date(2024, 1, 10), None);
        record.lot = Some("ABC123".to_string());
        store.insert(&record).await.unwrap();

        let found = store.find_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(found, record);
    }

    #[tokio::test]
    async fn test_dates_survive_roundtrip() {
        let (store, _, animal) = setup().await;

        let record = VaccinationRecord::new_test(
            &animal.id,
            "Rabies",
            date(2024, 1, 10),
            Some(date(2024, 7, 10)),
        );
        store.insert(&record).await.unwrap();

        let found = store.find_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(found.applied_on, date(2024, 1, 10));
        assert_eq!(found.next_dose, Some(date(2024, 7, 10)));
    }

    #[tokio::test]
    async fn test_incomplete_filter_and_ordering() {
        let (store, _, animal) = setup().await;

        let older = VaccinationRecord::new_test(&animal.id, "V8", date(2024, 1, 5), None);
        let newer = VaccinationRecord::new_test(&animal.id, "V10", date(2024, 2, 5), None);
        let mut done = VaccinationRecord::new_test(&animal.id, "Rabies", date(2024, 3, 5), None);
        done.completed = true;

        store.insert(&older).await.unwrap();
        store.insert(&newer).await.unwrap();
        store.insert(&done).await.unwrap();

        let incomplete = store.find_incomplete_by_animal(&animal.id).await.unwrap();
        assert_eq!(incomplete.len(), 2);
        assert_eq!(incomplete[0].id, newer.id);
        assert_eq!(incomplete[1].id, older.id);

        assert_eq!(store.count_by_animal(&animal.id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_update_persists_completion() {
        let (store, _, animal) = setup().await;

        let mut record = VaccinationRecord::new_test(
            &animal.id,
            "Rabies",
            date(2024, 1, 10),
            Some(date(2024, 7, 10)),
        );
        store.insert(&record).await.unwrap();

        record.mark_complete();
        store.update(&record).await.unwrap();

        let found = store.find_by_id(&record.id).await.unwrap().unwrap();
        assert!(found.completed);
        assert_eq!(found.next_dose, None);
    }

    #[tokio::test]
    async fn test_insert_rejects_unknown_animal() {
        let (store, _, _) = setup().await;

        let record = VaccinationRecord::new_test("ghost", "Rabies", date(2024, 1, 10), None);
        assert!(store.insert(&record).await.is_err());
    }

    #[tokio::test]
    async fn test_deleting_animal_cascades_to_records() {
        let (store, animals, animal) = setup().await;

        let record = VaccinationRecord::new_test(&animal.id, "Rabies", date(2024, 1, 10), None);
        store.insert(&record).await.unwrap();

        animals.delete_by_id(&animal.id).await.unwrap();

        assert!(store.find_by_id(&record.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_by_vaccine_name() {
        let (store, _, animal) = setup().await;

        store
            .insert(&VaccinationRecord::new_test(
                &animal.id,
                "Feline Rabies",
                date(2024, 1, 10),
                None,
            ))
            .await
            .unwrap();
        store
            .insert(&VaccinationRecord::new_test(
                &animal.id,
                "V10",
                date(2024, 1, 11),
                None,
            ))
            .await
            .unwrap();

        let hits = store.find_by_vaccine_name("rabies").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].vaccine_name, "Feline Rabies");
    }
}
