// SQLite ProfileStore Implementation

use async_trait::async_trait;
use sqlx::SqlitePool;

use healthpet_core::domain::MedicalProfile;
use healthpet_core::error::Result;
use healthpet_core::port::ProfileStore;

use crate::error_map::map_sqlx_error;

pub struct SqliteProfileStore {
    pool: SqlitePool,
}

impl SqliteProfileStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for SqliteProfileStore {
    async fn insert(&self, profile: &MedicalProfile) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO medical_profiles (
                id, animal_id, weight_kg, height_cm, allergies,
                medications, pre_existing_conditions, notes,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.animal_id)
        .bind(profile.weight_kg)
        .bind(profile.height_cm)
        .bind(&profile.allergies)
        .bind(&profile.medications)
        .bind(&profile.pre_existing_conditions)
        .bind(&profile.notes)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_by_animal(&self, animal_id: &str) -> Result<Option<MedicalProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT * FROM medical_profiles WHERE animal_id = ?",
        )
        .bind(animal_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_profile()))
    }

    async fn update(&self, profile: &MedicalProfile) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE medical_profiles
            SET weight_kg = ?, height_cm = ?, allergies = ?, medications = ?,
                pre_existing_conditions = ?, notes = ?, updated_at = ?
            WHERE animal_id = ?
            "#,
        )
        .bind(profile.weight_kg)
        .bind(profile.height_cm)
        .bind(&profile.allergies)
        .bind(&profile.medications)
        .bind(&profile.pre_existing_conditions)
        .bind(&profile.notes)
        .bind(profile.updated_at)
        .bind(&profile.animal_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: String,
    animal_id: String,
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    allergies: Option<String>,
    medications: Option<String>,
    pre_existing_conditions: Option<String>,
    notes: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl ProfileRow {
    fn into_profile(self) -> MedicalProfile {
        MedicalProfile {
            id: self.id,
            animal_id: self.animal_id,
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            allergies: self.allergies,
            medications: self.medications,
            pre_existing_conditions: self.pre_existing_conditions,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
