// SQLite AnimalStore Implementation

use async_trait::async_trait;
use sqlx::SqlitePool;

use healthpet_core::domain::{Animal, Species, SpeciesTraits};
use healthpet_core::error::Result;
use healthpet_core::port::AnimalStore;

use crate::error_map::map_sqlx_error;

pub struct SqliteAnimalStore {
    pool: SqlitePool,
}

impl SqliteAnimalStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnimalStore for SqliteAnimalStore {
    async fn insert(&self, animal: &Animal) -> Result<()> {
        let traits_json = serde_json::to_string(&animal.traits)?;

        sqlx::query(
            r#"
            INSERT INTO animals (
                id, name, breed, age_years, owner_name, owner_phone,
                species, traits, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&animal.id)
        .bind(&animal.name)
        .bind(&animal.breed)
        .bind(animal.age_years)
        .bind(&animal.owner_name)
        .bind(&animal.owner_phone)
        .bind(animal.species().to_string())
        .bind(&traits_json)
        .bind(animal.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Animal>> {
        let row = sqlx::query_as::<_, AnimalRow>("SELECT * FROM animals WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_animal()))
    }

    async fn find_all(&self) -> Result<Vec<Animal>> {
        let rows: Vec<AnimalRow> =
            sqlx::query_as("SELECT * FROM animals ORDER BY name COLLATE NOCASE ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_animal()).collect())
    }

    async fn update(&self, animal: &Animal) -> Result<()> {
        let traits_json = serde_json::to_string(&animal.traits)?;

        sqlx::query(
            r#"
            UPDATE animals
            SET name = ?, breed = ?, age_years = ?, owner_name = ?,
                owner_phone = ?, species = ?, traits = ?
            WHERE id = ?
            "#,
        )
        .bind(&animal.name)
        .bind(&animal.breed)
        .bind(animal.age_years)
        .bind(&animal.owner_name)
        .bind(&animal.owner_phone)
        .bind(animal.species().to_string())
        .bind(&traits_json)
        .bind(&animal.id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        // FK cascade removes the animal's vaccinations and profile
        sqlx::query("DELETE FROM animals WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM animals WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(count > 0)
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM animals WHERE name = ? COLLATE NOCASE")
                .bind(name)
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(count > 0)
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Animal>> {
        let rows: Vec<AnimalRow> = sqlx::query_as(
            r#"
            SELECT * FROM animals
            WHERE name LIKE '%' || ? || '%'
            ORDER BY name COLLATE NOCASE ASC
            "#,
        )
        .bind(fragment)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_animal()).collect())
    }

    async fn find_by_owner(&self, fragment: &str) -> Result<Vec<Animal>> {
        let rows: Vec<AnimalRow> = sqlx::query_as(
            r#"
            SELECT * FROM animals
            WHERE owner_name LIKE '%' || ? || '%'
            ORDER BY name COLLATE NOCASE ASC
            "#,
        )
        .bind(fragment)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_animal()).collect())
    }

    async fn find_by_species(&self, species: Species) -> Result<Vec<Animal>> {
        let rows: Vec<AnimalRow> = sqlx::query_as(
            "SELECT * FROM animals WHERE species = ? ORDER BY name COLLATE NOCASE ASC",
        )
        .bind(species.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_animal()).collect())
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM animals")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(count)
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct AnimalRow {
    id: String,
    name: String,
    breed: Option<String>,
    age_years: f64,
    owner_name: String,
    owner_phone: String,
    #[allow(dead_code)] // queried via WHERE; the tag lives in the traits JSON
    species: String,
    traits: String,
    created_at: i64,
}

impl AnimalRow {
    fn into_animal(self) -> Animal {
        let traits: SpeciesTraits =
            serde_json::from_str(&self.traits).unwrap_or(SpeciesTraits::Other);

        Animal {
            id: self.id,
            name: self.name,
            breed: self.breed,
            age_years: self.age_years,
            owner_name: self.owner_name,
            owner_phone: self.owner_phone,
            traits,
            created_at: self.created_at,
        }
    }
}
