//! End-to-end vaccination lifecycle over core + SQLite

mod support;

use healthpet_core::application::{
    ProfileUpdate, RegisterAnimalRequest, RegisterVaccinationRequest, VaccinationUpdate,
};
use healthpet_core::domain::{SpeciesTraits, VaccinationStatus};
use support::{date, setup, today};

fn dog_request(name: &str) -> RegisterAnimalRequest {
    RegisterAnimalRequest {
        name: name.to_string(),
        breed: Some("Labrador".to_string()),
        age_years: 3.5,
        owner_name: "Ana Silva".to_string(),
        owner_phone: "555-1234".to_string(),
        traits: SpeciesTraits::Dog {
            size: Some("large".to_string()),
        },
    }
}

fn dose(
    animal_id: &str,
    vaccine: &str,
    applied: chrono::NaiveDate,
    next: Option<chrono::NaiveDate>,
) -> RegisterVaccinationRequest {
    RegisterVaccinationRequest {
        animal_id: animal_id.to_string(),
        vaccine_name: vaccine.to_string(),
        applied_on: applied,
        next_dose: next,
        lot: None,
        veterinarian: Some("Dr. Carla Mendes".to_string()),
        notes: None,
    }
}

#[tokio::test]
async fn full_lifecycle_register_classify_complete() {
    let ctx = setup().await;
    let animal = ctx.animals.register(dog_request("Rex")).await.unwrap();

    // First dose administered two months ago, booster overdue since March 1st
    let overdue = ctx
        .vaccines
        .register(dose(
            &animal.id,
            "Rabies",
            date(2024, 1, 15),
            Some(date(2024, 3, 1)),
        ))
        .await
        .unwrap();

    // Second vaccine due in 5 days
    let due_soon = ctx
        .vaccines
        .register(dose(
            &animal.id,
            "V10",
            date(2024, 2, 20),
            Some(date(2024, 3, 20)),
        ))
        .await
        .unwrap();

    // Third on track far in the future
    ctx.vaccines
        .register(dose(
            &animal.id,
            "Giardia",
            date(2024, 3, 1),
            Some(date(2024, 9, 1)),
        ))
        .await
        .unwrap();

    // Query buckets
    let overdue_list = ctx.vaccines.list_overdue().await.unwrap();
    assert_eq!(overdue_list.len(), 1);
    assert_eq!(overdue_list[0].id, overdue.id);

    let due_soon_list = ctx.vaccines.list_due_soon(None).await.unwrap();
    assert_eq!(due_soon_list.len(), 1);
    assert_eq!(due_soon_list[0].id, due_soon.id);

    // The 30-day upcoming report additionally excludes nothing due later
    let upcoming = ctx.vaccines.list_upcoming(None).await.unwrap();
    assert_eq!(upcoming.len(), 1, "only the 5-day-out dose is within 30 days");

    // Detail view classifies the overdue record
    let detail = ctx.vaccines.detail(&overdue.id).await.unwrap();
    assert_eq!(detail.classification.status, VaccinationStatus::Overdue);
    assert_eq!(detail.classification.days_until_next, Some(-14));
    assert_eq!(detail.classification.alert, "overdue by 14 day(s)");

    // Statistics identity
    let stats = ctx.vaccines.statistics(&animal.id).await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.overdue, 1);
    assert_eq!(stats.due_soon, 1);
    assert_eq!(stats.on_track, 1);

    // Soonest scheduled dose wins next_upcoming
    let next = ctx.vaccines.next_upcoming(&animal.id).await.unwrap().unwrap();
    assert_eq!(next.id, overdue.id);

    // Completing the overdue series clears its next dose and empties the bucket
    let completed = ctx.vaccines.mark_complete(&overdue.id).await.unwrap();
    assert!(completed.completed);
    assert_eq!(completed.next_dose, None);
    assert!(ctx.vaccines.list_overdue().await.unwrap().is_empty());

    let stats = ctx.vaccines.statistics(&animal.id).await.unwrap();
    assert_eq!(stats.overdue, 0);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.total, stats.overdue + stats.due_soon + stats.on_track);
}

#[tokio::test]
async fn alerts_follow_the_messages_of_each_bucket() {
    let ctx = setup().await;
    let animal = ctx.animals.register(dog_request("Bolt")).await.unwrap();

    ctx.vaccines
        .register(dose(
            &animal.id,
            "Rabies",
            date(2024, 2, 1),
            Some(date(2024, 3, 14)),
        ))
        .await
        .unwrap();
    ctx.vaccines
        .register(dose(&animal.id, "V8", date(2024, 2, 10), Some(today())))
        .await
        .unwrap();
    ctx.vaccines
        .register(dose(&animal.id, "Giardia", date(2024, 2, 20), None))
        .await
        .unwrap();

    let alerts = ctx.vaccines.alerts_for_animal(&animal.id).await.unwrap();
    assert_eq!(alerts.len(), 3);
    // Newest application first
    assert_eq!(alerts[0], "Giardia: no next dose scheduled");
    assert_eq!(alerts[1], "V8: due today");
    assert_eq!(alerts[2], "Rabies: overdue by 1 day(s)");
}

#[tokio::test]
async fn updates_are_validated_and_persisted() {
    let ctx = setup().await;
    let animal = ctx.animals.register(dog_request("Mia")).await.unwrap();

    let record = ctx
        .vaccines
        .register(dose(&animal.id, "Rabies", date(2024, 3, 1), None))
        .await
        .unwrap();

    // Future application date rejected on update as well
    assert!(ctx
        .vaccines
        .update(
            &record.id,
            VaccinationUpdate {
                applied_on: Some(date(2024, 4, 1)),
                ..Default::default()
            },
        )
        .await
        .is_err());

    let updated = ctx
        .vaccines
        .update(
            &record.id,
            VaccinationUpdate {
                next_dose: Some(date(2024, 6, 1)),
                lot: Some("L-778".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.next_dose, Some(date(2024, 6, 1)));

    let fetched = ctx.vaccines.get(&record.id).await.unwrap();
    assert_eq!(fetched.lot, Some("L-778".to_string()));
}

#[tokio::test]
async fn profile_rides_along_with_the_animal() {
    let ctx = setup().await;
    let animal = ctx.animals.register(dog_request("Thor")).await.unwrap();

    ctx.profiles
        .upsert(
            &animal.id,
            ProfileUpdate {
                weight_kg: Some(31.5),
                allergies: Some("chicken protein".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let profile = ctx.profiles.get(&animal.id).await.unwrap();
    assert_eq!(profile.weight_kg, Some(31.5));

    // Removing the animal cascades to the profile
    ctx.animals.remove(&animal.id).await.unwrap();
    assert!(ctx.profiles.get(&animal.id).await.is_err());
}
