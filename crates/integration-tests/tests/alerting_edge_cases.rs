//! Alerting edge cases: day boundaries, window sensitivity, identity checks

mod support;

use healthpet_core::application::{RegisterAnimalRequest, RegisterVaccinationRequest};
use healthpet_core::domain::{SpeciesTraits, VaccinationStatus};
use support::{date, setup, today, TestContext};

async fn animal_with_doses(
    ctx: &TestContext,
    offsets: &[Option<i64>],
) -> (String, Vec<String>) {
    let animal = ctx
        .animals
        .register(RegisterAnimalRequest {
            name: format!("Pet-{}", offsets.len()),
            breed: None,
            age_years: 4.0,
            owner_name: "Owner".to_string(),
            owner_phone: "555-0001".to_string(),
            traits: SpeciesTraits::Dog { size: None },
        })
        .await
        .unwrap();

    let mut record_ids = Vec::new();
    for offset in offsets {
        let record = ctx
            .vaccines
            .register(RegisterVaccinationRequest {
                animal_id: animal.id.clone(),
                vaccine_name: "Rabies".to_string(),
                applied_on: date(2024, 1, 10),
                next_dose: offset.map(|days| today() + chrono::TimeDelta::days(days)),
                lot: None,
                veterinarian: None,
                notes: None,
            })
            .await
            .unwrap();
        record_ids.push(record.id);
    }

    (animal.id, record_ids)
}

#[tokio::test]
async fn day_boundaries_around_today() {
    let ctx = setup().await;
    let (_, ids) = animal_with_doses(&ctx, &[Some(-1), Some(0), Some(1), Some(7), Some(8)]).await;

    let expectations = [
        (0, VaccinationStatus::Overdue, "overdue by 1 day(s)"),
        (1, VaccinationStatus::DueSoon, "due today"),
        (2, VaccinationStatus::DueSoon, "due tomorrow"),
        (3, VaccinationStatus::DueSoon, "due in 7 days"),
        (4, VaccinationStatus::OnTrack, "next dose on 2024-03-23"),
    ];

    for (idx, status, alert) in expectations {
        let detail = ctx.vaccines.detail(&ids[idx]).await.unwrap();
        assert_eq!(detail.classification.status, status, "offset index {}", idx);
        assert_eq!(detail.classification.alert, alert);
    }
}

#[tokio::test]
async fn classification_is_stable_across_repeated_queries() {
    let ctx = setup().await;
    let (_, ids) = animal_with_doses(&ctx, &[Some(3)]).await;

    let first = ctx.vaccines.detail(&ids[0]).await.unwrap();
    let second = ctx.vaccines.detail(&ids[0]).await.unwrap();
    assert_eq!(first.classification, second.classification);
}

#[tokio::test]
async fn caller_window_overrides_the_default() {
    let ctx = setup().await;
    animal_with_doses(&ctx, &[Some(5)]).await;

    assert_eq!(ctx.vaccines.list_due_soon(Some(7)).await.unwrap().len(), 1);
    assert_eq!(ctx.vaccines.list_due_soon(Some(3)).await.unwrap().len(), 0);
    // The wider report picks it up with its 30-day default
    assert_eq!(ctx.vaccines.list_upcoming(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn statistics_identity_over_a_mixed_record_set() {
    let ctx = setup().await;
    let (animal_id, ids) = animal_with_doses(
        &ctx,
        &[
            Some(-30),
            Some(-1),
            Some(0),
            Some(5),
            Some(10),
            Some(45),
            None,
            None,
        ],
    )
    .await;

    // Complete one of the unscheduled records
    ctx.vaccines.mark_complete(ids.last().unwrap()).await.unwrap();

    let stats = ctx.vaccines.statistics(&animal_id).await.unwrap();
    assert_eq!(stats.total, 8);
    assert_eq!(stats.overdue, 2);
    assert_eq!(stats.due_soon, 2);
    assert_eq!(stats.total, stats.overdue + stats.due_soon + stats.on_track);
}

#[tokio::test]
async fn count_matches_number_of_registered_doses() {
    let ctx = setup().await;
    let (animal_id, _) = animal_with_doses(&ctx, &[Some(1), None, Some(-4)]).await;

    assert_eq!(ctx.vaccines.count_for_animal(&animal_id).await.unwrap(), 3);
}
