mod common;

use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;
use sqlx::PgPool;

use eduplan_api::database::models::{JsonObject, NewUnit, Unit, UnitUpdate};
use eduplan_api::database::DatabaseError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn new_unit() -> NewUnit {
    NewUnit {
        subject_id: 1,
        number: 1,
        title: "Test".to_string(),
        start_date: date(2021, 3, 25),
        end_date: date(2021, 4, 25),
        review_date: Some(date(2021, 4, 28)),
    }
}

fn object(value: serde_json::Value) -> JsonObject {
    value.as_object().cloned().expect("json object")
}

#[sqlx::test(migrations = "./migrations")]
async fn create_defaults_documents_and_completion(pool: PgPool) -> Result<()> {
    common::seed(&pool).await?;
    let mut conn = pool.acquire().await?;

    let unit = Unit::create(&mut conn, &new_unit()).await?;

    assert_eq!(unit.id, 1);
    assert_eq!(unit.title, "Test");
    assert!(!unit.completed);
    assert!(unit.planning.0.is_empty());
    assert!(unit.collaboration.0.is_empty());
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn get_joins_subject(pool: PgPool) -> Result<()> {
    common::seed(&pool).await?;
    let mut conn = pool.acquire().await?;

    let created = Unit::create(&mut conn, &new_unit()).await?;
    let detail = Unit::get(&mut conn, created.id).await?;

    assert_eq!(detail.subject_name, "ELA");
    assert_eq!(detail.set_id, Some(1));
    assert_eq!(detail.unit.review_date, Some(date(2021, 4, 28)));
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn update_replaces_documents(pool: PgPool) -> Result<()> {
    common::seed(&pool).await?;
    let mut conn = pool.acquire().await?;

    let created = Unit::create(&mut conn, &new_unit()).await?;
    let update = UnitUpdate {
        completed: Some(true),
        planning: Some(object(json!({ "objectives": "Teach stuff" }))),
        collaboration: Some(object(json!({ "reflection": "Students learned stuff" }))),
        ..Default::default()
    };

    let updated = Unit::update(&mut conn, &update, created.id).await?;

    assert!(updated.completed);
    assert_eq!(updated.planning.0, object(json!({ "objectives": "Teach stuff" })));
    assert_eq!(updated.start_date, created.start_date);
    assert_eq!(updated.review_date, created.review_date);
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn missing_unit_is_not_found(pool: PgPool) -> Result<()> {
    common::seed(&pool).await?;
    let mut conn = pool.acquire().await?;

    let err = Unit::get(&mut conn, 42).await.unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound(ref msg) if msg == "Unit not found"));

    let err = Unit::update(&mut conn, &UnitUpdate::default(), 42).await.unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound(_)));
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn unknown_subject_is_foreign_key_violation(pool: PgPool) -> Result<()> {
    common::seed(&pool).await?;
    let mut conn = pool.acquire().await?;

    let mut data = new_unit();
    data.subject_id = 999;
    let err = Unit::create(&mut conn, &data).await.unwrap_err();

    assert!(matches!(err, DatabaseError::ForeignKeyViolation(_)));
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn rolled_back_create_leaves_nothing(pool: PgPool) -> Result<()> {
    common::seed(&pool).await?;

    let mut tx = pool.begin().await?;
    let unit = Unit::create(&mut tx, &new_unit()).await?;
    tx.rollback().await?;

    let mut conn = pool.acquire().await?;
    assert!(Unit::list_for_subject(&mut conn, 1).await?.is_empty());
    assert!(matches!(
        Unit::get(&mut conn, unit.id).await,
        Err(DatabaseError::NotFound(_))
    ));
    Ok(())
}
