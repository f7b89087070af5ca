use campusync_api::middleware::error_handling::AppError;
use campusync_core::errors::CampusError;
use campusync_core::models::calendar::HolidayResponse;
use campusync_db::models::DbHoliday;
use chrono::Utc;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::{date, sample_holiday_row, TestContext};

// Wrapper mirroring the add-holiday flow: insert, then reload the full list
// for broadcast.
async fn test_add_holiday_wrapper(
    ctx: &mut TestContext,
    name: &'static str,
    day: chrono::NaiveDate,
    created_by: Uuid,
) -> Result<(DbHoliday, Vec<HolidayResponse>), AppError> {
    if name.trim().is_empty() {
        return Err(AppError(CampusError::Validation(
            "Holiday name must not be empty".to_string(),
        )));
    }

    let holiday = ctx.calendar_repo.insert_holiday(name, day, created_by).await?;

    let list = ctx
        .calendar_repo
        .list_holidays()
        .await?
        .into_iter()
        .map(|row| HolidayResponse {
            id: row.id,
            name: row.name,
            date: row.date,
            created_by: row.created_by,
            created_by_name: row.created_by_name,
        })
        .collect();

    Ok((holiday, list))
}

#[tokio::test]
async fn test_add_holiday_returns_created_entry_and_full_list() {
    let mut ctx = TestContext::new();
    let admin = Uuid::new_v4();

    ctx.calendar_repo
        .expect_insert_holiday()
        .returning(|name, day, created_by| {
            Ok(DbHoliday {
                id: Uuid::new_v4(),
                name: name.to_string(),
                date: day,
                created_by,
                created_at: Utc::now(),
            })
        });
    ctx.calendar_repo.expect_list_holidays().returning(|| {
        Ok(vec![
            sample_holiday_row("New Year", date(2025, 1, 1)),
            sample_holiday_row("Republic Day", date(2025, 1, 26)),
        ])
    });

    let (holiday, list) =
        test_add_holiday_wrapper(&mut ctx, "Republic Day", date(2025, 1, 26), admin)
            .await
            .unwrap();

    assert_eq!(holiday.name, "Republic Day");
    assert_eq!(holiday.created_by, admin);
    // The broadcast payload is the full updated list, not a delta
    assert_eq!(list.len(), 2);
}

#[tokio::test]
async fn test_add_holiday_rejects_empty_name() {
    let mut ctx = TestContext::new();

    let result =
        test_add_holiday_wrapper(&mut ctx, "  ", date(2025, 1, 26), Uuid::new_v4()).await;

    match result {
        Err(AppError(CampusError::Validation(_))) => {}
        other => panic!("Expected Validation, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_list_holidays_is_not_year_filtered() {
    let mut ctx = TestContext::new();

    // Holidays from different years all participate
    ctx.calendar_repo.expect_list_holidays().returning(|| {
        Ok(vec![
            sample_holiday_row("Old", date(2020, 5, 1)),
            sample_holiday_row("Current", date(2025, 1, 26)),
            sample_holiday_row("Future", date(2030, 12, 25)),
        ])
    });

    let holidays = ctx.calendar_repo.list_holidays().await.unwrap();

    assert_eq!(holidays.len(), 3);
}
