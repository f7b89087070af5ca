//! # Calendar Handlers
//!
//! Holidays and events share a shape but differ in effect: holidays exclude
//! their date from lecture counting, events are advisory only. Every
//! mutation re-broadcasts the full updated list so subscribed clients can
//! refresh their calendars (and, for holidays, their lecture counts).

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use campusync_core::{
    errors::CampusError,
    models::{
        calendar::{CreateEventRequest, CreateHolidayRequest, EventResponse, HolidayResponse},
        user::Role,
    },
};
use campusync_db::models::{DbCalendarEventWithCreator, DbHolidayWithCreator};

use crate::{
    broadcast::CampusMessage,
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

fn holiday_response(row: DbHolidayWithCreator) -> HolidayResponse {
    HolidayResponse {
        id: row.id,
        name: row.name,
        date: row.date,
        created_by: row.created_by,
        created_by_name: row.created_by_name,
    }
}

fn event_response(row: DbCalendarEventWithCreator) -> EventResponse {
    EventResponse {
        id: row.id,
        name: row.name,
        date: row.date,
        description: row.description,
        created_by: row.created_by,
        created_by_name: row.created_by_name,
    }
}

#[axum::debug_handler]
pub async fn add_holiday(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(payload): Json<CreateHolidayRequest>,
) -> Result<(StatusCode, Json<HolidayResponse>), AppError> {
    user.require_role(Role::Admin)?;

    if payload.name.trim().is_empty() {
        return Err(AppError(CampusError::Validation(
            "Holiday name must not be empty".to_string(),
        )));
    }

    let holiday = campusync_db::repositories::calendar::insert_holiday(
        &state.db_pool,
        &payload.name,
        payload.date,
        user.id,
    )
    .await
    .map_err(CampusError::Database)?;

    // Push the full updated list to subscribers
    let holidays = campusync_db::repositories::calendar::list_holidays(&state.db_pool)
        .await
        .map_err(CampusError::Database)?;
    state.broadcaster.publish(CampusMessage::HolidaysUpdated(
        holidays.into_iter().map(holiday_response).collect(),
    ));

    let response = HolidayResponse {
        id: holiday.id,
        name: holiday.name,
        date: holiday.date,
        created_by: holiday.created_by,
        created_by_name: user.name,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn get_holidays(
    State(state): State<Arc<ApiState>>,
    _user: AuthUser,
) -> Result<Json<Vec<HolidayResponse>>, AppError> {
    let holidays = campusync_db::repositories::calendar::list_holidays(&state.db_pool)
        .await
        .map_err(CampusError::Database)?;

    Ok(Json(holidays.into_iter().map(holiday_response).collect()))
}

#[axum::debug_handler]
pub async fn add_event(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), AppError> {
    user.require_role(Role::Admin)?;

    if payload.name.trim().is_empty() {
        return Err(AppError(CampusError::Validation(
            "Event name must not be empty".to_string(),
        )));
    }

    let event = campusync_db::repositories::calendar::insert_event(
        &state.db_pool,
        &payload.name,
        payload.date,
        payload.description.as_deref(),
        user.id,
    )
    .await
    .map_err(CampusError::Database)?;

    let events = campusync_db::repositories::calendar::list_events(&state.db_pool)
        .await
        .map_err(CampusError::Database)?;
    state.broadcaster.publish(CampusMessage::EventsUpdated(
        events.into_iter().map(event_response).collect(),
    ));

    let response = EventResponse {
        id: event.id,
        name: event.name,
        date: event.date,
        description: event.description,
        created_by: event.created_by,
        created_by_name: user.name,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn get_events(
    State(state): State<Arc<ApiState>>,
    _user: AuthUser,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let events = campusync_db::repositories::calendar::list_events(&state.db_pool)
        .await
        .map_err(CampusError::Database)?;

    Ok(Json(events.into_iter().map(event_response).collect()))
}
