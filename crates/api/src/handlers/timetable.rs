//! # Timetable Handlers
//!
//! Creating a timetable replaces the class's term and slot set wholesale,
//! recomputes the lecture statistics snapshot, and broadcasts the result.
//! The student and faculty views are read-only and recompute on every
//! request; snapshots are never persisted.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use campusync_core::{
    errors::CampusError,
    models::{
        timetable::{ClassTimetableResponse, CreateTimetableRequest, FacultyTimetableResponse},
        user::Role,
    },
    stats::LectureStats,
};
use campusync_db::models::NewTimetableSlot;

use crate::{
    broadcast::{CampusMessage, TimetableUpdate},
    middleware::{auth::AuthUser, error_handling::AppError},
    stats,
    ApiState,
};

/// Replaces a class's timetable.
///
/// Validation happens before any write: slot shapes, the class reference,
/// and every slot's faculty reference. The storage replacement itself is
/// all-or-nothing. After the write, the snapshot is recomputed and pushed
/// to subscribers; a response and a broadcast always carry the same figures.
#[axum::debug_handler]
pub async fn create_timetable(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(payload): Json<CreateTimetableRequest>,
) -> Result<(StatusCode, Json<ClassTimetableResponse>), AppError> {
    user.require_role(Role::Admin)?;

    // Validate slot shapes before touching storage
    for slot in &payload.timetable {
        slot.validate()?;
    }

    campusync_db::repositories::class::get_class_by_id(&state.db_pool, &payload.class_id)
        .await
        .map_err(CampusError::Database)?
        .ok_or_else(|| {
            CampusError::NotFound(format!("Class {} not found", payload.class_id))
        })?;

    // Every slot must reference an existing faculty user
    let mut referenced: Vec<_> = payload.timetable.iter().map(|s| s.faculty).collect();
    referenced.sort();
    referenced.dedup();
    if !referenced.is_empty() {
        let missing =
            campusync_db::repositories::user::missing_faculty_ids(&state.db_pool, &referenced)
                .await
                .map_err(CampusError::Database)?;
        if !missing.is_empty() {
            let ids: Vec<String> = missing.iter().map(ToString::to_string).collect();
            return Err(AppError(CampusError::Validation(format!(
                "Invalid faculty IDs: {}",
                ids.join(", ")
            ))));
        }
    }

    // Replace the term on the class, then the slot set
    let day_tags: Vec<String> = payload.days.iter().map(|d| d.tag().to_string()).collect();
    campusync_db::repositories::class::update_class_term(
        &state.db_pool,
        &payload.class_id,
        payload.start_date,
        payload.end_date,
        &day_tags,
    )
    .await
    .map_err(CampusError::Database)?;

    let new_slots: Vec<NewTimetableSlot> = payload
        .timetable
        .iter()
        .map(|slot| NewTimetableSlot {
            faculty_id: slot.faculty,
            day: slot.day.tag().to_string(),
            start_time: slot.start_time.clone(),
            end_time: slot.end_time.clone(),
            subject: slot.subject.clone(),
        })
        .collect();
    campusync_db::repositories::timetable::replace_class_timetable(
        &state.db_pool,
        &payload.class_id,
        &new_slots,
    )
    .await
    .map_err(CampusError::Database)?;

    // Recompute and broadcast the fresh snapshot
    let (timetable, snapshot) = stats::class_snapshot(
        &state.db_pool,
        state.feed.as_ref(),
        &payload.class_id,
        payload.start_date,
        payload.end_date,
        &payload.days,
    )
    .await?;

    state.broadcaster.publish(CampusMessage::TimetableUpdated(TimetableUpdate {
        class_id: payload.class_id.clone(),
        faculty_ids: stats::faculty_ids(&timetable),
        timetable: timetable.clone(),
        days: payload.days.clone(),
        stats: snapshot.clone(),
    }));

    let response = ClassTimetableResponse {
        timetable,
        days: payload.days,
        stats: snapshot,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Returns the calling student's class timetable with its current
/// statistics snapshot.
#[axum::debug_handler]
pub async fn get_student_timetable(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<ClassTimetableResponse>, AppError> {
    user.require_role(Role::Student)?;
    let class_id = user.class_id.as_deref().ok_or_else(|| {
        CampusError::Authorization("No class assigned".to_string())
    })?;

    let class = campusync_db::repositories::class::get_class_by_id(&state.db_pool, class_id)
        .await
        .map_err(CampusError::Database)?
        .ok_or_else(|| CampusError::NotFound(format!("Class {} not found", class_id)))?;

    let days = stats::parse_day_tags(&class.active_days)?;

    // A class without a term yet still lists its slots, with zeroed stats.
    let (timetable, snapshot) = match (class.start_date, class.end_date) {
        (Some(start), Some(end)) => {
            stats::class_snapshot(&state.db_pool, state.feed.as_ref(), class_id, start, end, &days)
                .await?
        }
        _ => {
            let rows =
                campusync_db::repositories::timetable::get_slots_by_class(&state.db_pool, class_id)
                    .await
                    .map_err(CampusError::Database)?;
            let timetable = rows
                .into_iter()
                .map(stats::slot_response)
                .collect::<Result<Vec<_>, _>>()?;
            (timetable, LectureStats::default())
        }
    };

    Ok(Json(ClassTimetableResponse {
        timetable,
        days,
        stats: snapshot,
    }))
}

/// Returns the calling faculty member's combined timetable across all
/// classes they teach, with the raw per-subject slot tally.
#[axum::debug_handler]
pub async fn get_faculty_timetable(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<FacultyTimetableResponse>, AppError> {
    user.require_role(Role::Faculty)?;

    let rows = campusync_db::repositories::timetable::get_slots_by_faculty(&state.db_pool, user.id)
        .await
        .map_err(CampusError::Database)?;

    // Active days come from the first class encountered; a faculty member
    // with no slots gets an empty set.
    let days = match rows.first() {
        Some(first) => {
            let class =
                campusync_db::repositories::class::get_class_by_id(&state.db_pool, &first.class_id)
                    .await
                    .map_err(CampusError::Database)?;
            match class {
                Some(class) => stats::parse_day_tags(&class.active_days)?,
                None => Vec::new(),
            }
        }
        None => Vec::new(),
    };

    let subject_lectures = stats::faculty_snapshot(&rows)?;
    let timetable = rows
        .into_iter()
        .map(stats::slot_response)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(FacultyTimetableResponse {
        timetable,
        days,
        subject_lectures,
    }))
}
