use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::query::AppQuery;
use crate::models::faculty::*;
use crate::models::student::StudentResponse;
use crate::services::FacultyService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Faculties",
    operation_id = "createFaculty",
    summary = "Create a faculty",
    request_body = FacultyRequest,
    responses(
        (status = 201, description = "Faculty created", body = FacultyResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_faculty(
    State(state): State<AppState>,
    AppJson(payload): AppJson<FacultyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let draft = payload.into_draft()?;
    let model = FacultyService::new(&state.db).create(draft).await?;

    Ok((StatusCode::CREATED, Json(FacultyResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Faculties",
    operation_id = "listFaculties",
    summary = "List faculties",
    description = "Returns all faculties ordered by id. `color` filters by exact color; \
        `nameOrColor` matches name or color ignoring case. The two filters are exclusive.",
    params(FacultyListQuery),
    responses(
        (status = 200, description = "Faculties", body = Vec<FacultyResponse>),
        (status = 400, description = "Both filters given (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_faculties(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<FacultyListQuery>,
) -> Result<Json<Vec<FacultyResponse>>, AppError> {
    let service = FacultyService::new(&state.db);
    let faculties = match (query.color, query.name_or_color) {
        (None, None) => service.list_all().await?,
        (Some(color), None) => service.filter_by_color(&color).await?,
        (None, Some(term)) => service.filter_by_name_or_color(&term).await?,
        (Some(_), Some(_)) => {
            return Err(AppError::Validation(
                "color and nameOrColor cannot be combined".into(),
            ));
        }
    };

    Ok(Json(faculties.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Faculties",
    operation_id = "getFaculty",
    summary = "Get a faculty by ID",
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Faculty", body = FacultyResponse),
        (status = 404, description = "Faculty not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FacultyResponse>, AppError> {
    let model = FacultyService::new(&state.db).get(id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Faculties",
    operation_id = "updateFaculty",
    summary = "Replace a faculty",
    params(("id" = i32, Path, description = "Faculty ID")),
    request_body = FacultyRequest,
    responses(
        (status = 200, description = "Faculty updated", body = FacultyResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Faculty not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<FacultyRequest>,
) -> Result<Json<FacultyResponse>, AppError> {
    let draft = payload.into_draft()?;

    let txn = state.db.begin().await?;
    let model = FacultyService::new(&txn).update(id, draft).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Faculties",
    operation_id = "deleteFaculty",
    summary = "Delete a faculty",
    description = "Deletes a faculty. Its students are kept with their faculty cleared.",
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Faculty deleted", body = FacultyResponse),
        (status = 404, description = "Faculty not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FacultyResponse>, AppError> {
    let txn = state.db.begin().await?;
    let removed = FacultyService::new(&txn).remove(id).await?;
    txn.commit().await?;

    Ok(Json(removed.into()))
}

#[utoipa::path(
    get,
    path = "/{id}/students",
    tag = "Faculties",
    operation_id = "listFacultyStudents",
    summary = "Students of a faculty",
    description = "Students assigned to the faculty, ordered by id. Empty for an unknown faculty.",
    params(("id" = i32, Path, description = "Faculty ID")),
    responses((status = 200, description = "Students", body = Vec<StudentResponse>)),
)]
#[instrument(skip(state))]
pub async fn list_faculty_students(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    let students = FacultyService::new(&state.db).students(id).await?;
    Ok(Json(students.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/the-longest-faculty-name",
    tag = "Faculties",
    operation_id = "longestFacultyName",
    summary = "Longest faculty name",
    description = "The longest faculty name by character count, or `null` without faculties. \
        Ties go to the faculty with the lowest id.",
    responses((status = 200, description = "Name or null", body = Option<String>)),
)]
#[instrument(skip(state))]
pub async fn longest_faculty_name(
    State(state): State<AppState>,
) -> Result<Json<Option<String>>, AppError> {
    let name = FacultyService::new(&state.db).longest_name().await?;
    Ok(Json(name))
}
