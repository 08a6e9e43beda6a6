use std::path::Path as FsPath;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::TransactionTrait;
use tracing::{instrument, warn};

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::query::AppQuery;
use crate::models::faculty::FacultyResponse;
use crate::models::student::*;
use crate::services::{AvatarService, StudentService};
use crate::state::AppState;

use super::avatar::avatar_response;

#[utoipa::path(
    post,
    path = "/",
    tag = "Students",
    operation_id = "createStudent",
    summary = "Create a student",
    description = "Creates a student. When `faculty_id` is given it must reference an existing faculty.",
    request_body = StudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Faculty not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_student(
    State(state): State<AppState>,
    AppJson(payload): AppJson<StudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let draft = payload.into_draft()?;

    let txn = state.db.begin().await?;
    let model = StudentService::new(&txn).create(draft).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(StudentResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Students",
    operation_id = "listStudents",
    summary = "List students",
    description = "Returns all students ordered by id. `age` filters by exact age; \
        `minAge` and `maxAge` together filter by an inclusive range. \
        An inverted range yields an empty list.",
    params(StudentListQuery),
    responses(
        (status = 200, description = "Students", body = Vec<StudentResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<StudentListQuery>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    let service = StudentService::new(&state.db);
    let students = match query.filter()? {
        StudentFilter::All => service.list_all().await?,
        StudentFilter::Age(age) => service.filter_by_age(age).await?,
        StudentFilter::AgeRange { min, max } => service.filter_by_age_range(min, max).await?,
    };

    Ok(Json(students.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Students",
    operation_id = "getStudent",
    summary = "Get a student by ID",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student", body = StudentResponse),
        (status = 404, description = "Student not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StudentResponse>, AppError> {
    let model = StudentService::new(&state.db).get(id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Students",
    operation_id = "updateStudent",
    summary = "Replace a student",
    description = "Replaces name, age and faculty of a student. Omitting `faculty_id` clears it.",
    params(("id" = i32, Path, description = "Student ID")),
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Student or faculty not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<StudentRequest>,
) -> Result<Json<StudentResponse>, AppError> {
    let draft = payload.into_draft()?;

    let txn = state.db.begin().await?;
    let model = StudentService::new(&txn).update(id, draft).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Students",
    operation_id = "deleteStudent",
    summary = "Delete a student",
    description = "Deletes a student together with its avatar. Returns the removed student.",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted", body = StudentResponse),
        (status = 404, description = "Student not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StudentResponse>, AppError> {
    let txn = state.db.begin().await?;
    let removed = StudentService::new(&txn).remove(id).await?;
    txn.commit().await?;

    if let Some(file) = removed.avatar_file
        && let Err(e) = state.avatar_store.delete(FsPath::new(&file)).await
    {
        warn!(student_id = id, file = %file, error = %e, "Failed to delete avatar file");
    }

    Ok(Json(removed.student.into()))
}

#[utoipa::path(
    get,
    path = "/{id}/faculty",
    tag = "Students",
    operation_id = "getStudentFaculty",
    summary = "Get the faculty of a student",
    description = "Returns the student's faculty, or `null` when the student has none.",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Faculty or null", body = Option<FacultyResponse>),
        (status = 404, description = "Student not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_student_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Option<FacultyResponse>>, AppError> {
    let faculty = StudentService::new(&state.db).find_faculty(id).await?;
    Ok(Json(faculty.map(Into::into)))
}

#[utoipa::path(
    get,
    path = "/{id}/avatar-from-db",
    tag = "Students",
    operation_id = "getAvatarFromDb",
    summary = "Download a student's avatar from the database",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Avatar bytes with the stored media type"),
        (status = 404, description = "Student has no avatar (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_avatar_from_db(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let content = AvatarService::new(&state.db, &*state.avatar_store)
        .read_from_store(id)
        .await?;
    avatar_response(content)
}

#[utoipa::path(
    get,
    path = "/{id}/avatar-from-fs",
    tag = "Students",
    operation_id = "getAvatarFromFs",
    summary = "Download a student's avatar from the avatar directory",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Avatar bytes with the stored media type"),
        (status = 404, description = "Student has no avatar (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Avatar file unreadable (AVATAR_PROCESSING_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_avatar_from_fs(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let content = AvatarService::new(&state.db, &*state.avatar_store)
        .read_from_filesystem(id)
        .await?;
    avatar_response(content)
}

#[utoipa::path(
    get,
    path = "/count",
    tag = "Students",
    operation_id = "countStudents",
    summary = "Count students",
    responses((status = 200, description = "Number of students", body = StudentCountResponse)),
)]
#[instrument(skip(state))]
pub async fn count_students(
    State(state): State<AppState>,
) -> Result<Json<StudentCountResponse>, AppError> {
    let count = StudentService::new(&state.db).count().await?;
    Ok(Json(StudentCountResponse { count }))
}

#[utoipa::path(
    get,
    path = "/average-age",
    tag = "Students",
    operation_id = "averageStudentAge",
    summary = "Average student age",
    description = "Mean age over all students; `0` when there are none.",
    responses((status = 200, description = "Average age", body = AverageAgeResponse)),
)]
#[instrument(skip(state))]
pub async fn average_age(
    State(state): State<AppState>,
) -> Result<Json<AverageAgeResponse>, AppError> {
    let average_age = StudentService::new(&state.db).average_age().await?;
    Ok(Json(AverageAgeResponse { average_age }))
}

#[utoipa::path(
    get,
    path = "/last-five",
    tag = "Students",
    operation_id = "lastFiveStudents",
    summary = "Most recently created students",
    description = "Up to five students with the highest ids, newest first.",
    responses((status = 200, description = "Students", body = Vec<StudentResponse>)),
)]
#[instrument(skip(state))]
pub async fn last_five(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    let students = StudentService::new(&state.db).last_five().await?;
    Ok(Json(students.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/names-starting-with/{letter}",
    tag = "Students",
    operation_id = "studentNamesStartingWith",
    summary = "Student names starting with a letter",
    description = "Upper-cased names of students whose name starts with `letter`, \
        ignoring case, sorted ascending.",
    params(("letter" = String, Path, description = "A single character")),
    responses(
        (status = 200, description = "Names", body = Vec<String>),
        (status = 400, description = "Not a single character (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn names_starting_with(
    State(state): State<AppState>,
    Path(letter): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let mut chars = letter.chars();
    let (Some(first), None) = (chars.next(), chars.next()) else {
        return Err(AppError::Validation(
            "letter must be a single character".into(),
        ));
    };

    let names = StudentService::new(&state.db)
        .names_starting_with(first)
        .await?;
    Ok(Json(names))
}
