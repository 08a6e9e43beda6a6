use axum::Json;
use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::query::AppQuery;
use crate::models::avatar::{AvatarPageQuery, AvatarResponse, UploadAvatarQuery};
use crate::services::{AvatarContent, AvatarService, AvatarUpload};
use crate::state::AppState;
use crate::utils::filename::{avatar_extension, resolve_media_type};

/// Multipart part carrying the image.
const AVATAR_FIELD: &str = "avatar";

/// Room for multipart framing on top of the largest accepted avatar.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

pub fn avatar_upload_body_limit(max_avatar_size: u64) -> DefaultBodyLimit {
    let limit = max_avatar_size.saturating_add(MULTIPART_OVERHEAD);
    DefaultBodyLimit::max(usize::try_from(limit).unwrap_or(usize::MAX))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Avatars",
    operation_id = "uploadAvatar",
    summary = "Upload a student's avatar",
    description = "Stores the `avatar` multipart part in the avatar directory and in the database. \
        Uploading again for the same student replaces the stored avatar.",
    params(UploadAvatarQuery),
    request_body(content_type = "multipart/form-data", description = "Image in the `avatar` part"),
    responses(
        (status = 200, description = "Avatar stored", body = AvatarResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Student not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Avatar could not be written (AVATAR_PROCESSING_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query, multipart), fields(student_id = query.student_id))]
pub async fn upload_avatar(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<UploadAvatarQuery>,
    mut multipart: Multipart,
) -> Result<Json<AvatarResponse>, AppError> {
    let max_size = state.config.storage.max_avatar_size;
    let mut upload: Option<AvatarUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let media_type = resolve_media_type(field.content_type(), file_name.as_deref());
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read avatar: {e}")))?;

        if data.len() as u64 > max_size {
            return Err(AppError::Validation(format!(
                "Avatar is {} bytes, the limit is {max_size} bytes",
                data.len()
            )));
        }

        upload = Some(AvatarUpload {
            student_id: query.student_id,
            data: data.to_vec(),
            media_type,
            extension: file_name.as_deref().and_then(avatar_extension),
        });
    }

    let upload =
        upload.ok_or_else(|| AppError::Validation(format!("Missing '{AVATAR_FIELD}' field")))?;

    let saved = AvatarService::new(&state.db, &*state.avatar_store)
        .upload(upload)
        .await?;
    Ok(Json(saved.into()))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Avatars",
    operation_id = "listAvatars",
    summary = "List avatars page by page",
    description = "Avatar metadata ordered by id. `page` starts at 1; `size` is 1-1000.",
    params(AvatarPageQuery),
    responses(
        (status = 200, description = "Avatar page", body = Vec<AvatarResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_avatars(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AvatarPageQuery>,
) -> Result<Json<Vec<AvatarResponse>>, AppError> {
    let page = AvatarService::new(&state.db, &*state.avatar_store)
        .list_page(query.page, query.size)
        .await?;
    Ok(Json(page.into_iter().map(Into::into).collect()))
}

/// Raw avatar bytes with their stored media type.
pub(super) fn avatar_response(content: AvatarContent) -> Result<Response, AppError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content.media_type)
        .header(header::CONTENT_LENGTH, content.data.len())
        .body(Body::from(content.data))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}
