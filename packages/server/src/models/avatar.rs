use serde::{Deserialize, Serialize};

use crate::entity::avatar;
use crate::services::AvatarMeta;

/// Query parameters for `POST /avatars`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct UploadAvatarQuery {
    /// Student the avatar belongs to.
    #[param(example = 1)]
    pub student_id: i32,
}

/// Query parameters for `GET /avatars`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct AvatarPageQuery {
    /// Page number (1-indexed).
    #[param(example = 1)]
    pub page: u64,
    /// Items per page, 1-1000.
    #[param(example = 10)]
    pub size: u64,
}

/// Avatar metadata. The image bytes are served by the student endpoints.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AvatarResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub student_id: i32,
    #[schema(example = "./avatars/0b1e8d2c-6c1f-4a55-9a8e-2f5b8f1f9c3a.png")]
    pub file_path: String,
    #[schema(example = 142857)]
    pub file_size: i64,
    #[schema(example = "image/png")]
    pub media_type: String,
}

impl From<avatar::Model> for AvatarResponse {
    fn from(m: avatar::Model) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            file_path: m.file_path,
            file_size: m.file_size,
            media_type: m.media_type,
        }
    }
}

impl From<AvatarMeta> for AvatarResponse {
    fn from(m: AvatarMeta) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            file_path: m.file_path,
            file_size: m.file_size,
            media_type: m.media_type,
        }
    }
}
