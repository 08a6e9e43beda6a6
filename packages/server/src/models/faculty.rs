use serde::{Deserialize, Serialize};

use crate::entity::faculty;
use crate::error::AppError;
use crate::services::FacultyDraft;

use super::shared::{MAX_COLOR_LENGTH, MAX_NAME_LENGTH, validate_text};

/// Body of `POST /faculty` and `PUT /faculty/{id}`.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct FacultyRequest {
    #[schema(example = "Gryffindor")]
    pub name: String,
    #[schema(example = "Red")]
    pub color: String,
}

impl FacultyRequest {
    pub fn into_draft(self) -> Result<FacultyDraft, AppError> {
        Ok(FacultyDraft {
            name: validate_text(&self.name, "Name", MAX_NAME_LENGTH)?,
            color: validate_text(&self.color, "Color", MAX_COLOR_LENGTH)?,
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FacultyResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Gryffindor")]
    pub name: String,
    #[schema(example = "Red")]
    pub color: String,
}

impl From<faculty::Model> for FacultyResponse {
    fn from(m: faculty::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            color: m.color,
        }
    }
}

/// Query parameters for `GET /faculty`. At most one filter may be given.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FacultyListQuery {
    /// Exact color match.
    #[param(example = "Red")]
    pub color: Option<String>,
    /// Case-insensitive match against either name or color.
    #[param(example = "gryffindor")]
    pub name_or_color: Option<String>,
}
