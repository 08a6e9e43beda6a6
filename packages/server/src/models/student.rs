use serde::{Deserialize, Serialize};

use crate::entity::student;
use crate::error::AppError;
use crate::services::StudentDraft;

use super::shared::{MAX_NAME_LENGTH, validate_age, validate_text};

/// Body of `POST /student` and `PUT /student/{id}`.
///
/// `PUT` replaces every field; an omitted `faculty_id` clears the assignment.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct StudentRequest {
    #[schema(example = "Harry Potter")]
    pub name: String,
    #[schema(example = 11)]
    pub age: i32,
    /// Faculty the student belongs to. Must reference an existing faculty.
    #[serde(default)]
    #[schema(example = 1)]
    pub faculty_id: Option<i32>,
}

impl StudentRequest {
    pub fn into_draft(self) -> Result<StudentDraft, AppError> {
        Ok(StudentDraft {
            name: validate_text(&self.name, "Name", MAX_NAME_LENGTH)?,
            age: validate_age(self.age)?,
            faculty_id: self.faculty_id,
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct StudentResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Harry Potter")]
    pub name: String,
    #[schema(example = 11)]
    pub age: i32,
    #[schema(example = 1)]
    pub faculty_id: Option<i32>,
}

impl From<student::Model> for StudentResponse {
    fn from(m: student::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            age: m.age,
            faculty_id: m.faculty_id,
        }
    }
}

/// Query parameters for `GET /student`.
///
/// `age` selects an exact age; `minAge` together with `maxAge` selects an
/// inclusive range. Without either, every student is returned.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StudentListQuery {
    #[param(example = 11)]
    pub age: Option<i32>,
    #[param(example = 11)]
    pub min_age: Option<i32>,
    #[param(example = 17)]
    pub max_age: Option<i32>,
}

/// Which filter a `GET /student` request asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum StudentFilter {
    All,
    Age(i32),
    AgeRange { min: i32, max: i32 },
}

impl StudentListQuery {
    pub fn filter(&self) -> Result<StudentFilter, AppError> {
        match (self.age, self.min_age, self.max_age) {
            (Some(age), None, None) => Ok(StudentFilter::Age(age)),
            (None, Some(min), Some(max)) => Ok(StudentFilter::AgeRange { min, max }),
            (None, None, None) => Ok(StudentFilter::All),
            (Some(_), _, _) => Err(AppError::Validation(
                "age cannot be combined with minAge/maxAge".into(),
            )),
            _ => Err(AppError::Validation(
                "minAge and maxAge must be given together".into(),
            )),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct StudentCountResponse {
    #[schema(example = 42)]
    pub count: u64,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AverageAgeResponse {
    #[schema(example = 14.5)]
    pub average_age: f64,
}
