use common::storage::StorageError;
use sea_orm::DbErr;
use thiserror::Error;

/// Failures raised by the domain services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Студент с id = {0} не найден")]
    StudentNotFound(i32),

    #[error("Факультет с id = {0} не найден")]
    FacultyNotFound(i32),

    #[error("{0}")]
    Validation(String),

    #[error("Avatar processing failed: {0}")]
    AvatarProcessing(#[from] StorageError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}
