use std::path::Path;

use common::storage::{FileStore, StorageError};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::{debug, info};
use uuid::Uuid;

use super::{ServiceError, StudentService};
use crate::entity::avatar;

/// Largest accepted `size` for [`AvatarService::list_page`].
pub const MAX_PAGE_SIZE: u64 = 1000;

/// A validated avatar upload.
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub student_id: i32,
    pub data: Vec<u8>,
    pub media_type: String,
    /// Extension for the stored file name, without the leading dot.
    pub extension: Option<String>,
}

/// Image bytes together with the media type they were uploaded with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarContent {
    pub data: Vec<u8>,
    pub media_type: String,
}

/// Avatar row without its byte content.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct AvatarMeta {
    pub id: i32,
    pub student_id: i32,
    pub file_path: String,
    pub file_size: i64,
    pub media_type: String,
}

/// Stores avatars twice: as a file in the avatar directory and as a row.
///
/// The two copies are written independently. A failed file write leaves the
/// row untouched; a failed row write leaves the new file behind.
pub struct AvatarService<'a, C: ConnectionTrait> {
    conn: &'a C,
    files: &'a dyn FileStore,
}

impl<'a, C: ConnectionTrait> AvatarService<'a, C> {
    pub fn new(conn: &'a C, files: &'a dyn FileStore) -> Self {
        Self { conn, files }
    }

    /// Write the file, then insert or replace the student's avatar row.
    ///
    /// A previous file of the same student stays on disk.
    pub async fn upload(&self, upload: AvatarUpload) -> Result<avatar::Model, ServiceError> {
        let student_id = upload.student_id;
        StudentService::new(self.conn).get(student_id).await?;

        let file_name = match upload.extension.as_deref() {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };
        let path = self
            .files
            .write(&file_name, &upload.data)
            .await
            .map_err(|e| match e {
                StorageError::SizeLimitExceeded { actual, limit } => ServiceError::Validation(
                    format!("Avatar is {actual} bytes, the limit is {limit} bytes"),
                ),
                other => ServiceError::AvatarProcessing(other),
            })?;

        let file_size = upload.data.len() as i64;
        let row = avatar::ActiveModel {
            student_id: Set(student_id),
            file_path: Set(path.to_string_lossy().into_owned()),
            file_size: Set(file_size),
            media_type: Set(upload.media_type),
            data: Set(upload.data),
            ..Default::default()
        };
        avatar::Entity::insert(row)
            .on_conflict(
                OnConflict::column(avatar::Column::StudentId)
                    .update_columns([
                        avatar::Column::FilePath,
                        avatar::Column::FileSize,
                        avatar::Column::MediaType,
                        avatar::Column::Data,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.conn)
            .await?;

        let saved = self.find(student_id).await?;
        info!(
            student_id,
            avatar_id = saved.id,
            size = file_size,
            path = %saved.file_path,
            "Stored avatar"
        );
        Ok(saved)
    }

    /// Avatar bytes as kept in the database row.
    pub async fn read_from_store(&self, student_id: i32) -> Result<AvatarContent, ServiceError> {
        let row = self.find(student_id).await?;
        Ok(AvatarContent {
            data: row.data,
            media_type: row.media_type,
        })
    }

    /// Avatar bytes read back from the file the row points at.
    pub async fn read_from_filesystem(
        &self,
        student_id: i32,
    ) -> Result<AvatarContent, ServiceError> {
        let row = self.find(student_id).await?;
        let data = self.files.read(Path::new(&row.file_path)).await?;
        debug!(student_id, size = data.len(), "Read avatar file");
        Ok(AvatarContent {
            data,
            media_type: row.media_type,
        })
    }

    /// One page of avatar metadata ordered by id. `page` is 1-indexed.
    pub async fn list_page(&self, page: u64, size: u64) -> Result<Vec<AvatarMeta>, ServiceError> {
        if page < 1 || !(1..=MAX_PAGE_SIZE).contains(&size) {
            return Err(ServiceError::Validation(format!(
                "page must be >= 1 and size must be 1-{MAX_PAGE_SIZE}"
            )));
        }
        let offset = (page - 1)
            .checked_mul(size)
            .filter(|&o| i64::try_from(o).is_ok())
            .ok_or_else(|| ServiceError::Validation(format!("page {page} is out of range")))?;

        Ok(avatar::Entity::find()
            .select_only()
            .columns([
                avatar::Column::Id,
                avatar::Column::StudentId,
                avatar::Column::FilePath,
                avatar::Column::FileSize,
                avatar::Column::MediaType,
            ])
            .order_by_asc(avatar::Column::Id)
            .offset(Some(offset))
            .limit(Some(size))
            .into_model::<AvatarMeta>()
            .all(self.conn)
            .await?)
    }

    /// The student's avatar row. A missing row reads as a missing student.
    async fn find(&self, student_id: i32) -> Result<avatar::Model, ServiceError> {
        avatar::Entity::find()
            .filter(avatar::Column::StudentId.eq(student_id))
            .one(self.conn)
            .await?
            .ok_or(ServiceError::StudentNotFound(student_id))
    }
}
