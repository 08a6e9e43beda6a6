use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Avatar image of a student, kept both as a row and as a file on disk.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "avatar")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub student_id: i32,
    #[sea_orm(belongs_to, from = "student_id", to = "id")]
    pub student: HasOne<super::student::Entity>,

    /// Location of the on-disk copy. Not kept in sync with `data`.
    pub file_path: String,

    /// Purposefully denormalized to avoid reading `data` for list queries.
    pub file_size: i64,

    pub media_type: String,

    pub data: Vec<u8>,
}

impl ActiveModelBehavior for ActiveModel {}
