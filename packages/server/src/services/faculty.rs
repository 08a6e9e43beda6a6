use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::{debug, info};

use super::{ServiceError, StudentService};
use crate::entity::{faculty, student};

/// Writable fields of a faculty. Used for both create and full update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyDraft {
    pub name: String,
    pub color: String,
}

pub struct FacultyService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> FacultyService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn create(&self, draft: FacultyDraft) -> Result<faculty::Model, ServiceError> {
        let model = faculty::ActiveModel {
            name: Set(draft.name),
            color: Set(draft.color),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        info!(faculty_id = model.id, "Created faculty");
        Ok(model)
    }

    pub async fn get(&self, id: i32) -> Result<faculty::Model, ServiceError> {
        faculty::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or(ServiceError::FacultyNotFound(id))
    }

    pub async fn update(
        &self,
        id: i32,
        draft: FacultyDraft,
    ) -> Result<faculty::Model, ServiceError> {
        let existing = self.get(id).await?;

        let mut active: faculty::ActiveModel = existing.into();
        active.name = Set(draft.name);
        active.color = Set(draft.color);

        let model = active.update(self.conn).await?;
        info!(faculty_id = id, "Updated faculty");
        Ok(model)
    }

    /// Delete a faculty. Its students stay, with their faculty reference cleared.
    pub async fn remove(&self, id: i32) -> Result<faculty::Model, ServiceError> {
        let faculty = self.get(id).await?;

        let detached = student::Entity::update_many()
            .col_expr(student::Column::FacultyId, Expr::value(Option::<i32>::None))
            .filter(student::Column::FacultyId.eq(id))
            .exec(self.conn)
            .await?;
        faculty::Entity::delete_by_id(id).exec(self.conn).await?;

        info!(
            faculty_id = id,
            detached_students = detached.rows_affected,
            "Removed faculty"
        );
        Ok(faculty)
    }

    pub async fn list_all(&self) -> Result<Vec<faculty::Model>, ServiceError> {
        Ok(faculty::Entity::find()
            .order_by_asc(faculty::Column::Id)
            .all(self.conn)
            .await?)
    }

    pub async fn filter_by_color(&self, color: &str) -> Result<Vec<faculty::Model>, ServiceError> {
        debug!(color, "Filtering faculties by color");
        Ok(faculty::Entity::find()
            .filter(faculty::Column::Color.eq(color))
            .order_by_asc(faculty::Column::Id)
            .all(self.conn)
            .await?)
    }

    /// Faculties whose name or color equals `term`, ignoring case.
    ///
    /// Case folding happens here rather than in SQL, where `LOWER` may only
    /// fold ASCII.
    pub async fn filter_by_name_or_color(
        &self,
        term: &str,
    ) -> Result<Vec<faculty::Model>, ServiceError> {
        debug!(term, "Filtering faculties by name or color");
        let term = term.to_lowercase();
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(|f| f.name.to_lowercase() == term || f.color.to_lowercase() == term)
            .collect())
    }

    /// Students of a faculty. An unknown faculty simply has none.
    pub async fn students(&self, id: i32) -> Result<Vec<student::Model>, ServiceError> {
        StudentService::new(self.conn).filter_by_faculty(id).await
    }

    /// The longest faculty name by character count.
    ///
    /// Ties go to the faculty with the lowest id.
    pub async fn longest_name(&self) -> Result<Option<String>, ServiceError> {
        let longest = self
            .list_all()
            .await?
            .into_iter()
            .map(|f| f.name)
            .fold(None, |best: Option<String>, name| match best {
                Some(b) if b.chars().count() >= name.chars().count() => Some(b),
                _ => Some(name),
            });
        Ok(longest)
    }
}
