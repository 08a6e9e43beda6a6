use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::{debug, info};

use super::ServiceError;
use crate::entity::{avatar, faculty, student};

/// Number of students returned by [`StudentService::last_five`].
const LAST_STUDENTS_LIMIT: u64 = 5;

/// Writable fields of a student. Used for both create and full update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: String,
    pub age: i32,
    pub faculty_id: Option<i32>,
}

/// A deleted student together with the file its avatar pointed at, if any.
#[derive(Debug)]
pub struct RemovedStudent {
    pub student: student::Model,
    pub avatar_file: Option<String>,
}

pub struct StudentService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> StudentService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn create(&self, draft: StudentDraft) -> Result<student::Model, ServiceError> {
        self.ensure_faculty(draft.faculty_id).await?;

        let model = student::ActiveModel {
            name: Set(draft.name),
            age: Set(draft.age),
            faculty_id: Set(draft.faculty_id),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        info!(student_id = model.id, "Created student");
        Ok(model)
    }

    pub async fn get(&self, id: i32) -> Result<student::Model, ServiceError> {
        student::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or(ServiceError::StudentNotFound(id))
    }

    /// Replace name, age and faculty of an existing student.
    pub async fn update(
        &self,
        id: i32,
        draft: StudentDraft,
    ) -> Result<student::Model, ServiceError> {
        let existing = self.get(id).await?;
        self.ensure_faculty(draft.faculty_id).await?;

        let mut active: student::ActiveModel = existing.into();
        active.name = Set(draft.name);
        active.age = Set(draft.age);
        active.faculty_id = Set(draft.faculty_id);

        let model = active.update(self.conn).await?;
        info!(student_id = id, "Updated student");
        Ok(model)
    }

    /// Delete a student and its avatar row. The avatar file is left to the caller.
    pub async fn remove(&self, id: i32) -> Result<RemovedStudent, ServiceError> {
        let student = self.get(id).await?;

        let avatar_file = avatar::Entity::find()
            .filter(avatar::Column::StudentId.eq(id))
            .one(self.conn)
            .await?
            .map(|a| a.file_path);

        avatar::Entity::delete_many()
            .filter(avatar::Column::StudentId.eq(id))
            .exec(self.conn)
            .await?;
        student::Entity::delete_by_id(id).exec(self.conn).await?;

        info!(student_id = id, "Removed student");
        Ok(RemovedStudent {
            student,
            avatar_file,
        })
    }

    pub async fn list_all(&self) -> Result<Vec<student::Model>, ServiceError> {
        Ok(student::Entity::find()
            .order_by_asc(student::Column::Id)
            .all(self.conn)
            .await?)
    }

    pub async fn filter_by_age(&self, age: i32) -> Result<Vec<student::Model>, ServiceError> {
        debug!(age, "Filtering students by age");
        Ok(student::Entity::find()
            .filter(student::Column::Age.eq(age))
            .order_by_asc(student::Column::Id)
            .all(self.conn)
            .await?)
    }

    /// Students with `min_age <= age <= max_age`. An inverted range matches nothing.
    pub async fn filter_by_age_range(
        &self,
        min_age: i32,
        max_age: i32,
    ) -> Result<Vec<student::Model>, ServiceError> {
        debug!(min_age, max_age, "Filtering students by age range");
        if min_age > max_age {
            return Ok(Vec::new());
        }
        Ok(student::Entity::find()
            .filter(student::Column::Age.between(min_age, max_age))
            .order_by_asc(student::Column::Id)
            .all(self.conn)
            .await?)
    }

    pub async fn filter_by_faculty(
        &self,
        faculty_id: i32,
    ) -> Result<Vec<student::Model>, ServiceError> {
        Ok(student::Entity::find()
            .filter(student::Column::FacultyId.eq(faculty_id))
            .order_by_asc(student::Column::Id)
            .all(self.conn)
            .await?)
    }

    /// The faculty a student belongs to, or `None` when unassigned.
    pub async fn find_faculty(&self, id: i32) -> Result<Option<faculty::Model>, ServiceError> {
        let student = self.get(id).await?;
        match student.faculty_id {
            Some(faculty_id) => Ok(faculty::Entity::find_by_id(faculty_id)
                .one(self.conn)
                .await?),
            None => Ok(None),
        }
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        Ok(student::Entity::find().count(self.conn).await?)
    }

    /// Mean age over all students; `0.0` when there are none.
    pub async fn average_age(&self) -> Result<f64, ServiceError> {
        let ages: Vec<i32> = self.list_all().await?.into_iter().map(|s| s.age).collect();
        if ages.is_empty() {
            return Ok(0.0);
        }
        let total: i64 = ages.iter().map(|&a| i64::from(a)).sum();
        Ok(total as f64 / ages.len() as f64)
    }

    /// The most recently created students, newest first.
    pub async fn last_five(&self) -> Result<Vec<student::Model>, ServiceError> {
        Ok(student::Entity::find()
            .order_by_desc(student::Column::Id)
            .limit(Some(LAST_STUDENTS_LIMIT))
            .all(self.conn)
            .await?)
    }

    /// Upper-cased names starting with `letter` (case-insensitive), sorted ascending.
    pub async fn names_starting_with(&self, letter: char) -> Result<Vec<String>, ServiceError> {
        let prefix: String = letter.to_uppercase().collect();
        let mut names: Vec<String> = self
            .list_all()
            .await?
            .into_iter()
            .map(|s| s.name.to_uppercase())
            .filter(|name| name.starts_with(&prefix))
            .collect();
        names.sort();
        Ok(names)
    }

    async fn ensure_faculty(&self, faculty_id: Option<i32>) -> Result<(), ServiceError> {
        if let Some(faculty_id) = faculty_id {
            faculty::Entity::find_by_id(faculty_id)
                .one(self.conn)
                .await?
                .ok_or(ServiceError::FacultyNotFound(faculty_id))?;
        }
        Ok(())
    }
}
