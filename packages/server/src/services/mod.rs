mod error;

pub mod avatar;
pub mod faculty;
pub mod student;

pub use avatar::{AvatarContent, AvatarMeta, AvatarService, AvatarUpload};
pub use error::ServiceError;
pub use faculty::{FacultyDraft, FacultyService};
pub use student::{RemovedStudent, StudentDraft, StudentService};
