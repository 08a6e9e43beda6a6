pub mod avatar;
pub mod faculty;
pub mod info;
pub mod shared;
pub mod student;
