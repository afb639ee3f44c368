pub mod course;
pub mod lesson;
