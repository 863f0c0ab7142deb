// src/handlers/mod.rs

pub mod exams;
pub mod grading;
pub mod live;
pub mod records;
pub mod schools;
pub mod students;
pub mod subjects;
pub mod users;
