// src/models/mod.rs

pub mod assessment;
pub mod attendance;
pub mod exam;
pub mod live_class;
pub mod result;
pub mod school;
pub mod student;
pub mod subject;
pub mod user;
