// src/store/mod.rs

pub mod exams;
pub mod live;
pub mod records;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    assessment::Assessment,
    attendance::AttendanceRecord,
    exam::{ActiveExam, ExamSession},
    live_class::LiveClass,
    result::ResultRecord,
    school::{CreateSchoolRequest, School, UpdateSchoolRequest},
    student::{CreateStudentRequest, Student, UpdateStudentRequest},
    subject::{CreateSubjectRequest, Subject, UpdateSubjectRequest},
    user::{CreateUserRequest, UpdateUserRequest, User},
};

/// Store handle shared across handlers. All mutations go through the single
/// RwLock: the composite-key upserts are find-then-write and must not
/// interleave with other writers.
pub type SharedStore = Arc<RwLock<Store>>;

/// Composite session key: (exam_id, student_id). Keying the session map by
/// this pair makes the at-most-one-session-per-pair invariant structural.
pub type SessionKey = (String, String);

/// Composite result key: (student_id, subject_name).
pub type ResultKey = (String, String);

/// Composite attendance key: (date, student_id).
pub type AttendanceKey = (String, String);

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Owns every collection in the system. Constructed once per process (or per
/// test) and passed around behind [`SharedStore`]; never ambient global state.
#[derive(Debug, Default)]
pub struct Store {
    schools: Vec<School>,
    students: Vec<Student>,
    users: Vec<User>,
    subjects: Vec<Subject>,
    assessments: Vec<Assessment>,
    results: HashMap<ResultKey, ResultRecord>,
    attendance: HashMap<AttendanceKey, AttendanceRecord>,
    exams: Vec<ActiveExam>,
    sessions: HashMap<SessionKey, ExamSession>,
    live_classes: Vec<LiveClass>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Arc::new(RwLock::new(Self::new()))
    }

    // ---- Schools ----

    pub fn create_school(&mut self, req: CreateSchoolRequest) -> School {
        let school = School {
            id: new_id(),
            name: req.name,
            code: req.code,
            address: req.address,
            created_at: chrono::Utc::now(),
        };
        self.schools.push(school.clone());
        school
    }

    pub fn list_schools(&self) -> Vec<School> {
        self.schools.clone()
    }

    pub fn get_school(&self, id: &str) -> Option<School> {
        self.schools.iter().find(|s| s.id == id).cloned()
    }

    pub fn find_school_by_code(&self, code: &str) -> Option<School> {
        self.schools.iter().find(|s| s.code == code).cloned()
    }

    pub fn update_school(&mut self, id: &str, req: UpdateSchoolRequest) -> Option<School> {
        let school = self.schools.iter_mut().find(|s| s.id == id)?;
        if let Some(name) = req.name {
            school.name = name;
        }
        if let Some(code) = req.code {
            school.code = code;
        }
        if let Some(address) = req.address {
            school.address = Some(address);
        }
        Some(school.clone())
    }

    pub fn delete_school(&mut self, id: &str) -> bool {
        let before = self.schools.len();
        self.schools.retain(|s| s.id != id);
        self.schools.len() != before
    }

    // ---- Students ----

    pub fn create_student(&mut self, req: CreateStudentRequest) -> Student {
        let student = Student {
            id: new_id(),
            school_id: req.school_id,
            name: req.name,
            class_name: req.class_name,
            access_code: req.access_code,
            attendance: req.attendance,
            created_at: chrono::Utc::now(),
        };
        self.students.push(student.clone());
        student
    }

    pub fn list_students(
        &self,
        school_id: Option<&str>,
        class_name: Option<&str>,
    ) -> Vec<Student> {
        self.students
            .iter()
            .filter(|s| school_id.is_none_or(|id| s.school_id == id))
            .filter(|s| class_name.is_none_or(|c| s.class_name == c))
            .cloned()
            .collect()
    }

    pub fn get_student(&self, id: &str) -> Option<Student> {
        self.students.iter().find(|s| s.id == id).cloned()
    }

    pub fn update_student(&mut self, id: &str, req: UpdateStudentRequest) -> Option<Student> {
        let student = self.students.iter_mut().find(|s| s.id == id)?;
        if let Some(name) = req.name {
            student.name = name;
        }
        if let Some(class_name) = req.class_name {
            student.class_name = class_name;
        }
        if let Some(access_code) = req.access_code {
            student.access_code = access_code;
        }
        if let Some(attendance) = req.attendance {
            student.attendance = attendance;
        }
        Some(student.clone())
    }

    pub fn delete_student(&mut self, id: &str) -> bool {
        let before = self.students.len();
        self.students.retain(|s| s.id != id);
        self.students.len() != before
    }

    /// Resolves a student from a school code plus a student access code:
    /// find the school by its code, then the student by access code within
    /// that school.
    pub fn resolve_student_access(
        &self,
        school_code: &str,
        access_code: &str,
    ) -> Option<Student> {
        let school = self.schools.iter().find(|s| s.code == school_code)?;
        self.students
            .iter()
            .find(|s| s.school_id == school.id && s.access_code == access_code)
            .cloned()
    }

    // ---- Users ----

    pub fn create_user(&mut self, req: CreateUserRequest) -> User {
        let user = User {
            id: new_id(),
            school_id: req.school_id,
            name: req.name,
            email: req.email,
            role: req.role,
            created_at: chrono::Utc::now(),
        };
        self.users.push(user.clone());
        user
    }

    pub fn list_users(&self, school_id: Option<&str>) -> Vec<User> {
        self.users
            .iter()
            .filter(|u| school_id.is_none_or(|id| u.school_id == id))
            .cloned()
            .collect()
    }

    pub fn get_user(&self, id: &str) -> Option<User> {
        self.users.iter().find(|u| u.id == id).cloned()
    }

    pub fn update_user(&mut self, id: &str, req: UpdateUserRequest) -> Option<User> {
        let user = self.users.iter_mut().find(|u| u.id == id)?;
        if let Some(name) = req.name {
            user.name = name;
        }
        if let Some(email) = req.email {
            user.email = email;
        }
        if let Some(role) = req.role {
            user.role = role;
        }
        Some(user.clone())
    }

    pub fn delete_user(&mut self, id: &str) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        self.users.len() != before
    }

    // ---- Subjects ----

    pub fn create_subject(&mut self, req: CreateSubjectRequest) -> Subject {
        let subject = Subject {
            id: new_id(),
            school_id: req.school_id,
            name: req.name,
            class_name: req.class_name,
            teacher_id: req.teacher_id,
        };
        self.subjects.push(subject.clone());
        subject
    }

    pub fn list_subjects(
        &self,
        school_id: Option<&str>,
        class_name: Option<&str>,
    ) -> Vec<Subject> {
        self.subjects
            .iter()
            .filter(|s| school_id.is_none_or(|id| s.school_id == id))
            .filter(|s| {
                class_name.is_none_or(|c| s.class_name.as_deref() == Some(c))
            })
            .cloned()
            .collect()
    }

    pub fn get_subject(&self, id: &str) -> Option<Subject> {
        self.subjects.iter().find(|s| s.id == id).cloned()
    }

    pub fn update_subject(&mut self, id: &str, req: UpdateSubjectRequest) -> Option<Subject> {
        let subject = self.subjects.iter_mut().find(|s| s.id == id)?;
        if let Some(name) = req.name {
            subject.name = name;
        }
        if let Some(class_name) = req.class_name {
            subject.class_name = Some(class_name);
        }
        if let Some(teacher_id) = req.teacher_id {
            subject.teacher_id = Some(teacher_id);
        }
        Some(subject.clone())
    }

    pub fn delete_subject(&mut self, id: &str) -> bool {
        let before = self.subjects.len();
        self.subjects.retain(|s| s.id != id);
        self.subjects.len() != before
    }
}
