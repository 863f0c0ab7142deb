// src/store/records.rs
//
// Assessment, result and attendance records. All three are upserts rather
// than plain creates: Assessment by id, ResultRecord by
// (student_id, subject_name), AttendanceRecord by (date, student_id).

use crate::models::assessment::{Assessment, UpsertAssessmentRequest};
use crate::models::attendance::{AttendanceRecord, AttendanceStatus, MarkAttendanceRequest};
use crate::models::result::{ResultRecord, UpsertResultRequest};
use crate::store::{new_id, Store};

impl Store {
    /// Upserts an assessment by id. A supplied id that resolves merges the
    /// request into the existing record; otherwise a new record is appended
    /// with a generated id (same fall-through policy as exams).
    pub fn upsert_assessment(&mut self, req: UpsertAssessmentRequest) -> Assessment {
        if let Some(existing) = req
            .id
            .as_deref()
            .and_then(|id| self.assessments.iter_mut().find(|a| a.id == id))
        {
            existing.school_id = req.school_id;
            existing.subject_id = req.subject_id;
            existing.title = req.title;
            existing.term = req.term;
            if req.date.is_some() {
                existing.date = req.date;
            }
            existing.max_score = req.max_score;
            return existing.clone();
        }

        let assessment = Assessment {
            id: new_id(),
            school_id: req.school_id,
            subject_id: req.subject_id,
            title: req.title,
            term: req.term,
            date: req.date,
            max_score: req.max_score,
        };
        self.assessments.push(assessment.clone());
        assessment
    }

    pub fn list_assessments(
        &self,
        subject_id: Option<&str>,
        term: Option<&str>,
    ) -> Vec<Assessment> {
        self.assessments
            .iter()
            .filter(|a| subject_id.is_none_or(|id| a.subject_id == id))
            .filter(|a| term.is_none_or(|t| a.term == t))
            .cloned()
            .collect()
    }

    pub fn delete_assessment(&mut self, id: &str) -> bool {
        let before = self.assessments.len();
        self.assessments.retain(|a| a.id != id);
        self.assessments.len() != before
    }

    /// Upserts a result by (student_id, subject_name). A second mark for the
    /// same pair replaces the first but keeps its record id.
    pub fn upsert_result(&mut self, req: UpsertResultRequest) -> ResultRecord {
        let key = (req.student_id.clone(), req.subject_name.clone());
        match self.results.get_mut(&key) {
            Some(existing) => {
                existing.term = req.term;
                existing.score = req.score;
                if req.max_score.is_some() {
                    existing.max_score = req.max_score;
                }
                if req.remark.is_some() {
                    existing.remark = req.remark;
                }
                existing.clone()
            }
            None => {
                let record = ResultRecord {
                    id: new_id(),
                    student_id: req.student_id,
                    subject_name: req.subject_name,
                    term: req.term,
                    score: req.score,
                    max_score: req.max_score,
                    remark: req.remark,
                };
                self.results.insert(key, record.clone());
                record
            }
        }
    }

    pub fn list_results(
        &self,
        student_id: Option<&str>,
        subject_name: Option<&str>,
    ) -> Vec<ResultRecord> {
        self.results
            .values()
            .filter(|r| student_id.is_none_or(|id| r.student_id == id))
            .filter(|r| subject_name.is_none_or(|s| r.subject_name == s))
            .cloned()
            .collect()
    }

    /// Upserts an attendance mark by (date, student_id) and applies the
    /// derived side effect: every Absent mark decrements the student's
    /// attendance counter by 1, floored at 0. Other statuses never touch
    /// the counter. Returns None if the student does not exist.
    pub fn mark_attendance(&mut self, req: MarkAttendanceRequest) -> Option<AttendanceRecord> {
        let student = self.students.iter_mut().find(|s| s.id == req.student_id)?;
        if req.status == AttendanceStatus::Absent {
            student.attendance = student.attendance.saturating_sub(1);
        }

        let key = (req.date.clone(), req.student_id.clone());
        let record = match self.attendance.get_mut(&key) {
            Some(existing) => {
                existing.status = req.status;
                existing.clone()
            }
            None => {
                let record = AttendanceRecord {
                    id: new_id(),
                    student_id: req.student_id,
                    date: req.date,
                    status: req.status,
                };
                self.attendance.insert(key, record.clone());
                record
            }
        };
        Some(record)
    }

    pub fn list_attendance(
        &self,
        date: Option<&str>,
        student_id: Option<&str>,
    ) -> Vec<AttendanceRecord> {
        self.attendance
            .values()
            .filter(|a| date.is_none_or(|d| a.date == d))
            .filter(|a| student_id.is_none_or(|id| a.student_id == id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::student::CreateStudentRequest;

    fn seed_student(store: &mut Store, attendance: u32) -> String {
        store
            .create_student(CreateStudentRequest {
                school_id: "sch1".to_string(),
                name: "Ada".to_string(),
                class_name: "JSS1".to_string(),
                access_code: "1234".to_string(),
                attendance,
            })
            .id
    }

    fn mark(store: &mut Store, student_id: &str, date: &str, status: AttendanceStatus) {
        store
            .mark_attendance(MarkAttendanceRequest {
                student_id: student_id.to_string(),
                date: date.to_string(),
                status,
            })
            .expect("student exists");
    }

    #[test]
    fn result_upsert_replaces_by_student_and_subject() {
        let mut store = Store::new();
        let first = store.upsert_result(UpsertResultRequest {
            student_id: "s1".to_string(),
            subject_name: "Maths".to_string(),
            term: "First Term".to_string(),
            score: 62.0,
            max_score: Some(100.0),
            remark: None,
        });
        let second = store.upsert_result(UpsertResultRequest {
            student_id: "s1".to_string(),
            subject_name: "Maths".to_string(),
            term: "First Term".to_string(),
            score: 71.0,
            max_score: None,
            remark: Some("Improved".to_string()),
        });

        assert_eq!(second.id, first.id);
        assert_eq!(second.score, 71.0);
        assert_eq!(second.max_score, Some(100.0));
        assert_eq!(store.list_results(Some("s1"), None).len(), 1);

        // a different subject for the same student is a new record
        store.upsert_result(UpsertResultRequest {
            student_id: "s1".to_string(),
            subject_name: "English".to_string(),
            term: "First Term".to_string(),
            score: 55.0,
            max_score: None,
            remark: None,
        });
        assert_eq!(store.list_results(Some("s1"), None).len(), 2);
    }

    #[test]
    fn absent_marks_decrement_attendance_counter() {
        let mut store = Store::new();
        let id = seed_student(&mut store, 10);

        mark(&mut store, &id, "2026-03-02", AttendanceStatus::Absent);
        mark(&mut store, &id, "2026-03-03", AttendanceStatus::Absent);
        assert_eq!(store.get_student(&id).unwrap().attendance, 8);
    }

    #[test]
    fn non_absent_marks_never_change_the_counter() {
        let mut store = Store::new();
        let id = seed_student(&mut store, 5);

        mark(&mut store, &id, "2026-03-02", AttendanceStatus::Present);
        mark(&mut store, &id, "2026-03-03", AttendanceStatus::Late);
        mark(&mut store, &id, "2026-03-04", AttendanceStatus::Excused);
        assert_eq!(store.get_student(&id).unwrap().attendance, 5);
    }

    #[test]
    fn attendance_counter_floors_at_zero() {
        let mut store = Store::new();
        let id = seed_student(&mut store, 1);

        mark(&mut store, &id, "2026-03-02", AttendanceStatus::Absent);
        mark(&mut store, &id, "2026-03-03", AttendanceStatus::Absent);
        mark(&mut store, &id, "2026-03-04", AttendanceStatus::Absent);
        assert_eq!(store.get_student(&id).unwrap().attendance, 0);
    }

    #[test]
    fn attendance_upserts_by_date_and_student() {
        let mut store = Store::new();
        let id = seed_student(&mut store, 3);

        mark(&mut store, &id, "2026-03-02", AttendanceStatus::Present);
        mark(&mut store, &id, "2026-03-02", AttendanceStatus::Late);

        let records = store.list_attendance(Some("2026-03-02"), Some(&id));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, AttendanceStatus::Late);
    }

    #[test]
    fn marking_unknown_student_is_rejected() {
        let mut store = Store::new();
        let res = store.mark_attendance(MarkAttendanceRequest {
            student_id: "ghost".to_string(),
            date: "2026-03-02".to_string(),
            status: AttendanceStatus::Present,
        });
        assert!(res.is_none());
    }
}
