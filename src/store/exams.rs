// src/store/exams.rs
//
// Exam lifecycle: exam upserts, status transitions, and the per-student
// session state machine (not-started -> in-progress -> submitted, with reset
// deleting the session outright).

use std::collections::HashMap;
use std::fmt;

use chrono::Utc;

use crate::models::exam::{
    ActiveExam, CreateExamRequest, ExamSession, ExamStatus, SessionStatus,
};
use crate::store::{new_id, Store};

/// Failures the lifecycle operations can produce. An update against a
/// submitted session reports `SessionNotFound` as well: submitted sessions
/// are immutable and indistinguishable from absent ones to writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    ExamNotFound,
    SessionNotFound,
    NoActiveExam,
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleError::ExamNotFound => write!(f, "Exam not found"),
            LifecycleError::SessionNotFound => write!(f, "Exam session not found"),
            LifecycleError::NoActiveExam => write!(f, "No active exam"),
        }
    }
}

impl std::error::Error for LifecycleError {}

impl Store {
    /// Creates a new exam or replaces an existing one's questions and title.
    ///
    /// A supplied `examId` that resolves keeps the exam's status, duration
    /// and (unless a new one is given) teacher in place. A missing or unknown
    /// id falls through to creation: new exams start `scheduled` with a
    /// 60-minute duration. The fall-through is a deliberate upsert policy,
    /// not an error.
    pub fn create_or_update_exam(&mut self, req: CreateExamRequest) -> ActiveExam {
        let questions: Vec<_> = req
            .questions
            .into_iter()
            .map(|q| q.into_question(new_id()))
            .collect();

        if let Some(exam) = req
            .exam_id
            .as_deref()
            .and_then(|id| self.exams.iter_mut().find(|e| e.id == id))
        {
            exam.title = req.title;
            exam.questions = questions;
            if req.teacher_id.is_some() {
                exam.teacher_id = req.teacher_id;
            }
            return exam.clone();
        }

        let exam = ActiveExam {
            id: new_id(),
            title: req.title,
            status: ExamStatus::Scheduled,
            duration: 60,
            questions,
            teacher_id: req.teacher_id,
        };
        self.exams.push(exam.clone());
        exam
    }

    /// Moves an exam to the requested status. Any state may move to any
    /// other state; there is no transition graph to enforce.
    pub fn set_exam_status(
        &mut self,
        exam_id: &str,
        status: ExamStatus,
    ) -> Result<(), LifecycleError> {
        let exam = self
            .exams
            .iter_mut()
            .find(|e| e.id == exam_id)
            .ok_or(LifecycleError::ExamNotFound)?;
        exam.status = status;
        Ok(())
    }

    pub fn list_exams(&self) -> Vec<ActiveExam> {
        self.exams.clone()
    }

    pub fn get_exam(&self, id: &str) -> Option<ActiveExam> {
        self.exams.iter().find(|e| e.id == id).cloned()
    }

    /// Exams students may take right now, in insertion order.
    pub fn list_available_exams(&self) -> Vec<ActiveExam> {
        self.exams
            .iter()
            .filter(|e| e.status == ExamStatus::Active)
            .cloned()
            .collect()
    }

    /// Gets or lazily creates the session for `(exam_id, student_id)`.
    ///
    /// No session: one is created already in-progress with `startTime` now.
    /// A not-started session is promoted to in-progress. Any other status is
    /// returned unchanged, so re-entry is idempotent and never an error.
    pub fn start_session(&mut self, exam_id: &str, student_id: &str) -> ExamSession {
        let key = (exam_id.to_string(), student_id.to_string());
        let session = self.sessions.entry(key).or_insert_with(|| ExamSession {
            id: new_id(),
            exam_id: exam_id.to_string(),
            student_id: student_id.to_string(),
            status: SessionStatus::InProgress,
            progress: 0,
            score: None,
            start_time: Some(Utc::now()),
            end_time: None,
            answers: HashMap::new(),
        });
        if session.status == SessionStatus::NotStarted {
            session.status = SessionStatus::InProgress;
            session.start_time = Some(Utc::now());
        }
        session.clone()
    }

    /// Records a student's in-flight progress. The value is caller-supplied
    /// and not required to be monotonic. A supplied answers map replaces the
    /// prior map wholesale; partial merges are not performed.
    pub fn update_progress(
        &mut self,
        exam_id: &str,
        student_id: &str,
        progress: u8,
        answers: Option<HashMap<String, String>>,
    ) -> Result<(), LifecycleError> {
        let key = (exam_id.to_string(), student_id.to_string());
        let session = self
            .sessions
            .get_mut(&key)
            .ok_or(LifecycleError::SessionNotFound)?;
        if session.status == SessionStatus::Submitted {
            return Err(LifecycleError::SessionNotFound);
        }
        session.progress = progress;
        if let Some(answers) = answers {
            session.answers = answers;
        }
        Ok(())
    }

    /// Finalizes a student's attempt.
    ///
    /// The target exam is the explicit `exam_id` if it resolves, otherwise
    /// the first exam currently active. The score is accepted as given;
    /// grading happens upstream. If no session exists for the pair one is
    /// created directly in the submitted state.
    pub fn submit_exam(
        &mut self,
        student_id: &str,
        answers: HashMap<String, String>,
        score: f64,
        exam_id: Option<&str>,
    ) -> Result<ExamSession, LifecycleError> {
        let exam_id = exam_id
            .and_then(|id| self.exams.iter().find(|e| e.id == id))
            .or_else(|| self.exams.iter().find(|e| e.status == ExamStatus::Active))
            .map(|e| e.id.clone())
            .ok_or(LifecycleError::NoActiveExam)?;

        let key = (exam_id.clone(), student_id.to_string());
        let now = Utc::now();
        let session = match self.sessions.get_mut(&key) {
            Some(session) => {
                session.status = SessionStatus::Submitted;
                session.progress = 100;
                session.score = Some(score);
                session.end_time = Some(now);
                session.answers = answers;
                session.clone()
            }
            None => {
                let session = ExamSession {
                    id: new_id(),
                    exam_id,
                    student_id: student_id.to_string(),
                    status: SessionStatus::Submitted,
                    progress: 100,
                    score: Some(score),
                    start_time: None,
                    end_time: Some(now),
                    answers,
                };
                self.sessions.insert(key, session.clone());
                session
            }
        };
        Ok(session)
    }

    /// Deletes the session for `(exam_id, student_id)`, returning the pair
    /// to the implicit no-session state.
    pub fn reset_session(&mut self, exam_id: &str, student_id: &str) -> Result<(), LifecycleError> {
        let key = (exam_id.to_string(), student_id.to_string());
        self.sessions
            .remove(&key)
            .map(|_| ())
            .ok_or(LifecycleError::SessionNotFound)
    }

    pub fn get_session(&self, exam_id: &str, student_id: &str) -> Option<ExamSession> {
        let key = (exam_id.to_string(), student_id.to_string());
        self.sessions.get(&key).cloned()
    }

    pub fn list_sessions(&self, exam_id: &str) -> Vec<ExamSession> {
        self.sessions
            .values()
            .filter(|s| s.exam_id == exam_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::exam::{QuestionPayload, QuestionType};

    fn question(text: &str, points: u32) -> QuestionPayload {
        QuestionPayload {
            question_type: QuestionType::ShortAnswer,
            text: text.to_string(),
            options: None,
            correct_answer: None,
            points,
            is_auto_grade: false,
            rubric: None,
        }
    }

    fn create_exam(store: &mut Store, title: &str) -> ActiveExam {
        store.create_or_update_exam(CreateExamRequest {
            exam_id: None,
            title: title.to_string(),
            questions: vec![question("Q1", 5), question("Q2", 5)],
            teacher_id: Some("t1".to_string()),
        })
    }

    #[test]
    fn new_exam_defaults() {
        let mut store = Store::new();
        let exam = create_exam(&mut store, "Midterm");

        assert_eq!(exam.status, ExamStatus::Scheduled);
        assert_eq!(exam.duration, 60);
        assert_eq!(exam.questions.len(), 2);
    }

    #[test]
    fn update_preserves_status_and_duration() {
        let mut store = Store::new();
        let exam = create_exam(&mut store, "Midterm");
        store.set_exam_status(&exam.id, ExamStatus::Active).unwrap();

        let updated = store.create_or_update_exam(CreateExamRequest {
            exam_id: Some(exam.id.clone()),
            title: "Midterm v2".to_string(),
            questions: vec![question("Q1 revised", 10)],
            teacher_id: None,
        });

        assert_eq!(updated.id, exam.id);
        assert_eq!(updated.title, "Midterm v2");
        assert_eq!(updated.status, ExamStatus::Active);
        assert_eq!(updated.duration, 60);
        assert_eq!(updated.teacher_id.as_deref(), Some("t1"));
        assert_eq!(updated.questions.len(), 1);
        assert_eq!(store.list_exams().len(), 1);
    }

    #[test]
    fn unknown_exam_id_falls_through_to_creation() {
        let mut store = Store::new();
        let exam = store.create_or_update_exam(CreateExamRequest {
            exam_id: Some("does-not-exist".to_string()),
            title: "Fresh".to_string(),
            questions: vec![question("Q", 1)],
            teacher_id: None,
        });

        assert_ne!(exam.id, "does-not-exist");
        assert_eq!(store.list_exams().len(), 1);
    }

    #[test]
    fn set_status_is_unconditional() {
        let mut store = Store::new();
        let exam = create_exam(&mut store, "Exam");

        store.set_exam_status(&exam.id, ExamStatus::Ended).unwrap();
        // ended -> active is allowed; there is no transition graph
        store.set_exam_status(&exam.id, ExamStatus::Active).unwrap();
        assert_eq!(store.get_exam(&exam.id).unwrap().status, ExamStatus::Active);

        assert_eq!(
            store.set_exam_status("missing", ExamStatus::Ended),
            Err(LifecycleError::ExamNotFound)
        );
    }

    #[test]
    fn list_available_filters_active_in_insertion_order() {
        let mut store = Store::new();
        let a = create_exam(&mut store, "A");
        let b = create_exam(&mut store, "B");
        let _c = create_exam(&mut store, "C");
        store.set_exam_status(&a.id, ExamStatus::Active).unwrap();
        store.set_exam_status(&b.id, ExamStatus::Active).unwrap();

        let available: Vec<_> = store
            .list_available_exams()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(available, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn start_session_creates_in_progress() {
        let mut store = Store::new();
        let exam = create_exam(&mut store, "Exam");

        let session = store.start_session(&exam.id, "s1");
        assert_eq!(session.status, SessionStatus::InProgress);
        assert_eq!(session.progress, 0);
        assert!(session.answers.is_empty());
        assert!(session.start_time.is_some());
    }

    #[test]
    fn start_session_is_idempotent() {
        let mut store = Store::new();
        let exam = create_exam(&mut store, "Exam");

        let first = store.start_session(&exam.id, "s1");
        let second = store.start_session(&exam.id, "s1");
        assert_eq!(first.id, second.id);
        assert_eq!(store.list_sessions(&exam.id).len(), 1);

        // re-entry after submission returns the submitted session unchanged
        store
            .submit_exam("s1", HashMap::new(), 7.0, Some(&exam.id))
            .unwrap();
        let third = store.start_session(&exam.id, "s1");
        assert_eq!(third.id, first.id);
        assert_eq!(third.status, SessionStatus::Submitted);
        assert_eq!(store.list_sessions(&exam.id).len(), 1);
    }

    #[test]
    fn progress_updates_replace_answers_wholesale() {
        let mut store = Store::new();
        let exam = create_exam(&mut store, "Exam");
        store.start_session(&exam.id, "s1");

        let mut answers = HashMap::new();
        answers.insert("q1".to_string(), "B".to_string());
        answers.insert("q2".to_string(), "A".to_string());
        store
            .update_progress(&exam.id, "s1", 40, Some(answers))
            .unwrap();

        let mut partial = HashMap::new();
        partial.insert("q1".to_string(), "C".to_string());
        store
            .update_progress(&exam.id, "s1", 60, Some(partial))
            .unwrap();

        let session = store.get_session(&exam.id, "s1").unwrap();
        assert_eq!(session.progress, 60);
        // the partial map overwrote the whole prior map; q2 is gone
        assert_eq!(session.answers.len(), 1);
        assert_eq!(session.answers.get("q1").map(String::as_str), Some("C"));
    }

    #[test]
    fn progress_may_move_backward() {
        // No monotonicity enforcement; preserved as observed even though a
        // client could regress its own progress.
        let mut store = Store::new();
        let exam = create_exam(&mut store, "Exam");
        store.start_session(&exam.id, "s1");

        store.update_progress(&exam.id, "s1", 80, None).unwrap();
        store.update_progress(&exam.id, "s1", 20, None).unwrap();
        assert_eq!(store.get_session(&exam.id, "s1").unwrap().progress, 20);
    }

    #[test]
    fn submitted_sessions_are_immutable() {
        let mut store = Store::new();
        let exam = create_exam(&mut store, "Exam");
        store.start_session(&exam.id, "s1");
        store
            .submit_exam("s1", HashMap::new(), 9.0, Some(&exam.id))
            .unwrap();

        let err = store
            .update_progress(&exam.id, "s1", 50, None)
            .unwrap_err();
        assert_eq!(err, LifecycleError::SessionNotFound);

        let session = store.get_session(&exam.id, "s1").unwrap();
        assert_eq!(session.progress, 100);
        assert_eq!(session.score, Some(9.0));
    }

    #[test]
    fn submit_without_exam_id_targets_first_active() {
        let mut store = Store::new();
        let scheduled = create_exam(&mut store, "Scheduled");
        let active = create_exam(&mut store, "Active");
        store
            .set_exam_status(&active.id, ExamStatus::Active)
            .unwrap();

        let session = store.submit_exam("s1", HashMap::new(), 5.0, None).unwrap();
        assert_eq!(session.exam_id, active.id);
        assert!(store.get_session(&scheduled.id, "s1").is_none());
    }

    #[test]
    fn submit_with_no_resolvable_exam_fails() {
        let mut store = Store::new();
        create_exam(&mut store, "Scheduled only");

        let err = store
            .submit_exam("s1", HashMap::new(), 5.0, None)
            .unwrap_err();
        assert_eq!(err, LifecycleError::NoActiveExam);
    }

    #[test]
    fn submit_without_session_creates_submitted_directly() {
        let mut store = Store::new();
        let exam = create_exam(&mut store, "Exam");

        let mut answers = HashMap::new();
        answers.insert("q1".to_string(), "B".to_string());
        let session = store
            .submit_exam("s1", answers, 8.0, Some(&exam.id))
            .unwrap();

        assert_eq!(session.status, SessionStatus::Submitted);
        assert_eq!(session.progress, 100);
        assert!(session.start_time.is_none());
        assert!(session.end_time.is_some());
    }

    #[test]
    fn submit_then_reset_restores_fresh_state() {
        let mut store = Store::new();
        let exam = create_exam(&mut store, "Exam");
        store.start_session(&exam.id, "s1");
        store
            .submit_exam("s1", HashMap::new(), 6.0, Some(&exam.id))
            .unwrap();

        store.reset_session(&exam.id, "s1").unwrap();
        assert!(store.get_session(&exam.id, "s1").is_none());

        // indistinguishable from never having started: a new start behaves
        // exactly like the first one did
        let session = store.start_session(&exam.id, "s1");
        assert_eq!(session.status, SessionStatus::InProgress);
        assert_eq!(session.progress, 0);
        assert_eq!(session.score, None);
        assert!(session.answers.is_empty());
    }

    #[test]
    fn reset_without_session_fails() {
        let mut store = Store::new();
        let exam = create_exam(&mut store, "Exam");
        assert_eq!(
            store.reset_session(&exam.id, "s1"),
            Err(LifecycleError::SessionNotFound)
        );
    }

    #[test]
    fn full_attempt_scenario() {
        let mut store = Store::new();
        let exam = create_exam(&mut store, "E1");

        let session = store.start_session(&exam.id, "s1");
        assert_eq!(session.status, SessionStatus::InProgress);
        assert_eq!(session.progress, 0);
        assert!(session.answers.is_empty());

        let mut answers = HashMap::new();
        answers.insert("q1".to_string(), "B".to_string());
        store
            .update_progress(&exam.id, "s1", 40, Some(answers))
            .unwrap();
        assert_eq!(store.get_session(&exam.id, "s1").unwrap().progress, 40);

        let mut finals = HashMap::new();
        finals.insert("q1".to_string(), "B".to_string());
        finals.insert("q2".to_string(), "A".to_string());
        let submitted = store
            .submit_exam("s1", finals, 8.0, Some(&exam.id))
            .unwrap();
        assert_eq!(submitted.status, SessionStatus::Submitted);
        assert_eq!(submitted.progress, 100);
        assert_eq!(submitted.score, Some(8.0));

        assert!(store.update_progress(&exam.id, "s1", 50, None).is_err());
    }
}
