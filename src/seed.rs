// src/seed.rs
//
// Mock-data generators for local development. Only invoked when
// SEED_DEMO_DATA is set; tests build their own fixtures.

use crate::models::exam::{CreateExamRequest, QuestionPayload, QuestionType};
use crate::models::result::UpsertResultRequest;
use crate::models::school::CreateSchoolRequest;
use crate::models::student::CreateStudentRequest;
use crate::models::subject::CreateSubjectRequest;
use crate::models::user::CreateUserRequest;
use crate::store::Store;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Chidi", "Emeka", "Funmi", "Kemi", "Ngozi", "Tunde", "Zainab",
];
const CLASS_NAMES: &[&str] = &["JSS1", "JSS2", "SS1"];
const SUBJECTS: &[&str] = &["Mathematics", "English", "Basic Science"];

/// Populates an empty store with one demo school, a teacher, a handful of
/// students per class, subjects, starter results, and a scheduled exam.
pub fn seed_demo_data(store: &mut Store) {
    let school = store.create_school(CreateSchoolRequest {
        name: "Demo Secondary School".to_string(),
        code: "DEMO01".to_string(),
        address: Some("1 Demo Road".to_string()),
    });
    tracing::info!("Seeded demo school: {}", school.name);

    let teacher = store.create_user(CreateUserRequest {
        school_id: school.id.clone(),
        name: "Mr. Demo Teacher".to_string(),
        email: "teacher@demo.school".to_string(),
        role: "teacher".to_string(),
    });

    for subject in SUBJECTS {
        store.create_subject(CreateSubjectRequest {
            school_id: school.id.clone(),
            name: subject.to_string(),
            class_name: Some(CLASS_NAMES[0].to_string()),
            teacher_id: Some(teacher.id.clone()),
        });
    }

    for (i, name) in FIRST_NAMES.iter().enumerate() {
        let student = store.create_student(CreateStudentRequest {
            school_id: school.id.clone(),
            name: format!("{} Demo", name),
            class_name: CLASS_NAMES[i % CLASS_NAMES.len()].to_string(),
            access_code: format!("{:04}", 1000 + i),
            attendance: 30,
        });
        store.upsert_result(UpsertResultRequest {
            student_id: student.id.clone(),
            subject_name: SUBJECTS[i % SUBJECTS.len()].to_string(),
            term: "First Term".to_string(),
            score: 50.0 + (i as f64) * 5.0,
            max_score: Some(100.0),
            remark: None,
        });
    }

    store.create_or_update_exam(CreateExamRequest {
        exam_id: None,
        title: "Mathematics Mock Exam".to_string(),
        questions: demo_questions(),
        teacher_id: Some(teacher.id),
    });

    tracing::info!("Demo data seeded.");
}

fn demo_questions() -> Vec<QuestionPayload> {
    vec![
        QuestionPayload {
            question_type: QuestionType::MultipleChoice,
            text: "What is 12 x 8?".to_string(),
            options: Some(vec![
                "84".to_string(),
                "96".to_string(),
                "108".to_string(),
                "88".to_string(),
            ]),
            correct_answer: Some("96".to_string()),
            points: 2,
            is_auto_grade: true,
            rubric: None,
        },
        QuestionPayload {
            question_type: QuestionType::TrueFalse,
            text: "A square has four equal sides.".to_string(),
            options: None,
            correct_answer: Some("true".to_string()),
            points: 1,
            is_auto_grade: true,
            rubric: None,
        },
        QuestionPayload {
            question_type: QuestionType::Essay,
            text: "Explain how you would measure the area of your classroom.".to_string(),
            options: None,
            correct_answer: None,
            points: 10,
            is_auto_grade: false,
            rubric: Some(
                "Award points for a sensible method, correct units, and a worked estimate."
                    .to_string(),
            ),
        },
    ]
}
