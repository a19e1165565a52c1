use std::fs;
use std::path::Path;

use ecoverse_backend::quizbank::{BankSource, QuestionBank};
use tempfile::tempdir;

#[test]
fn missing_file_falls_back_to_builtin() {
    let bank = QuestionBank::load(Path::new("/nonexistent/ml_questions.json"));
    assert_eq!(bank.source, BankSource::BuiltIn);
    assert!(!bank.is_empty());
}

#[test]
fn well_formed_file_is_loaded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ml_questions.json");
    fs::write(
        &path,
        r#"{
            "eco_questions": [
                {
                    "id": 1,
                    "question": "Qaysi chiqindi qayta ishlanadi?",
                    "options": ["Plastik", "Ovqat", "Tuproq", "Suv"],
                    "correct_answer": 0,
                    "category": "recycling",
                    "difficulty": "oson"
                }
            ]
        }"#,
    )
    .unwrap();

    let bank = QuestionBank::load(&path);
    assert_eq!(bank.source, BankSource::File);
    assert_eq!(bank.len(), 1);
    assert_eq!(bank.questions()[0].difficulty, "oson");
    assert!(bank.questions()[0].explanation.is_none());
}

#[test]
fn corrupt_file_falls_back_to_builtin() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ml_questions.json");
    fs::write(&path, "{ not json").unwrap();

    let bank = QuestionBank::load(&path);
    assert_eq!(bank.source, BankSource::BuiltIn);
}

#[test]
fn empty_question_list_falls_back_to_builtin() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ml_questions.json");
    fs::write(&path, r#"{"eco_questions": []}"#).unwrap();

    let bank = QuestionBank::load(&path);
    assert_eq!(bank.source, BankSource::BuiltIn);
    assert_eq!(bank.len(), 5);
}
