//! The static question bank: a JSON file supplied alongside the binary,
//! with a small built-in demo set as the fallback when the file is missing
//! or corrupt. That fallback is a data-availability contract, not a detail:
//! quizzes must keep working without the file.

pub mod select;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub category: String,
    pub difficulty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BankFile {
    eco_questions: Vec<Question>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BankSource {
    File,
    BuiltIn,
}

#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    pub source: BankSource,
}

impl QuestionBank {
    /// Loads the bank from `path`, falling back to the built-in demo set on
    /// any failure. The failure is logged, never propagated.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(bank) => {
                info!(count = bank.len(), path = %path.display(), "question bank loaded");
                bank
            }
            Err(err) => {
                warn!(%err, path = %path.display(), "falling back to built-in questions");
                Self::builtin()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| AppError::DataUnavailable(format!("read {}: {e}", path.display())))?;
        let file: BankFile = serde_json::from_str(&raw)
            .map_err(|e| AppError::DataUnavailable(format!("parse {}: {e}", path.display())))?;
        if file.eco_questions.is_empty() {
            return Err(AppError::DataUnavailable("question list is empty".to_string()));
        }
        Ok(Self {
            questions: file.eco_questions,
            source: BankSource::File,
        })
    }

    pub fn builtin() -> Self {
        let questions = vec![
            Question {
                id: 1,
                question: "Which problem does recycling plastic containers help solve?".to_string(),
                options: vec![
                    "Air pollution".to_string(),
                    "Water pollution".to_string(),
                    "Soil pollution".to_string(),
                    "Noise pollution".to_string(),
                ],
                correct_answer: 1,
                category: "recycling".to_string(),
                difficulty: "easy".to_string(),
                explanation: Some(
                    "Plastic waste pollutes water sources; recycling reduces it.".to_string(),
                ),
            },
            Question {
                id: 2,
                question: "What is an advantage of solar energy?".to_string(),
                options: vec![
                    "It pollutes the air".to_string(),
                    "It is non-renewable".to_string(),
                    "It is clean and free".to_string(),
                    "It only works at night".to_string(),
                ],
                correct_answer: 2,
                category: "energy".to_string(),
                difficulty: "easy".to_string(),
                explanation: Some("Solar energy is clean, free and renewable.".to_string()),
            },
            Question {
                id: 3,
                question: "Why do trees matter for the environment?".to_string(),
                options: vec![
                    "They pollute the air".to_string(),
                    "They absorb carbon dioxide".to_string(),
                    "They pollute water".to_string(),
                    "They dry out the soil".to_string(),
                ],
                correct_answer: 1,
                category: "planting".to_string(),
                difficulty: "medium".to_string(),
                explanation: Some(
                    "Trees absorb carbon dioxide and release oxygen.".to_string(),
                ),
            },
            Question {
                id: 4,
                question: "Which waste can be composted?".to_string(),
                options: vec![
                    "Plastic containers".to_string(),
                    "Food scraps".to_string(),
                    "Metal cans".to_string(),
                    "Glass jars".to_string(),
                ],
                correct_answer: 1,
                category: "composting".to_string(),
                difficulty: "medium".to_string(),
                explanation: Some("Food scraps break down into organic fertilizer.".to_string()),
            },
            Question {
                id: 5,
                question: "What is the most effective way to save electricity?".to_string(),
                options: vec![
                    "Leave the lights on".to_string(),
                    "Use energy-efficient appliances".to_string(),
                    "Run the air conditioner all day".to_string(),
                    "Keep devices on standby".to_string(),
                ],
                correct_answer: 1,
                category: "energy".to_string(),
                difficulty: "hard".to_string(),
                explanation: Some(
                    "Efficient appliances use electricity where it counts.".to_string(),
                ),
            },
        ];
        Self {
            questions,
            source: BankSource::BuiltIn,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
