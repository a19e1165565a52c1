//! Per-attempt question selection: resolve a target difficulty, filter the
//! bank, top up from adjacent tiers best-effort, then sample up to 5 at
//! random without replacement. The final sample makes every attempt's
//! question set non-deterministic.

use rand::seq::SliceRandom;

use super::Question;
use crate::constants::QUESTIONS_PER_ATTEMPT;
use crate::database::models::Difficulty;

/// Maps the difficulty label spellings that appear in shipped question
/// banks (including the Uzbek ones) onto a tier.
pub fn normalize_difficulty(label: &str) -> Option<Difficulty> {
    match label.trim().to_lowercase().as_str() {
        "easy" | "oson" | "oddiy" => Some(Difficulty::Easy),
        "medium" | "o'rta" | "ortacha" | "middle" => Some(Difficulty::Medium),
        "hard" | "qiyin" | "murakkab" | "difficult" => Some(Difficulty::Hard),
        _ => None,
    }
}

/// The level bracket used when neither a task nor a request parameter pins
/// the difficulty.
pub fn bracket_for_level(level: i64) -> Difficulty {
    if level <= 3 {
        Difficulty::Easy
    } else if level <= 6 {
        Difficulty::Medium
    } else {
        Difficulty::Hard
    }
}

/// Resolution priority: explicit task difficulty, then the request
/// parameter, then the user's level bracket.
pub fn resolve_difficulty(
    task_difficulty: Option<Difficulty>,
    requested: Option<&str>,
    user_level: i64,
) -> Difficulty {
    if let Some(d) = task_difficulty {
        return d;
    }
    if let Some(d) = requested.and_then(normalize_difficulty) {
        return d;
    }
    bracket_for_level(user_level)
}

/// Filters `bank` to the target tier and tops up best-effort when fewer
/// than 5 match: easy borrows from medium, medium keeps up to 4 of its own
/// plus 1 easy and 1 hard, hard borrows from medium. An empty filtered set
/// falls back to the whole bank. Returns `min(5, available)` questions
/// chosen uniformly at random without replacement.
pub fn select_questions(bank: &[Question], target: Difficulty) -> Vec<Question> {
    let tier = |d: Difficulty| -> Vec<Question> {
        bank.iter()
            .filter(|q| normalize_difficulty(&q.difficulty) == Some(d))
            .cloned()
            .collect()
    };

    let mut picked = tier(target);
    if picked.len() < QUESTIONS_PER_ATTEMPT {
        match target {
            Difficulty::Easy => {
                let needed = QUESTIONS_PER_ATTEMPT - picked.len();
                picked.extend(tier(Difficulty::Medium).into_iter().take(needed));
            }
            Difficulty::Medium => {
                picked.truncate(4);
                picked.extend(tier(Difficulty::Easy).into_iter().take(1));
                picked.extend(tier(Difficulty::Hard).into_iter().take(1));
            }
            Difficulty::Hard => {
                let needed = QUESTIONS_PER_ATTEMPT - picked.len();
                picked.extend(tier(Difficulty::Medium).into_iter().take(needed));
            }
        }
    }
    if picked.is_empty() {
        picked = bank.to_vec();
    }

    let mut rng = rand::thread_rng();
    let count = picked.len().min(QUESTIONS_PER_ATTEMPT);
    picked
        .choose_multiple(&mut rng, count)
        .cloned()
        .collect()
}
