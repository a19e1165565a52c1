use ecoverse_backend::database::models::Difficulty;
use ecoverse_backend::quizbank::select::{
    bracket_for_level, normalize_difficulty, resolve_difficulty, select_questions,
};
use ecoverse_backend::quizbank::Question;

fn question(id: i64, difficulty: &str) -> Question {
    Question {
        id,
        question: format!("question {id}"),
        options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        correct_answer: 0,
        category: "eco".to_string(),
        difficulty: difficulty.to_string(),
        explanation: None,
    }
}

fn bank(easy: usize, medium: usize, hard: usize) -> Vec<Question> {
    let mut out = Vec::new();
    let mut id = 0;
    for _ in 0..easy {
        id += 1;
        out.push(question(id, "easy"));
    }
    for _ in 0..medium {
        id += 1;
        out.push(question(id, "medium"));
    }
    for _ in 0..hard {
        id += 1;
        out.push(question(id, "hard"));
    }
    out
}

#[test]
fn normalizes_synonym_spellings() {
    assert_eq!(normalize_difficulty("easy"), Some(Difficulty::Easy));
    assert_eq!(normalize_difficulty("Oson"), Some(Difficulty::Easy));
    assert_eq!(normalize_difficulty("o'rta"), Some(Difficulty::Medium));
    assert_eq!(normalize_difficulty("middle"), Some(Difficulty::Medium));
    assert_eq!(normalize_difficulty("qiyin"), Some(Difficulty::Hard));
    assert_eq!(normalize_difficulty("difficult"), Some(Difficulty::Hard));
    assert_eq!(normalize_difficulty("nightmare"), None);
}

#[test]
fn level_brackets() {
    assert_eq!(bracket_for_level(1), Difficulty::Easy);
    assert_eq!(bracket_for_level(3), Difficulty::Easy);
    assert_eq!(bracket_for_level(4), Difficulty::Medium);
    assert_eq!(bracket_for_level(6), Difficulty::Medium);
    assert_eq!(bracket_for_level(7), Difficulty::Hard);
}

#[test]
fn task_difficulty_wins_over_request_and_level() {
    let resolved = resolve_difficulty(Some(Difficulty::Hard), Some("easy"), 1);
    assert_eq!(resolved, Difficulty::Hard);
}

#[test]
fn request_parameter_wins_over_level() {
    let resolved = resolve_difficulty(None, Some("hard"), 1);
    assert_eq!(resolved, Difficulty::Hard);
}

#[test]
fn level_bracket_is_the_fallback() {
    assert_eq!(resolve_difficulty(None, None, 8), Difficulty::Hard);
    assert_eq!(resolve_difficulty(None, Some("gibberish"), 2), Difficulty::Easy);
}

#[test]
fn never_returns_more_than_five() {
    let bank = bank(20, 20, 20);
    for target in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        assert!(select_questions(&bank, target).len() <= 5);
    }
}

#[test]
fn full_tier_stays_pure() {
    // With >= 5 questions in the target tier, every pick belongs to it.
    let bank = bank(8, 8, 8);
    for _ in 0..20 {
        let picked = select_questions(&bank, Difficulty::Medium);
        assert_eq!(picked.len(), 5);
        assert!(picked
            .iter()
            .all(|q| normalize_difficulty(&q.difficulty) == Some(Difficulty::Medium)));
    }
}

#[test]
fn easy_borrows_from_medium_when_short() {
    let bank = bank(2, 8, 8);
    let picked = select_questions(&bank, Difficulty::Easy);
    assert_eq!(picked.len(), 5);
    assert!(picked
        .iter()
        .all(|q| matches!(
            normalize_difficulty(&q.difficulty),
            Some(Difficulty::Easy) | Some(Difficulty::Medium)
        )));
}

#[test]
fn hard_borrows_from_medium_when_short() {
    let bank = bank(8, 8, 1);
    let picked = select_questions(&bank, Difficulty::Hard);
    assert_eq!(picked.len(), 5);
    assert!(picked
        .iter()
        .all(|q| matches!(
            normalize_difficulty(&q.difficulty),
            Some(Difficulty::Hard) | Some(Difficulty::Medium)
        )));
}

#[test]
fn medium_blend_is_best_effort() {
    // 3 medium + 1 easy + 1 hard available: blend keeps the mediums and
    // borrows one from each neighbour.
    let bank = bank(1, 3, 1);
    let picked = select_questions(&bank, Difficulty::Medium);
    assert_eq!(picked.len(), 5);
}

#[test]
fn empty_tier_falls_back_to_whole_pool() {
    // No hard or medium questions at all: hard requests still get questions.
    let bank = bank(4, 0, 0);
    let picked = select_questions(&bank, Difficulty::Hard);
    assert_eq!(picked.len(), 4);
}

#[test]
fn small_pool_returns_everything() {
    let bank = bank(2, 0, 0);
    let picked = select_questions(&bank, Difficulty::Easy);
    assert_eq!(picked.len(), 2);
}
