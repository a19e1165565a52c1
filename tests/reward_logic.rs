use ecoverse_backend::database::models::Difficulty;
use ecoverse_backend::rewards::leveling::apply_experience;
use ecoverse_backend::rewards::{quiz_reward, task_experience, task_quiz_bonus};

#[test]
fn no_level_up_below_threshold() {
    let outcome = apply_experience(1, 0, 50);
    assert_eq!(outcome.new_level, 1);
    assert_eq!(outcome.new_experience, 50);
    assert!(!outcome.leveled_up);
    assert_eq!(outcome.bonus_coins, 0);
}

#[test]
fn level_up_at_exact_threshold() {
    // level 1 needs 100 experience; the new level pays new_level * 50 coins
    let outcome = apply_experience(1, 95, 5);
    assert_eq!(outcome.new_level, 2);
    assert_eq!(outcome.new_experience, 0);
    assert!(outcome.leveled_up);
    assert_eq!(outcome.bonus_coins, 100);
}

#[test]
fn level_up_applies_at_most_once_per_call() {
    // A huge gain still only moves one level and resets experience.
    let outcome = apply_experience(1, 0, 1000);
    assert_eq!(outcome.new_level, 2);
    assert_eq!(outcome.new_experience, 0);
    assert!(outcome.leveled_up);
}

#[test]
fn higher_levels_need_more_experience() {
    let outcome = apply_experience(5, 499, 0);
    assert!(!outcome.leveled_up);
    let outcome = apply_experience(5, 499, 1);
    assert!(outcome.leveled_up);
    assert_eq!(outcome.new_level, 6);
    assert_eq!(outcome.bonus_coins, 300);
}

#[test]
fn task_experience_is_tiered() {
    assert_eq!(task_experience(Difficulty::Easy), 5);
    assert_eq!(task_experience(Difficulty::Medium), 10);
    assert_eq!(task_experience(Difficulty::Hard), 20);
}

#[test]
fn quiz_reward_tiers() {
    let easy = quiz_reward(Difficulty::Easy, 4);
    assert_eq!(easy.coins, 20 + 4 * 2);
    assert_eq!(easy.energy_cost, 15);
    assert_eq!(easy.experience, 4 * 5);

    let medium = quiz_reward(Difficulty::Medium, 3);
    assert_eq!(medium.coins, 20 + 3 * 3);
    assert_eq!(medium.energy_cost, 20);
    assert_eq!(medium.experience, 3 * 8);

    let hard = quiz_reward(Difficulty::Hard, 5);
    assert_eq!(hard.coins, 20 + 5 * 5);
    assert_eq!(hard.energy_cost, 25);
    assert_eq!(hard.experience, 5 * 12);
}

#[test]
fn quiz_reward_with_zero_correct_still_pays_base() {
    let reward = quiz_reward(Difficulty::Easy, 0);
    assert_eq!(reward.coins, 20);
    assert_eq!(reward.experience, 0);
}

#[test]
fn linked_task_bonus_is_tiered() {
    assert_eq!(task_quiz_bonus(Difficulty::Easy), 10);
    assert_eq!(task_quiz_bonus(Difficulty::Medium), 15);
    assert_eq!(task_quiz_bonus(Difficulty::Hard), 20);
}
