mod common;

use common::{test_pool, user_with};
use ecoverse_backend::database::init::DbPool;
use ecoverse_backend::database::{shop, users};
use ecoverse_backend::AppError;

async fn item_with(pool: &DbPool, name: &str, price: i64, category: &str, boost: i64) -> i64 {
    let result =
        sqlx::query("INSERT INTO items (name, price, category, energy_boost) VALUES (?, ?, ?, ?)")
            .bind(name)
            .bind(price)
            .bind(category)
            .bind(boost)
            .execute(pool)
            .await
            .expect("insert item");
    result.last_insert_rowid()
}

async fn pack_with(pool: &DbPool, name: &str, energy: i64, price: i64) -> i64 {
    let result =
        sqlx::query("INSERT INTO energy_packs (name, energy_amount, price) VALUES (?, ?, ?)")
            .bind(name)
            .bind(energy)
            .bind(price)
            .execute(pool)
            .await
            .expect("insert pack");
    result.last_insert_rowid()
}

#[tokio::test]
async fn short_balance_rejects_the_purchase() {
    let pool = test_pool().await;
    let user_id = user_with(&pool, "broke", 20, 50).await;
    let item_id = item_with(&pool, "Green Cap", 50, "hat", 0).await;

    let err = shop::buy_item(&pool, user_id, item_id)
        .await
        .expect_err("must fail");
    assert!(matches!(err, AppError::InsufficientResource(_)));

    let user = users::get_user(&pool, user_id).await.unwrap();
    assert_eq!(user.coins, 20);
    assert!(shop::inventory(&pool, user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn purchase_debits_and_lands_in_inventory() {
    let pool = test_pool().await;
    let user_id = user_with(&pool, "shopper", 120, 50).await;
    let item_id = item_with(&pool, "Eco T-shirt", 45, "clothes", 0).await;

    let receipt = shop::buy_item(&pool, user_id, item_id).await.unwrap();
    assert_eq!(receipt.coins, 75);
    assert_eq!(receipt.energy, 50);

    let inv = shop::inventory(&pool, user_id).await.unwrap();
    assert_eq!(inv.len(), 1);
    assert_eq!(inv[0].item_id, item_id);
    assert!(!inv[0].equipped);
}

#[tokio::test]
async fn energy_boosts_are_bounded() {
    let pool = test_pool().await;
    let user_id = user_with(&pool, "charged", 200, 90).await;
    let pack_id = pack_with(&pool, "Mega Pack", 60, 40).await;

    let receipt = shop::buy_energy_pack(&pool, user_id, pack_id).await.unwrap();
    assert_eq!(receipt.coins, 160);
    assert_eq!(receipt.energy, 100);
}

#[tokio::test]
async fn unknown_buyer_is_not_found() {
    let pool = test_pool().await;
    let item_id = item_with(&pool, "Ghost Hat", 10, "hat", 0).await;
    let err = shop::buy_item(&pool, 999, item_id)
        .await
        .expect_err("must fail");
    assert!(matches!(err, AppError::NotFound("user")));
}

#[tokio::test]
async fn one_equipped_item_per_category() {
    let pool = test_pool().await;
    let user_id = user_with(&pool, "stylist", 500, 50).await;
    let hat_a = item_with(&pool, "Leaf Hat", 30, "hat", 0).await;
    let hat_b = item_with(&pool, "Sun Hat", 30, "hat", 0).await;
    let shoes = item_with(&pool, "Trail Shoes", 40, "shoes", 0).await;
    for id in [hat_a, hat_b, shoes] {
        shop::buy_item(&pool, user_id, id).await.unwrap();
    }
    let inv = shop::inventory(&pool, user_id).await.unwrap();
    let entry_of = |item_id: i64| inv.iter().find(|e| e.item_id == item_id).unwrap().id;

    shop::equip(&pool, user_id, entry_of(hat_a)).await.unwrap();
    shop::equip(&pool, user_id, entry_of(shoes)).await.unwrap();
    // Equipping the second hat displaces the first; the shoes stay on.
    shop::equip(&pool, user_id, entry_of(hat_b)).await.unwrap();

    let inv = shop::inventory(&pool, user_id).await.unwrap();
    let equipped: Vec<i64> = inv.iter().filter(|e| e.equipped).map(|e| e.item_id).collect();
    assert_eq!(equipped.len(), 2);
    assert!(equipped.contains(&hat_b));
    assert!(equipped.contains(&shoes));
    assert!(!equipped.contains(&hat_a));
}

#[tokio::test]
async fn unequip_requires_the_item_to_be_worn() {
    let pool = test_pool().await;
    let user_id = user_with(&pool, "fiddler", 100, 50).await;
    let item_id = item_with(&pool, "Badge", 10, "accessory", 0).await;
    shop::buy_item(&pool, user_id, item_id).await.unwrap();
    let entry = shop::inventory(&pool, user_id).await.unwrap()[0].id;

    let err = shop::unequip(&pool, user_id, entry)
        .await
        .expect_err("must fail");
    assert!(matches!(err, AppError::PrerequisiteNotMet(_)));

    shop::equip(&pool, user_id, entry).await.unwrap();
    let view = shop::unequip(&pool, user_id, entry).await.unwrap();
    assert!(!view.equipped);
}

#[tokio::test]
async fn equipping_someone_elses_entry_is_not_found() {
    let pool = test_pool().await;
    let owner = user_with(&pool, "owner", 100, 50).await;
    let thief = user_with(&pool, "thief", 100, 50).await;
    let item_id = item_with(&pool, "Rare Cape", 20, "clothes", 0).await;
    shop::buy_item(&pool, owner, item_id).await.unwrap();
    let entry = shop::inventory(&pool, owner).await.unwrap()[0].id;

    let err = shop::equip(&pool, thief, entry).await.expect_err("must fail");
    assert!(matches!(err, AppError::NotFound(_)));
}
