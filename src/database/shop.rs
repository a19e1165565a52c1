//! Shop items, energy packs, purchases and the equip/unequip rules.
//! Every purchase runs in a single transaction: the coin debit is a guarded
//! UPDATE, so a failed precondition leaves no partial writes behind.

use chrono::Utc;
use serde::Serialize;
use sqlx::{Sqlite, Transaction};

use super::init::DbPool;
use super::models::{EnergyPack, InventoryItemView, Item};
use crate::constants::MAX_ENERGY;
use crate::error::{AppError, AppResult};

pub async fn list_items(pool: &DbPool) -> AppResult<Vec<Item>> {
    let items = sqlx::query_as::<_, Item>(
        "SELECT * FROM items WHERE is_active = 1 ORDER BY category, price",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn list_energy_packs(pool: &DbPool) -> AppResult<Vec<EnergyPack>> {
    let packs =
        sqlx::query_as::<_, EnergyPack>("SELECT * FROM energy_packs WHERE is_active = 1 ORDER BY price")
            .fetch_all(pool)
            .await?;
    Ok(packs)
}

#[derive(Debug, Serialize)]
pub struct PurchaseReceipt {
    pub coins: i64,
    pub energy: i64,
    pub message: String,
}

/// Debits coins inside an open transaction. Rows-affected 0 means the
/// balance was short, mirroring the guarded-update idiom used everywhere
/// balances change.
async fn spend_coins(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
    price: i64,
) -> AppResult<()> {
    let result = sqlx::query("UPDATE users SET coins = coins - ? WHERE id = ? AND coins >= ?")
        .bind(price)
        .bind(user_id)
        .bind(price)
        .execute(&mut **tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::InsufficientResource(format!(
            "not enough coins: this costs {price}"
        )));
    }
    Ok(())
}

async fn balances(tx: &mut Transaction<'_, Sqlite>, user_id: i64) -> AppResult<(i64, i64)> {
    let row = sqlx::query_as::<_, (i64, i64)>("SELECT coins, energy FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(AppError::NotFound("user"))?;
    Ok(row)
}

pub async fn buy_item(pool: &DbPool, user_id: i64, item_id: i64) -> AppResult<PurchaseReceipt> {
    let mut tx = pool.begin().await?;
    let item = sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = ? AND is_active = 1")
        .bind(item_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NotFound("item"))?;

    // Existence check first so an unknown user is a 404, not "no coins".
    balances(&mut tx, user_id).await?;
    spend_coins(&mut tx, user_id, item.price).await?;
    if item.energy_boost > 0 {
        sqlx::query("UPDATE users SET energy = MIN(?, energy + ?) WHERE id = ?")
            .bind(MAX_ENERGY)
            .bind(item.energy_boost)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
    }
    sqlx::query("INSERT INTO inventories (user_id, item_id, purchased_at) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(item_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

    let (coins, energy) = balances(&mut tx, user_id).await?;
    tx.commit().await?;

    let mut message = format!("Bought {}!", item.name);
    if item.energy_boost > 0 {
        message.push_str(&format!(" +{} energy", item.energy_boost));
    }
    Ok(PurchaseReceipt {
        coins,
        energy,
        message,
    })
}

pub async fn buy_energy_pack(
    pool: &DbPool,
    user_id: i64,
    pack_id: i64,
) -> AppResult<PurchaseReceipt> {
    let mut tx = pool.begin().await?;
    let pack =
        sqlx::query_as::<_, EnergyPack>("SELECT * FROM energy_packs WHERE id = ? AND is_active = 1")
            .bind(pack_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::NotFound("energy pack"))?;

    balances(&mut tx, user_id).await?;
    spend_coins(&mut tx, user_id, pack.price).await?;
    sqlx::query("UPDATE users SET energy = MIN(?, energy + ?) WHERE id = ?")
        .bind(MAX_ENERGY)
        .bind(pack.energy_amount)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    let (coins, energy) = balances(&mut tx, user_id).await?;
    tx.commit().await?;

    Ok(PurchaseReceipt {
        coins,
        energy,
        message: format!("Energy refilled! +{}", pack.energy_amount),
    })
}

pub async fn inventory(pool: &DbPool, user_id: i64) -> AppResult<Vec<InventoryItemView>> {
    let rows = sqlx::query_as::<_, InventoryItemView>(
        "SELECT inv.id, inv.item_id, i.name, i.category, i.energy_boost, inv.equipped \
         FROM inventories inv JOIN items i ON inv.item_id = i.id \
         WHERE inv.user_id = ? ORDER BY i.category, i.name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

async fn get_owned_entry(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
    inventory_id: i64,
) -> AppResult<InventoryItemView> {
    sqlx::query_as::<_, InventoryItemView>(
        "SELECT inv.id, inv.item_id, i.name, i.category, i.energy_boost, inv.equipped \
         FROM inventories inv JOIN items i ON inv.item_id = i.id \
         WHERE inv.id = ? AND inv.user_id = ?",
    )
    .bind(inventory_id)
    .bind(user_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or(AppError::NotFound("inventory item"))
}

/// Equips an owned item, unequipping every other owned item of the same
/// category first. At most one equipped item per category.
pub async fn equip(pool: &DbPool, user_id: i64, inventory_id: i64) -> AppResult<InventoryItemView> {
    let mut tx = pool.begin().await?;
    let entry = get_owned_entry(&mut tx, user_id, inventory_id).await?;

    sqlx::query(
        "UPDATE inventories SET equipped = 0 WHERE user_id = ? AND equipped = 1 \
         AND item_id IN (SELECT id FROM items WHERE category = ?)",
    )
    .bind(user_id)
    .bind(&entry.category)
    .execute(&mut *tx)
    .await?;
    sqlx::query("UPDATE inventories SET equipped = 1 WHERE id = ?")
        .bind(inventory_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(InventoryItemView {
        equipped: true,
        ..entry
    })
}

pub async fn unequip(
    pool: &DbPool,
    user_id: i64,
    inventory_id: i64,
) -> AppResult<InventoryItemView> {
    let mut tx = pool.begin().await?;
    let entry = get_owned_entry(&mut tx, user_id, inventory_id).await?;
    if !entry.equipped {
        return Err(AppError::PrerequisiteNotMet(
            "this item is not equipped".to_string(),
        ));
    }
    sqlx::query("UPDATE inventories SET equipped = 0 WHERE id = ?")
        .bind(inventory_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(InventoryItemView {
        equipped: false,
        ..entry
    })
}
