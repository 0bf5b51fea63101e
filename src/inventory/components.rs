use bevy::prelude::*;
use rand::Rng;
use thiserror::Error;

use super::prefs::PrefsStore;
use crate::data::schema::{DecodeError, ItemKind};
use crate::loot::{CrateTier, LootTable};
use crate::player::components::Wallet;

/// 道具队列固定 3 格
pub const SLOT_COUNT: usize = 3;

/// 第 i 格在存档里的 key
pub fn slot_key(index: usize) -> String {
    format!("Item{index}")
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("道具栏已满")]
    Full,
    #[error("奖券不足：需要 {price}，只有 {balance}")]
    InsufficientTickets { price: i32, balance: i32 },
    #[error("价格无效：{0}")]
    InvalidPrice(i32),
}

/// 读档时某一格解码失败
#[derive(Debug, PartialEq, Eq)]
pub struct SlotDecodeFailure {
    pub slot:  usize,
    pub error: DecodeError,
}

/// 玩家的道具队列（挂在 Resource）
///
/// 0 号格是下一个被 use 的道具；`equipped` 是当前生效的道具，同一时刻最多一个。
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub struct Inventory {
    pub slots:    [ItemKind; SLOT_COUNT],
    pub equipped: ItemKind,
}

impl Inventory {
    pub fn next_item(&self) -> ItemKind {
        self.slots[0]
    }

    pub fn first_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.is_none())
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_none()).count()
    }

    /// 放进第一个空格，返回格子下标
    pub fn give(&mut self, item: ItemKind) -> Result<usize, InventoryError> {
        let index = self.first_empty_slot().ok_or(InventoryError::Full)?;
        self.slots[index] = item;
        Ok(index)
    }

    /// 买一个箱子并把开出的道具放进空格
    ///
    /// 任何一步失败都不改动道具栏和钱包。
    pub fn purchase<R: Rng>(
        &mut self,
        price: i32,
        tier: CrateTier,
        wallet: &mut Wallet,
        free_shops: bool,
        table: &LootTable,
        rng: &mut R,
    ) -> Result<ItemKind, InventoryError> {
        if price < 0 {
            return Err(InventoryError::InvalidPrice(price));
        }
        let remaining = if free_shops {
            wallet.tickets
        } else {
            wallet
                .tickets
                .checked_sub(price)
                .filter(|left| *left >= 0)
                .ok_or(InventoryError::InsufficientTickets {
                    price,
                    balance: wallet.tickets,
                })?
        };
        let index = self.first_empty_slot().ok_or(InventoryError::Full)?;

        wallet.tickets = remaining;
        let item = table.draw(tier, rng);
        self.slots[index] = item;
        Ok(item)
    }

    /// 卸下当前道具，返回被卸下的（用于触发 on-unequip）
    pub fn unequip(&mut self) -> Option<ItemKind> {
        let old = std::mem::take(&mut self.equipped);
        (!old.is_none()).then_some(old)
    }

    /// 出队并装备 0 号格
    ///
    /// 场上没有球、队列为空、或已有道具生效时什么也不做。
    pub fn use_next(&mut self, balls_in_field: usize) -> Option<ItemKind> {
        if balls_in_field == 0 || self.next_item().is_none() || !self.equipped.is_none() {
            return None;
        }
        self.equipped = self.slots[0];
        self.slots.rotate_left(1);
        self.slots[SLOT_COUNT - 1] = ItemKind::NoItem;
        Some(self.equipped)
    }

    /// 卸下并清空所有格子
    pub fn clear(&mut self) -> Option<ItemKind> {
        let unequipped = self.unequip();
        self.slots = [ItemKind::NoItem; SLOT_COUNT];
        unequipped
    }

    pub fn save_to(&self, store: &mut dyn PrefsStore) {
        for (i, item) in self.slots.iter().enumerate() {
            store.set_int(&slot_key(i), item.code());
        }
    }

    /// 从存档读出 3 格；坏掉的格子变成 NoItem，其余照常读取
    pub fn load_from(&mut self, store: &dyn PrefsStore) -> Vec<SlotDecodeFailure> {
        let mut failures = Vec::new();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let code = store.get_int(&slot_key(i), ItemKind::NoItem.code());
            *slot = ItemKind::try_from(code).unwrap_or_else(|error| {
                failures.push(SlotDecodeFailure { slot: i, error });
                ItemKind::NoItem
            });
        }
        failures
    }
}
