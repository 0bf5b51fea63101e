use bevy::prelude::*;

use crate::data::schema::ItemKind;
use crate::loot::CrateTier;

/// 对道具栏的操作；同一帧内按发送顺序逐条执行
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryCommand {
    /// 直接给道具（调试 / 奖励）
    Give(ItemKind),
    /// 花奖券买一个箱子
    Purchase { price: i32, tier: CrateTier },
    /// 使用队首道具
    Use,
    Unequip,
    /// 清空道具栏（同时卸下）
    Clear,
}

/// 每次逻辑上的改动发一次：存档 + 刷新显示
#[derive(Event, Debug, Clone)]
pub struct InventoryChanged;

#[derive(Event, Debug, Clone)]
pub struct ListInventoryEvent;   // 刷新道具栏显示

/// 道具钩子被触发的时机
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    Equip,
    Unequip,
    Collision,
}

/// 道具的 on-equip / on-unequip / on-collision 钩子
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerupHook {
    pub item:  ItemKind,
    pub phase: HookPhase,
}
