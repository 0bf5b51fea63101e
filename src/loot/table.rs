//! 箱子掉落表：按整数权重抽一件物品

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use bevy::prelude::*;
use rand::Rng;
use serde_derive::Deserialize;

use crate::data::schema::ItemKind;

/// 商店里能买的箱子档次
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum CrateTier {
    Rusty,
    Brass,
    /// 旧档次，目前和 Brass 共用一张表
    Golden,
}

impl CrateTier {
    /// 实际查哪张表
    pub fn table_tier(self) -> CrateTier {
        match self {
            CrateTier::Golden => CrateTier::Brass,
            other => other,
        }
    }
}

impl FromStr for CrateTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rusty" | "basic" => Ok(CrateTier::Rusty),
            "brass" | "pro" => Ok(CrateTier::Brass),
            "golden" | "gold" => Ok(CrateTier::Golden),
            other => Err(format!("未知的箱子: {other}")),
        }
    }
}

impl fmt::Display for CrateTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CrateTier::Rusty => "Rusty",
            CrateTier::Brass => "Brass",
            CrateTier::Golden => "Golden",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedDrop {
    pub item:   ItemKind,
    pub weight: u32,
}

const fn weighted(item: ItemKind, weight: u32) -> WeightedDrop {
    WeightedDrop { item, weight }
}

const RUSTY_DROPS: [WeightedDrop; 3] = [
    weighted(ItemKind::PingPong, 35),
    weighted(ItemKind::TicketPrize, 40),
    weighted(ItemKind::HealthBonus, 25),
];

const BRASS_DROPS: [WeightedDrop; 3] = [
    weighted(ItemKind::ExtraBall, 35),
    weighted(ItemKind::AngelWings, 40),
    weighted(ItemKind::HealthBonus, 25),
];

/// 各档箱子的掉落表，运行期不修改
#[derive(Resource, Debug, Clone)]
pub struct LootTable {
    tables: HashMap<CrateTier, Vec<WeightedDrop>>,
}

impl Default for LootTable {
    fn default() -> Self {
        Self::from_tables([
            (CrateTier::Rusty, RUSTY_DROPS.to_vec()),
            (CrateTier::Brass, BRASS_DROPS.to_vec()),
        ])
    }
}

impl LootTable {
    pub fn from_tables(tables: impl IntoIterator<Item = (CrateTier, Vec<WeightedDrop>)>) -> Self {
        Self {
            tables: tables.into_iter().collect(),
        }
    }

    /// 该档次的掉落列表；没有配置时为空
    pub fn drops(&self, tier: CrateTier) -> &[WeightedDrop] {
        self.tables
            .get(&tier.table_tier())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn total_weight(&self, tier: CrateTier) -> u64 {
        total_weight(self.drops(tier))
    }

    /// 抽一次。没有表或总权重为 0 时返回 NoItem，且不消耗随机数
    pub fn draw<R: Rng>(&self, tier: CrateTier, rng: &mut R) -> ItemKind {
        let drops = self.drops(tier);
        let total = total_weight(drops);
        if total == 0 {
            return ItemKind::NoItem;
        }
        let roll = rng.random_range(0..total);
        pick(drops, roll)
    }
}

fn total_weight(drops: &[WeightedDrop]) -> u64 {
    drops.iter().map(|d| u64::from(d.weight)).sum()
}

/// 在累积权重区间里找 roll 落在哪一件上
///
/// 区间是 `[前面权重之和, 前面权重之和 + weight)`，roll 越界时返回 NoItem。
pub fn pick(drops: &[WeightedDrop], roll: u64) -> ItemKind {
    let mut cumulative = 0u64;
    for d in drops {
        cumulative += u64::from(d.weight);
        if roll < cumulative {
            return d.item;
        }
    }
    ItemKind::NoItem
}
