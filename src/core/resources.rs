use std::path::Path;

use anyhow::Context;
use bevy::prelude::*;
use serde_derive::Deserialize;

use crate::loot::CrateTier;

/// 默认配置文件位置（相对工作目录）
pub const CONFIG_PATH: &str = "assets/config/game.toml";

/// 全局游戏配置，来自 `assets/config/game.toml`
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// 调试用：商店不检查也不扣除奖券
    pub free_shops: bool,
    /// 存档里没有 ticketCount 时的初始奖券
    pub starting_tickets: i32,
    pub prefs_path: String,
    /// 固定种子，方便复现掉落
    pub loot_seed: Option<u64>,
    pub verbose_inventory_logs: bool,
    pub shop: ShopConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            free_shops: false,
            starting_tickets: 0,
            prefs_path: "saves/prefs.json".into(),
            loot_seed: None,
            verbose_inventory_logs: false,
            shop: ShopConfig::default(),
        }
    }
}

/// 各档箱子的价格（奖券）
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub rusty_price: i32,
    pub brass_price: i32,
    pub golden_price: i32,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            rusty_price: 3,
            brass_price: 7,
            golden_price: 7,
        }
    }
}

impl ShopConfig {
    pub fn price_of(&self, tier: CrateTier) -> i32 {
        match tier {
            CrateTier::Rusty => self.rusty_price,
            CrateTier::Brass => self.brass_price,
            CrateTier::Golden => self.golden_price,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s).context("配置文件格式错误")?;
        for tier in [CrateTier::Rusty, CrateTier::Brass, CrateTier::Golden] {
            let price = config.shop.price_of(tier);
            anyhow::ensure!(price >= 0, "{tier} 箱子价格不能为负数: {price}");
        }
        Ok(config)
    }

    /// 读取配置；文件不存在时返回默认值
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置 {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("解析配置 {} 失败", path.display()))
    }

    /// 读取失败时回退默认配置并给出警告
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("{err:#}，使用默认配置");
                Self::default()
            }
        }
    }
}
