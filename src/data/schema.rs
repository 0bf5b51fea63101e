use std::fmt;
use std::str::FromStr;

use bevy::asset::Asset;
use bevy::reflect::TypePath;
use serde_derive::Deserialize;
use thiserror::Error;

/// 奖励物品的身份。按值比较，`NoItem` 表示空格子。
///
/// 判别值就是存档里保存的整数，改动会让旧存档读出别的物品。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[repr(i32)]
pub enum ItemKind {
    #[default]
    NoItem = 0,
    AngelWings = 1,
    ExtraBall = 2,
    HealthBonus = 3,
    PingPong = 4,
    TicketPrize = 5,
    Fireball = 6,
    WaterDroplet = 7,
    LuckyCharm = 8,
    CurseOfAnubis = 9,
    CameraFlip = 10,
    Rock = 11,
    TennisBall = 12,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("未知的物品编号: {0}")]
    UnknownItem(i32),
    #[error("未知的物品名称: {0}")]
    UnknownName(String),
}

impl ItemKind {
    pub const ALL: [ItemKind; 13] = [
        ItemKind::NoItem,
        ItemKind::AngelWings,
        ItemKind::ExtraBall,
        ItemKind::HealthBonus,
        ItemKind::PingPong,
        ItemKind::TicketPrize,
        ItemKind::Fireball,
        ItemKind::WaterDroplet,
        ItemKind::LuckyCharm,
        ItemKind::CurseOfAnubis,
        ItemKind::CameraFlip,
        ItemKind::Rock,
        ItemKind::TennisBall,
    ];

    pub fn is_none(self) -> bool {
        self == ItemKind::NoItem
    }

    /// 存档用的整数编码
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            ItemKind::NoItem => "NoItem",
            ItemKind::AngelWings => "AngelWings",
            ItemKind::ExtraBall => "ExtraBall",
            ItemKind::HealthBonus => "HealthBonus",
            ItemKind::PingPong => "PingPong",
            ItemKind::TicketPrize => "TicketPrize",
            ItemKind::Fireball => "Fireball",
            ItemKind::WaterDroplet => "WaterDroplet",
            ItemKind::LuckyCharm => "LuckyCharm",
            ItemKind::CurseOfAnubis => "CurseOfAnubis",
            ItemKind::CameraFlip => "CameraFlip",
            ItemKind::Rock => "Rock",
            ItemKind::TennisBall => "TennisBall",
        }
    }
}

impl TryFrom<i32> for ItemKind {
    type Error = DecodeError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        ItemKind::ALL
            .into_iter()
            .find(|k| k.code() == code)
            .ok_or(DecodeError::UnknownItem(code))
    }
}

impl FromStr for ItemKind {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DecodeError::UnknownName(s.to_string()))
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 物品装备后对球产生的效果；一个物品可以带任意多个
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum ItemEffect {
    /// 打开拖尾并换拖尾材质
    Trail { material: String },
    /// 换球体材质（会先生成光泽版本）
    BallMaterial { material: String },
    /// 换碰撞体的物理材质
    PhysicsMaterial { material: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemEntry {
    pub id:          ItemKind,
    pub name:        String,
    #[serde(default)] pub description: String,
    #[serde(default)] pub icon:        String,
    #[serde(default)] pub effects:     Vec<ItemEffect>,
}

#[derive(Asset, TypePath, Deserialize, Debug, Default)]
pub struct ItemList {
    pub items: Vec<ItemEntry>,
}
