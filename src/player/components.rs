use bevy::prelude::*;

/// 奖券在存档里的 key
pub const TICKETS_KEY: &str = "ticketCount";

/// 玩家标记组件
#[derive(Component)]
pub struct Player;

/// 玩家的奖券余额
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wallet {
    pub tickets: i32,
}

impl Wallet {
    /// 增加奖券，溢出时封顶
    pub fn grant(&mut self, amount: i32) {
        self.tickets = self.tickets.saturating_add(amount).max(0);
    }
}
