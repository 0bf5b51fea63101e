use bevy::prelude::*;

/// 发放（或扣除）奖券
#[derive(Event)]
pub struct GrantTickets {
    pub amount: i32,
}

/// 显示奖券余额（用于命令行）
#[derive(Event)]
pub struct ShowWallet;
