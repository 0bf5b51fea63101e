use super::{components::*, events::*};
use crate::core::{events::LogEvent, resources::GameConfig};
use crate::inventory::prefs::{Prefs, PrefsStore};
use bevy::prelude::*;

/// 初始化玩家实体，奖券从存档读取
pub fn spawn_player(mut commands: Commands, prefs: Res<Prefs>, config: Res<GameConfig>) {
    let tickets = prefs.get_int(TICKETS_KEY, config.starting_tickets);
    commands.spawn((Player, Wallet { tickets }));
}

/// 处理发放奖券事件
pub fn handle_grant_tickets(
    mut ev_grant: EventReader<GrantTickets>,
    mut ev_log: EventWriter<LogEvent>,
    mut wallets: Query<&mut Wallet, With<Player>>,
) {
    for ev in ev_grant.read() {
        if let Ok(mut wallet) = wallets.single_mut() {
            wallet.grant(ev.amount);
            ev_log.write(LogEvent(format!(
                "奖券 {:+}，当前 {}",
                ev.amount, wallet.tickets
            )));
        }
    }
}

/// 余额有变化就写回存档
pub fn persist_tickets(
    wallets: Query<&Wallet, (With<Player>, Changed<Wallet>)>,
    mut prefs: ResMut<Prefs>,
) {
    for wallet in &wallets {
        prefs.set_int(TICKETS_KEY, wallet.tickets);
        prefs.flush_or_log();
    }
}

/// 显示余额
pub fn show_wallet(
    mut ev_show: EventReader<ShowWallet>,
    mut ev_log: EventWriter<LogEvent>,
    wallets: Query<&Wallet, With<Player>>,
) {
    for _ in ev_show.read() {
        match wallets.single() {
            Ok(wallet) => ev_log.write(LogEvent(format!("奖券: {}", wallet.tickets))),
            Err(_) => ev_log.write(LogEvent("未找到玩家".to_string())),
        };
    }
}
