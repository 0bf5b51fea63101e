pub mod components;
pub mod events;
pub mod systems;

use crate::core::states::AppState;
use bevy::prelude::*;
use events::*;
use systems::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_event::<GrantTickets>()
            .add_event::<ShowWallet>()
            // 在游戏开始时生成玩家
            .add_systems(OnEnter(AppState::InGame), spawn_player)
            .add_systems(
                Update,
                (handle_grant_tickets, show_wallet, persist_tickets)
                    .chain()
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
