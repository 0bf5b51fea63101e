use bevy::prelude::*;

mod audio;
mod core;
mod data;
mod field;
mod interface;
mod inventory;
mod loot;
mod player;
#[cfg(test)]
mod testing;

use crate::core::CorePlugin;
use interface::debug_cli::DebugCliPlugin;
use crate::core::states;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                visible: false,
                ..default()
            }),   // 不显示窗口，只用命令行
            ..default()
        }))
        // 读配置 / 存档，必须在日志插件之后、其他插件之前
        .add_plugins(CorePlugin)
        .add_plugins(DebugCliPlugin)
        .add_plugins(data::DataPlugin)
        .add_plugins((
            loot::LootPlugin,
            audio::AudioCuePlugin,
            field::FieldPlugin,
            player::PlayerPlugin,
            inventory::InventoryPlugin,
        ))
        .add_systems(Update, forward_log_event) // 简单打印
        .add_systems(Startup, |mut next: ResMut<NextState<states::AppState>>| {
            next.set(states::AppState::Loading);
        })
        .run();
}

fn forward_log_event(mut reader: EventReader<crate::core::events::LogEvent>) {
    for e in reader.read() {
        println!("> {}", e.0);
    }
}
