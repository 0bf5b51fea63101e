//! 测试用的最小 App

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use crate::audio::{AudioCue, AudioCuePlugin};
use crate::core::{events::LogEvent, resources::GameConfig, states::AppState};
use crate::data::{ItemCatalog, loader::parse_item_list};
use crate::field::FieldPlugin;
use crate::inventory::InventoryPlugin;
use crate::inventory::events::{InventoryChanged, ListInventoryEvent, PowerupHook};
use crate::inventory::prefs::{MemoryPrefs, Prefs};
use crate::loot::{LootPlugin, LootRng};
use crate::player::PlayerPlugin;
use crate::player::components::{Player, Wallet};

pub fn shipped_catalog() -> ItemCatalog {
    let list = parse_item_list(include_bytes!("../assets/data/items.ron")).unwrap();
    ItemCatalog::from_list(&list)
}

/// 直接进入 InGame 的 App，跑完第一帧（玩家已生成、道具栏已读档）
pub fn test_app(config: GameConfig, prefs: MemoryPrefs) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_state(AppState::InGame)
        .add_event::<LogEvent>()
        .insert_resource(config)
        .insert_resource(shipped_catalog())
        .insert_resource(Prefs(Box::new(prefs)))
        .insert_resource(LootRng::seeded(7))
        .add_plugins((
            LootPlugin,
            AudioCuePlugin,
            FieldPlugin,
            PlayerPlugin,
            InventoryPlugin,
        ));
    record::<AudioCue>(&mut app);
    record::<InventoryChanged>(&mut app);
    record::<ListInventoryEvent>(&mut app);
    record::<PowerupHook>(&mut app);
    record::<LogEvent>(&mut app);
    app.update();
    app
}

/// 记录一帧内发出的某类事件
///
/// 测试 App 里事件缓冲不会每帧轮换，直接看 `Events<E>` 会混进前几帧的事件。
#[derive(Resource)]
pub struct Recorded<E: Event>(pub Vec<E>);

fn forget_recorded<E: Event>(mut recorded: ResMut<Recorded<E>>) {
    recorded.0.clear();
}

fn record_events<E: Event + Clone>(mut reader: EventReader<E>, mut recorded: ResMut<Recorded<E>>) {
    recorded.0.extend(reader.read().cloned());
}

pub fn record<E: Event + Clone>(app: &mut App) {
    app.insert_resource(Recorded::<E>(Vec::new()))
        .add_systems(First, forget_recorded::<E>)
        .add_systems(Last, record_events::<E>);
}

pub fn with_tickets(tickets: i32) -> GameConfig {
    GameConfig {
        starting_tickets: tickets,
        ..Default::default()
    }
}

pub fn tickets(app: &mut App) -> i32 {
    let world = app.world_mut();
    let mut query = world.query_filtered::<&Wallet, With<Player>>();
    query.single(world).map(|w| w.tickets).unwrap()
}

/// 上一次 `update` 里发出的事件（须先 `record::<E>`）
pub fn current<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world().resource::<Recorded<E>>().0.clone()
}

pub fn cues(app: &App) -> Vec<AudioCue> {
    current::<AudioCue>(app)
}
