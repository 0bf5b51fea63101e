use bevy::prelude::*;

use crate::inventory::prefs::Prefs;
use resources::{CONFIG_PATH, GameConfig};

pub mod states;
pub mod events;
pub mod resources;

/// 核心插件：注册全局资源 / 事件 / 状态
///
/// 配置和存档在这里读取，要求日志插件已经装好（先加 `DefaultPlugins`），
/// 否则读取时的警告会丢失。
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        use states::AppState;

        // 已插入的配置 / 存档（测试）优先
        if !app.world().contains_resource::<GameConfig>() {
            app.insert_resource(GameConfig::load_or_default(CONFIG_PATH));
        }
        if !app.world().contains_resource::<Prefs>() {
            let path = app.world().resource::<GameConfig>().prefs_path.clone();
            app.insert_resource(Prefs::json_file(path));
        }

        // 插件首次载入时，插入初始 State
        app
            .init_state::<AppState>()
            .add_event::<events::LogEvent>()
            .add_systems(Startup, events::announce_startup);
    }
}
