pub mod schema;
pub mod loader;

use std::collections::HashMap;

use bevy::asset::LoadState;
use bevy::prelude::*;
use schema::{ItemEntry, ItemKind, ItemList};
use crate::core::{events::LogEvent, states::AppState};

// --------------------------- 资源 ---------------------------
#[derive(Resource, Default)]
pub struct ItemAssets {
    pub handle: Option<Handle<ItemList>>,
}

/// 物品目录：ItemKind → 静态条目
#[derive(Resource, Default, Debug)]
pub struct ItemCatalog {
    entries: HashMap<ItemKind, ItemEntry>,
}

impl ItemCatalog {
    pub fn from_list(list: &ItemList) -> Self {
        let mut entries = HashMap::new();
        for entry in &list.items {
            if entry.id.is_none() {
                warn!("物品表里的 NoItem 条目被忽略");
                continue;
            }
            if entries.insert(entry.id, entry.clone()).is_some() {
                warn!("物品 {} 重复定义，使用后一条", entry.id);
            }
        }
        Self { entries }
    }

    pub fn get(&self, kind: ItemKind) -> Option<&ItemEntry> {
        self.entries.get(&kind)
    }

    /// 显示名；目录里没有时退回枚举名
    pub fn display_name(&self, kind: ItemKind) -> String {
        self.get(kind)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| kind.to_string())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemEntry> {
        // 按编码排序，输出稳定
        ItemKind::ALL.iter().filter_map(|k| self.entries.get(k))
    }
}

// --------------------------- 插件 ---------------------------
pub struct DataPlugin;
impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app
            // 注册资产类型 & Loader
            .init_asset::<ItemList>()
            .register_asset_loader(loader::RonItemLoader)
            // 注册资源
            .init_resource::<ItemAssets>()
            .init_resource::<ItemCatalog>()
            // Loading 流程
            .add_systems(OnEnter(AppState::Loading), start_loading)
            .add_systems(
                Update,
                check_loaded.run_if(in_state(AppState::Loading)),
            );
    }
}

// --------------------------- 系统 ---------------------------
fn start_loading(
    mut item_assets: ResMut<ItemAssets>,
    asset_server: Res<AssetServer>,
) {
    let handle: Handle<ItemList> = asset_server.load("data/items.ron");
    item_assets.handle = Some(handle);
}

fn check_loaded(
    mut next: ResMut<NextState<AppState>>,
    mut catalog: ResMut<ItemCatalog>,
    mut log: EventWriter<LogEvent>,
    item_assets: Res<ItemAssets>,
    lists: Res<Assets<ItemList>>,
    asset_server: Res<AssetServer>,
) {
    let Some(h) = &item_assets.handle else {
        return;
    };

    if let Some(list) = lists.get(h) {
        *catalog = ItemCatalog::from_list(list);
        log.write(LogEvent(format!("✔ Items loaded: {}", catalog.len())));
        next.set(AppState::InGame);
    } else if let LoadState::Failed(err) = asset_server.load_state(h) {
        // 没有物品表也能玩，只是道具没有特效
        error!("物品表加载失败: {err}");
        next.set(AppState::InGame);
    }
}
