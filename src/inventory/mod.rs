pub mod components;
pub mod events;
pub mod prefs;
mod systems;

use bevy::prelude::*;
use crate::core::states::AppState;
use components::*;
use events::*;
use systems::*;

pub struct InventoryPlugin;
impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<Inventory>()
            .init_resource::<prefs::Prefs>() // CorePlugin 已插入文件存档时不覆盖
            .add_event::<InventoryCommand>()
            .add_event::<InventoryChanged>()
            .add_event::<ListInventoryEvent>()
            .add_event::<PowerupHook>()
            .add_systems(OnEnter(AppState::InGame), load_inventory)
            .add_systems(
                Update,
                (
                    handle_inventory_commands,
                    persist_inventory,
                    print_inventory,
                )
                    .chain()
                    .run_if(in_state(AppState::InGame)),
            )
            .add_systems(
                Update,
                forward_collision_hook.run_if(in_state(AppState::InGame)),
            );
    }
}

#[cfg(test)]
mod tests;
