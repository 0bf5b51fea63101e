pub mod components;
pub mod effects;
pub mod events;
mod systems;

use crate::core::states::AppState;
use bevy::prelude::*;
use components::GlossMaterialCache;
use events::*;
use systems::*;

/// 场地：球的生成、掉落和道具外观
pub struct FieldPlugin;
impl Plugin for FieldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GlossMaterialCache>()
            .add_event::<SpawnBall>()
            .add_event::<DrainBall>()
            .add_event::<BallCollisionExit>()
            .add_systems(
                Update,
                (spawn_ball, drain_ball)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
