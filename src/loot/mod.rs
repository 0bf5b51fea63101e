pub mod table;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::resources::GameConfig;

pub use table::{CrateTier, LootTable};

/// 掉落用的随机数源；配置了 loot_seed 时可复现
#[derive(Resource)]
pub struct LootRng(pub StdRng);

impl LootRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_config(config: &GameConfig) -> Self {
        match config.loot_seed {
            Some(seed) => Self::seeded(seed),
            None => Self(StdRng::from_os_rng()),
        }
    }
}

pub struct LootPlugin;
impl Plugin for LootPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LootTable>();
        if !app.world().contains_resource::<LootRng>() {
            let rng = app
                .world()
                .get_resource::<GameConfig>()
                .map(LootRng::from_config)
                .unwrap_or_else(|| LootRng(StdRng::from_os_rng()));
            app.insert_resource(rng);
        }
    }
}
