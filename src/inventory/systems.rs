use super::{components::*, events::*, prefs::Prefs};
use crate::audio::AudioCue;
use crate::core::{events::LogEvent, resources::GameConfig};
use crate::data::{ItemCatalog, schema::ItemKind};
use crate::field::components::{Ball, BallCollider, BallSkin, BallTrail, GlossMaterialCache};
use crate::field::effects::{apply_item_effects, revert_item_effects};
use crate::field::events::BallCollisionExit;
use crate::loot::{CrateTier, LootRng, LootTable};
use crate::player::components::{Player, Wallet};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

type BallLooks = (
    Option<&'static mut BallTrail>,
    Option<&'static mut BallSkin>,
    Option<&'static mut BallCollider>,
);

/// 执行道具栏命令需要的全部世界状态
#[derive(SystemParam)]
pub struct InventoryOps<'w, 's> {
    inventory: ResMut<'w, Inventory>,
    wallets:   Query<'w, 's, &'static mut Wallet, With<Player>>,
    balls:     Query<'w, 's, BallLooks, With<Ball>>,
    rng:       ResMut<'w, LootRng>,
    table:     Res<'w, LootTable>,
    config:    Res<'w, GameConfig>,
    catalog:   Res<'w, ItemCatalog>,
    gloss:     ResMut<'w, GlossMaterialCache>,
    hooks:     EventWriter<'w, PowerupHook>,
    changed:   EventWriter<'w, InventoryChanged>,
    cues:      EventWriter<'w, AudioCue>,
    log:       EventWriter<'w, LogEvent>,
}

impl InventoryOps<'_, '_> {
    fn apply(&mut self, command: InventoryCommand) {
        match command {
            InventoryCommand::Give(item) => self.give(item),
            InventoryCommand::Purchase { price, tier } => self.purchase(price, tier),
            InventoryCommand::Use => self.use_next(),
            InventoryCommand::Unequip => self.unequip(),
            InventoryCommand::Clear => self.clear(),
        }
    }

    /// 处理"give"——往第一个空格塞道具
    fn give(&mut self, item: ItemKind) {
        if item.is_none() {
            return;
        }
        let name = self.catalog.display_name(item);
        match self.inventory.give(item) {
            Ok(index) => {
                self.log.write(LogEvent(format!("获得 {name}（第 {index} 格）")));
                self.changed.write(InventoryChanged);
            }
            Err(err) => {
                warn!("无法获得 {name}: {err}");
                self.log.write(LogEvent(format!("{err}，无法获得 {name}")));
                self.cues.write(AudioCue::PurchaseFail);
            }
        }
    }

    /// 商店购买：扣奖券 → 抽箱子 → 放进空格
    fn purchase(&mut self, price: i32, tier: CrateTier) {
        let Ok(mut wallet) = self.wallets.single_mut() else {
            warn!("没有玩家，无法购买");
            self.cues.write(AudioCue::PurchaseFail);
            return;
        };

        // 在副本上结算，失败时钱包不被标记为已修改
        let mut scratch = *wallet;
        match self.inventory.purchase(
            price,
            tier,
            &mut scratch,
            self.config.free_shops,
            &self.table,
            &mut self.rng.0,
        ) {
            Ok(item) => {
                if scratch != *wallet {
                    *wallet = scratch;
                }
                self.log.write(LogEvent(format!(
                    "打开 {tier} 箱子，获得 {}",
                    self.catalog.display_name(item)
                )));
                self.cues.write(AudioCue::PurchaseSuccess);
                self.changed.write(InventoryChanged);
            }
            Err(err) => {
                self.log.write(LogEvent(format!("购买失败：{err}")));
                self.cues.write(AudioCue::PurchaseFail);
            }
        }
    }

    /// 使用队首道具，把效果加到场上每一个球上
    fn use_next(&mut self) {
        let ball_count = self.balls.iter().count();
        let Some(item) = self.inventory.use_next(ball_count) else {
            return;
        };

        if let Some(entry) = self.catalog.get(item) {
            for (trail, skin, collider) in &mut self.balls {
                apply_item_effects(
                    &entry.effects,
                    trail.map(Mut::into_inner),
                    skin.map(Mut::into_inner),
                    collider.map(Mut::into_inner),
                    &mut self.gloss,
                );
            }
        }

        self.hooks.write(PowerupHook { item, phase: HookPhase::Equip });
        self.changed.write(InventoryChanged);
        self.cues.write(AudioCue::PowerupActivated);
        self.log.write(LogEvent(format!("已启用 {}", self.catalog.display_name(item))));
    }

    /// 卸下当前道具，球恢复默认外观
    fn unequip(&mut self) {
        if let Some(item) = self.inventory.unequip() {
            self.on_unequipped(item);
            self.log.write(LogEvent(format!("已卸下 {}", self.catalog.display_name(item))));
        }
    }

    fn clear(&mut self) {
        if let Some(item) = self.inventory.clear() {
            self.on_unequipped(item);
        }
        self.changed.write(InventoryChanged);
        self.log.write(LogEvent("道具栏已清空".into()));
    }

    fn on_unequipped(&mut self, item: ItemKind) {
        for (trail, skin, collider) in &mut self.balls {
            revert_item_effects(
                trail.map(Mut::into_inner),
                skin.map(Mut::into_inner),
                collider.map(Mut::into_inner),
            );
        }
        self.hooks.write(PowerupHook { item, phase: HookPhase::Unequip });
    }
}

/// 按到达顺序执行道具栏命令
pub fn handle_inventory_commands(
    mut commands: EventReader<InventoryCommand>,
    mut ops: InventoryOps,
) {
    for command in commands.read() {
        ops.apply(*command);
    }
}

/// 每次改动存一次档，并请求刷新显示
pub fn persist_inventory(
    mut ev_changed: EventReader<InventoryChanged>,
    inventory: Res<Inventory>,
    mut prefs: ResMut<Prefs>,
    mut list_event: EventWriter<ListInventoryEvent>,
) {
    for _ in ev_changed.read() {
        inventory.save_to(prefs.0.as_mut());
        prefs.flush_or_log();
        list_event.write(ListInventoryEvent);
    }
}

/// 进入游戏时读档
pub fn load_inventory(
    mut inventory: ResMut<Inventory>,
    prefs: Res<Prefs>,
    mut list_event: EventWriter<ListInventoryEvent>,
) {
    for failure in inventory.load_from(prefs.0.as_ref()) {
        error!("道具栏第 {} 格读档失败: {}", failure.slot, failure.error);
    }
    list_event.write(ListInventoryEvent);
}

/// 打印道具栏（相当于刷新 UI 格子）
pub fn print_inventory(
    mut ev_list: EventReader<ListInventoryEvent>,
    inventory: Res<Inventory>,
    catalog: Res<ItemCatalog>,
    config: Res<GameConfig>,
    mut log_event: EventWriter<LogEvent>,
) {
    if ev_list.is_empty() {
        return;
    }
    ev_list.clear();

    let describe = |kind: ItemKind| {
        if kind.is_none() {
            "(empty)".to_string()
        } else {
            catalog.display_name(kind)
        }
    };

    let mut lines = Vec::with_capacity(SLOT_COUNT + 1);
    for (idx, kind) in inventory.slots.iter().enumerate() {
        lines.push(format!("[{idx}] {}", describe(*kind)));
    }
    lines.push(format!("生效中: {}", describe(inventory.equipped)));
    log_event.write(LogEvent(lines.join("\n")));

    if config.verbose_inventory_logs {
        debug!(slots = ?inventory.slots, equipped = ?inventory.equipped, "inventory refreshed");
    }
}

/// 球离开碰撞时触发当前道具的碰撞钩子；不是球的实体忽略
pub fn forward_collision_hook(
    mut ev_exit: EventReader<BallCollisionExit>,
    inventory: Res<Inventory>,
    balls: Query<(), With<Ball>>,
    mut hooks: EventWriter<PowerupHook>,
) {
    for ev in ev_exit.read() {
        if inventory.equipped.is_none() || !balls.contains(ev.ball) {
            continue;
        }
        hooks.write(PowerupHook {
            item: inventory.equipped,
            phase: HookPhase::Collision,
        });
    }
}
