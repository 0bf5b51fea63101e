use bevy::prelude::*;

use super::components::Inventory;
use super::events::*;
use super::prefs::{MemoryPrefs, Prefs, PrefsStore};
use crate::audio::AudioCue;
use crate::core::resources::GameConfig;
use crate::data::schema::ItemKind::{self, *};
use crate::field::components::*;
use crate::field::events::BallCollisionExit;
use crate::loot::CrateTier;
use crate::testing::*;

fn prefs_with_slots(slots: [i32; 3]) -> MemoryPrefs {
    let mut prefs = MemoryPrefs::default();
    for (i, code) in slots.into_iter().enumerate() {
        prefs.values.insert(format!("Item{i}"), code);
    }
    prefs
}

fn inventory(app: &App) -> Inventory {
    app.world().resource::<Inventory>().clone()
}

fn stored(app: &App, key: &str) -> i32 {
    app.world().resource::<Prefs>().get_int(key, -1)
}

fn spawn_full_ball(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((
            Ball,
            BallTrail::default(),
            BallSkin::new(DEFAULT_BALL_MATERIAL),
            BallCollider::new(DEFAULT_PHYSICS_MATERIAL),
        ))
        .id()
}

#[test]
fn startup_loads_saved_slots() {
    let app = test_app(
        GameConfig::default(),
        prefs_with_slots([Rock.code(), PingPong.code(), NoItem.code()]),
    );
    assert_eq!(inventory(&app).slots, [Rock, PingPong, NoItem]);
    assert_eq!(inventory(&app).equipped, NoItem);
}

#[test]
fn corrupt_saved_slot_loads_as_no_item() {
    let app = test_app(
        GameConfig::default(),
        prefs_with_slots([Rock.code(), 77, Fireball.code()]),
    );
    assert_eq!(inventory(&app).slots, [Rock, NoItem, Fireball]);
}

#[test]
fn purchase_debits_fills_and_persists() {
    let mut app = test_app(with_tickets(10), MemoryPrefs::default());
    app.world_mut().send_event(InventoryCommand::Purchase { price: 3, tier: CrateTier::Rusty });
    app.update();

    let inv = inventory(&app);
    assert_eq!(inv.occupied(), 1);
    assert!(matches!(inv.slots[0], PingPong | TicketPrize | HealthBonus));
    assert_eq!(tickets(&mut app), 7);
    assert_eq!(stored(&app, "Item0"), inv.slots[0].code());
    assert_eq!(stored(&app, "Item1"), NoItem.code());
    assert!(cues(&app).contains(&AudioCue::PurchaseSuccess));

    app.update();
    assert_eq!(stored(&app, "ticketCount"), 7);
}

#[test]
fn purchase_without_enough_tickets_changes_nothing() {
    let mut app = test_app(with_tickets(2), MemoryPrefs::default());
    app.world_mut().send_event(InventoryCommand::Purchase { price: 3, tier: CrateTier::Rusty });
    app.update();

    assert_eq!(inventory(&app), Inventory::default());
    assert_eq!(tickets(&mut app), 2);
    assert_eq!(cues(&app), vec![AudioCue::PurchaseFail]);
    assert_eq!(stored(&app, "Item0"), -1);
}

#[test]
fn purchase_into_full_inventory_changes_nothing() {
    let mut app = test_app(
        with_tickets(50),
        prefs_with_slots([Rock.code(), Rock.code(), TennisBall.code()]),
    );
    app.world_mut().send_event(InventoryCommand::Purchase { price: 7, tier: CrateTier::Golden });
    app.update();

    assert_eq!(inventory(&app).slots, [Rock, Rock, TennisBall]);
    assert_eq!(tickets(&mut app), 50);
    assert_eq!(cues(&app), vec![AudioCue::PurchaseFail]);
}

#[test]
fn free_shops_ignore_balance() {
    let config = GameConfig {
        free_shops: true,
        ..Default::default()
    };
    let mut app = test_app(config, MemoryPrefs::default());
    app.world_mut().send_event(InventoryCommand::Purchase { price: 7, tier: CrateTier::Brass });
    app.update();

    assert_eq!(inventory(&app).occupied(), 1);
    assert_eq!(tickets(&mut app), 0);
}

#[test]
fn give_persists_once_per_mutation() {
    let mut app = test_app(GameConfig::default(), MemoryPrefs::default());
    app.world_mut().send_event(InventoryCommand::Give(LuckyCharm));
    app.update();

    assert_eq!(inventory(&app).slots, [LuckyCharm, NoItem, NoItem]);
    assert_eq!(current::<InventoryChanged>(&app).len(), 1);
    assert_eq!(current::<ListInventoryEvent>(&app).len(), 1);
    assert_eq!(stored(&app, "Item0"), LuckyCharm.code());

    // 空闲的一帧不重复存档
    app.update();
    assert!(current::<InventoryChanged>(&app).is_empty());
    assert!(current::<ListInventoryEvent>(&app).is_empty());
}

#[test]
fn give_into_full_inventory_fails_loudly() {
    let mut app = test_app(
        GameConfig::default(),
        prefs_with_slots([Rock.code(), Rock.code(), Rock.code()]),
    );
    app.world_mut().send_event(InventoryCommand::Give(Fireball));
    app.update();

    assert_eq!(inventory(&app).slots, [Rock, Rock, Rock]);
    assert_eq!(cues(&app), vec![AudioCue::PurchaseFail]);
    assert!(current::<InventoryChanged>(&app).is_empty());
}

#[test]
fn use_item_equips_shifts_and_applies_effects() {
    let mut app = test_app(
        GameConfig::default(),
        prefs_with_slots([Fireball.code(), Rock.code(), TennisBall.code()]),
    );
    let full = spawn_full_ball(&mut app);
    // 只有 Ball 标记的球：效果全部跳过，但不影响其他球
    let bare = app.world_mut().spawn(Ball).id();

    app.world_mut().send_event(InventoryCommand::Use);
    app.update();

    let inv = inventory(&app);
    assert_eq!(inv.equipped, Fireball);
    assert_eq!(inv.slots, [Rock, TennisBall, NoItem]);
    assert_eq!(stored(&app, "Item0"), Rock.code());
    assert_eq!(stored(&app, "Item2"), NoItem.code());

    let world = app.world();
    let trail = world.get::<BallTrail>(full).unwrap();
    assert!(trail.enabled);
    assert_eq!(trail.material.as_deref(), Some("trail_fire"));
    assert_eq!(
        world.get::<BallSkin>(full).unwrap().current,
        "ball_magma_ToyCoreGloss_Runtime"
    );
    assert!(world.get::<Ball>(bare).is_some());

    assert_eq!(
        current::<PowerupHook>(&app),
        vec![PowerupHook { item: Fireball, phase: HookPhase::Equip }]
    );
    assert!(cues(&app).contains(&AudioCue::PowerupActivated));
}

#[test]
fn use_item_is_a_noop_without_preconditions() {
    // 场上没有球
    let mut app = test_app(
        GameConfig::default(),
        prefs_with_slots([Fireball.code(), NoItem.code(), NoItem.code()]),
    );
    app.world_mut().send_event(InventoryCommand::Use);
    app.update();
    assert_eq!(inventory(&app).slots, [Fireball, NoItem, NoItem]);
    assert_eq!(inventory(&app).equipped, NoItem);

    // 队列为空
    let mut app = test_app(GameConfig::default(), MemoryPrefs::default());
    spawn_full_ball(&mut app);
    app.world_mut().send_event(InventoryCommand::Use);
    app.update();
    assert_eq!(inventory(&app), Inventory::default());

    // 已有道具生效
    let mut app = test_app(
        GameConfig::default(),
        prefs_with_slots([Fireball.code(), Rock.code(), NoItem.code()]),
    );
    spawn_full_ball(&mut app);
    app.world_mut().send_event(InventoryCommand::Use);
    app.update();
    app.world_mut().send_event(InventoryCommand::Use);
    app.update();
    assert_eq!(inventory(&app).equipped, Fireball);
    assert_eq!(inventory(&app).slots, [Rock, NoItem, NoItem]);
    assert!(current::<InventoryChanged>(&app).is_empty());
}

#[test]
fn clear_unequips_and_reverts_balls() {
    let mut app = test_app(
        GameConfig::default(),
        prefs_with_slots([Fireball.code(), Rock.code(), TennisBall.code()]),
    );
    let ball = spawn_full_ball(&mut app);
    app.world_mut().send_event(InventoryCommand::Use);
    app.update();

    app.world_mut().send_event(InventoryCommand::Clear);
    app.update();
    app.update();

    assert_eq!(inventory(&app), Inventory::default());
    for i in 0..3 {
        assert_eq!(stored(&app, &format!("Item{i}")), NoItem.code());
    }
    let world = app.world();
    assert_eq!(world.get::<BallTrail>(ball).unwrap(), &BallTrail::default());
    assert_eq!(
        world.get::<BallSkin>(ball).unwrap().current,
        DEFAULT_BALL_MATERIAL
    );
}

#[test]
fn unequip_fires_hook_only_when_equipped() {
    let mut app = test_app(
        GameConfig::default(),
        prefs_with_slots([PingPong.code(), NoItem.code(), NoItem.code()]),
    );
    app.world_mut().send_event(InventoryCommand::Unequip);
    app.update();
    assert!(current::<PowerupHook>(&app).is_empty());

    spawn_full_ball(&mut app);
    app.world_mut().send_event(InventoryCommand::Use);
    app.update();
    app.world_mut().send_event(InventoryCommand::Unequip);
    app.update();

    assert_eq!(inventory(&app).equipped, NoItem);
    assert_eq!(
        current::<PowerupHook>(&app),
        vec![PowerupHook { item: PingPong, phase: HookPhase::Unequip }]
    );
}

#[test]
fn collision_hook_follows_equipped_item() {
    let mut app = test_app(
        GameConfig::default(),
        prefs_with_slots([Rock.code(), NoItem.code(), NoItem.code()]),
    );
    let ball = spawn_full_ball(&mut app);

    app.world_mut().send_event(BallCollisionExit { ball });
    app.update();
    assert!(current::<PowerupHook>(&app).is_empty());

    app.world_mut().send_event(InventoryCommand::Use);
    app.update();
    app.world_mut().send_event(BallCollisionExit { ball });
    app.update();

    let hooks: Vec<ItemKind> = current::<PowerupHook>(&app)
        .into_iter()
        .filter(|h| h.phase == HookPhase::Collision)
        .map(|h| h.item)
        .collect();
    assert_eq!(hooks, vec![Rock]);
}

#[test]
fn use_after_unequip_keeps_the_new_item_look() {
    let mut app = test_app(
        GameConfig::default(),
        prefs_with_slots([Fireball.code(), PingPong.code(), NoItem.code()]),
    );
    let ball = spawn_full_ball(&mut app);
    app.world_mut().send_event(InventoryCommand::Use);
    app.update();

    app.world_mut().send_event(InventoryCommand::Unequip);
    app.update();
    app.world_mut().send_event(InventoryCommand::Use);
    app.update();
    app.update();

    assert_eq!(inventory(&app).equipped, PingPong);
    let world = app.world();
    assert!(!world.get::<BallTrail>(ball).unwrap().enabled);
    assert_eq!(
        world.get::<BallSkin>(ball).unwrap().current,
        "ball_pingpong_ToyCoreGloss_Runtime"
    );
    assert_eq!(
        world.get::<BallCollider>(ball).unwrap().physics_material,
        "ball_bouncy"
    );
}

#[test]
fn commands_in_one_frame_run_in_send_order() {
    // 先卸下再使用：换上下一个道具
    let mut app = test_app(
        GameConfig::default(),
        prefs_with_slots([Fireball.code(), PingPong.code(), NoItem.code()]),
    );
    let ball = spawn_full_ball(&mut app);
    app.world_mut().send_event(InventoryCommand::Use);
    app.update();

    app.world_mut().send_event(InventoryCommand::Unequip);
    app.world_mut().send_event(InventoryCommand::Use);
    app.update();

    assert_eq!(inventory(&app).equipped, PingPong);
    assert_eq!(inventory(&app).slots, [NoItem; 3]);
    assert_eq!(
        current::<PowerupHook>(&app),
        vec![
            PowerupHook { item: Fireball, phase: HookPhase::Unequip },
            PowerupHook { item: PingPong, phase: HookPhase::Equip },
        ]
    );
    assert_eq!(
        app.world().get::<BallSkin>(ball).unwrap().current,
        "ball_pingpong_ToyCoreGloss_Runtime"
    );

    // 先使用再卸下：道具出队后立即卸下
    let mut app = test_app(
        GameConfig::default(),
        prefs_with_slots([Rock.code(), TennisBall.code(), NoItem.code()]),
    );
    spawn_full_ball(&mut app);
    app.world_mut().send_event(InventoryCommand::Use);
    app.world_mut().send_event(InventoryCommand::Unequip);
    app.update();

    assert_eq!(inventory(&app).equipped, NoItem);
    assert_eq!(inventory(&app).slots, [TennisBall, NoItem, NoItem]);
    assert_eq!(stored(&app, "Item0"), TennisBall.code());
}

#[test]
fn collision_from_a_non_ball_is_ignored() {
    let mut app = test_app(
        GameConfig::default(),
        prefs_with_slots([Rock.code(), NoItem.code(), NoItem.code()]),
    );
    spawn_full_ball(&mut app);
    app.world_mut().send_event(InventoryCommand::Use);
    app.update();

    let bumper = app.world_mut().spawn_empty().id();
    app.world_mut().send_event(BallCollisionExit { ball: bumper });
    app.update();

    assert_eq!(inventory(&app).equipped, Rock);
    assert!(current::<PowerupHook>(&app).is_empty());
}
