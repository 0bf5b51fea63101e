//! 把道具效果加到单个球上

use super::components::{BallCollider, BallSkin, BallTrail, GlossMaterialCache};
use crate::data::schema::ItemEffect;

/// 逐个应用效果；球缺少对应组件时只跳过那一项
pub fn apply_item_effects(
    effects: &[ItemEffect],
    mut trail: Option<&mut BallTrail>,
    mut skin: Option<&mut BallSkin>,
    mut collider: Option<&mut BallCollider>,
    gloss: &mut GlossMaterialCache,
) {
    for effect in effects {
        match effect {
            ItemEffect::Trail { material } => {
                if let Some(trail) = trail.as_deref_mut() {
                    trail.enabled = true;
                    trail.material = Some(material.clone());
                }
            }
            ItemEffect::BallMaterial { material } => {
                if let Some(skin) = skin.as_deref_mut() {
                    skin.current = gloss.get_or_create(material).name.clone();
                }
            }
            ItemEffect::PhysicsMaterial { material } => {
                if let Some(collider) = collider.as_deref_mut() {
                    collider.physics_material = material.clone();
                }
            }
        }
    }
}

/// 卸下道具后恢复默认外观
pub fn revert_item_effects(
    trail: Option<&mut BallTrail>,
    skin: Option<&mut BallSkin>,
    collider: Option<&mut BallCollider>,
) {
    if let Some(trail) = trail {
        trail.enabled = false;
        trail.material = None;
    }
    if let Some(skin) = skin {
        skin.current = skin.base.clone();
    }
    if let Some(collider) = collider {
        collider.physics_material = collider.base.clone();
    }
}
