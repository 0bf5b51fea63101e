use bevy::prelude::*;

/// 发射一颗新球
#[derive(Event)]
pub struct SpawnBall;

/// 一颗球掉出场地；不指定时掉最早的那颗
#[derive(Event)]
pub struct DrainBall {
    pub ball: Option<Entity>,
}

/// 球离开一次碰撞
#[derive(Event)]
pub struct BallCollisionExit {
    pub ball: Entity,
}
