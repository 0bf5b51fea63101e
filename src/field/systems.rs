use super::{components::*, events::*};
use crate::audio::AudioCue;
use crate::core::events::LogEvent;
use bevy::prelude::*;

/// 发射新球：拖尾关闭，外观为默认
pub fn spawn_ball(
    mut ev_spawn: EventReader<SpawnBall>,
    mut commands: Commands,
    mut log_event: EventWriter<LogEvent>,
) {
    for _ in ev_spawn.read() {
        let ball = commands
            .spawn((
                Ball,
                BallTrail::default(),
                BallSkin::new(DEFAULT_BALL_MATERIAL),
                BallCollider::new(DEFAULT_PHYSICS_MATERIAL),
            ))
            .id();
        log_event.write(LogEvent(format!("发射新球 {ball}")));
    }
}

/// 球掉出场地
pub fn drain_ball(
    mut ev_drain: EventReader<DrainBall>,
    mut commands: Commands,
    balls: Query<Entity, With<Ball>>,
    mut cues: EventWriter<AudioCue>,
    mut log_event: EventWriter<LogEvent>,
) {
    let mut drained = Vec::new();
    for ev in ev_drain.read() {
        let target = ev
            .ball
            .filter(|e| balls.contains(*e))
            .or_else(|| balls.iter().filter(|e| !drained.contains(e)).min());
        let Some(ball) = target else {
            continue;
        };
        if drained.contains(&ball) {
            continue;
        }
        drained.push(ball);
        commands.entity(ball).despawn();
        cues.write(AudioCue::BallDrained);
        log_event.write(LogEvent(format!("球 {ball} 掉落")));
    }
}
