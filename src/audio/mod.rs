//! 声音提示：只记录要播放的片段名，没有实际的音频后端

use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    PurchaseSuccess,
    PurchaseFail,
    PowerupActivated,
    BallDrained,
}

impl AudioCue {
    /// 对应的音效片段
    pub fn clip_name(self) -> &'static str {
        match self {
            AudioCue::PurchaseSuccess => "ui_purchase_confirm",
            AudioCue::PurchaseFail => "ui_purchase_fail",
            AudioCue::PowerupActivated => "powerup_activate_arcade",
            AudioCue::BallDrained => "drain_loss",
        }
    }
}

pub struct AudioCuePlugin;
impl Plugin for AudioCuePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AudioCue>()
            .add_systems(PostUpdate, play_cues);
    }
}

fn play_cues(mut cues: EventReader<AudioCue>) {
    for cue in cues.read() {
        info!(clip = cue.clip_name(), "♪ {cue:?}");
    }
}
