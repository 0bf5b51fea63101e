use bevy::prelude::*;

use super::resources::GameConfig;

/// 面向玩家的一行文字输出（main 里统一打印）
#[derive(Event, Debug, Clone)]
pub struct LogEvent(pub String);

pub fn announce_startup(mut writer: EventWriter<LogEvent>, config: Res<GameConfig>) {
    let mut line = String::from("PSG-Ball 启动，输入 help 查看命令");
    if config.free_shops {
        line.push_str("（免费商店已开启）");
    }
    writer.write(LogEvent(line));
}
