//! 文字 CLI：读取 stdin → 解析命令 → 执行并打印

use bevy::app::AppExit;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::core::{events::LogEvent, resources::GameConfig, states::AppState};
use crate::data::{ItemCatalog, schema::{ItemEntry, ItemKind}};
use crate::field::components::Ball;
use crate::field::events::{DrainBall, SpawnBall};
use crate::inventory::components::Inventory;
use crate::inventory::events::*;
use crate::loot::CrateTier;
use crate::player::events::{GrantTickets, ShowWallet};

static CLI_BUFFER: Lazy<Arc<Mutex<VecDeque<String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(VecDeque::new())));

/// 插件入口
pub struct DebugCliPlugin;
impl Plugin for DebugCliPlugin {
    fn build(&self, app: &mut App) {
        {
            let buffer = CLI_BUFFER.clone();
            std::thread::spawn(move || {
                use std::io::{self, BufRead};
                let stdin = io::stdin();
                for line in stdin.lock().lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if let Ok(mut buf) = buffer.lock() {
                        buf.push_back(line.to_string());
                    }
                }
            });
        }
        app
            // 事件：原始输入行
            .add_event::<CliLine>()
            // 每帧从 buffer 取出所有命令行写入事件
            .add_systems(Update, read_stdin)
            // 仅在 InGame 处理命令
            .add_systems(
                Update,
                execute_cli_commands.run_if(in_state(AppState::InGame)),
            );
    }
}

/* ---------------------------- 事件与枚举 ---------------------------- */

/// 终端敲的一整行
#[derive(Event)]
struct CliLine(String);

/// 我们支持的命令
#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Status,
    Exit,
    Items(Option<String>), // None=全部；Some(token)=按 id/uuid/name 查询
    Give(ItemKind),
    Inventory,
    Buy(CrateTier),
    Use,
    Unequip,
    Clear,
    Ball,
    Drain,
    Tickets(Option<i32>),  // None=查看余额
    Invalid(String),
    Unsupported(String),
}

/// 道具栏相关的事件出口
#[derive(SystemParam)]
struct InventoryWriters<'w> {
    command: EventWriter<'w, InventoryCommand>,
    list:    EventWriter<'w, ListInventoryEvent>,
}

/// 场地和玩家相关的事件出口
#[derive(SystemParam)]
struct FieldWriters<'w> {
    spawn:       EventWriter<'w, SpawnBall>,
    drain:       EventWriter<'w, DrainBall>,
    grant:       EventWriter<'w, GrantTickets>,
    show_wallet: EventWriter<'w, ShowWallet>,
}

/* ---------------------------- 读取 stdin ---------------------------- */

fn read_stdin(mut writer: EventWriter<CliLine>) {
    let Ok(mut buffer) = CLI_BUFFER.lock() else {
        return;
    };
    while let Some(line) = buffer.pop_front() {
        writer.write(CliLine(line));
    }
}

/* ---------------------------- 命令执行 ---------------------------- */

#[allow(clippy::too_many_arguments)]
fn execute_cli_commands(
    mut line_reader: EventReader<CliLine>,
    mut app_exit: EventWriter<AppExit>,
    mut log: EventWriter<LogEvent>,
    state: Res<State<AppState>>,
    catalog: Res<ItemCatalog>,
    config: Res<GameConfig>,
    inventory: Res<Inventory>,
    balls: Query<(), With<Ball>>,
    mut inv: InventoryWriters,
    mut field: FieldWriters,
) {
    for CliLine(input) in line_reader.read() {
        match parse_command(input) {
            Command::Help => {
                log.write(LogEvent(
                    "命令列表:
  help                   查看帮助
  status                 查看当前状态
  exit / quit            退出程序
  items                  列出所有物品
  items <token>          用 id / uuid / 名称 查询单个物品
  give <item>            直接给予道具
  inventory              查看道具栏
  buy <rusty|brass|golden>  购买箱子
  use                    使用队首道具
  unequip                卸下当前道具
  clear                  清空道具栏
  ball / drain           发射 / 掉落一颗球
  tickets [n]            查看 / 增加奖券
  ".into()));
            }

            Command::Status => {
                log.write(LogEvent(format!(
                    "State: {:?}, Items Loaded: {}, Slots: {}/3, Equipped: {}, Balls: {}, Free shops: {}",
                    state.get(),
                    catalog.len(),
                    inventory.occupied(),
                    inventory.equipped,
                    balls.iter().count(),
                    config.free_shops,
                )));
            }

            Command::Exit => {
                log.write(LogEvent("Bye~".into()));
                app_exit.write(AppExit::Success);
            }

            Command::Items(token) => match token {
                None => {
                    // 全部列出
                    for entry in catalog.iter() {
                        let uuid = uuid_from_item(entry.id);
                        log.write(LogEvent(format!(
                            "{} | {} | {}",
                            uuid, entry.id, entry.name
                        )));
                    }
                }
                Some(t) => {
                    // 按三种字段模糊匹配
                    let t_low = t.to_lowercase();
                    if let Some(e) = catalog.iter().find(|e| {
                        e.id.name().eq_ignore_ascii_case(&t_low)
                            || e.name.eq_ignore_ascii_case(&t_low)
                            || uuid_from_item(e.id).to_string() == t_low
                    }) {
                        log.write(LogEvent(item_details(e)));
                    } else {
                        log.write(LogEvent("未找到匹配物品".into()));
                    }
                }
            },

            Command::Give(item) => {
                inv.command.write(InventoryCommand::Give(item));
            }

            Command::Inventory => {
                inv.list.write(ListInventoryEvent);
            }

            Command::Buy(tier) => {
                inv.command.write(InventoryCommand::Purchase {
                    price: config.shop.price_of(tier),
                    tier,
                });
            }

            Command::Use => {
                inv.command.write(InventoryCommand::Use);
            }

            Command::Unequip => {
                inv.command.write(InventoryCommand::Unequip);
            }

            Command::Clear => {
                inv.command.write(InventoryCommand::Clear);
            }

            Command::Ball => {
                field.spawn.write(SpawnBall);
            }

            Command::Drain => {
                field.drain.write(DrainBall { ball: None });
            }

            Command::Tickets(None) => {
                field.show_wallet.write(ShowWallet);
            }

            Command::Tickets(Some(amount)) => {
                field.grant.write(GrantTickets { amount });
            }

            Command::Invalid(msg) => {
                log.write(LogEvent(msg));
            }

            Command::Unsupported(cmd) => {
                log.write(LogEvent(format!("不支持的命令: {cmd}")));
            }
        }
    }
}

/* ---------------------------- 工具函数 ---------------------------- */

fn parse_command(input: &str) -> Command {
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("").to_lowercase();
    match cmd.as_str() {
        "help" | "h" | "?" => Command::Help,
        "status" | "s" => Command::Status,
        "exit" | "quit" | "q" => Command::Exit,
        "items" | "item" | "i" => {
            let token = parts.next().map(|s| s.to_string());
            Command::Items(token)
        }
        "give" => match parts.next().map(str::parse::<ItemKind>) {
            Some(Ok(item)) if !item.is_none() => Command::Give(item),
            Some(Ok(_)) => Command::Invalid("不能给予 NoItem".into()),
            Some(Err(err)) => Command::Invalid(err.to_string()),
            None => Command::Invalid("用法: give <item>".into()),
        },
        "inventory" | "inv" => Command::Inventory,
        "buy" => match parts.next().unwrap_or("rusty").parse::<CrateTier>() {
            Ok(tier) => Command::Buy(tier),
            Err(err) => Command::Invalid(err),
        },
        "use" | "u" => Command::Use,
        "unequip" => Command::Unequip,
        "clear" => Command::Clear,
        "ball" | "b" => Command::Ball,
        "drain" => Command::Drain,
        "tickets" | "t" => match parts.next().map(str::parse::<i32>) {
            None => Command::Tickets(None),
            Some(Ok(n)) => Command::Tickets(Some(n)),
            Some(Err(_)) => Command::Invalid("用法: tickets [数量]".into()),
        },
        other => Command::Unsupported(other.into()),
    }
}

/// `items <token>` 的详情页
fn item_details(e: &ItemEntry) -> String {
    let effects: Vec<String> = e.effects.iter().map(|fx| format!("{fx:?}")).collect();
    format!(
        "==================================================
UUID    : {}
ID      : {} ({})
Name    : {}
Info    : {}
Icon    : {}
Effects : {}
==================================================",
        uuid_from_item(e.id),
        e.id,
        e.id.code(),
        e.name,
        e.description,
        if e.icon.is_empty() { "-" } else { e.icon.as_str() },
        if effects.is_empty() { "-".to_string() } else { effects.join(", ") }
    )
}

fn uuid_from_item(item: ItemKind) -> Uuid {
    // 用固定 namespace + 物品名生成版本 5 UUID，保证可重复得到同一值
    Uuid::new_v5(&Uuid::NAMESPACE_OID, item.name().as_bytes())
}
