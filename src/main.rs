// ==========================================
// 会议室分配系统 - 命令行入口
// ==========================================
// 用法:
//   meeting-planner init [db_path]
//   meeting-planner seed <rooms_file> <meeting_types_file>
//   meeting-planner assign <type> <participants> <YYYY-MM-DD> <hour>
//   meeting-planner availability <type> <capacity> <YYYY-MM-DD>
//   meeting-planner config [<key> <value>]
//
// 数据库路径: MEETING_PLANNER_DB_PATH 或用户数据目录
// 输出: stdout 为 JSON，日志写入 stderr
// ==========================================

use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use meeting_planner::api::{ApiError, ErrorResponse, MeetingRequest};
use meeting_planner::app::{get_default_db_path, AppState};
use meeting_planner::logging;

const USAGE: &str = "用法:
  meeting-planner init [db_path]
  meeting-planner seed <rooms_file> <meeting_types_file>
  meeting-planner assign <type> <participants> <YYYY-MM-DD> <hour>
  meeting-planner availability <type> <capacity> <YYYY-MM-DD>
  meeting-planner config [<key> <value>]";

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let response = match err.downcast_ref::<ApiError>() {
                Some(api_err) => ErrorResponse::from(api_err),
                None => ErrorResponse {
                    code: "CLI_ERROR".to_string(),
                    message: format!("{:#}", err),
                },
            };
            match serde_json::to_string_pretty(&response) {
                Ok(json) => println!("{}", json),
                Err(_) => eprintln!("{}: {}", response.code, response.message),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> anyhow::Result<()> {
    let (command, rest) = args
        .split_first()
        .ok_or_else(|| anyhow!("缺少命令\n{}", USAGE))?;

    match (command.as_str(), rest) {
        ("init", [db_path]) => init(db_path.clone()),
        ("init", []) => init(get_default_db_path()),
        ("seed", [rooms_file, meeting_types_file]) => {
            let state = open_state()?;
            let summary = state
                .seed_importer
                .import(rooms_file, meeting_types_file)
                .context("基础数据导入失败")?;
            print_json(&summary)
        }
        ("assign", [meeting_type, participants, date, hour]) => {
            let state = open_state()?;
            let request = MeetingRequest {
                meeting_type: meeting_type.clone(),
                participant_count: parse_arg(participants, "participants")?,
                meeting_date: date.clone(),
                meeting_hour: parse_arg(hour, "hour")?,
            };
            let response = state.meeting_api.assign_meeting_to_best_room(request)?;
            print_json(&response)
        }
        ("availability", [meeting_type, capacity, date]) => {
            let state = open_state()?;
            let response = state.room_api.get_best_room_with_available_hours(
                meeting_type,
                parse_arg(capacity, "capacity")?,
                date,
            )?;
            print_json(&response)
        }
        ("config", []) => {
            let state = open_state()?;
            let snapshot = state
                .config_manager
                .get_config_snapshot()
                .map_err(|e| anyhow!("读取配置失败: {}", e))?;
            println!("{}", snapshot);
            Ok(())
        }
        ("config", [key, value]) => {
            let state = open_state()?;
            state
                .config_manager
                .set_global_config_value(key, value)
                .map_err(|e| anyhow!("写入配置失败: {}", e))?;
            Ok(())
        }
        _ => bail!("无法识别的命令或参数: {}\n{}", args.join(" "), USAGE),
    }
}

fn init(db_path: String) -> anyhow::Result<()> {
    let state = open_state_at(db_path)?;
    println!("{}", serde_json::json!({ "dbPath": state.db_path }));
    Ok(())
}

fn open_state() -> anyhow::Result<AppState> {
    open_state_at(get_default_db_path())
}

fn open_state_at(db_path: String) -> anyhow::Result<AppState> {
    AppState::new(db_path).map_err(|e| anyhow!(e))
}

/// 数值参数解析失败视为输入错误
fn parse_arg<T: FromStr>(value: &str, name: &str) -> Result<T, ApiError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ApiError::MalformedInput(format!("参数 {} 无效: {}", name, value)))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
