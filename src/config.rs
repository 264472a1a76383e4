//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `SWALLOW__*` 覆盖（双下划线表示嵌套，
//! 如 `SWALLOW__SCHEDULE__WEATHER=clear`）。

use std::path::PathBuf;

use chrono::NaiveTime;
use serde::Deserialize;

use crate::core::AgentError;
use crate::react::MAX_REACT_STEPS;
use crate::schedule::{Constraints, Weather};

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub llm: LlmSection,
    #[serde(default)]
    pub react: ReactSection,
    #[serde(default)]
    pub schedule: ScheduleSection,
    #[serde(default)]
    pub tools: ToolsSection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm: LlmSection::default(),
            react: ReactSection::default(),
            schedule: ScheduleSection::default(),
            tools: ToolsSection::default(),
        }
    }
}

/// [llm] 段：OpenAI 兼容端点与模型
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSection {
    #[serde(default = "default_model")]
    pub model: String,
    /// OpenAI 兼容端点（如 LiteLLM 代理）；未设置时走官方端点
    pub base_url: Option<String>,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: None,
        }
    }
}

fn default_model() -> String {
    "gpt-oss-20b-local".to_string()
}

/// [react] 段：循环回合预算
#[derive(Debug, Clone, Deserialize)]
pub struct ReactSection {
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

impl Default for ReactSection {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
        }
    }
}

fn default_max_steps() -> usize {
    MAX_REACT_STEPS
}

/// [schedule] 段：出发/截止时刻（HH:MM）、交通分钟数、天气
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleSection {
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default = "default_end")]
    pub end: String,
    #[serde(default = "default_transit_minutes")]
    pub transit_minutes: u32,
    /// clear / adverse（兼容 rain）
    #[serde(default = "default_weather")]
    pub weather: String,
}

impl Default for ScheduleSection {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
            transit_minutes: default_transit_minutes(),
            weather: default_weather(),
        }
    }
}

fn default_start() -> String {
    "09:00".to_string()
}

fn default_end() -> String {
    "18:00".to_string()
}

fn default_transit_minutes() -> u32 {
    30
}

fn default_weather() -> String {
    "adverse".to_string()
}

impl ScheduleSection {
    /// 解析为模拟器约束；时间格式或天气取值非法视为配置错误
    pub fn to_constraints(&self) -> Result<Constraints, AgentError> {
        let start = parse_hhmm("schedule.start", &self.start)?;
        let deadline = parse_hhmm("schedule.end", &self.end)?;
        if deadline <= start {
            return Err(AgentError::Config(
                "schedule.end must be after schedule.start".to_string(),
            ));
        }
        let weather = self.weather.parse::<Weather>().map_err(AgentError::Config)?;

        Ok(Constraints {
            start,
            deadline,
            transit_minutes: self.transit_minutes,
            weather,
        })
    }
}

fn parse_hhmm(key: &str, value: &str) -> Result<NaiveTime, AgentError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|e| AgentError::Config(format!("invalid {} {:?}: {}", key, value, e)))
}

/// [tools] 段：单次调用超时与休馆名单
#[derive(Debug, Clone, Deserialize)]
pub struct ToolsSection {
    #[serde(default = "default_tool_timeout_secs")]
    pub tool_timeout_secs: u64,
    #[serde(default = "default_closed_places")]
    pub closed_places: Vec<String>,
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            tool_timeout_secs: default_tool_timeout_secs(),
            closed_places: default_closed_places(),
        }
    }
}

fn default_tool_timeout_secs() -> u64 {
    30
}

fn default_closed_places() -> Vec<String> {
    vec!["美景宮".to_string()]
}

/// 从 config 目录加载配置，环境变量 SWALLOW__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 SWALLOW__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("SWALLOW")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.llm.model, "gpt-oss-20b-local");
        assert_eq!(cfg.react.max_steps, 8);
        assert_eq!(cfg.schedule.transit_minutes, 30);
        assert_eq!(cfg.tools.closed_places, vec!["美景宮".to_string()]);
    }

    #[test]
    fn test_schedule_to_constraints() {
        let constraints = ScheduleSection::default().to_constraints().unwrap();
        assert_eq!(constraints.transit_minutes, 30);
        assert_eq!(constraints.weather, Weather::Adverse);
        assert_eq!(
            constraints.start,
            NaiveTime::parse_from_str("09:00", "%H:%M").unwrap()
        );
    }

    #[test]
    fn test_invalid_time_is_config_error() {
        let section = ScheduleSection {
            start: "9am".to_string(),
            ..ScheduleSection::default()
        };
        assert!(matches!(
            section.to_constraints(),
            Err(AgentError::Config(_))
        ));
    }

    #[test]
    fn test_deadline_must_follow_start() {
        let section = ScheduleSection {
            start: "18:00".to_string(),
            end: "09:00".to_string(),
            ..ScheduleSection::default()
        };
        assert!(section.to_constraints().is_err());
    }

    #[test]
    fn test_invalid_weather_is_config_error() {
        let section = ScheduleSection {
            weather: "sunny".to_string(),
            ..ScheduleSection::default()
        };
        assert!(matches!(
            section.to_constraints(),
            Err(AgentError::Config(_))
        ));
    }
}
