//! 行程时间推演
//!
//! 纯函数 simulate：按游览顺序推进时钟，区块之间插入交通段，
//! 最终时钟不晚于截止时间即为可行。不做任何 IO，不依赖循环状态。
//!
//! 天气系数策略：恶劣天气的 1.5 倍系数作用于每一条模拟产生的交通段。

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::schedule::Plan;

/// 恶劣天气下交通时长放大系数（结果截断到整分钟）
pub const ADVERSE_TRANSIT_FACTOR: f64 = 1.5;

/// 天气：影响交通段时长
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weather {
    Clear,
    Adverse,
}

impl std::str::FromStr for Weather {
    type Err = String;

    /// 配置取值 clear / adverse；兼容 rain 写法
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clear" => Ok(Weather::Clear),
            "adverse" | "rain" => Ok(Weather::Adverse),
            other => Err(format!("unknown weather: {}", other)),
        }
    }
}

/// 行程约束：出发、截止、区块间交通分钟数、天气
#[derive(Debug, Clone, Copy)]
pub struct Constraints {
    pub start: NaiveTime,
    pub deadline: NaiveTime,
    pub transit_minutes: u32,
    pub weather: Weather,
}

/// 时间轴条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Activity,
    Transit,
}

/// 时间轴条目：相邻条目首尾相接
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub label: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub kind: EntryKind,
}

/// 推演结果：时间轴与可行性
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub timeline: Vec<TimelineEntry>,
    pub feasible: bool,
}

/// 按 Plan 顺序推演时钟
///
/// 区块一视同仁：午餐等非游览安排就是一个普通区块，两侧同样插入交通段。
/// 内部以锚定日期做跨日算术，时间轴条目只保留 HH:MM。
pub fn simulate(plan: &Plan, constraints: &Constraints) -> SimulationResult {
    let day = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let deadline = day.and_time(constraints.deadline);
    let mut clock: NaiveDateTime = day.and_time(constraints.start);

    let blocks = plan.blocks();
    let mut timeline = Vec::with_capacity(blocks.len() * 2);

    for (i, block) in blocks.iter().enumerate() {
        let finish = clock + Duration::minutes(i64::from(block.minutes));
        timeline.push(TimelineEntry {
            label: block.label().to_string(),
            start: clock.time(),
            end: finish.time(),
            kind: EntryKind::Activity,
        });
        clock = finish;

        // 最后一个区块之后没有交通段
        if i + 1 < blocks.len() {
            let finish = clock + Duration::minutes(transit_leg_minutes(constraints));
            timeline.push(TimelineEntry {
                label: transit_label(constraints.weather),
                start: clock.time(),
                end: finish.time(),
                kind: EntryKind::Transit,
            });
            clock = finish;
        }
    }

    SimulationResult {
        timeline,
        feasible: clock <= deadline,
    }
}

fn transit_leg_minutes(constraints: &Constraints) -> i64 {
    match constraints.weather {
        Weather::Clear => i64::from(constraints.transit_minutes),
        Weather::Adverse => {
            (f64::from(constraints.transit_minutes) * ADVERSE_TRANSIT_FACTOR) as i64
        }
    }
}

fn transit_label(weather: Weather) -> String {
    match weather {
        Weather::Clear => "前往下一景點".to_string(),
        Weather::Adverse => "前往下一景點（因天候延誤）".to_string(),
    }
}
