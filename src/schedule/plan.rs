//! 行程数据模型
//!
//! Plan 是有序的活动区块序列，顺序即游览顺序；线上格式为 JSON 数组，
//! 每项至少含 place 与 minutes（正整数），可选 title 与 indoor。
//! 修订行程时整体替换，不原地修改。

use serde::{Deserialize, Deserializer, Serialize};

/// 单个活动区块：一个景点、一顿饭或其他占用时段的安排
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityBlock {
    pub place: String,
    /// 停留分钟数，必须为正
    #[serde(deserialize_with = "de_positive_minutes")]
    pub minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indoor: Option<bool>,
}

impl ActivityBlock {
    pub fn new(place: impl Into<String>, minutes: u32) -> Self {
        Self {
            place: place.into(),
            minutes,
            title: None,
            indoor: None,
        }
    }

    /// 时间轴上展示的名称：优先 title，否则 place
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.place)
    }
}

fn de_positive_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let minutes = u32::deserialize(deserializer)?;
    if minutes == 0 {
        return Err(serde::de::Error::custom("minutes must be positive"));
    }
    Ok(minutes)
}

/// 行程：有序活动区块序列
///
/// 空行程只作为终答解析失败时记录在案的降级结果存在。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan(Vec<ActivityBlock>);

impl Plan {
    pub fn new(blocks: Vec<ActivityBlock>) -> Self {
        Self(blocks)
    }

    pub fn blocks(&self) -> &[ActivityBlock] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 从线上 JSON 解析；minutes 为 0 或负值时拒绝
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 序列化为线上 JSON（反思提示与日志使用）
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "[]".to_string())
    }
}
