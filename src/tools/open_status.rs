//! 景点开放状态查询工具（模拟后端）
//!
//! 休馆名单可配置，默认假设美景宮今日休馆。

use async_trait::async_trait;

use crate::tools::Tool;

/// 查詢開放狀態：回报景点今日是否开放
pub struct OpenStatusTool {
    closed_places: Vec<String>,
}

impl OpenStatusTool {
    pub fn new(closed_places: Vec<String>) -> Self {
        Self { closed_places }
    }
}

impl Default for OpenStatusTool {
    fn default() -> Self {
        Self::new(vec!["美景宮".to_string()])
    }
}

#[async_trait]
impl Tool for OpenStatusTool {
    fn name(&self) -> &str {
        "查詢開放狀態"
    }

    fn description(&self) -> &str {
        "查詢景點今日是否開放。用法：查詢開放狀態(place)"
    }

    async fn invoke(&self, argument: &str) -> Result<String, String> {
        let place = argument.trim();
        if self.closed_places.iter().any(|p| p == place) {
            Ok(format!("{} 今日休館", place))
        } else {
            Ok(format!("{} 正常開放", place))
        }
    }
}
