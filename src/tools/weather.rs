//! 天气查询工具（模拟后端）
//!
//! 真实 HTTP 天气后端是外部协作方；此处用固定回报模拟，保证演示与测试可离线运行。

use async_trait::async_trait;

use crate::tools::Tool;

/// 查天氣：回报指定城市今日天气
pub struct WeatherTool;

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "查天氣"
    }

    fn description(&self) -> &str {
        "查詢指定城市今日天氣。用法：查天氣(city)"
    }

    async fn invoke(&self, _argument: &str) -> Result<String, String> {
        // 假設今天下雨
        Ok("今天維也納是下雨天".to_string())
    }
}
