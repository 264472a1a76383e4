//! Agent 错误类型
//!
//! 只保留会跨越 API 边界的失败：LLM 调用、配置、回合预算耗尽。
//! 动作解析失败与工具失败在循环内部降级为 Observation，不在此列。

use thiserror::Error;

/// Agent 运行过程中允许向调用方传播的错误
#[derive(Error, Debug)]
pub enum AgentError {
    /// 推理服务调用失败（网络 / 凭证 / 端点），视为致命，不在内部重试
    #[error("LLM error: {0}")]
    Llm(String),

    /// 配置缺失或非法（时间格式、天气取值、端点凭证）
    #[error("Config error: {0}")]
    Config(String),

    /// ReAct 循环达到最大回合数仍未产出终答，显式失败，不产出行程
    #[error("Round budget exceeded after {0} steps")]
    RoundBudgetExceeded(usize),
}
