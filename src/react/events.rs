//! ReAct 过程事件：用于流式展示思考、工具调用、观察与终答

use serde::Serialize;

/// 单步过程事件（可序列化为 JSON 供前端展示）
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReactEvent {
    /// ReAct 步数更新（当前第几步）
    StepUpdate { step: usize, max_steps: usize },
    /// 正在调用 LLM 思考
    Thinking,
    /// LLM 的思考内容（预览，避免过长）
    ThinkingContent { text: String },
    /// 调用工具
    ToolCall { tool: String, argument: String },
    /// 工具回报（预览）
    Observation { tool: String, preview: String },
    /// 工具执行失败
    ToolFailure { tool: String, reason: String },
    /// 终答行程（原始 JSON）
    FinalPlan { json: String },
    /// 收到反思修正后的行程（预览）
    Reflection { preview: String },
    /// 错误
    Error { text: String },
}
