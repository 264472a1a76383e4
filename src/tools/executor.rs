//! 工具执行器
//!
//! 持有 ToolRegistry 与全局超时，dispatch(name, argument) 总是返回 ToolOutcome，
//! 未知动作、工具返回 Err、超时都转为 failed=true 的文本结果，绝不向调用方抛错；
//! 每次调用输出结构化审计日志（JSON）。

use std::time::{Duration, Instant};

use tokio::time::timeout;

use crate::tools::ToolRegistry;

/// 未知动作的固定回报文本
pub const INVALID_ACTION: &str = "無效的動作";

/// 单次工具调用的结果：文本与是否失败，总是存在
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    pub text: String,
    pub failed: bool,
}

/// 工具执行器：对每次调用施加超时，并把所有失败路径收敛为 ToolOutcome
pub struct ToolExecutor {
    registry: ToolRegistry,
    timeout: Duration,
}

impl ToolExecutor {
    pub fn new(registry: ToolRegistry, timeout_secs: u64) -> Self {
        Self {
            registry,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// 调度指定工具；同一回合内只会顺序调用，不并发
    pub async fn dispatch(&self, name: &str, argument: &str) -> ToolOutcome {
        let start = Instant::now();

        let Some(tool) = self.registry.get(name) else {
            audit(name, argument, false, "unknown", start);
            return ToolOutcome {
                text: INVALID_ACTION.to_string(),
                failed: true,
            };
        };

        let result = timeout(self.timeout, tool.invoke(argument)).await;

        let (ok, outcome): (bool, &str) = match &result {
            Ok(Ok(_)) => (true, "ok"),
            Ok(Err(_)) => (false, "error"),
            Err(_) => (false, "timeout"),
        };
        audit(name, argument, ok, outcome, start);

        match result {
            Ok(Ok(text)) => ToolOutcome {
                text,
                failed: false,
            },
            Ok(Err(e)) => ToolOutcome {
                text: format!("工具執行失敗：{}", e),
                failed: true,
            },
            Err(_) => ToolOutcome {
                text: format!("工具執行失敗：逾時（{} 秒）", self.timeout.as_secs()),
                failed: true,
            },
        }
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.registry.tool_names()
    }

    pub fn tool_descriptions(&self) -> Vec<(String, String)> {
        self.registry.tool_descriptions()
    }
}

fn audit(tool: &str, argument: &str, ok: bool, outcome: &str, start: Instant) {
    let audit = serde_json::json!({
        "event": "tool_audit",
        "tool": tool,
        "ok": ok,
        "outcome": outcome,
        "duration_ms": start.elapsed().as_millis() as u64,
        "argument_preview": preview(argument),
    });
    tracing::info!(audit = %audit.to_string(), "tool");
}

fn preview(argument: &str) -> String {
    if argument.chars().count() > 200 {
        format!("{}...", argument.chars().take(200).collect::<String>())
    } else {
        argument.to_string()
    }
}
