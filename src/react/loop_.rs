//! ReAct 主循环
//!
//! THINK -> {ACT, DONE}；ACT -> OBSERVE -> THINK；回合预算耗尽转 ABORTED。
//! 每个判定点都降级处理：动作解析失败与工具失败写回 Observation 继续，
//! 终答负载解析失败降级为空行程；只有推理服务调用失败向上传播。
//! 可选 event_tx：向前端推送 Thinking / ToolCall / Observation / FinalPlan。

use tokio::sync::mpsc;

use crate::core::AgentError;
use crate::llm::LlmClient;
use crate::react::parser::{extract_json_block, parse_action};
use crate::react::{ReactEvent, Turn, TurnLog};
use crate::schedule::Plan;
use crate::tools::ToolExecutor;

/// 单次规划内最大 THINK 回合数，防止死循环
pub const MAX_REACT_STEPS: usize = 8;

/// 终答标记：出现即进入 DONE，尾部负载解析为行程
const FINAL_MARKER: &str = "Final Answer";

/// 无法解析动作时写入日志的固定 Observation
pub const UNPARSEABLE_ACTION: &str = "無法解析動作";

/// 思考内容展示最大字符数
const THINKING_PREVIEW_CHARS: usize = 800;
/// Observation 预览最大字符数
const OBSERVATION_PREVIEW_CHARS: usize = 200;

/// ReAct 循环执行结果：终答行程、完整回合日志与消耗的回合数
#[derive(Debug)]
pub struct ReactResult {
    pub plan: Plan,
    pub turns: Vec<Turn>,
    pub rounds: usize,
}

/// ReAct 会话配置
pub struct ReactSession<'a> {
    /// 推理服务客户端（必需）
    pub llm: &'a dyn LlmClient,
    /// 工具执行器（必需）
    pub executor: &'a ToolExecutor,
    /// 最大 THINK 回合数
    pub max_steps: usize,
    /// 可选：事件推送通道
    pub event_tx: Option<&'a mpsc::UnboundedSender<ReactEvent>>,
}

impl<'a> ReactSession<'a> {
    /// 创建最小配置的 ReactSession
    pub fn new(llm: &'a dyn LlmClient, executor: &'a ToolExecutor) -> Self {
        Self {
            llm,
            executor,
            max_steps: MAX_REACT_STEPS,
            event_tx: None,
        }
    }

    /// 设置最大回合数
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// 设置事件推送通道
    pub fn with_event_tx(mut self, tx: &'a mpsc::UnboundedSender<ReactEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }
}

pub(crate) fn send_event(
    tx: &Option<&mpsc::UnboundedSender<ReactEvent>>,
    ev: ReactEvent,
) {
    if let Some(t) = tx {
        let _ = t.send(ev);
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}

/// 执行 ReAct 循环
///
/// 以任务指令开局建立回合日志，每回合将日志整体渲染后调用推理服务：
/// 含终答标记则提取尾部 JSON 为行程返回；识别出动作则顺序调度工具并写回
/// Observation；两种编码都不匹配则写回固定的解析失败 Observation。
/// 达到回合预算仍未终答时返回 RoundBudgetExceeded，不产出行程。
pub async fn react_loop(
    session: &ReactSession<'_>,
    instructions: &str,
) -> Result<ReactResult, AgentError> {
    let event_tx = session.event_tx;
    let mut log = TurnLog::new(instructions);

    for step in 0..session.max_steps {
        send_event(&event_tx, ReactEvent::StepUpdate {
            step,
            max_steps: session.max_steps,
        });
        send_event(&event_tx, ReactEvent::Thinking);

        let output = session
            .llm
            .complete(&log.to_messages())
            .await
            .map_err(AgentError::Llm)?;

        send_event(&event_tx, ReactEvent::ThinkingContent {
            text: preview(&output, THINKING_PREVIEW_CHARS),
        });

        // ---- 终答：提取标记之后的 JSON 负载 ----
        if let Some(idx) = output.find(FINAL_MARKER) {
            let tail = &output[idx + FINAL_MARKER.len()..];
            let plan = extract_json_block(tail)
                .and_then(|json| Plan::from_json(&json).ok())
                .unwrap_or_default();

            if plan.is_empty() {
                // 降级：记录在案的空行程，而非失败
                tracing::warn!(step, "終答負載無法解析，降級為空行程");
                send_event(&event_tx, ReactEvent::Error {
                    text: "終答負載無法解析".to_string(),
                });
            } else {
                send_event(&event_tx, ReactEvent::FinalPlan {
                    json: plan.to_json(),
                });
            }

            log.push(Turn::terminal(output));
            return Ok(ReactResult {
                plan,
                turns: log.into_turns(),
                rounds: step + 1,
            });
        }

        // ---- 动作：顺序调度，一回合只执行一个动作 ----
        match parse_action(&output) {
            Some(invocation) => {
                log.push(Turn::action(output));
                send_event(&event_tx, ReactEvent::ToolCall {
                    tool: invocation.name.clone(),
                    argument: invocation.argument.clone(),
                });

                let outcome = session
                    .executor
                    .dispatch(&invocation.name, &invocation.argument)
                    .await;
                if outcome.failed {
                    send_event(&event_tx, ReactEvent::ToolFailure {
                        tool: invocation.name.clone(),
                        reason: outcome.text.clone(),
                    });
                } else {
                    send_event(&event_tx, ReactEvent::Observation {
                        tool: invocation.name.clone(),
                        preview: preview(&outcome.text, OBSERVATION_PREVIEW_CHARS),
                    });
                }
                log.push(Turn::observation(outcome.text));
            }
            None => {
                tracing::debug!(step, "無法解析動作，寫回固定 Observation");
                log.push(Turn::thought(output));
                log.push(Turn::observation(UNPARSEABLE_ACTION));
            }
        }
    }

    send_event(&event_tx, ReactEvent::Error {
        text: format!("達到最大回合數限制 ({})", session.max_steps),
    });
    Err(AgentError::RoundBudgetExceeded(session.max_steps))
}
