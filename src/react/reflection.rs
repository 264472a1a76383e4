//! 反思修正
//!
//! 单次修正通道，不是收敛循环：跑一次 ReAct 得到行程，推演一次；
//! 不可行则向推理服务发出一次检讨请求，宽松解析替换行程并再推演一次，
//! 无论结果如何都直接返回。修订解析失败时保留原行程并标记降级。

use crate::core::AgentError;
use crate::llm::Message;
use crate::react::loop_::{react_loop, send_event, ReactSession};
use crate::react::parser::extract_json_block;
use crate::react::prompt::build_reflection_prompt;
use crate::react::ReactEvent;
use crate::schedule::{simulate, Constraints, Plan, SimulationResult};

/// 修订行程预览最大字符数
const REFLECTION_PREVIEW_CHARS: usize = 200;

/// 反思校验后的规划结果
#[derive(Debug)]
pub struct ReflectionOutcome {
    pub plan: Plan,
    pub result: SimulationResult,
    /// 行程是否被修正通道替换
    pub revised: bool,
    /// 修订解析失败，保留了原行程
    pub degraded: bool,
}

/// 规划一次行程并做可行性校验，最多一次反思修正
pub async fn plan_with_reflection(
    session: &ReactSession<'_>,
    instructions: &str,
    constraints: &Constraints,
) -> Result<ReflectionOutcome, AgentError> {
    let first = react_loop(session, instructions).await?;
    let result = simulate(&first.plan, constraints);

    if result.feasible {
        return Ok(ReflectionOutcome {
            plan: first.plan,
            result,
            revised: false,
            degraded: false,
        });
    }

    tracing::info!("行程超時，進入 Reflection 檢討");
    let prompt = build_reflection_prompt(&first.plan, constraints);
    let response = session
        .llm
        .complete(&[Message::user(prompt)])
        .await
        .map_err(AgentError::Llm)?;

    let revised = extract_json_block(&response)
        .and_then(|json| Plan::from_json(&json).ok())
        .filter(|plan| !plan.is_empty());

    match revised {
        Some(plan) => {
            send_event(&session.event_tx, ReactEvent::Reflection {
                preview: preview(&plan.to_json()),
            });
            let result = simulate(&plan, constraints);
            Ok(ReflectionOutcome {
                plan,
                result,
                revised: true,
                degraded: false,
            })
        }
        None => {
            tracing::warn!("修訂行程無法解析，保留原行程");
            Ok(ReflectionOutcome {
                plan: first.plan,
                result,
                revised: false,
                degraded: true,
            })
        }
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > REFLECTION_PREVIEW_CHARS {
        format!(
            "{}...",
            text.chars().take(REFLECTION_PREVIEW_CHARS).collect::<String>()
        )
    } else {
        text.to_string()
    }
}
