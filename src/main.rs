//! Swallow - Rust 旅行规划智能体
//!
//! 入口：初始化日志、加载配置、构建 LLM 与工具，运行一次带反思校验的
//! 行程规划并打印时间轴。

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use swallow::config::load_config;
use swallow::core::AgentError;
use swallow::llm::OpenAiClient;
use swallow::react::{build_task_prompt, plan_with_reflection, ReactSession};
use swallow::schedule::EntryKind;
use swallow::tools::{OpenStatusTool, ToolExecutor, ToolRegistry, WeatherTool};

const TASK: &str = "幫我規劃今天去美泉宮、美景宮、聖史蒂芬大教堂的一日行程。";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 日志：默认 info，可通过 RUST_LOG 覆盖
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with(fmt::layer())
        .init();

    let cfg = load_config(None).context("Failed to load config")?;
    let constraints = cfg.schedule.to_constraints()?;

    // 凭证检查：无端点且无 API Key 时立即失败，不进入循环
    if cfg.llm.base_url.is_none() && std::env::var("OPENAI_API_KEY").is_err() {
        return Err(AgentError::Config(
            "OPENAI_API_KEY not set and llm.base_url not configured".to_string(),
        )
        .into());
    }

    let llm = OpenAiClient::new(cfg.llm.base_url.as_deref(), &cfg.llm.model, None);

    let mut registry = ToolRegistry::new();
    registry.register(WeatherTool);
    registry.register(OpenStatusTool::new(cfg.tools.closed_places.clone()));
    let executor = ToolExecutor::new(registry, cfg.tools.tool_timeout_secs);

    let session = ReactSession::new(&llm, &executor).with_max_steps(cfg.react.max_steps);
    let prompt = build_task_prompt(TASK, &constraints, &executor.tool_descriptions());

    let outcome = plan_with_reflection(&session, &prompt, &constraints)
        .await
        .context("Trip planning failed")?;

    println!("\n=== 行程時間模擬 ===");
    for entry in &outcome.result.timeline {
        match entry.kind {
            EntryKind::Activity => println!(
                "{}–{} 參觀 {}",
                entry.start.format("%H:%M"),
                entry.end.format("%H:%M"),
                entry.label
            ),
            EntryKind::Transit => println!(
                "{}–{} {}",
                entry.start.format("%H:%M"),
                entry.end.format("%H:%M"),
                entry.label
            ),
        }
    }
    if outcome.revised {
        println!("（行程經過一次反思修正）");
    }
    if outcome.degraded {
        println!("（修訂行程無法解析，以下為原行程）");
    }
    println!(
        "{}",
        if outcome.result.feasible {
            "行程可行！"
        } else {
            "行程超時！"
        }
    );

    Ok(())
}
