//! 提示词构建
//!
//! ReAct 任务提示与反思修正提示都由约束动态拼出，格式采用
//! Thought / Action / Observation / Final Answer 协议，终答要求 JSON 数组行程。

use crate::schedule::{Constraints, Plan, Weather};

/// 每个景点的建议停留下限（分钟），写入任务约束段
pub const MIN_STOP_MINUTES: u32 = 120;

/// 构建 ReAct 任务提示：协议说明 + 约束 + 可用工具 + 任务
pub fn build_task_prompt(
    task: &str,
    constraints: &Constraints,
    tools: &[(String, String)],
) -> String {
    let tool_lines: Vec<String> = tools
        .iter()
        .map(|(name, description)| format!("- {}：{}", name, description))
        .collect();

    format!(
        "你是一個旅行規劃助理，使用 ReAct 模式回答問題，思考請用繁體中文。\n\
         格式必須包含以下幾種：\n\
         Thought: 你的推理\n\
         Action: 你要執行的工具（格式：工具名(參數)）\n\
         Observation: 工具回傳的結果\n\
         Final Answer: 請用 JSON 格式輸出最終行程，例如：\n\
         [\n\
           {{\"place\": \"美泉宮\", \"minutes\": 120}},\n\
           {{\"place\": \"聖史蒂芬大教堂\", \"minutes\": 120}}\n\
         ]\n\n\
         約束：每個景點至少 {min_stop} 分鐘；景點之間交通 {transit} 分鐘；\
         {start} 出發且 {deadline} 前結束；若休館則調整。\n\n\
         工具僅允許：\n{tools}\n\n\
         現在任務：{task}",
        min_stop = MIN_STOP_MINUTES,
        transit = constraints.transit_minutes,
        start = constraints.start.format("%H:%M"),
        deadline = constraints.deadline.format("%H:%M"),
        tools = tool_lines.join("\n"),
        task = task,
    )
}

/// 构建反思修正提示：附上原行程与约束，要求检讨并给出同结构的改进版
pub fn build_reflection_prompt(plan: &Plan, constraints: &Constraints) -> String {
    let weather = match constraints.weather {
        Weather::Clear => "天氣晴朗",
        Weather::Adverse => "天候不佳，交通時間會延長",
    };

    format!(
        "你剛完成以下一日行程規劃：\n{plan}\n\n\
         任務原始條件：\n\
         - 每個景點至少 {min_stop} 分鐘\n\
         - 景點之間交通 {transit} 分鐘（{weather}）\n\
         - {start} 出發，必須在 {deadline} 前結束\n\n\
         請進行 Reflection：\n\
         1. 回顧這份計劃的優點與缺點。\n\
         2. 找出可能的問題（例如是否超時，時間分配是否合理）。\n\
         3. 提供改進後的版本（JSON 格式，結構與原本相同）。",
        plan = plan.to_json(),
        min_stop = MIN_STOP_MINUTES,
        transit = constraints.transit_minutes,
        weather = weather,
        start = constraints.start.format("%H:%M"),
        deadline = constraints.deadline.format("%H:%M"),
    )
}
