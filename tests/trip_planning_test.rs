//! 行程规划集成测试：脚本化 LLM 驱动完整的 ReAct + 模拟 + 反思流程

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use tokio::sync::mpsc;

    use swallow::core::AgentError;
    use swallow::llm::MockLlmClient;
    use swallow::react::{
        build_task_prompt, plan_with_reflection, react_loop, ReactEvent, ReactSession, TurnKind,
    };
    use swallow::schedule::{simulate, Constraints, EntryKind, Weather};
    use swallow::tools::{OpenStatusTool, ToolExecutor, ToolRegistry, WeatherTool};

    fn executor() -> ToolExecutor {
        let mut registry = ToolRegistry::new();
        registry.register(WeatherTool);
        registry.register(OpenStatusTool::default());
        ToolExecutor::new(registry, 5)
    }

    fn constraints(weather: Weather) -> Constraints {
        Constraints {
            start: NaiveTime::parse_from_str("09:00", "%H:%M").unwrap(),
            deadline: NaiveTime::parse_from_str("18:00", "%H:%M").unwrap(),
            transit_minutes: 30,
            weather,
        }
    }

    fn task_prompt(executor: &ToolExecutor, weather: Weather) -> String {
        build_task_prompt(
            "幫我規劃今天去美泉宮、美景宮、聖史蒂芬大教堂的一日行程。",
            &constraints(weather),
            &executor.tool_descriptions(),
        )
    }

    #[tokio::test]
    async fn test_full_react_run_with_both_action_encodings() {
        // 回合 1：行格式动作；回合 2：metadata 标记动作；回合 3：终答
        let llm = MockLlmClient::new(vec![
            "Thought: 先確認天氣\nAction: 查天氣(維也納)".to_string(),
            concat!(
                "<|channel|>commentary to=tool name=查詢開放狀態 ",
                "<|constrain|>json<|message|>{\"place\":\"美景宮\"}"
            )
            .to_string(),
            concat!(
                "Thought: 美景宮休館，改排兩個景點\n",
                "Final Answer:\n```json\n",
                "[{\"place\": \"美泉宮\", \"minutes\": 120}, ",
                "{\"place\": \"聖史蒂芬大教堂\", \"minutes\": 120}]\n```"
            )
            .to_string(),
        ]);
        let executor = executor();
        let session = ReactSession::new(&llm, &executor);

        let result = react_loop(&session, &task_prompt(&executor, Weather::Clear))
            .await
            .unwrap();

        assert_eq!(result.rounds, 3);
        assert_eq!(result.plan.len(), 2);
        assert_eq!(result.plan.blocks()[0].place, "美泉宮");

        let kinds: Vec<TurnKind> = result.turns.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TurnKind::Action,
                TurnKind::Observation,
                TurnKind::Action,
                TurnKind::Observation,
                TurnKind::Final,
            ]
        );
        assert_eq!(result.turns[1].text, "今天維也納是下雨天");
        assert_eq!(result.turns[3].text, "美景宮 今日休館");

        // 终答行程推演：09:00–11:00、11:00–11:30 交通、11:30–13:30
        let sim = simulate(&result.plan, &constraints(Weather::Clear));
        assert!(sim.feasible);
        assert_eq!(sim.timeline.len(), 3);
        assert_eq!(
            sim.timeline[0].end,
            NaiveTime::parse_from_str("11:00", "%H:%M").unwrap()
        );
        assert_eq!(sim.timeline[1].kind, EntryKind::Transit);
        assert_eq!(
            sim.timeline[2].end,
            NaiveTime::parse_from_str("13:30", "%H:%M").unwrap()
        );
    }

    #[tokio::test]
    async fn test_budget_exhaustion_is_explicit_abort() {
        // 永远不给终答的脚本：恰好 8 次 THINK 后显式失败
        let llm = MockLlmClient::new(vec!["Thought: 我還在想。".to_string()]);
        let executor = executor();
        let session = ReactSession::new(&llm, &executor);

        let err = react_loop(&session, &task_prompt(&executor, Weather::Clear))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::RoundBudgetExceeded(8)));
        assert_eq!(llm.calls(), 8);
    }

    #[tokio::test]
    async fn test_infeasible_plan_reflected_and_resimulated() {
        // 初始行程 1110 分钟，远超 540 分钟预算；修订版缩短后可行
        let llm = MockLlmClient::new(vec![
            concat!(
                "Final Answer: [",
                "{\"place\": \"美泉宮\", \"minutes\": 300}, ",
                "{\"place\": \"午餐\", \"minutes\": 120}, ",
                "{\"place\": \"美景宮\", \"minutes\": 300}, ",
                "{\"place\": \"聖史蒂芬大教堂\", \"minutes\": 300}]"
            )
            .to_string(),
            concat!(
                "1. 原行程明顯超時。\n3. 改進後的版本：\n",
                "[{\"place\": \"美泉宮\", \"minutes\": 150}, ",
                "{\"place\": \"午餐\", \"minutes\": 60}, ",
                "{\"place\": \"聖史蒂芬大教堂\", \"minutes\": 150}]"
            )
            .to_string(),
        ]);
        let executor = executor();
        let session = ReactSession::new(&llm, &executor);

        let outcome = plan_with_reflection(
            &session,
            &task_prompt(&executor, Weather::Clear),
            &constraints(Weather::Clear),
        )
        .await
        .unwrap();

        assert!(outcome.revised);
        assert!(outcome.result.feasible);
        assert_eq!(outcome.plan.len(), 3);
        // ReAct 一次 + 反思一次，往返次数有界
        assert_eq!(llm.calls(), 2);
    }

    #[tokio::test]
    async fn test_events_stream_during_run() {
        let llm = MockLlmClient::new(vec![
            "Action: 查天氣(維也納)".to_string(),
            "Final Answer: [{\"place\": \"美泉宮\", \"minutes\": 120}]".to_string(),
        ]);
        let executor = executor();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let session = ReactSession::new(&llm, &executor).with_event_tx(&tx);

        react_loop(&session, &task_prompt(&executor, Weather::Adverse))
            .await
            .unwrap();

        let mut saw_tool_call = false;
        let mut saw_final_plan = false;
        while let Ok(event) = rx.try_recv() {
            match event {
                ReactEvent::ToolCall { tool, .. } => {
                    assert_eq!(tool, "查天氣");
                    saw_tool_call = true;
                }
                ReactEvent::FinalPlan { .. } => saw_final_plan = true,
                _ => {}
            }
        }
        assert!(saw_tool_call);
        assert!(saw_final_plan);
    }
}
