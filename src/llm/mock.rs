//! Mock LLM 客户端（用于测试，无需 API）
//!
//! 按脚本顺序回放预设回应；脚本耗尽后重复最后一条，便于测试「始终不给终答」的回合上限路径。

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::llm::{LlmClient, Message};

/// Mock 客户端：依序回放脚本回应
pub struct MockLlmClient {
    responses: Vec<String>,
    cursor: AtomicUsize,
}

impl MockLlmClient {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses,
            cursor: AtomicUsize::new(0),
        }
    }

    /// 已处理的 complete 调用次数
    pub fn calls(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _messages: &[Message]) -> Result<String, String> {
        if self.responses.is_empty() {
            return Err("mock: no scripted responses".to_string());
        }
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        let idx = i.min(self.responses.len() - 1);
        Ok(self.responses[idx].clone())
    }
}
