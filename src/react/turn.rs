//! 回合日志
//!
//! 循环的全部记忆：以任务指令开局的只追加 Turn 序列，可序列化，
//! 每次调用推理服务时整体渲染为消息列表，不做不透明的字符串拼接。

use serde::{Deserialize, Serialize};

use crate::llm::Message;

/// 回合类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    /// 推理服务的一段思考输出
    Thought,
    /// 包含已识别动作请求的输出
    Action,
    /// 工具回报或固定的解析失败回报
    Observation,
    /// 含终答标记的输出
    Final,
}

/// 单个回合
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub kind: TurnKind,
    pub text: String,
}

impl Turn {
    pub fn thought(text: impl Into<String>) -> Self {
        Self {
            kind: TurnKind::Thought,
            text: text.into(),
        }
    }

    pub fn action(text: impl Into<String>) -> Self {
        Self {
            kind: TurnKind::Action,
            text: text.into(),
        }
    }

    pub fn observation(text: impl Into<String>) -> Self {
        Self {
            kind: TurnKind::Observation,
            text: text.into(),
        }
    }

    pub fn terminal(text: impl Into<String>) -> Self {
        Self {
            kind: TurnKind::Final,
            text: text.into(),
        }
    }
}

/// 回合日志：任务指令 + 只追加的回合序列
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnLog {
    instructions: String,
    turns: Vec<Turn>,
}

impl TurnLog {
    pub fn new(instructions: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            turns: Vec::new(),
        }
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn into_turns(self) -> Vec<Turn> {
        self.turns
    }

    /// 渲染为推理服务的消息列表：指令为 system，模型输出为 assistant，回报为 user
    pub fn to_messages(&self) -> Vec<Message> {
        let mut messages = vec![Message::system(self.instructions.clone())];
        for turn in &self.turns {
            match turn.kind {
                TurnKind::Thought | TurnKind::Action | TurnKind::Final => {
                    messages.push(Message::assistant(turn.text.clone()));
                }
                TurnKind::Observation => {
                    messages.push(Message::user(format!("Observation: {}", turn.text)));
                }
            }
        }
        messages
    }
}
