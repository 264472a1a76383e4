//! 工具注册表
//!
//! 所有工具实现 Tool trait（name / description / invoke），由 ToolRegistry 按名注册与查找；
//! 注册表构建完成后只读，调用期不再变更。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

/// 工具 trait：名称、描述（供 LLM 理解）、异步执行（参数为单个字符串）
#[async_trait]
pub trait Tool: Send + Sync {
    /// 工具名称（Action 行与 metadata 标记中的动作名）
    fn name(&self) -> &str;

    /// 工具描述（供 LLM 理解功能与调用格式）
    fn description(&self) -> &str;

    /// 执行工具
    async fn invoke(&self, argument: &str) -> Result<String, String>;
}

/// 工具注册表：按名称存储 Arc<dyn Tool>，支持 register / get / tool_names
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// 返回 (name, description) 列表，用于生成 prompt 中的可用工具段落
    pub fn tool_descriptions(&self) -> Vec<(String, String)> {
        self.tools
            .iter()
            .map(|(name, tool)| (name.clone(), tool.description().to_string()))
            .collect()
    }
}
