//! Swallow - Rust 旅行规划智能体
//!
//! 模块划分：
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 错误定义
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / Mock）
//! - **react**: 动作解析、回合日志、ReAct 主循环与反思修正
//! - **schedule**: 行程数据模型与时间可行性推演
//! - **tools**: 工具注册表、执行器与内建模拟工具

pub mod config;
pub mod core;
pub mod llm;
pub mod react;
pub mod schedule;
pub mod tools;

pub use crate::core::AgentError;
