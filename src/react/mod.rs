//! 认知层：动作解析、回合日志、ReAct 主循环、提示词与反思修正

pub mod events;
pub mod loop_;
pub mod parser;
pub mod prompt;
pub mod reflection;
pub mod turn;

pub use events::ReactEvent;
pub use loop_::{react_loop, ReactResult, ReactSession, MAX_REACT_STEPS, UNPARSEABLE_ACTION};
pub use parser::{extract_json_block, parse_action, ActionInvocation};
pub use prompt::{build_reflection_prompt, build_task_prompt, MIN_STOP_MINUTES};
pub use reflection::{plan_with_reflection, ReflectionOutcome};
pub use turn::{Turn, TurnKind, TurnLog};
