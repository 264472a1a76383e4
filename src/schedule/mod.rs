//! 行程层：计划数据模型与时间可行性推演

pub mod plan;
pub mod simulate;

pub use plan::{ActivityBlock, Plan};
pub use simulate::{
    simulate, Constraints, EntryKind, SimulationResult, TimelineEntry, Weather,
    ADVERSE_TRANSIT_FACTOR,
};
