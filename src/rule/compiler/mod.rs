// 模式编译：原始模式串 → 运行时匹配器（每快照编译一次）
mod compiled;
mod matcher;

// 对外只导出具体内容，不导出模块名
pub use compiled::{CompiledRule, CompiledRuleSet};
pub use matcher::Matcher;
