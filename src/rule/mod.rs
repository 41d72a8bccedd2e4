// 规则域：模型 + 编译 + 校验 + 管理 + 交换
pub mod compiler;
pub mod core;
pub mod exchange;
pub mod manager;
pub mod validator;

// 导出常用项
pub use compiler::{CompiledRule, CompiledRuleSet, Matcher};
pub use core::{DownloadEvent, MatchField, RouteTarget, RoutingRule};
pub use exchange::{ImportPreview, RuleExchange, RuleExportDocument};
pub use manager::RuleSetManager;
pub use validator::RuleValidator;
