//! dlrouter - 基于规则的下载分流引擎
//! 按有序规则列表匹配下载事件（MIME/地址/来源/文件名），
//! 首条命中的规则给出目标目录建议；未命中走宿主默认下载路径

pub mod config;
pub mod error;
pub mod router;
pub mod rule;
pub mod store;

// 导出全局错误类型
pub use self::error::{RouterError, RouterResult};

// 导出配置
pub use self::config::RouterConfig;

// 导出规则域核心结构与入口
pub use self::rule::compiler::{CompiledRule, CompiledRuleSet, Matcher};
pub use self::rule::core::{DownloadEvent, MatchField, RouteTarget, RoutingRule};
pub use self::rule::exchange::{ImportPreview, RuleExchange, RuleExportDocument};
pub use self::rule::manager::RuleSetManager;
pub use self::rule::validator::RuleValidator;

// 导出路由域核心接口
pub use self::router::{DownloadRouter, MatchPreview, PreviewVerdict, RuleEvaluator, RuleSelector};

// 导出设置存储抽象与内置实现
pub use self::store::{JsonFileSettingsStore, MemorySettingsStore, SettingsStore};
