// 路由域：求值 + 选择 + 门面 + 推测预览
mod evaluator;
mod preview;
mod router;
mod selector;

// 导出常用项
pub use evaluator::RuleEvaluator;
pub use preview::{MatchPreview, PreviewVerdict};
pub use router::DownloadRouter;
pub use selector::RuleSelector;
