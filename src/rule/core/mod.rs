mod enums;
mod event;
mod rule;

// 导出常用项
pub use enums::MatchField;
pub use event::{DownloadEvent, RouteTarget};
pub use rule::RoutingRule;
