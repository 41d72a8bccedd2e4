//! 下载路由器门面
//! 核心职责：
//! 1. 持有编译后规则集的不可变快照（Arc整体替换，绝不原地修改）
//! 2. route：下载事件 → 目标路径建议
//! 3. 失败吸收契约：路由路径上的一切内部失败退化为「无建议」，
//!    宿主回落到默认下载行为；该行为是明确设计的代码路径而非兜底异常

use std::sync::Arc;

use super::selector::RuleSelector;
use crate::config::RouterConfig;
use crate::rule::compiler::CompiledRuleSet;
use crate::rule::core::{DownloadEvent, RouteTarget, RoutingRule};

/// 下载路由器
/// 每次规则集变更后由调用方重建或替换快照；一次route调用自始至终
/// 只读取它捕获的那一份快照，外部并发替换不会被扫描中途观察到
#[derive(Debug, Clone)]
pub struct DownloadRouter {
    snapshot: Arc<CompiledRuleSet>,
    config: RouterConfig,
}

impl DownloadRouter {
    /// 从规则列表构建（一次性编译为快照）
    pub fn new(rules: &[RoutingRule], config: RouterConfig) -> Self {
        Self {
            snapshot: Arc::new(CompiledRuleSet::compile(rules)),
            config,
        }
    }

    /// 复用已编译快照构建（管理器snapshot()的产物）
    pub fn with_snapshot(snapshot: Arc<CompiledRuleSet>, config: RouterConfig) -> Self {
        Self { snapshot, config }
    }

    /// 整体替换快照（规则集变更通知后调用）
    pub fn replace_snapshot(&mut self, snapshot: Arc<CompiledRuleSet>) {
        log::debug!("Router snapshot replaced: {} rules", snapshot.len());
        self.snapshot = snapshot;
    }

    /// 当前快照（只读共享）
    pub fn snapshot(&self) -> Arc<CompiledRuleSet> {
        self.snapshot.clone()
    }

    /// 路由一个下载事件
    /// 返回None表示无建议（未命中任何规则），宿主按默认路径下载；
    /// 本方法不panic、不返回错误，见模块头的失败吸收契约
    pub fn route(&self, event: &DownloadEvent) -> Option<RouteTarget> {
        let snapshot = self.snapshot.clone();
        let hit = RuleSelector::select(&snapshot, event)?;

        let filename = if event.filename.is_empty() {
            self.config.fallback_filename.as_str()
        } else {
            event.filename.as_str()
        };
        let destination = format!("{}/{}", hit.rule.folder, filename);
        log::debug!(
            "Route hit: rule={} folder={} destination={}",
            hit.rule.id,
            hit.rule.folder,
            destination
        );

        Some(RouteTarget {
            rule_id: hit.rule.id.clone(),
            rule_name: hit.rule.name.clone(),
            folder: hit.rule.folder.clone(),
            destination,
        })
    }
}
