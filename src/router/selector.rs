//! 规则选择器
//! 首个命中即胜出：按列表顺序扫描，命中即短路返回。
//! 规则顺序承载语义，更具体的规则应排在宽泛兜底规则之前

use super::evaluator::RuleEvaluator;
use crate::rule::compiler::{CompiledRule, CompiledRuleSet};
use crate::rule::core::DownloadEvent;

pub struct RuleSelector;

impl RuleSelector {
    /// 返回快照中第一条命中事件的规则；全部未命中返回None
    /// 同一快照+同一事件的结果是确定的（有序Vec扫描，无无序迭代）
    pub fn select<'a>(
        snapshot: &'a CompiledRuleSet,
        event: &DownloadEvent,
    ) -> Option<&'a CompiledRule> {
        snapshot
            .rules
            .iter()
            .find(|rule| RuleEvaluator::matches(rule, event))
    }
}
