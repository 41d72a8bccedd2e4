//! 编译后规则结构（快照执行单元）
//! 原始规则在快照构建时逐字段定型为Matcher，匹配路径零字符串解析

use super::matcher::Matcher;
use crate::rule::core::{MatchField, RoutingRule};

/// 编译后的单条规则
/// 未激活字段（trim后为空）为None，求值时直接跳过
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// 原始规则（保留id/name/folder与原始模式串）
    pub rule: RoutingRule,
    pub mime_matcher: Option<Matcher>,
    pub file_url_matcher: Option<Matcher>,
    pub referrer_matcher: Option<Matcher>,
    pub filename_matcher: Option<Matcher>,
}

impl CompiledRule {
    /// 从线格式规则编译（每字段至多编译一次）
    /// 存储中可能存在绕过校验的手工规则：trim与降级在此兜底
    pub fn compile(rule: &RoutingRule) -> Self {
        let compile_field = |field: MatchField| -> Option<Matcher> {
            let pattern = rule.pattern(field).trim();
            if pattern.is_empty() {
                return None;
            }
            let matcher = match field {
                MatchField::Filename => Matcher::parse_filename(pattern),
                _ => Matcher::parse(pattern),
            };
            log::trace!("Compiled {} matcher: {}", field, matcher.describe());
            Some(matcher)
        };

        Self {
            rule: rule.clone(),
            mime_matcher: compile_field(MatchField::MimeType),
            file_url_matcher: compile_field(MatchField::FileUrl),
            referrer_matcher: compile_field(MatchField::ReferrerUrl),
            filename_matcher: compile_field(MatchField::Filename),
        }
    }

    /// 是否惰性规则（无任何激活字段，永不命中）
    pub fn is_inert(&self) -> bool {
        self.mime_matcher.is_none()
            && self.file_url_matcher.is_none()
            && self.referrer_matcher.is_none()
            && self.filename_matcher.is_none()
    }
}

/// 编译后的规则集快照
/// 不可变：规则集变更时整体重建并替换，一次route调用只见一个快照
#[derive(Debug, Clone, Default)]
pub struct CompiledRuleSet {
    pub rules: Vec<CompiledRule>,
}

impl CompiledRuleSet {
    /// 按列表顺序编译全部规则（顺序即匹配优先级）
    pub fn compile(rules: &[RoutingRule]) -> Self {
        log::debug!("Compiling rule set snapshot: {} rules", rules.len());
        Self {
            rules: rules.iter().map(CompiledRule::compile).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
