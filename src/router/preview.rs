//! 推测性匹配预览（非权威）
//! 面向「当前站点可能命中哪些规则」一类的展示场景：仅依据referrerUrl
//! 字段做弱判定。注意这是比权威路由（激活字段严格AND）更宽松的
//! 推测语义，结果只用于展示提示，绝不参与实际路由决策

use crate::rule::compiler::Matcher;
use crate::rule::core::RoutingRule;

/// 预览判定（与权威匹配结果类型刻意分离）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewVerdict {
    /// referrer模式对给定地址确实命中
    ReferrerHit,
    /// 规则没有referrer模式但存在其他非空字段，可能命中
    CouldMatch,
    /// 不会命中
    NoMatch,
}

pub struct MatchPreview;

impl MatchPreview {
    /// 推测规则与给定来源地址的相关性
    /// referrer模式非空时按真实谓词判定（非法正则视为不命中）；
    /// 否则任意非空字段即视为「可能命中」
    pub fn possible_match(rule: &RoutingRule, referrer_url: &str) -> PreviewVerdict {
        let pattern = rule.referrer_url.trim();
        if !pattern.is_empty() {
            return if Matcher::parse(pattern).matches(referrer_url) {
                PreviewVerdict::ReferrerHit
            } else {
                PreviewVerdict::NoMatch
            };
        }

        let any_field_set = !rule.id.trim().is_empty()
            || !rule.name.trim().is_empty()
            || !rule.folder.trim().is_empty()
            || rule.has_matchers();
        if any_field_set {
            PreviewVerdict::CouldMatch
        } else {
            PreviewVerdict::NoMatch
        }
    }
}
