//! 规则求值器
//! 语义：激活字段谓词的严格AND，全部命中才算规则命中；
//! 未激活字段不参与（绝不否决）；零激活字段的规则永不命中

use crate::rule::compiler::CompiledRule;
use crate::rule::core::DownloadEvent;

pub struct RuleEvaluator;

impl RuleEvaluator {
    /// 规则是否命中事件
    /// 逐字段短路：任一激活字段未命中立即返回false
    pub fn matches(rule: &CompiledRule, event: &DownloadEvent) -> bool {
        let checks = [
            (&rule.mime_matcher, event.mime.as_str()),
            (&rule.file_url_matcher, event.url.as_str()),
            (&rule.referrer_matcher, event.referrer.as_str()),
            (&rule.filename_matcher, event.filename.as_str()),
        ];

        let mut any_active = false;
        for (matcher, subject) in checks {
            if let Some(matcher) = matcher {
                any_active = true;
                if !matcher.matches(subject) {
                    return false;
                }
            }
        }
        // 惰性规则不变量：无激活字段的规则对任何事件都不命中
        any_active
    }
}
