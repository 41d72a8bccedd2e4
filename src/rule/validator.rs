//! 规则校验
//! 校验顺序（短路）：folder非空 → 至少一个匹配字段 → 各正则字段可编译
//! 手动编辑与批量导入共用同一入口；通过校验的规则才允许进入规则集

use regex::RegexBuilder;
use uuid::Uuid;

use crate::error::{RouterError, RouterResult};
use crate::rule::core::{MatchField, RoutingRule};

pub struct RuleValidator;

impl RuleValidator {
    /// 校验候选规则，成功返回规范化（全字段trim）后的副本
    /// id为空视为新建并分配新id；非空id原样保留（编辑已有规则）
    pub fn validate(candidate: &RoutingRule) -> RouterResult<RoutingRule> {
        let mut rule = candidate.trimmed();

        if rule.folder.is_empty() {
            return Err(RouterError::MissingFolder);
        }
        if !rule.has_matchers() {
            return Err(RouterError::NoMatchers);
        }
        for field in MatchField::ALL {
            Self::check_pattern(field, rule.pattern(field))?;
        }

        if rule.id.is_empty() {
            rule.id = Uuid::new_v4().to_string();
        }
        Ok(rule)
    }

    /// 单字段模式串检查
    /// 前缀符模式（'='精确、filename字段的'~'扩展名）无需编译；
    /// 其余非空模式必须是合法的大小写不敏感正则
    fn check_pattern(field: MatchField, pattern: &str) -> RouterResult<()> {
        if pattern.is_empty() || pattern.starts_with('=') {
            return Ok(());
        }
        if field == MatchField::Filename && pattern.starts_with('~') {
            return Ok(());
        }
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map(|_| ())
            .map_err(|e| RouterError::InvalidPattern {
                field,
                message: e.to_string(),
            })
    }
}
