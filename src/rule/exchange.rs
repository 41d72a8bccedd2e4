//! 规则导入导出（交换文档）
//! 文档结构：{ version, exportDate, rules }
//! 导出是纯序列化（不过滤不校验）；导入逐条过滤，全军覆没才整体中止

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::RouterConfig;
use crate::error::{RouterError, RouterResult};
use crate::rule::core::RoutingRule;
use crate::rule::validator::RuleValidator;

/// 导出文档线格式
/// version/exportDate为咨询性元数据，导入时不校验
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleExportDocument {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub export_date: String,
    pub rules: Vec<RoutingRule>,
}

/// 导入文档的宽松读取形态
/// rules逐元素独立反序列化：个别畸形条目丢弃，不拖垮整个导入
#[derive(Debug, Deserialize)]
struct RawImportDocument {
    rules: Vec<serde_json::Value>,
}

/// 导入替换预览计数（破坏性替换前供调用方确认）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportPreview {
    /// 现有规则条数（将被整体替换）
    pub existing: usize,
    /// 导入文档中通过校验的条数
    pub incoming: usize,
}

pub struct RuleExchange;

impl RuleExchange {
    /// 解析导入文档并过滤出通过校验的规则
    /// 失败语义：
    /// - 文档不是JSON或缺失rules数组 → MalformedDocument，整体中止
    /// - 个别条目畸形/校验失败 → 静默丢弃（debug日志）
    /// - 无任何条目存活 → EmptyImport，现有规则集不受影响
    pub fn parse_import(document: &str) -> RouterResult<Vec<RoutingRule>> {
        let doc: RawImportDocument = serde_json::from_str(document)
            .map_err(|e| RouterError::MalformedDocument(e.to_string()))?;

        let total = doc.rules.len();
        let mut accepted = Vec::with_capacity(total);
        for value in doc.rules {
            let candidate: RoutingRule = match serde_json::from_value(value) {
                Ok(candidate) => candidate,
                Err(e) => {
                    log::debug!("Import entry dropped: not a rule record: {}", e);
                    continue;
                }
            };
            match RuleValidator::validate(&candidate) {
                Ok(rule) => accepted.push(rule),
                Err(e) => log::debug!("Import entry dropped: {}", e),
            }
        }

        if accepted.is_empty() {
            return Err(RouterError::EmptyImport);
        }
        log::info!(
            "Import parsed: {} of {} entries accepted",
            accepted.len(),
            total
        );
        Ok(accepted)
    }

    /// 导出当前规则集（纯序列化：内存中的规则已通过校验）
    pub fn export(rules: &[RoutingRule], config: &RouterConfig) -> RouterResult<String> {
        let doc = RuleExportDocument {
            version: config.export_version.clone(),
            export_date: Utc::now().to_rfc3339(),
            rules: rules.to_vec(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// 导出文件名建议：download-router-rules-YYYY-MM-DD.json
    pub fn suggested_filename() -> String {
        format!(
            "download-router-rules-{}.json",
            Utc::now().format("%Y-%m-%d")
        )
    }
}
