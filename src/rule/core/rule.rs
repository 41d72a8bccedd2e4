use serde::{Deserialize, Serialize};

use super::enums::MatchField;

/// 路由规则（持久化与导入导出的线格式，字段名camelCase）
/// 设计说明：
/// - id: 创建时分配的不透明唯一标识，作为排序/编辑/删除的稳定句柄
/// - folder: 目标目录，必填非空
/// - 四个模式字段独立生效：空串=不参与；'='前缀=精确；'~'前缀=扩展名
///   （仅filename字段）；其余=大小写不敏感正则
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutingRule {
    pub id: String,
    pub name: String,
    pub folder: String,
    pub mime_type: String,
    pub file_url: String,
    pub referrer_url: String,
    pub filename: String,
}

impl RoutingRule {
    /// 取指定匹配字段的原始模式串
    pub fn pattern(&self, field: MatchField) -> &str {
        match field {
            MatchField::MimeType => &self.mime_type,
            MatchField::FileUrl => &self.file_url,
            MatchField::ReferrerUrl => &self.referrer_url,
            MatchField::Filename => &self.filename,
        }
    }

    /// 字段是否激活（trim后非空才参与匹配）
    pub fn is_active(&self, field: MatchField) -> bool {
        !self.pattern(field).trim().is_empty()
    }

    /// 激活字段列表（界面摘要用）
    pub fn active_fields(&self) -> Vec<MatchField> {
        MatchField::ALL
            .iter()
            .copied()
            .filter(|field| self.is_active(*field))
            .collect()
    }

    /// 是否存在至少一个激活字段
    pub fn has_matchers(&self) -> bool {
        MatchField::ALL.iter().any(|field| self.is_active(*field))
    }

    /// 显示标签：名称为空时回退到位置标签（Rule N，1起始）
    pub fn display_label(&self, index: usize) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            format!("Rule {}", index + 1)
        } else {
            name.to_string()
        }
    }

    /// 全字段trim后的规范化副本（校验入口统一调用）
    pub(crate) fn trimmed(&self) -> RoutingRule {
        RoutingRule {
            id: self.id.trim().to_string(),
            name: self.name.trim().to_string(),
            folder: self.folder.trim().to_string(),
            mime_type: self.mime_type.trim().to_string(),
            file_url: self.file_url.trim().to_string(),
            referrer_url: self.referrer_url.trim().to_string(),
            filename: self.filename.trim().to_string(),
        }
    }
}
