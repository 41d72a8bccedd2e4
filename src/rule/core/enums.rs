use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// 匹配字段枚举，定义规则支持的四个匹配维度
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum MatchField {
    MimeType,
    FileUrl,
    ReferrerUrl,
    Filename,
}

impl MatchField {
    /// 固定求值顺序的全字段列表
    pub const ALL: [MatchField; 4] = [
        MatchField::MimeType,
        MatchField::FileUrl,
        MatchField::ReferrerUrl,
        MatchField::Filename,
    ];

    /// 面向操作者的字段名（校验错误提示用）
    pub fn display_name(&self) -> &'static str {
        match self {
            MatchField::MimeType => "MIME Type",
            MatchField::FileUrl => "File URL",
            MatchField::ReferrerUrl => "Referrer URL",
            MatchField::Filename => "Filename",
        }
    }
}

impl Display for MatchField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
