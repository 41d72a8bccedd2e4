use serde::{Deserialize, Serialize};

/// 下载事件（宿主事件源投递，对引擎只读）
/// 缺失字段一律以空串表示，所有谓词按空串求值
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadEvent {
    pub mime: String,
    pub url: String,
    pub filename: String,
    pub referrer: String,
}

/// 路由结果：命中的规则句柄 + 计算好的目标路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTarget {
    /// 命中规则的id
    pub rule_id: String,
    /// 命中规则的显示名（可能为空）
    pub rule_name: String,
    /// 规则配置的目标目录
    pub folder: String,
    /// 建议写入路径：folder + "/" + 文件名（空文件名回退为配置的回退名）
    pub destination: String,
}
