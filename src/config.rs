//! 全局路由配置管理

/// 路由器配置
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// 设置存储中保存规则集的逻辑键
    pub storage_key: String,
    /// 事件文件名为空时的回退文件名
    pub fallback_filename: String,
    /// 导出文档的格式版本号
    pub export_version: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            storage_key: "downloadRules".to_string(),
            fallback_filename: "download".to_string(),
            export_version: "1.0.0".to_string(),
        }
    }
}

impl RouterConfig {
    /// 自定义存储键（其余项保持默认）
    pub fn with_storage_key(key: impl Into<String>) -> Self {
        Self {
            storage_key: key.into(),
            ..Self::default()
        }
    }
}
