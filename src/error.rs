//! dlrouter 全局错误定义
//! 封装规则校验、导入导出与持久化各层错误，基于thiserror实现类型安全处理

use thiserror::Error;

use crate::rule::core::MatchField;

/// 路由引擎错误枚举
/// 校验类错误面向操作者（可修复的输入问题），匹配路径上的错误一律
/// 就地吸收为「不命中」，不会经由该枚举向事件处理方传播
#[derive(Error, Debug)]
pub enum RouterError {
    // ===================== 规则校验错误 =====================
    /// 目标目录为空（规则必填项缺失）
    #[error("Rule validation failed: folder must not be empty")]
    MissingFolder,

    /// 四个匹配字段全部为空（规则永不可能命中）
    #[error("Rule validation failed: at least one matcher pattern is required")]
    NoMatchers,

    /// 正则模式编译失败（携带字段名与编译器原始信息）
    #[error("Invalid pattern in {field}: {message}")]
    InvalidPattern { field: MatchField, message: String },

    // ===================== 导入导出错误 =====================
    /// 导入文档整体不可解析（非JSON或缺失rules数组）
    #[error("Import document malformed: {0}")]
    MalformedDocument(String),

    /// 导入文档中无任何合法规则（整体中止，现有规则集不受影响）
    #[error("Import contains no valid rules")]
    EmptyImport,

    // ===================== 持久化错误 =====================
    /// 设置存储读写失败（内存规则集保持最后已知良好状态）
    #[error("Settings store operation failed: {0}")]
    StoreError(String),

    // ===================== 规则集操作错误 =====================
    /// 按id操作时目标规则不存在
    #[error("Unknown rule id: {0}")]
    UnknownRuleId(String),

    // ===================== 序列化错误 =====================
    /// JSON序列化/反序列化失败
    #[error("JSON serialization failed: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// 全局Result类型别名
pub type RouterResult<T> = Result<T, RouterError>;
