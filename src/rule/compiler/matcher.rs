//! 运行时匹配器
//! 核心职责：
//! 1. 模式串解析（'='前缀→精确，'~'前缀→扩展名，其余→正则）
//! 2. 大小写不敏感正则编译 + 全局编译缓存
//! 3. 编译失败降级为Never匹配器（对该字段永不命中，绝不panic）

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use rustc_hash::FxHashMap;
use std::sync::{Arc, RwLock};

/// 全局正则缓存
/// Key: 正则模式字符串（统一按大小写不敏感编译，无需区分）
/// Value: 编译后的正则Arc（快照重建时避免重复编译）
static REGEX_CACHE: Lazy<RwLock<FxHashMap<String, Arc<Regex>>>> =
    Lazy::new(|| RwLock::new(FxHashMap::default()));

/// 运行时匹配器（每个激活字段在快照构建时产出一个）
/// 匹配路径不再检查前缀符：模式的三态语义在此处一次性定型
#[derive(Debug, Clone)]
pub enum Matcher {
    /// 精确匹配（区分大小写，整串相等）
    Exact(String),
    /// 扩展名匹配（仅filename字段：最后一个'.'之后的小写扩展名相等）
    Suffix(String),
    /// 大小写不敏感正则匹配（未锚定，全文任意位置命中即可）
    Regex(Arc<Regex>),
    /// 永不匹配（正则编译失败的降级路径，见error.rs的吸收策略）
    Never,
}

impl Matcher {
    /// 解析通用字段模式串（mimeType/fileUrl/referrerUrl）
    /// 约定：调用方已确认模式串trim后非空
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_prefix('=') {
            Some(rest) => Matcher::Exact(rest.to_string()),
            None => Self::compile_regex(pattern),
        }
    }

    /// 解析filename字段模式串（额外支持'~'扩展名前缀）
    pub fn parse_filename(pattern: &str) -> Self {
        match pattern.strip_prefix('~') {
            Some(rest) => Matcher::Suffix(rest.to_string()),
            None => Self::parse(pattern),
        }
    }

    /// 正则编译公共逻辑（读缓存 → 未命中则编译并写缓存）
    /// 编译失败回退Never并告警，不向匹配路径传播错误
    fn compile_regex(pattern: &str) -> Self {
        // 1. 读锁查询缓存
        if let Some(re) = REGEX_CACHE.read().unwrap().get(pattern) {
            return Matcher::Regex(re.clone());
        }

        // 2. 写锁编译并插入缓存（仅缓存未命中时执行）
        match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(re) => {
                let re = REGEX_CACHE
                    .write()
                    .unwrap()
                    .entry(pattern.to_string())
                    .or_insert_with(|| Arc::new(re))
                    .clone();
                Matcher::Regex(re)
            }
            Err(e) => {
                log::warn!(
                    "Regex compilation failed, field degraded to never-match: pattern={} error={}",
                    pattern,
                    e
                );
                Matcher::Never
            }
        }
    }

    /// 执行匹配（核心匹配逻辑）
    #[inline(always)]
    pub fn matches(&self, subject: &str) -> bool {
        match self {
            Matcher::Exact(expected) => subject == expected,
            Matcher::Suffix(ext) => Self::extension_of(subject) == *ext,
            Matcher::Regex(re) => re.is_match(subject),
            Matcher::Never => false,
        }
    }

    /// 提取小写扩展名（最后一个'.'之后；无'.'返回空串）
    /// 模式侧的值不做大小写归一，按字面与小写扩展名比较
    fn extension_of(filename: &str) -> String {
        filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default()
    }

    /// 描述匹配器规则（日志/调试输出）
    pub fn describe(&self) -> String {
        match self {
            Matcher::Exact(s) => format!("exact: {}", s),
            Matcher::Suffix(s) => format!("suffix: {}", s),
            Matcher::Regex(re) => format!("regex: {}", re.as_str()),
            Matcher::Never => "never".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_mode_byte_equality() {
        // 测试场景：'='精确模式只接受整串相等，不接受子串/超串
        let m = Matcher::parse("=application/pdf");
        assert!(m.matches("application/pdf"));
        assert!(!m.matches("application/pdf; charset=utf-8"));
        assert!(!m.matches("application/pd"));
        // 精确模式区分大小写
        assert!(!m.matches("Application/PDF"));
    }

    #[test]
    fn test_suffix_mode_lowercased_extension() {
        // 测试场景：'~'扩展名模式取最后一个'.'之后并小写
        let m = Matcher::parse_filename("~pdf");
        assert!(m.matches("report.PDF"));
        assert!(m.matches("archive.tar.pdf"));
        assert!(!m.matches("report.pdf.bak"));
        // 无'.'的文件名不命中任何扩展名模式
        assert!(!m.matches("makefile"));
    }

    #[test]
    fn test_suffix_pattern_value_not_normalized() {
        // 测试场景：模式侧不做大小写归一，'~PDF'与小写扩展名不相等
        let m = Matcher::parse_filename("~PDF");
        assert!(!m.matches("report.pdf"));
        assert!(!m.matches("report.PDF"));
    }

    #[test]
    fn test_regex_mode_case_insensitive_unanchored() {
        // 测试场景：正则默认大小写不敏感、未锚定
        let m = Matcher::parse("report");
        assert!(m.matches("Quarterly-REPORT-v2.pdf"));
        assert!(!m.matches("summary-v2.pdf"));
    }

    #[test]
    fn test_tilde_is_regex_on_generic_fields() {
        // 测试场景：'~'前缀仅filename字段特殊，通用字段走正则
        let m = Matcher::parse("~video");
        assert!(m.matches("x~video/mp4"));
        assert!(!m.matches("video/mp4"));
    }

    #[test]
    fn test_invalid_regex_degrades_to_never() {
        // 测试场景：非法正则降级为Never，对任意输入均不命中
        let m = Matcher::parse("[unclosed");
        assert!(matches!(m, Matcher::Never));
        assert!(!m.matches("[unclosed"));
        assert!(!m.matches(""));
    }

    #[test]
    fn test_regex_cache_shares_compilation() {
        // 测试场景：相同模式串复用同一份编译结果
        let a = Matcher::parse("shared-pattern-cache");
        let b = Matcher::parse("shared-pattern-cache");
        match (a, b) {
            (Matcher::Regex(ra), Matcher::Regex(rb)) => {
                assert!(Arc::ptr_eq(&ra, &rb));
            }
            _ => panic!("expected regex matchers"),
        }
    }
}
