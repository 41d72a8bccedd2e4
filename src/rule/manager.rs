//! 规则集管理器
//! 核心职责：
//! 1. 持有规则的有序列表（列表顺序即匹配优先级，Selector的唯一事实来源）
//! 2. 变更操作：保存（新增/按id替换）、删除、相邻交换、整体替换
//! 3. 先持久化后生效：存储写入失败时内存与已持久化状态均保持原样
//! 4. 从设置存储加载/重载（外部变更通知入口）

use std::sync::Arc;

use crate::config::RouterConfig;
use crate::error::{RouterError, RouterResult};
use crate::rule::compiler::CompiledRuleSet;
use crate::rule::core::RoutingRule;
use crate::rule::exchange::{ImportPreview, RuleExchange};
use crate::rule::validator::RuleValidator;
use crate::store::SettingsStore;

pub struct RuleSetManager<S: SettingsStore> {
    store: S,
    config: RouterConfig,
    rules: Vec<RoutingRule>,
}

impl<S: SettingsStore> RuleSetManager<S> {
    /// 创建管理器并从存储加载当前规则集（键缺失视为空集）
    pub fn load(store: S, config: RouterConfig) -> RouterResult<Self> {
        let mut manager = Self {
            store,
            config,
            rules: Vec::new(),
        };
        manager.reload()?;
        Ok(manager)
    }

    /// 重新从存储读取，整体替换内存列表
    /// 外部变更通知（存储被其他会话写入）后由调用方触发
    pub fn reload(&mut self) -> RouterResult<()> {
        self.rules = match self.store.load(&self.config.storage_key)? {
            Some(document) => serde_json::from_str(&document)?,
            None => Vec::new(),
        };
        log::debug!("Rule set loaded: {} rules", self.rules.len());
        Ok(())
    }

    /// 当前规则列表（只读视图，顺序即优先级）
    pub fn rules(&self) -> &[RoutingRule] {
        &self.rules
    }

    /// 编译当前规则集为不可变快照（交给DownloadRouter持有）
    pub fn snapshot(&self) -> Arc<CompiledRuleSet> {
        Arc::new(CompiledRuleSet::compile(&self.rules))
    }

    /// 保存规则：id已存在则按id替换，否则追加到列表末尾
    /// 校验失败的候选不进入规则集；成功返回规范化后的规则
    pub fn save_rule(&mut self, candidate: &RoutingRule) -> RouterResult<RoutingRule> {
        let rule = RuleValidator::validate(candidate)?;
        let mut next = self.rules.clone();
        match next.iter().position(|r| r.id == rule.id) {
            Some(index) => next[index] = rule.clone(),
            None => next.push(rule.clone()),
        }
        self.commit(next)?;
        Ok(rule)
    }

    /// 按id删除规则
    pub fn delete_rule(&mut self, id: &str) -> RouterResult<()> {
        let index = self.position(id)?;
        let mut next = self.rules.clone();
        next.remove(index);
        self.commit(next)
    }

    /// 上移一位（提升优先级）；首条上移为无操作
    pub fn move_up(&mut self, id: &str) -> RouterResult<()> {
        let index = self.position(id)?;
        if index == 0 {
            return Ok(());
        }
        let mut next = self.rules.clone();
        next.swap(index - 1, index);
        self.commit(next)
    }

    /// 下移一位（降低优先级）；末条下移为无操作
    pub fn move_down(&mut self, id: &str) -> RouterResult<()> {
        let index = self.position(id)?;
        if index + 1 == self.rules.len() {
            return Ok(());
        }
        let mut next = self.rules.clone();
        next.swap(index, index + 1);
        self.commit(next)
    }

    /// 整体替换规则集（导入路径；调用方负责破坏性替换前的确认）
    pub fn replace_all(&mut self, rules: Vec<RoutingRule>) -> RouterResult<()> {
        self.commit(rules)
    }

    /// 导入预览计数：现有N条将被传入的M条替换
    pub fn import_preview(&self, incoming: &[RoutingRule]) -> ImportPreview {
        ImportPreview {
            existing: self.rules.len(),
            incoming: incoming.len(),
        }
    }

    /// 导入交换文档：解析过滤 → 整体替换
    /// 文档级失败（MalformedDocument/EmptyImport）时现有规则集不受影响
    pub fn import(&mut self, document: &str) -> RouterResult<usize> {
        let rules = RuleExchange::parse_import(document)?;
        let count = rules.len();
        self.replace_all(rules)?;
        log::info!("Imported {} rules (previous set replaced)", count);
        Ok(count)
    }

    /// 导出当前规则集为交换文档（纯序列化，无副作用）
    pub fn export(&self) -> RouterResult<String> {
        RuleExchange::export(&self.rules, &self.config)
    }

    fn position(&self, id: &str) -> RouterResult<usize> {
        self.rules
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| RouterError::UnknownRuleId(id.to_string()))
    }

    /// 提交变更：先写存储，成功后才替换内存列表
    /// 写入失败时上一份已持久化状态对后续读取保持原样可见
    fn commit(&mut self, next: Vec<RoutingRule>) -> RouterResult<()> {
        let document = serde_json::to_string(&next)?;
        self.store.save(&self.config.storage_key, &document)?;
        self.rules = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySettingsStore;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::RwLock;

    fn rule(id: &str, folder: &str) -> RoutingRule {
        RoutingRule {
            id: id.to_string(),
            folder: folder.to_string(),
            mime_type: "=application/pdf".to_string(),
            ..Default::default()
        }
    }

    fn manager() -> RuleSetManager<MemorySettingsStore> {
        RuleSetManager::load(MemorySettingsStore::new(), RouterConfig::default()).unwrap()
    }

    #[test]
    fn test_load_with_empty_store() {
        let m = manager();
        assert!(m.rules().is_empty());
    }

    #[test]
    fn test_save_rule_appends_then_replaces() {
        // 测试场景：新id追加到末尾，已有id原位替换
        let mut m = manager();
        m.save_rule(&rule("a", "docs")).unwrap();
        m.save_rule(&rule("b", "media")).unwrap();
        assert_eq!(m.rules().len(), 2);
        assert_eq!(m.rules()[1].id, "b");

        m.save_rule(&rule("a", "archive")).unwrap();
        assert_eq!(m.rules().len(), 2);
        assert_eq!(m.rules()[0].folder, "archive");
        // 替换不改变位置
        assert_eq!(m.rules()[0].id, "a");
    }

    #[test]
    fn test_save_rule_rejects_invalid() {
        let mut m = manager();
        let invalid = RoutingRule {
            folder: "docs".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            m.save_rule(&invalid),
            Err(RouterError::NoMatchers)
        ));
        assert!(m.rules().is_empty());
    }

    #[test]
    fn test_delete_rule() {
        let mut m = manager();
        m.save_rule(&rule("a", "docs")).unwrap();
        m.save_rule(&rule("b", "media")).unwrap();
        m.delete_rule("a").unwrap();
        assert_eq!(m.rules().len(), 1);
        assert_eq!(m.rules()[0].id, "b");
        assert!(matches!(
            m.delete_rule("a"),
            Err(RouterError::UnknownRuleId(_))
        ));
    }

    #[test]
    fn test_move_boundaries_are_noops() {
        // 测试场景：首条上移与末条下移均为无操作且不报错
        let mut m = manager();
        m.save_rule(&rule("a", "docs")).unwrap();
        m.save_rule(&rule("b", "media")).unwrap();

        m.move_up("a").unwrap();
        m.move_down("b").unwrap();
        assert_eq!(m.rules()[0].id, "a");
        assert_eq!(m.rules()[1].id, "b");

        m.move_down("a").unwrap();
        assert_eq!(m.rules()[0].id, "b");
        m.move_up("a").unwrap();
        assert_eq!(m.rules()[0].id, "a");
    }

    #[test]
    fn test_persistence_roundtrip_through_store() {
        // 测试场景：提交后的状态可被重载读回（写穿语义）
        let store = MemorySettingsStore::new();
        let mut m = RuleSetManager::load(store, RouterConfig::default()).unwrap();
        m.save_rule(&rule("a", "docs")).unwrap();
        m.reload().unwrap();
        assert_eq!(m.rules().len(), 1);
        assert_eq!(m.rules()[0].id, "a");
    }

    /// 可切换失败的测试存储：验证先持久化后生效
    #[derive(Default)]
    struct FlakyStore {
        inner: RwLock<Option<String>>,
        fail_next: AtomicBool,
    }

    impl SettingsStore for FlakyStore {
        fn load(&self, _key: &str) -> RouterResult<Option<String>> {
            Ok(self.inner.read().unwrap().clone())
        }
        fn save(&self, _key: &str, value: &str) -> RouterResult<()> {
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(RouterError::StoreError("store unavailable".to_string()));
            }
            *self.inner.write().unwrap() = Some(value.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_failed_persist_leaves_previous_state() {
        // 测试场景：存储写入失败时，内存与已持久化的旧顺序都保持原样
        let store = FlakyStore::default();
        let mut m = RuleSetManager::load(store, RouterConfig::default()).unwrap();
        m.save_rule(&rule("a", "docs")).unwrap();
        m.save_rule(&rule("b", "media")).unwrap();

        m.store.fail_next.store(true, Ordering::SeqCst);
        assert!(matches!(m.move_up("b"), Err(RouterError::StoreError(_))));
        assert_eq!(m.rules()[0].id, "a");

        m.reload().unwrap();
        assert_eq!(m.rules()[0].id, "a");
        assert_eq!(m.rules()[1].id, "b");
    }

    #[test]
    fn test_import_replaces_whole_set() {
        let mut m = manager();
        m.save_rule(&rule("old", "docs")).unwrap();

        let doc = r#"{"rules":[
            {"id":"n1","folder":"a","mimeType":"=x"},
            {"id":"n2","folder":"b","filename":"~pdf"}
        ]}"#;
        let preview = m.import_preview(&RuleExchange::parse_import(doc).unwrap());
        assert_eq!((preview.existing, preview.incoming), (1, 2));

        assert_eq!(m.import(doc).unwrap(), 2);
        assert_eq!(m.rules().len(), 2);
        assert!(m.rules().iter().all(|r| r.id != "old"));
    }

    #[test]
    fn test_failed_import_keeps_existing_rules() {
        // 测试场景：EmptyImport整体中止，现有规则原样保留
        let mut m = manager();
        m.save_rule(&rule("keep", "docs")).unwrap();
        let doc = r#"{"rules":[{"folder":"","mimeType":"x"}]}"#;
        assert!(matches!(m.import(doc), Err(RouterError::EmptyImport)));
        assert_eq!(m.rules().len(), 1);
        assert_eq!(m.rules()[0].id, "keep");
    }

    #[test]
    fn test_export_then_import_roundtrip() {
        let mut m = manager();
        m.save_rule(&rule("a", "docs")).unwrap();
        m.save_rule(&rule("b", "media")).unwrap();
        let exported = m.export().unwrap();

        let mut other = manager();
        other.import(&exported).unwrap();
        assert_eq!(other.rules(), m.rules());
    }
}
