//! 构建期配置
//!
//! WASM 包内没有进程环境变量，配置在编译时通过 `option_env!` 注入，
//! 未设置或取值无效时使用默认值。

use crate::web::route::{RouteKey, RouteTable};
use tracing::Level;

// =========================================================
// 默认值
// =========================================================

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_LOG_LEVEL: Level = Level::INFO;

/// 评论变更后的一致性策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationStrategy {
    /// 丢弃所有客户端状态，整页重新加载
    #[default]
    FullReload,
    /// 将变更结果应用到本地列表，不重新加载
    Reconcile,
}

impl MutationStrategy {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "reload" | "full-reload" => Some(Self::FullReload),
            "reconcile" => Some(Self::Reconcile),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub log_level: Level,
    pub mutation_strategy: MutationStrategy,
    pub enable_posts: bool,
    pub enable_contacts: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
            mutation_strategy: MutationStrategy::default(),
            enable_posts: false,
            enable_contacts: false,
        }
    }
}

impl AppConfig {
    /// 读取编译时注入的 `GYMNASIUM_*` 变量
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| match key {
            "GYMNASIUM_API_URL" => option_env!("GYMNASIUM_API_URL"),
            "GYMNASIUM_LOG_LEVEL" => option_env!("GYMNASIUM_LOG_LEVEL"),
            "GYMNASIUM_MUTATION_STRATEGY" => option_env!("GYMNASIUM_MUTATION_STRATEGY"),
            "GYMNASIUM_ENABLE_POSTS" => option_env!("GYMNASIUM_ENABLE_POSTS"),
            "GYMNASIUM_ENABLE_CONTACTS" => option_env!("GYMNASIUM_ENABLE_CONTACTS"),
            _ => None,
        })
    }

    pub fn from_lookup<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let defaults = Self::default();

        let api_base_url = lookup("GYMNASIUM_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_base_url);

        let log_level = match lookup("GYMNASIUM_LOG_LEVEL") {
            Some(raw) => raw.trim().parse::<Level>().unwrap_or_else(|_| {
                tracing::warn!("unknown log level {:?}, using {}", raw, DEFAULT_LOG_LEVEL);
                DEFAULT_LOG_LEVEL
            }),
            None => defaults.log_level,
        };

        let mutation_strategy = match lookup("GYMNASIUM_MUTATION_STRATEGY") {
            Some(raw) => MutationStrategy::parse(raw).unwrap_or_else(|| {
                tracing::warn!("unknown mutation strategy {:?}, using full reload", raw);
                MutationStrategy::default()
            }),
            None => defaults.mutation_strategy,
        };

        Self {
            api_base_url,
            log_level,
            mutation_strategy,
            enable_posts: parse_flag(lookup("GYMNASIUM_ENABLE_POSTS"), defaults.enable_posts),
            enable_contacts: parse_flag(
                lookup("GYMNASIUM_ENABLE_CONTACTS"),
                defaults.enable_contacts,
            ),
        }
    }

    /// 应用路由开关后的路由表
    pub fn route_table(&self) -> RouteTable {
        RouteTable::default()
            .with_enabled(RouteKey::Posts, self.enable_posts)
            .with_enabled(RouteKey::Contacts, self.enable_contacts)
    }
}

fn parse_flag(raw: Option<&str>, default: bool) -> bool {
    match raw.map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        Some(v) => {
            tracing::warn!("invalid boolean flag {:?}, using {}", v, default);
            default
        }
        None => default,
    }
}
