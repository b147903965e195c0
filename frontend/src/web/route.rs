//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了路由表（逻辑页面 -> 路径/标题/开关/允许角色）以及角色守卫的判定。

use gymnasium_shared::UserRole;
use std::fmt::Display;

/// 逻辑页面标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKey {
    Home,
    Entry,
    Posts,
    Profile,
    Contacts,
    CreatePosts,
    Reviews,
}

/// 路由表条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub key: RouteKey,
    pub path: &'static str,
    pub label: &'static str,
    pub enabled: bool,
    /// `None` 表示所有人可访问
    pub allowed_roles: Option<&'static [UserRole]>,
}

const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];

/// 静态路由表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl Default for RouteTable {
    fn default() -> Self {
        let entry = |key, path, label, enabled, allowed_roles| RouteEntry {
            key,
            path,
            label,
            enabled,
            allowed_roles,
        };
        Self {
            entries: vec![
                entry(RouteKey::Home, "/", "Главная", true, None),
                entry(RouteKey::Entry, "/entry", "Вход", true, None),
                // 分类文章列表在当前版本中关闭
                entry(RouteKey::Posts, "/posts", "Новости", false, None),
                entry(RouteKey::Profile, "/profile", "Профиль", true, None),
                entry(RouteKey::Contacts, "/contacts", "Контакты", false, None),
                entry(RouteKey::CreatePosts, "/create-posts", "Создать пост", true, Some(ADMIN_ONLY)),
                entry(RouteKey::Reviews, "/love-gymn", "Люблю свою гимназию", true, None),
            ],
        }
    }
}

impl RouteTable {
    pub fn with_enabled(mut self, key: RouteKey, enabled: bool) -> Self {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.enabled = enabled;
        }
        self
    }

    pub fn entry(&self, key: RouteKey) -> &RouteEntry {
        // 默认表覆盖了所有 RouteKey，with_enabled 不会删除条目
        self.entries
            .iter()
            .find(|e| e.key == key)
            .unwrap_or(&self.entries[0])
    }

    pub fn path(&self, key: RouteKey) -> &'static str {
        self.entry(key).path
    }

    /// 导航栏中显示的条目：已启用，且当前角色有权访问
    pub fn visible_entries(&self, role: Option<UserRole>) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter().filter(move |e| {
            e.enabled
                && e.key != RouteKey::Posts
                && e.allowed_roles
                    .is_none_or(|allowed| guard_access(role, allowed) == GuardDecision::Render)
        })
    }

    /// 将 URL path 解析为路由，未知或已关闭的路径一律为 NotFound
    pub fn resolve(&self, path: &str) -> AppRoute {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let trimmed = if trimmed.is_empty() { "/" } else { trimmed };

        let posts = self.entry(RouteKey::Posts);
        if let Some(rest) = trimmed.strip_prefix(posts.path).and_then(|r| r.strip_prefix('/')) {
            if !posts.enabled || rest.is_empty() || rest.contains('/') {
                return AppRoute::NotFound;
            }
            // 浏览器给出的 pathname 是百分号编码的
            return match urlencoding::decode(rest) {
                Ok(category) => AppRoute::Posts {
                    category: category.into_owned(),
                },
                Err(_) => AppRoute::NotFound,
            };
        }

        match self.entries.iter().find(|e| e.path == trimmed) {
            Some(entry) if entry.enabled => AppRoute::from_key(entry.key),
            _ => AppRoute::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self, route: &AppRoute) -> String {
        match route {
            AppRoute::Posts { category } => format!(
                "{}/{}",
                self.path(RouteKey::Posts),
                urlencoding::encode(category)
            ),
            AppRoute::NotFound => "/404".to_string(),
            other => other
                .key()
                .map(|key| self.path(key))
                .unwrap_or("/")
                .to_string(),
        }
    }
}

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Home,
    Entry,
    Profile,
    Contacts,
    CreatePosts,
    Reviews,
    /// 分类文章列表 `/posts/:category`
    Posts { category: String },
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    fn from_key(key: RouteKey) -> Self {
        match key {
            RouteKey::Home => Self::Home,
            RouteKey::Entry => Self::Entry,
            RouteKey::Profile => Self::Profile,
            RouteKey::Contacts => Self::Contacts,
            RouteKey::CreatePosts => Self::CreatePosts,
            RouteKey::Reviews => Self::Reviews,
            // `/posts` 本身没有页面，只有带分类的子路径
            RouteKey::Posts => Self::NotFound,
        }
    }

    pub fn key(&self) -> Option<RouteKey> {
        match self {
            Self::Home => Some(RouteKey::Home),
            Self::Entry => Some(RouteKey::Entry),
            Self::Profile => Some(RouteKey::Profile),
            Self::Contacts => Some(RouteKey::Contacts),
            Self::CreatePosts => Some(RouteKey::CreatePosts),
            Self::Reviews => Some(RouteKey::Reviews),
            Self::Posts { .. } => Some(RouteKey::Posts),
            Self::NotFound => None,
        }
    }

    /// 守卫拒绝访问时的安全默认路由
    pub fn guard_failure_redirect() -> Self {
        Self::Home
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", RouteTable::default().to_path(self))
    }
}

// =========================================================
// 角色守卫 (Guard)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(AppRoute),
}

/// **核心守卫逻辑**：纯同步判定，不做任何异步权限检查
pub fn guard_access(role: Option<UserRole>, allowed: &[UserRole]) -> GuardDecision {
    match role {
        Some(role) if allowed.contains(&role) => GuardDecision::Render,
        _ => GuardDecision::Redirect(AppRoute::guard_failure_redirect()),
    }
}

#[cfg(test)]
mod tests;
