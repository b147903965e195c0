use super::*;

fn posts_enabled() -> RouteTable {
    RouteTable::default().with_enabled(RouteKey::Posts, true)
}

// =========================================================
// Path resolution
// =========================================================

#[test]
fn resolves_static_pages() {
    let table = RouteTable::default();
    assert_eq!(table.resolve("/"), AppRoute::Home);
    assert_eq!(table.resolve(""), AppRoute::Home);
    assert_eq!(table.resolve("/entry"), AppRoute::Entry);
    assert_eq!(table.resolve("/profile/"), AppRoute::Profile);
    assert_eq!(table.resolve("/create-posts?draft=1"), AppRoute::CreatePosts);
    assert_eq!(table.resolve("/love-gymn#top"), AppRoute::Reviews);
}

#[test]
fn unknown_paths_hit_the_catch_all() {
    let table = RouteTable::default();
    assert_eq!(table.resolve("/admin"), AppRoute::NotFound);
    assert_eq!(table.resolve("/profile/extra"), AppRoute::NotFound);
}

#[test]
fn disabled_routes_resolve_to_not_found() {
    let table = RouteTable::default();
    assert_eq!(table.resolve("/contacts"), AppRoute::NotFound);
    assert_eq!(table.resolve("/posts/news"), AppRoute::NotFound);

    let table = table.with_enabled(RouteKey::Contacts, true);
    assert_eq!(table.resolve("/contacts"), AppRoute::Contacts);
}

#[test]
fn category_routes_when_enabled() {
    let table = posts_enabled();
    assert_eq!(
        table.resolve("/posts/news"),
        AppRoute::Posts {
            category: "news".into()
        }
    );
    assert_eq!(table.resolve("/posts"), AppRoute::NotFound);
    assert_eq!(table.resolve("/posts/news/1"), AppRoute::NotFound);
    // `/postsx` 不是 `/posts/` 的子路径
    assert_eq!(table.resolve("/postsx"), AppRoute::NotFound);
}

#[test]
fn encoded_category_segments_are_decoded() {
    let table = posts_enabled();
    let expected = AppRoute::Posts {
        category: "новости".into(),
    };
    assert_eq!(table.resolve("/posts/новости"), expected);
    assert_eq!(
        table.resolve("/posts/%D0%BD%D0%BE%D0%B2%D0%BE%D1%81%D1%82%D0%B8"),
        expected
    );
    assert_eq!(
        table.to_path(&expected),
        "/posts/%D0%BD%D0%BE%D0%B2%D0%BE%D1%81%D1%82%D0%B8"
    );
    assert_eq!(table.resolve(&table.to_path(&expected)), expected);

    // 编码后的 `/` 属于分类名本身
    let slashed = AppRoute::Posts {
        category: "a/b".into(),
    };
    assert_eq!(table.resolve("/posts/a%2Fb"), slashed);
    assert_eq!(table.resolve(&table.to_path(&slashed)), slashed);
    // 非法 UTF-8
    assert_eq!(table.resolve("/posts/%FF"), AppRoute::NotFound);
}

#[test]
fn paths_round_trip_through_the_table() {
    let table = posts_enabled();
    for route in [
        AppRoute::Home,
        AppRoute::Entry,
        AppRoute::Profile,
        AppRoute::CreatePosts,
        AppRoute::Reviews,
        AppRoute::Posts {
            category: "events".into(),
        },
    ] {
        assert_eq!(table.resolve(&table.to_path(&route)), route);
    }
    assert_eq!(AppRoute::CreatePosts.to_string(), "/create-posts");
}

#[test]
fn navigation_hides_disabled_and_forbidden_entries() {
    let table = RouteTable::default();
    let keys = |role| {
        table
            .visible_entries(role)
            .map(|e| e.key)
            .collect::<Vec<_>>()
    };

    let guest = keys(None);
    assert!(!guest.contains(&RouteKey::CreatePosts));
    assert!(!guest.contains(&RouteKey::Contacts));
    assert!(!guest.contains(&RouteKey::Posts));
    assert!(guest.contains(&RouteKey::Reviews));

    assert!(keys(Some(UserRole::Admin)).contains(&RouteKey::CreatePosts));
    assert!(!keys(Some(UserRole::Member)).contains(&RouteKey::CreatePosts));
}

// =========================================================
// Guard
// =========================================================

#[test]
fn roles_outside_the_allowed_set_are_redirected() {
    let allowed = [UserRole::Admin];
    for role in UserRole::ALL.into_iter().filter(|r| !allowed.contains(r)) {
        assert_eq!(
            guard_access(Some(role), &allowed),
            GuardDecision::Redirect(AppRoute::Home)
        );
    }
    assert_eq!(
        guard_access(None, &allowed),
        GuardDecision::Redirect(AppRoute::Home)
    );
}

#[test]
fn roles_inside_the_allowed_set_render() {
    let allowed = [UserRole::Admin, UserRole::Member];
    for role in allowed {
        assert_eq!(guard_access(Some(role), &allowed), GuardDecision::Render);
    }
}

#[test]
fn empty_allowed_set_rejects_everyone() {
    for role in UserRole::ALL {
        assert_ne!(guard_access(Some(role), &[]), GuardDecision::Render);
    }
}

#[test]
fn create_posts_is_admin_only() {
    let table = RouteTable::default();
    let allowed = table.entry(RouteKey::CreatePosts).allowed_roles.unwrap();
    assert_eq!(allowed, &[UserRole::Admin]);
}
