//! 启动引导
//!
//! 应用挂载时并发执行两个互不协调的请求：用户资料与分类列表，
//! 各自完成后只提交自己那一份状态。

use crate::api::GymnasiumApi;
use crate::cancel::CancelToken;
use crate::notify::Notifier;
use crate::request::on_request;
use crate::store::{Action, Dispatch};
use crate::web::http::HttpClient;

/// 检查认证状态
///
/// 任何失败都归结为干净的登出状态；访客的 401 属于正常情况，因此不弹出提示。
pub async fn check_auth<C, D>(api: &GymnasiumApi<C>, dispatch: &D, cancel: &CancelToken)
where
    C: HttpClient,
    D: Dispatch,
{
    dispatch.dispatch(Action::SetLoading(true));

    match api.get_profile(cancel).await {
        Ok(user) => {
            tracing::info!(user = %user.id, role = ?user.role, "session restored");
            dispatch.dispatch(Action::Login(user));
        }
        Err(e) if e.is_cancelled() => {
            tracing::debug!("auth check cancelled");
        }
        Err(e) => {
            tracing::info!("no active session: {}", e);
            dispatch.dispatch(Action::Logout);
        }
    }

    dispatch.dispatch(Action::SetLoading(false));
}

/// 加载分类参考数据，仅在成功时写入
pub async fn load_categories<C, D, N>(
    api: &GymnasiumApi<C>,
    dispatch: &D,
    notifier: &N,
    cancel: &CancelToken,
) where
    C: HttpClient,
    D: Dispatch,
    N: Notifier,
{
    if let Some(categories) = on_request(api.get_categories(cancel), notifier).await {
        tracing::info!(count = categories.len(), "categories loaded");
        dispatch.dispatch(Action::SetCategories(categories));
    }
}

/// 并发执行两项启动请求，两者之间没有顺序保证
pub async fn run<C, D, N>(api: &GymnasiumApi<C>, dispatch: &D, notifier: &N, cancel: &CancelToken)
where
    C: HttpClient,
    D: Dispatch,
    N: Notifier,
{
    futures::join!(
        check_auth(api, dispatch, cancel),
        load_categories(api, dispatch, notifier, cancel),
    );
}
