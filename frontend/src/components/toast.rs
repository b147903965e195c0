//! 全局提示框
//!
//! `Toaster` 是 `Notifier` 的浏览器实现，通过 Context 提供；`ToastHost` 负责渲染。

use crate::notify::{Notification, NotificationLevel, Notifier};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// 提示自动消失前的停留时间（毫秒）
const TOAST_TTL_MS: u32 = 3_000;

#[derive(Clone, Copy)]
pub struct Toaster {
    items: RwSignal<Vec<(u64, Notification)>>,
    next_id: StoredValue<u64>,
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    fn dismiss(&self, id: u64) {
        let _ = self.items.try_update(|items| items.retain(|(i, _)| *i != id));
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for Toaster {
    fn notify(&self, notification: Notification) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id.wrapping_add(1));
        self.items.update(|items| items.push((id, notification)));

        let toaster = *self;
        Timeout::new(TOAST_TTL_MS, move || toaster.dismiss(id)).forget();
    }
}

pub fn use_toaster() -> Toaster {
    use_context::<Toaster>().expect("Toaster should be provided")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toaster = use_toaster();

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || toaster.items.get()
                key=|(id, _)| *id
                children=move |(id, notification)| {
                    let class = match notification.level {
                        NotificationLevel::Success => "alert alert-success shadow-lg",
                        NotificationLevel::Error => "alert alert-error shadow-lg",
                        NotificationLevel::Info => "alert alert-info shadow-lg",
                    };
                    view! {
                        <div class=class on:click=move |_| toaster.dismiss(id)>
                            <span>{notification.text}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
