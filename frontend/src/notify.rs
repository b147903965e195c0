//! 用户可见的短暂提示
//!
//! `Notifier` 是错误/成功提示的注入边界，页面和请求封装助手只依赖该 trait。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub text: String,
}

pub trait Notifier {
    fn notify(&self, notification: Notification);

    fn success(&self, text: impl Into<String>) {
        self.notify(Notification {
            level: NotificationLevel::Success,
            text: text.into(),
        });
    }

    fn error(&self, text: impl Into<String>) {
        self.notify(Notification {
            level: NotificationLevel::Error,
            text: text.into(),
        });
    }

    fn info(&self, text: impl Into<String>) {
        self.notify(Notification {
            level: NotificationLevel::Info,
            text: text.into(),
        });
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    pub struct RecordingNotifier {
        pub seen: RefCell<Vec<Notification>>,
    }

    impl RecordingNotifier {
        pub fn errors(&self) -> Vec<String> {
            self.texts(NotificationLevel::Error)
        }

        pub fn successes(&self) -> Vec<String> {
            self.texts(NotificationLevel::Success)
        }

        pub fn infos(&self) -> Vec<String> {
            self.texts(NotificationLevel::Info)
        }

        fn texts(&self, level: NotificationLevel) -> Vec<String> {
            self.seen
                .borrow()
                .iter()
                .filter(|n| n.level == level)
                .map(|n| n.text.clone())
                .collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.seen.borrow_mut().push(notification);
        }
    }
}
