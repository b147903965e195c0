//! 响应校验
//!
//! serde 只保证字段存在且类型正确，这里补充语义层面的检查，
//! 网关在解码后统一调用，失败时归类为格式错误的响应。

use crate::{Category, Post, Review, User};

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

fn non_empty(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("`{}` must not be empty", field))
    } else {
        Ok(())
    }
}

impl Validate for () {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), String> {
        for (i, item) in self.iter().enumerate() {
            item.validate().map_err(|e| format!("[{}]: {}", i, e))?;
        }
        Ok(())
    }
}

impl Validate for User {
    fn validate(&self) -> Result<(), String> {
        non_empty("user.id", &self.id)
    }
}

impl Validate for Category {
    fn validate(&self) -> Result<(), String> {
        non_empty("category.label", &self.label)?;
        if self.path.is_empty() || self.path.contains('/') || self.path.chars().any(char::is_whitespace)
        {
            return Err(format!("`category.path` is not a URL segment: {:?}", self.path));
        }
        Ok(())
    }
}

impl Validate for Post {
    fn validate(&self) -> Result<(), String> {
        non_empty("post.id", &self.id)?;
        non_empty("post.category", &self.category)
    }
}

impl Validate for Review {
    fn validate(&self) -> Result<(), String> {
        non_empty("review.id", &self.id)?;
        non_empty("review.authorId", &self.author_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserRole;

    fn category(path: &str) -> Category {
        Category {
            id: 1,
            path: path.into(),
            label: "News".into(),
        }
    }

    #[test]
    fn category_path_must_be_a_segment() {
        assert!(category("news").validate().is_ok());
        assert!(category("").validate().is_err());
        assert!(category("a/b").validate().is_err());
        assert!(category("a b").validate().is_err());
    }

    #[test]
    fn list_error_names_the_index() {
        let list = vec![category("news"), category("bad/path")];
        let err = list.validate().unwrap_err();
        assert!(err.starts_with("[1]"), "{}", err);
    }

    #[test]
    fn user_needs_an_id() {
        let user = User {
            id: " ".into(),
            name: "Гость".into(),
            email: None,
            role: UserRole::Guest,
        };
        assert!(user.validate().is_err());
    }
}
