//! Value Objects

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Kind of post a like can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i16)]
pub enum PostType {
    #[display("BLOG")]
    Blog = 0,
    #[display("QUESTION")]
    Question = 1,
    #[display("PROJECT")]
    Project = 2,
}

impl PostType {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(PostType::Blog),
            1 => Some(PostType::Question),
            2 => Some(PostType::Project),
            _ => None,
        }
    }
}

/// Zero-based page request, clamped by the application configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Row offset for the query
    pub fn offset(&self) -> i64 {
        self.page as i64 * self.size as i64
    }

    /// Row limit for the query
    pub fn limit(&self) -> i64 {
        self.size as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_type_id_roundtrip() {
        for kind in [PostType::Blog, PostType::Question, PostType::Project] {
            assert_eq!(PostType::from_id(kind.id()), Some(kind));
        }
        assert_eq!(PostType::from_id(9), None);
    }

    #[test]
    fn test_page_request_offset() {
        let page = PageRequest::new(0, 20);
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 20);

        let page = PageRequest::new(3, 25);
        assert_eq!(page.offset(), 75);
    }
}
