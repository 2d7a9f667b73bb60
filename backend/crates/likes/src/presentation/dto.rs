//! API DTOs (Data Transfer Objects)
//!
//! Response bodies carry navigational links alongside the data, so a client
//! can walk from a page to its neighbours and from a like to its post's
//! likes without building URLs itself.

use serde::{Deserialize, Serialize};

use crate::application::list_likes::LikePageOutput;
use crate::domain::entities::Like;
use crate::domain::value_objects::PostType;

/// Mount point of the likes API
pub const LIKES_BASE_PATH: &str = "/api/v1/likes";

// ============================================================================
// Links
// ============================================================================

/// A navigational link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }
}

// ============================================================================
// Like DTO
// ============================================================================

/// A like, serialized for the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeDto {
    pub id: String,
    pub post_id: String,
    pub post_type: PostType,
    pub user_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub links: Vec<Link>,
}

impl LikeDto {
    /// Map an entity and attach its self and post-likes links
    pub fn from_like(like: &Like) -> Self {
        let id = like.like_id.to_string();
        let post_id = like.post_id.to_string();

        let links = vec![
            Link::new("self", format!("{}/{}", LIKES_BASE_PATH, id)),
            Link::new("post-likes", format!("{}/post/{}", LIKES_BASE_PATH, post_id)),
        ];

        Self {
            id,
            post_id,
            post_type: like.post_type,
            user_id: like.user_id.to_string(),
            created_at: like.created_at,
            links,
        }
    }
}

// ============================================================================
// Page envelope
// ============================================================================

/// Paginated response envelope
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: i64,
    pub total_pages: u32,
    pub last: bool,
    pub links: Vec<Link>,
}

impl PageResponse<LikeDto> {
    /// Build the envelope for a page served under `collection_path`,
    /// attaching self plus next/prev page links where they exist
    pub fn from_output(collection_path: &str, output: &LikePageOutput) -> Self {
        let content = output.likes.iter().map(LikeDto::from_like).collect();

        let mut links = vec![Link::new(
            "self",
            page_href(collection_path, output.page, output.size),
        )];
        if !output.last {
            links.push(Link::new(
                "next",
                page_href(collection_path, output.page + 1, output.size),
            ));
        }
        if output.page > 0 {
            links.push(Link::new(
                "prev",
                page_href(collection_path, output.page - 1, output.size),
            ));
        }

        Self {
            content,
            page_number: output.page,
            page_size: output.size,
            total_elements: output.total_elements,
            total_pages: output.total_pages,
            last: output.last,
            links,
        }
    }
}

fn page_href(collection_path: &str, page: u32, size: u32) -> String {
    format!("{}?page={}&size={}", collection_path, page, size)
}

// ============================================================================
// Query parameters
// ============================================================================

/// Pagination query parameters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}
