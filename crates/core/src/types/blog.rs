//! Blog post records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::BlogPostId;

/// A blog post as published in `data/blog-posts.json`.
///
/// `content` is Markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub author_bio: Option<String>,
    pub publish_date: NaiveDate,
    /// Pre-computed label such as "8 min read".
    #[serde(default)]
    pub read_time: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub shares: u32,
    #[serde(default)]
    pub comments: u32,
}

/// The `data/blog-posts.json` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostsPayload {
    #[serde(default)]
    pub blog_posts: Vec<BlogPost>,
}
