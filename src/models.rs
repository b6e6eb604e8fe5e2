//! Wire models shared with the backend services.
//!
//! # Responsibilities
//! - Typed JSON shapes for news and comments
//! - Accept both comment collection shapes the comments backend emits
//!   (flat list + id-keyed subcomment map, or self-nested tree)
//! - Normalize either shape into one nested form without data loss
//!
//! # Design Decisions
//! - Field names match the backend JSON contracts exactly
//! - The aggregate entity is built only by the aggregator and never persisted
//! - Normalization keys strictly by comment id; a subcomment list whose
//!   parent id does not exist in the top-level list is dropped

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// List-view projection of a news item, no body content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShortNews {
    pub id: i64,
    pub title: String,
    pub pub_time: i64,
    pub link: String,
}

/// Full article as served by the news backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FullNews {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub pub_time: i64,
    pub link: String,
}

/// A single comment, optionally carrying nested replies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub pub_time: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcomments: Vec<Comment>,
}

/// Comment collection as returned by the comments backend.
///
/// Two shapes exist in practice: a self-nested tree, and a flat top-level
/// list with replies in a separate map keyed by parent comment id.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CommentsPayload {
    Tree(Vec<Comment>),
    Flat {
        comments: Vec<Comment>,
        #[serde(default, deserialize_with = "deserialize_id_keyed_map")]
        subcomments: HashMap<i64, Vec<Comment>>,
    },
}

/// JSON object keys are strings; inside an untagged enum serde buffers the
/// document and will not parse them back into integers, so fold the
/// `{parent_id: [Comment]}` map through `String` keys explicitly.
fn deserialize_id_keyed_map<'de, D>(
    deserializer: D,
) -> Result<HashMap<i64, Vec<Comment>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = HashMap::<String, Vec<Comment>>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(k, v)| {
            k.parse::<i64>()
                .map(|k| (k, v))
                .map_err(serde::de::Error::custom)
        })
        .collect()
}

impl CommentsPayload {
    /// Fold either backend shape into the nested form, preserving the
    /// backend's top-level ordering.
    pub fn normalize(self) -> Vec<Comment> {
        match self {
            CommentsPayload::Tree(comments) => comments,
            CommentsPayload::Flat {
                comments,
                mut subcomments,
            } => comments
                .into_iter()
                .map(|mut c| {
                    if let Some(replies) = subcomments.remove(&c.id) {
                        c.subcomments = replies;
                    }
                    c
                })
                .collect(),
        }
    }
}

/// Aggregate response entity: one article plus its comment thread.
///
/// Constructed only for the duration of one request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FullNewsWithComments {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub pub_time: i64,
    pub link: String,
    pub comments: Vec<Comment>,
}

impl FullNewsWithComments {
    /// Merge an article with its normalized comment thread.
    pub fn from_parts(news: FullNews, comments: Vec<Comment>) -> Self {
        Self {
            id: news.id,
            title: news.title,
            content: news.content,
            pub_time: news.pub_time,
            link: news.link,
            comments,
        }
    }
}
