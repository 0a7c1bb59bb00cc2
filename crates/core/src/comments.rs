//! Comment list ordering.

use crate::ordering::{parse_ordering, SortKey};

/// Fields the comment list may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSortField {
    Movie,
    User,
    Created,
}

impl CommentSortField {
    pub fn from_param(name: &str) -> Option<Self> {
        match name {
            "movie" => Some(Self::Movie),
            "user" => Some(Self::User),
            "created" => Some(Self::Created),
            _ => None,
        }
    }
}

/// Parse `?ordering=` for the comment list, falling back to
/// `created, user` ascending when nothing valid was supplied.
pub fn parse_comment_ordering(raw: Option<&str>) -> Vec<SortKey<CommentSortField>> {
    let keys = parse_ordering(raw, CommentSortField::from_param);
    if keys.is_empty() {
        return vec![
            SortKey { field: CommentSortField::Created, descending: false },
            SortKey { field: CommentSortField::User, descending: false },
        ];
    }
    keys
}
