//! Turns raw search responses into [`SearchResult`]s.

use crate::conf;
use crate::post::{Author, Post, RawPost, RawResponse, RawUser, SearchResult};
use std::collections::HashMap;

/// Canonical link to a post by a known author.
///
/// # Examples
///
/// ```
/// use xrecent::normalize::status_url;
/// assert_eq!(status_url(Some("jack"), "20"), "https://x.com/jack/status/20");
/// assert_eq!(status_url(None, "20"), "https://x.com/i/web/status/20");
/// ```
pub fn status_url(handle: Option<&str>, id: &str) -> String {
    match handle {
        Some(handle) => format!("https://{}/{handle}/status/{id}", conf::SITE),
        None => format!("https://{}/i/web/status/{id}", conf::SITE),
    }
}

/// Normalizes the response to `query`.
///
/// Authors are joined from the response's expanded users. Posts whose
/// author was not expanded keep only the author's id and link to the
/// handle-less status URL. Posts are kept in the order the API returned
/// them.
pub fn normalize(query: impl Into<String>, raw: RawResponse) -> SearchResult {
    let users: HashMap<&str, &RawUser> = raw
        .users()
        .iter()
        .map(|user| (user.id.as_str(), user))
        .collect();

    let posts = raw
        .data
        .iter()
        .map(|post| normalize_post(post, &users))
        .collect();

    SearchResult {
        query: query.into(),
        meta: raw.meta,
        posts,
    }
}

fn normalize_post(post: &RawPost, users: &HashMap<&str, &RawUser>) -> Post {
    let author = post.author_id.as_deref().map(|id| match users.get(id) {
        Some(user) => Author {
            id: id.to_string(),
            handle: Some(user.username.clone()),
            name: user.name.clone(),
        },
        None => Author {
            id: id.to_string(),
            handle: None,
            name: None,
        },
    });

    let handle = author.as_ref().and_then(|author| author.handle.as_deref());
    let url = status_url(handle, &post.id);

    Post {
        id: post.id.clone(),
        author,
        created_at: post.created_at.clone(),
        text: post.text.clone(),
        lang: post.lang.clone(),
        metrics: post.public_metrics.clone(),
        url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::load_data;
    use pretty_assertions::assert_eq;

    fn load(file: &str) -> RawResponse {
        RawResponse::parse(&load_data(file)).expect("invalid test data")
    }

    #[test]
    fn it_joins_expanded_authors() {
        let result = normalize("q", load("search_alpha"));
        let post = &result.posts[0];
        assert_eq!(
            post.author,
            Some(Author {
                id: "2244994945".to_string(),
                handle: Some("rustlang".to_string()),
                name: Some("Rust Language".to_string()),
            })
        );
        assert_eq!(
            post.url,
            "https://x.com/rustlang/status/1846000000000000001"
        );
    }

    #[test]
    fn it_falls_back_for_authors_that_were_not_expanded() {
        let result = normalize("q", load("search_orphan"));
        assert_eq!(result.posts.len(), 1);
        let post = &result.posts[0];
        assert_eq!(
            post.author,
            Some(Author {
                id: "999".to_string(),
                handle: None,
                name: None,
            })
        );
        assert_eq!(post.url, "https://x.com/i/web/status/1846000000000000100");
        assert_eq!(post.handle(), None);
    }

    #[test]
    fn it_links_posts_without_an_author() {
        let raw = RawResponse::parse(r#"{"data": [{"id": "7", "text": "hi"}]}"#).unwrap();
        let result = normalize("q", raw);
        assert_eq!(result.posts[0].author, None);
        assert_eq!(result.posts[0].url, "https://x.com/i/web/status/7");
    }

    #[test]
    fn it_preserves_provider_order() {
        let result = normalize("q", load("search_alpha"));
        let ids: Vec<_> = result.posts.iter().map(|post| post.id.as_str()).collect();
        assert_eq!(ids, ["1846000000000000001", "1846000000000000002"]);
    }

    #[test]
    fn it_mixes_known_and_unknown_authors() {
        let result = normalize("q", load("search_alpha"));
        assert_eq!(result.posts[0].handle(), Some("rustlang"));
        assert_eq!(result.posts[1].handle(), None);
        assert_eq!(
            result.posts[1].url,
            "https://x.com/i/web/status/1846000000000000002"
        );
    }

    #[test]
    fn it_passes_metrics_and_meta_through() {
        let result = normalize("q", load("search_alpha"));
        let metrics = result.posts[0].metrics.as_ref().unwrap();
        assert_eq!(metrics["like_count"], 120);
        assert_eq!(metrics["retweet_count"], 14);
        assert_eq!(result.meta.unwrap()["result_count"], 2);
    }

    #[test]
    fn it_keeps_the_query() {
        let result = normalize("(alpha) -is:retweet", load("search_empty"));
        assert_eq!(result.query, "(alpha) -is:retweet");
        assert!(result.is_empty());
    }
}
