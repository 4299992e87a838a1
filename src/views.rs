/// Server-rendered views
///
/// Wraps a minijinja environment with the HTML templates embedded in the
/// binary. Handlers render a template against a serializable context and
/// send the result as the response body.
use minijinja::Environment;
use serde::Serialize;

pub const POSTS_TEMPLATE: &str = "posts.html";
pub const POST_TEMPLATE: &str = "post.html";

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.add_template(POSTS_TEMPLATE, include_str!("../templates/posts.html"))
            .expect("posts.html template parses");
        env.add_template(POST_TEMPLATE, include_str!("../templates/post.html"))
            .expect("post.html template parses");
        Self { env }
    }

    pub fn render<S: Serialize>(&self, name: &str, context: &S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(context)
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Comment, PostDetail, PostSummary, PostsPage, Tag};

    fn sample_page() -> PostsPage {
        PostsPage {
            items: vec![PostSummary {
                id: 1,
                title: "First post".to_string(),
                text: "Hello blog".to_string(),
                likes: 2,
                tags: vec![Tag {
                    id: 1,
                    name: "rust".to_string(),
                }],
                comment_count: 3,
            }],
            page: 2,
            total_pages: 5,
            per_page: 1,
            tag: Some("rust".to_string()),
        }
    }

    #[test]
    fn test_listing_renders_posts_and_paging() {
        let templates = Templates::new();
        let html = templates.render(POSTS_TEMPLATE, &sample_page()).unwrap();
        assert!(html.contains("First post"));
        assert!(html.contains("Page 2 of 5"));
        assert!(html.contains("#rust"));
        assert!(html.contains("3 comments"));
    }

    #[test]
    fn test_listing_renders_empty_state() {
        let page = PostsPage {
            items: Vec::new(),
            page: 1,
            total_pages: 0,
            per_page: 10,
            tag: None,
        };
        let templates = Templates::new();
        let html = templates.render(POSTS_TEMPLATE, &page).unwrap();
        assert!(html.contains("No posts yet"));
    }

    #[test]
    fn test_detail_renders_comments() {
        let detail = PostDetail {
            id: 7,
            title: "A title".to_string(),
            text: "Body".to_string(),
            likes: 1,
            tags: Vec::new(),
            comments: vec![Comment {
                id: 1,
                post_id: 7,
                text: "nice one".to_string(),
            }],
        };
        let templates = Templates::new();
        let html = templates.render(POST_TEMPLATE, &detail).unwrap();
        assert!(html.contains("A title"));
        assert!(html.contains("nice one"));
        assert!(html.contains("/posts/post/7/image"));
    }
}
