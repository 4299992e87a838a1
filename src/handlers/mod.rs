/// HTTP handlers for the blog endpoints
///
/// This module contains handlers for:
/// - Posts: listing, detail, create/update via multipart forms, image
///   download, like counter
/// - Commentaries: create, update, delete with redirect-back semantics
pub mod comments;
pub mod posts;

use actix_web::{http::header, HttpResponse};

// Re-export handler functions at module level
pub use comments::{create_comment, delete_comment, update_comment};
pub use posts::{
    create_post, delete_post, get_image, get_post, like_post, list_posts, update_post,
};

/// Redirect-after-mutation response used by every form endpoint
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_see_other_sets_location() {
        let resp = see_other("/posts");
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let location = resp
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok());
        assert_eq!(location, Some("/posts"));
    }
}
