/// Database access layer
///
/// Repository functions are free async fns over `&mut PgConnection` so the
/// service layer can run them standalone or inside a transaction.
pub mod comment_repo;
pub mod image_repo;
pub mod post_repo;
pub mod tag_repo;
