mod catalog;
mod draw;
mod filters;
mod platform;
mod post;
mod selection;

#[cfg(feature = "ssr")]
mod comment;

pub use catalog::{Cursors, Page, PagesResponse, Paging, PostsQuery, PostsResponse, ServiceError};
pub use draw::{DrawRequest, DrawResponse, DrawTarget, LiveCredential, Winner};
pub use filters::{DrawForm, FilterConfig, FilterForm};
pub use platform::Platform;
pub use post::Post;
pub use selection::Selection;

#[cfg(feature = "ssr")]
pub use comment::Comment;
