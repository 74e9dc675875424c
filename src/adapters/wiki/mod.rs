//! Wikipedia adapters. Page fetching over HTTP and article markup parsing.

pub mod article_html;
pub mod fetcher;

pub use article_html::{parse_article, validate_article_url};
pub use fetcher::ReqwestPageFetcher;
