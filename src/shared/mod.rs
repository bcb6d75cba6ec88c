pub mod api;
pub mod app_urls;
pub mod background;
pub mod db;
pub mod pagination;
