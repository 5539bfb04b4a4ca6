#![forbid(unsafe_code)]

pub mod archive;
pub mod cli;
pub mod convert;
pub mod crawl;
pub mod filename;
pub mod formats;
pub mod http;
pub mod inspect;
pub mod logging;
pub mod pipeline;
pub mod sitemap;
pub mod status;
