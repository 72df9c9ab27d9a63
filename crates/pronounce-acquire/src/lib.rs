pub mod browser;
pub mod download;
pub mod http;
pub mod locate;
pub mod media;
pub mod pipeline;

pub use browser::{Browser, BrowserOptions, BrowserSession, ChromeBrowser};
pub use http::HttpClient;
pub use media::MediaFilter;
pub use pipeline::{Pipeline, PipelineSettings};
