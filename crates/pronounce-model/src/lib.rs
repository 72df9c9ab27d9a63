pub mod error;
pub mod report;
pub mod request;

pub use error::*;
pub use report::*;
pub use request::*;

/// `User-Agent` sent by the browser session and by every plain HTTP request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
