pub mod environment;
pub mod fetch;
pub mod logging;
pub mod sdn;
pub mod snapshot;

pub const TARGET_WEB_REQUEST: &str = "web_request";
pub const TARGET_EXTRACT: &str = "extract";
pub const TARGET_SNAPSHOT: &str = "snapshot";
