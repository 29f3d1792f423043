mod browser_info;
mod platform;

pub use browser_info::*;
pub use platform::*;
