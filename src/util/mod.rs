//! Small helpers shared by the view layer and the API client.
//!
//! - **Text**: display width, column-aware truncation, capitalization
//! - **Dates**: release-year extraction and the "last month" cutoff
//! - **Featured**: uniform random pick for the banner row
//! - **URL validation**: base URL policy for the media API
//!
//! # Examples
//!
//! ```
//! use marquee::util::{truncate_to_width, year_only};
//!
//! assert_eq!(truncate_to_width("A very long overview", 9), "A very...");
//! assert_eq!(year_only("2021-10-22"), Some("2021"));
//! ```

mod date;
mod featured;
mod text;
mod url_validator;

pub use date::{one_month_ago, year_only};
pub use featured::pick_featured;
pub use text::{capitalize_first, display_width, sanitize, truncate_to_width};
pub use url_validator::{validate_base_url, UrlValidationError};

/// Overview length shown in the featured banner.
pub const BANNER_OVERVIEW_WIDTH: usize = 150;
