//! Command modules for the site-contributors CLI.
//!
//! - `fetch_cmd`: Print a repository's contributor list as JSON
//! - `render_cmd`: Expand template tags in a page file

pub mod fetch_cmd;
pub mod render_cmd;
