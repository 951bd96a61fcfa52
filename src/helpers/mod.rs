//! Helper functions shared by listings and detail pages
//!
//! Everything here is about making site-relative references correct when
//! the site is served under a deployment sub-path.

mod html;
mod url;

pub use html::*;
pub use url::*;
