//! HTTP utilities module
//!
//! Response builders shared by the page and API handlers.

pub mod response;

pub use response::{
    build_400_response, build_404_response, build_405_response, build_413_response,
    build_500_response, build_html_response, build_options_response, build_redirect_response,
};
