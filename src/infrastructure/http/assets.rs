//! Embedded dashboard pages and static files

use crate::infrastructure::http::responses::HTML_CONTENT_TYPE;

pub const INDEX_HTML: &str = include_str!("../../../assets/index.html");
pub const USER_HTML: &str = include_str!("../../../assets/user.html");

/// A file compiled into the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedAsset {
    pub content_type: &'static str,
    pub body: &'static str,
}

const STATIC_ASSETS: &[(&str, EmbeddedAsset)] = &[(
    "utils.js",
    EmbeddedAsset {
        content_type: "text/javascript; charset=utf-8",
        body: include_str!("../../../assets/static/utils.js"),
    },
)];

/// Look up a file served under `/static/`
pub fn static_asset(name: &str) -> Option<EmbeddedAsset> {
    STATIC_ASSETS
        .iter()
        .find(|(asset_name, _)| *asset_name == name)
        .map(|(_, asset)| *asset)
}

pub fn index_page() -> EmbeddedAsset {
    EmbeddedAsset {
        content_type: HTML_CONTENT_TYPE,
        body: INDEX_HTML,
    }
}

pub fn user_page() -> EmbeddedAsset {
    EmbeddedAsset {
        content_type: HTML_CONTENT_TYPE,
        body: USER_HTML,
    }
}
