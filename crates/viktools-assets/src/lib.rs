//! Web pages and static assets for VikTools.
//!
//! Everything under `assets/` is compiled into the binary with `rust-embed`,
//! so the server runs without a separate asset directory.

use std::borrow::Cow;

#[derive(rust_embed::RustEmbed)]
#[folder = "assets/"]
struct Assets;

/// Get an asset by path relative to `assets/` (e.g., `js/plantuml.js`).
///
/// Returns `None` if the asset doesn't exist.
pub fn get(path: &str) -> Option<Cow<'static, [u8]>> {
    Assets::get(path).map(|f| f.data)
}

/// Iterate all embedded asset paths.
pub fn iter() -> impl Iterator<Item = Cow<'static, str>> {
    Assets::iter()
}

/// Return the MIME type string for the given file path.
///
/// Text types carry an explicit UTF-8 charset.
pub fn mime_for(path: &str) -> String {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() == mime_guess::mime::TEXT && mime.get_param(mime_guess::mime::CHARSET).is_none() {
        format!("{mime}; charset=utf-8")
    } else {
        mime.to_string()
    }
}
