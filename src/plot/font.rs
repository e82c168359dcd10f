//! Runtime font discovery.
//!
//! Plotters' `ab_glyph` text backend draws only fonts registered at runtime.
//! We look for one once per process: `LABFIT_FONT` first, then well-known
//! system locations with CJK-capable fonts ahead of Latin-only ones so the
//! Chinese resistance chart title renders.

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::OnceLock;

use plotters::style::{FontStyle, register_font};

/// Environment variable naming a `.ttf` / `.otf` / `.ttc` file to use.
pub const FONT_ENV: &str = "LABFIT_FONT";

/// Family name every chart uses for its text.
pub const FAMILY: &str = "sans-serif";

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/opentype/source-han-serif/SourceHanSerif-Regular.otf",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/wenquanyi/wqy-microhei/wqy-microhei.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static TEXT_READY: OnceLock<bool> = OnceLock::new();

/// Whether chart text can be rasterized.
///
/// The first call searches for and registers a font; later calls return the
/// cached outcome.
pub fn text_available() -> bool {
    *TEXT_READY.get_or_init(|| register_first_font(candidates()).is_some())
}

fn candidates() -> Vec<PathBuf> {
    candidates_with(std::env::var_os(FONT_ENV))
}

fn candidates_with(env_font: Option<OsString>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    if let Some(path) = env_font {
        out.push(PathBuf::from(path));
    }
    out.extend(SYSTEM_FONTS.iter().map(PathBuf::from));
    out
}

/// Register the first readable font among `paths`; returns its path.
///
/// Missing files and files that are not TrueType/OpenType are skipped.
fn register_first_font(paths: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    for path in paths {
        let Ok(bytes) = std::fs::read(&path) else {
            continue;
        };
        // Plotters keeps a `'static` reference to registered font data; the
        // font lives for the rest of the process anyway.
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        if register_font(FAMILY, FontStyle::Normal, bytes).is_ok() {
            tracing::debug!(path = %path.display(), "registered chart font");
            return Some(path);
        }
        tracing::warn!(path = %path.display(), "unusable font (not a TrueType/OpenType file)");
    }

    tracing::warn!(
        "no usable font found (set {FONT_ENV}); charts are drawn without text"
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_a_font(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("notes.ttf");
        std::fs::write(&path, b"plain text, no font tables here").unwrap();
        path
    }

    #[test]
    fn env_font_is_tried_first() {
        let list = candidates_with(Some(OsString::from("/tmp/custom.ttf")));
        assert_eq!(list[0], PathBuf::from("/tmp/custom.ttf"));
        assert_eq!(list.len(), SYSTEM_FONTS.len() + 1);
        assert_eq!(candidates_with(None).len(), SYSTEM_FONTS.len());
    }

    #[test]
    fn invalid_font_file_falls_through_to_next_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let bad = not_a_font(dir.path());
        let missing = dir.path().join("missing.ttf");

        assert_eq!(register_first_font([bad.clone(), missing.clone()]), None);

        // With a real font installed, the bad file ahead of it is skipped.
        if SYSTEM_FONTS.iter().any(|p| std::path::Path::new(p).is_file()) {
            let mut list = candidates_with(Some(bad.clone().into_os_string()));
            list.insert(1, missing);
            let chosen = register_first_font(list).unwrap();
            assert_ne!(chosen, bad);
            assert!(SYSTEM_FONTS.iter().any(|f| std::path::Path::new(f) == chosen));
        }
    }
}
