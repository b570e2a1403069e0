//! Grid-view thumbnail generation.
//!
//! Thumbnails are rendered client-side onto a canvas and cached as data
//! URLs keyed by path and revision, so a file keeps its thumbnail until
//! its content actually changes. Images are downscaled to fit, text-like
//! files get their opening lines painted, and everything else receives a
//! generated extension badge.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::config::thumbnails::{HEIGHT, JPEG_QUALITY, TEXT_CHARS_PER_LINE, TEXT_LINES, WIDTH};
use crate::core::debug;
use crate::models::{FileSystemItem, PreviewKind};
use crate::utils::{dom, fetch};

/// Client-side thumbnail renderer with a per-revision cache.
///
/// Cheap to clone; clones share the cache.
#[derive(Clone, Default)]
pub struct ThumbnailService {
    cache: Rc<RefCell<HashMap<String, String>>>,
}

impl ThumbnailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached data URL, if one was already rendered for this revision.
    pub fn cached(&self, item: &FileSystemItem) -> Option<String> {
        self.cache.borrow().get(&key_for(item)).cloned()
    }

    /// Render (or reuse) a thumbnail for `item`, whose raw bytes are
    /// served at `raw_url`.
    ///
    /// `None` means the source could not be rendered this time; failures
    /// are not cached, so a transient fetch error retries on the next
    /// paint.
    pub async fn thumbnail(&self, item: &FileSystemItem, raw_url: &str) -> Option<String> {
        let key = key_for(item);
        if let Some(cached) = self.cache.borrow().get(&key) {
            return Some(cached.clone());
        }

        let rendered = match PreviewKind::from_name(&item.name) {
            PreviewKind::Image => image_thumbnail(raw_url).await,
            PreviewKind::Markdown | PreviewKind::Text => text_thumbnail(raw_url).await,
            // PDFs render as a badge; there is no client-side page
            // rasterizer in this stack.
            PreviewKind::Pdf | PreviewKind::Code | PreviewKind::Unknown => {
                badge_data_url(extension_of(&item.name))
            }
        };

        match rendered {
            Some(data_url) => {
                self.cache.borrow_mut().insert(key, data_url.clone());
                Some(data_url)
            }
            None => {
                debug::debug("thumbnail", format!("no thumbnail for {:?}", item.path));
                None
            }
        }
    }

    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }
}

fn key_for(item: &FileSystemItem) -> String {
    format!("{}@{}", item.path, item.revision)
}

fn extension_of(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext,
        _ => "",
    }
}

// =============================================================================
// Renderers
// =============================================================================

fn make_canvas(width: u32, height: u32) -> Option<(HtmlCanvasElement, CanvasRenderingContext2d)> {
    let document = dom::window()?.document()?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .ok()?
        .dyn_into()
        .ok()?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
    Some((canvas, ctx))
}

fn to_jpeg_data_url(canvas: &HtmlCanvasElement) -> Option<String> {
    canvas
        .to_data_url_with_type_and_encoder_options("image/jpeg", &JsValue::from_f64(JPEG_QUALITY))
        .ok()
}

/// Decode the image off-DOM and downscale it to fit the thumbnail box
/// while keeping its aspect ratio.
async fn image_thumbnail(url: &str) -> Option<String> {
    let img = load_image(url).await?;
    let (natural_w, natural_h) = (img.natural_width(), img.natural_height());
    if natural_w == 0 || natural_h == 0 {
        return None;
    }

    let scale = (f64::from(WIDTH) / f64::from(natural_w))
        .min(f64::from(HEIGHT) / f64::from(natural_h));
    let out_w = (f64::from(natural_w) * scale).max(1.0);
    let out_h = (f64::from(natural_h) * scale).max(1.0);

    let (canvas, ctx) = make_canvas(out_w as u32, out_h as u32)?;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(&img, 0.0, 0.0, out_w, out_h)
        .ok()?;
    to_jpeg_data_url(&canvas)
}

async fn load_image(url: &str) -> Option<HtmlImageElement> {
    let img = HtmlImageElement::new().ok()?;
    // the canvas is tainted without this, and a tainted canvas refuses
    // to export a data URL
    img.set_cross_origin(Some("anonymous"));
    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        img.set_onload(Some(&resolve));
        img.set_onerror(Some(&reject));
    });
    img.set_src(url);
    JsFuture::from(loaded).await.ok()?;
    Some(img)
}

/// Paint the opening lines of a text file onto the thumbnail canvas.
async fn text_thumbnail(url: &str) -> Option<String> {
    let content = fetch::fetch_text(url).await.ok()?;
    let (canvas, ctx) = make_canvas(WIDTH, HEIGHT)?;

    ctx.set_fill_style_str("#101630");
    ctx.fill_rect(0.0, 0.0, f64::from(WIDTH), f64::from(HEIGHT));
    ctx.set_fill_style_str("#8890b5");
    ctx.set_font("8px monospace");

    for (i, line) in content.lines().take(TEXT_LINES).enumerate() {
        let clipped: String = line.chars().take(TEXT_CHARS_PER_LINE).collect();
        ctx.fill_text(&clipped, 4.0, 12.0 + (i as f64) * 10.0).ok()?;
    }

    to_jpeg_data_url(&canvas)
}

// =============================================================================
// Extension badges
// =============================================================================

fn badge_data_url(extension: &str) -> Option<String> {
    let svg = badge_svg(extension);
    let encoded = dom::window()?.btoa(&svg).ok()?;
    Some(format!("data:image/svg+xml;base64,{encoded}"))
}

/// A generated placeholder: a page outline with the extension stamped
/// under it in the extension's accent color.
fn badge_svg(extension: &str) -> String {
    let color = badge_color(extension);
    let label = if extension.is_empty() {
        "FILE".to_string()
    } else {
        format!(".{}", extension.to_ascii_uppercase())
    };
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r##"<rect width="{w}" height="{h}" fill="#101630"/>"##,
            r##"<rect x="20" y="20" width="80" height="100" fill="#1a2142" stroke="#2a3166"/>"##,
            r#"<text x="60" y="140" text-anchor="middle" fill="{color}" font-size="14" font-family="monospace" font-weight="bold">{label}</text>"#,
            r#"</svg>"#
        ),
        w = WIDTH,
        h = HEIGHT,
        color = color,
        label = label
    )
}

fn badge_color(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "pdf" => "#e74c3c",
        "rs" => "#dea584",
        "js" | "jsx" => "#f7df1e",
        "ts" | "tsx" => "#3178c6",
        "html" => "#e44d26",
        "css" => "#264de4",
        "json" | "toml" | "yaml" | "yml" => "#27ae60",
        "md" | "txt" => "#95a5a6",
        _ => "#7f8c8d",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryKind;

    fn item(name: &str, path: &str, revision: &str) -> FileSystemItem {
        FileSystemItem {
            name: name.to_string(),
            path: path.to_string(),
            kind: EntryKind::File,
            size: Some(1),
            revision: revision.to_string(),
            source_url: String::new(),
            download_url: None,
            is_accessible: true,
            access_error: None,
        }
    }

    #[test]
    fn cache_keys_combine_path_and_revision() {
        let a = item("x.png", "docs/x.png", "aaaa1111");
        let b = item("x.png", "docs/x.png", "bbbb2222");
        assert_ne!(key_for(&a), key_for(&b));
        assert_eq!(key_for(&a), "docs/x.png@aaaa1111");
    }

    #[test]
    fn badges_stamp_the_extension() {
        let svg = badge_svg("pdf");
        assert!(svg.contains(".PDF"));
        assert!(svg.contains("#e74c3c"));

        let plain = badge_svg("");
        assert!(plain.contains("FILE"));
    }

    #[test]
    fn badge_colors_fall_back_for_unknown_extensions() {
        assert_eq!(badge_color("rs"), "#dea584");
        assert_eq!(badge_color("RS"), "#dea584");
        assert_eq!(badge_color("zip"), "#7f8c8d");
    }

    #[test]
    fn extensions_split_on_the_last_dot() {
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of("trailing."), "");
    }

    #[test]
    fn fresh_service_has_nothing_cached() {
        let service = ThumbnailService::new();
        assert!(service.cached(&item("a.png", "a.png", "r1")).is_none());
        service.clear();
    }
}
