//! Selected-thumb background resolution.
//!
//! The background is resolved at most once per geometry: first as a raw
//! bitmap decoded to the slot size, then, if that yields nothing, as a
//! drawable rasterised to the same size.  When both strategies fail the
//! thumb is drawn without a background.

use std::path::Path;

use image::{imageops::FilterType, Rgba, RgbaImage};
use thiserror::Error;

use super::style::{Argb, BackgroundRef};

#[derive(Debug, Error)]
pub enum BackgroundError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("`{0}` is not a drawable description")]
    UnknownDrawable(String),
    #[error("empty target size {width}x{height}")]
    EmptySize { width: i32, height: i32 },
}

/// Something that can be rasterised into a bitmap.
#[derive(Debug, Clone)]
pub enum Drawable {
    /// Already a bitmap; used as-is regardless of the requested size.
    Bitmap(RgbaImage),
    /// Solid fill.
    Color(Argb),
    /// Horizontal two-stop gradient.
    Gradient { from: Argb, to: Argb },
}

impl Drawable {
    /// Parse `#RRGGBB`, `color:#RRGGBB` or `gradient:#RRGGBB,#RRGGBB`.
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if let Some(rest) = spec.strip_prefix("gradient:") {
            let (from, to) = rest.split_once(',')?;
            return Some(Self::Gradient {
                from: Argb::parse(from)?,
                to: Argb::parse(to)?,
            });
        }
        let color = spec.strip_prefix("color:").unwrap_or(spec);
        Argb::parse(color).map(Self::Color)
    }
}

/// Rasterise `drawable` into a `width × height` bitmap.
pub fn drawable_to_bitmap(drawable: Drawable, width: u32, height: u32) -> RgbaImage {
    match drawable {
        Drawable::Bitmap(bitmap) => bitmap,
        Drawable::Color(color) => RgbaImage::from_pixel(width, height, Rgba(color.to_rgba())),
        Drawable::Gradient { from, to } => {
            let span = width.saturating_sub(1).max(1) as f32;
            RgbaImage::from_fn(width, height, |x, _| {
                let t = x as f32 / span;
                let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
                let (a, b) = (from.to_rgba(), to.to_rgba());
                Rgba([mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2]), mix(a[3], b[3])])
            })
        }
    }
}

/// Host image utilities.
pub trait ImageLoader {
    /// Decode `source` as a raw bitmap scaled to `width × height`.
    fn decode_bitmap(
        &self,
        source: &BackgroundRef,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage, BackgroundError>;

    /// Load `source` as a drawable.
    fn load_drawable(&self, source: &BackgroundRef) -> Result<Drawable, BackgroundError>;
}

/// Decodes image files with the `image` crate and treats anything that is
/// not a decodable file as a drawable description.
#[derive(Debug, Clone, Default)]
pub struct FsImageLoader;

impl ImageLoader for FsImageLoader {
    fn decode_bitmap(
        &self,
        source: &BackgroundRef,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage, BackgroundError> {
        let path = Path::new(source.as_str());
        let bytes = std::fs::read(path).map_err(|e| BackgroundError::Io {
            path: source.as_str().to_string(),
            source: e,
        })?;
        let decoded = image::load_from_memory(&bytes).map_err(|e| BackgroundError::Decode {
            path: source.as_str().to_string(),
            source: e,
        })?;
        Ok(decoded.resize_exact(width, height, FilterType::Triangle).to_rgba8())
    }

    fn load_drawable(&self, source: &BackgroundRef) -> Result<Drawable, BackgroundError> {
        Drawable::parse(source.as_str())
            .ok_or_else(|| BackgroundError::UnknownDrawable(source.as_str().to_string()))
    }
}

/// Resolve `source` to a `width × height` bitmap, trying the raw decode first.
pub fn resolve(
    loader: &dyn ImageLoader,
    source: &BackgroundRef,
    width: i32,
    height: i32,
) -> Result<RgbaImage, BackgroundError> {
    if width <= 0 || height <= 0 {
        return Err(BackgroundError::EmptySize { width, height });
    }
    let (w, h) = (width as u32, height as u32);
    match loader.decode_bitmap(source, w, h) {
        Ok(bitmap) => Ok(bitmap),
        Err(decode_err) => {
            tracing::debug!(error = %decode_err, "raw decode failed, rasterising drawable");
            let drawable = loader.load_drawable(source)?;
            Ok(drawable_to_bitmap(drawable, w, h))
        }
    }
}

#[derive(Debug, Default)]
enum CacheSlot {
    #[default]
    Unresolved,
    Ready(RgbaImage),
    Failed,
}

/// Memoised background bitmap; cleared whenever the slot geometry changes.
#[derive(Debug, Default)]
pub struct BackgroundCache {
    slot: CacheSlot,
}

impl BackgroundCache {
    pub fn invalidate(&mut self) {
        self.slot = CacheSlot::Unresolved;
    }

    /// Resolved bitmap, decoding it on first use.
    pub fn get_or_resolve(
        &mut self,
        loader: &dyn ImageLoader,
        source: &BackgroundRef,
        width: i32,
        height: i32,
    ) -> Option<&RgbaImage> {
        if matches!(self.slot, CacheSlot::Unresolved) {
            self.slot = match resolve(loader, source, width, height) {
                Ok(bitmap) => CacheSlot::Ready(bitmap),
                Err(e) => {
                    tracing::warn!(source = source.as_str(), error = %e, "selected background unavailable");
                    CacheSlot::Failed
                }
            };
        }
        match &self.slot {
            CacheSlot::Ready(bitmap) => Some(bitmap),
            _ => None,
        }
    }
}
