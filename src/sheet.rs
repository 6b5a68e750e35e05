use std::path::{Path, PathBuf};

use image::RgbaImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("no sheet strips (*.png) found under '{0}'")]
    NoSheets(PathBuf),
    #[error("failed to decode '{path}': {source}")]
    Decode { path: PathBuf, source: image::ImageError },
    #[error(
        "strip '{path}' is {width}x{height}, need at least {need_w}x{need_h} for {count} frames"
    )]
    Undersized {
        path: PathBuf,
        width: u32,
        height: u32,
        need_w: u32,
        need_h: u32,
        count: u32,
    },
}

/// Transparency handling for a sheet strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorKey {
    /// Keep every pixel as decoded.
    Opaque,
    /// Sentinel: key out whatever color sits at the strip's origin pixel.
    Origin,
    /// Key out one explicit color.
    Rgb([u8; 3]),
}

/// The frames of one sheet variant, sliced left-to-right from a strip.
#[derive(Debug, Clone)]
pub struct SheetStrip {
    pub frames: Vec<RgbaImage>,
}

/// Every sheet variant discovered for the demo, all sharing one frame size.
/// An actor picks a variant at spawn time.
#[derive(Debug, Clone)]
pub struct SheetSet {
    pub frame_w: u32,
    pub frame_h: u32,
    variants: Vec<SheetStrip>,
}

impl SheetSet {
    /// Scan `dir` recursively for `.png` strips (sorted by path, so variant
    /// order is stable across runs) and slice each into `count` frames.
    /// Missing directory, zero strips, or any undersized/corrupt strip is
    /// fatal — the caller configured sprites, so sprites must load.
    pub fn load_dir(
        dir: &Path,
        frame_w: u32,
        frame_h: u32,
        count: u32,
        key: ColorKey,
    ) -> Result<Self, AssetError> {
        let mut paths: Vec<PathBuf> = walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().to_path_buf())
            .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("png"))
            .collect();
        paths.sort();
        if paths.is_empty() {
            return Err(AssetError::NoSheets(dir.to_path_buf()));
        }

        let variants = paths
            .iter()
            .map(|path| load_strip(path, frame_w, frame_h, count, key))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!("loaded {} sheet variants from '{}'", variants.len(), dir.display());
        Ok(Self { frame_w, frame_h, variants })
    }

    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Frame count of each variant, in variant order. What the spawner needs
    /// to size each actor's animator.
    pub fn frame_counts(&self) -> Vec<usize> {
        self.variants.iter().map(|v| v.frames.len()).collect()
    }

    pub fn variants(&self) -> &[SheetStrip] {
        &self.variants
    }
}

/// Decode one strip image and slice it into frames.
pub fn load_strip(
    path: &Path,
    frame_w: u32,
    frame_h: u32,
    count: u32,
    key: ColorKey,
) -> Result<SheetStrip, AssetError> {
    let sheet = image::open(path)
        .map_err(|source| AssetError::Decode { path: path.to_path_buf(), source })?
        .to_rgba8();

    let need_w = frame_w * count;
    if sheet.width() < need_w || sheet.height() < frame_h {
        return Err(AssetError::Undersized {
            path: path.to_path_buf(),
            width: sheet.width(),
            height: sheet.height(),
            need_w,
            need_h: frame_h,
            count,
        });
    }

    Ok(SheetStrip { frames: slice_strip(&sheet, frame_w, frame_h, count, key) })
}

/// Slice `count` frames of `frame_w × frame_h` pixels left-to-right from a
/// single-row strip, applying the color key. Pure — no I/O, no GPU. The
/// caller guarantees the strip is large enough.
pub fn slice_strip(
    sheet: &RgbaImage,
    frame_w: u32,
    frame_h: u32,
    count: u32,
    key: ColorKey,
) -> Vec<RgbaImage> {
    let key_rgb = match key {
        ColorKey::Opaque => None,
        ColorKey::Origin => {
            let p = sheet.get_pixel(0, 0).0;
            Some([p[0], p[1], p[2]])
        }
        ColorKey::Rgb(rgb) => Some(rgb),
    };

    (0..count)
        .map(|n| {
            let mut frame = RgbaImage::new(frame_w, frame_h);
            for y in 0..frame_h {
                for x in 0..frame_w {
                    let mut px = *sheet.get_pixel(n * frame_w + x, y);
                    if let Some(k) = key_rgb {
                        if [px.0[0], px.0[1], px.0[2]] == k {
                            px.0[3] = 0;
                        }
                    }
                    frame.put_pixel(x, y, px);
                }
            }
            frame
        })
        .collect()
}

// ── Atlas layout ─────────────────────────────────────────────────────────────

/// Where each frame of each variant lands inside the single atlas texture
/// the renderer uploads: variant `v` occupies row `v`, frame `f` column `f`.
/// Pure grid math, kept separate from the GPU so it can be tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasLayout {
    pub frame_w: u32,
    pub frame_h: u32,
    pub columns: u32,
    pub rows: u32,
}

impl AtlasLayout {
    pub fn for_counts(frame_w: u32, frame_h: u32, frame_counts: &[usize]) -> Self {
        let columns = frame_counts.iter().copied().max().unwrap_or(0) as u32;
        Self { frame_w, frame_h, columns, rows: frame_counts.len() as u32 }
    }

    /// Atlas pixel dimensions. Never zero, so an empty layout still uploads
    /// a valid 1×1 texture.
    pub fn atlas_size(&self) -> (u32, u32) {
        (
            (self.columns * self.frame_w).max(1),
            (self.rows * self.frame_h).max(1),
        )
    }

    /// Top-left pixel of `(variant, frame)` inside the atlas.
    pub fn pixel_origin(&self, variant: usize, frame: usize) -> (u32, u32) {
        (frame as u32 * self.frame_w, variant as u32 * self.frame_h)
    }

    /// Returns `(uv_min, uv_max)` for `(variant, frame)`.
    pub fn uv(&self, variant: usize, frame: usize) -> ([f32; 2], [f32; 2]) {
        let (aw, ah) = self.atlas_size();
        let (ox, oy) = self.pixel_origin(variant, frame);
        let uv_min = [ox as f32 / aw as f32, oy as f32 / ah as f32];
        let uv_max = [
            (ox + self.frame_w) as f32 / aw as f32,
            (oy + self.frame_h) as f32 / ah as f32,
        ];
        (uv_min, uv_max)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Build a strip where frame `n` is filled with gray value `n + 1`,
    /// except the origin pixel which is magenta (the key color).
    fn test_strip(frame_w: u32, frame_h: u32, count: u32) -> RgbaImage {
        let mut img = RgbaImage::new(frame_w * count, frame_h);
        for n in 0..count {
            let v = (n + 1) as u8;
            for y in 0..frame_h {
                for x in 0..frame_w {
                    img.put_pixel(n * frame_w + x, y, Rgba([v, v, v, 255]));
                }
            }
        }
        img.put_pixel(0, 0, Rgba([255, 0, 255, 255]));
        img
    }

    #[test]
    fn slice_produces_count_frames_of_requested_size() {
        let strip = test_strip(4, 3, 5);
        let frames = slice_strip(&strip, 4, 3, 5, ColorKey::Opaque);
        assert_eq!(frames.len(), 5);
        for f in &frames {
            assert_eq!(f.dimensions(), (4, 3));
        }
    }

    #[test]
    fn slice_reads_frames_left_to_right() {
        let strip = test_strip(4, 3, 3);
        let frames = slice_strip(&strip, 4, 3, 3, ColorKey::Opaque);
        // Frame n is filled with gray value n + 1 (sampled away from origin).
        for (n, f) in frames.iter().enumerate() {
            let v = (n + 1) as u8;
            assert_eq!(f.get_pixel(2, 2).0, [v, v, v, 255], "frame {n}");
        }
    }

    #[test]
    fn origin_sentinel_keys_out_the_origin_color() {
        let strip = test_strip(4, 3, 2);
        let frames = slice_strip(&strip, 4, 3, 2, ColorKey::Origin);
        // The origin pixel is magenta, so magenta becomes transparent...
        assert_eq!(frames[0].get_pixel(0, 0).0[3], 0);
        // ...while the gray fill keeps its alpha.
        assert_eq!(frames[0].get_pixel(2, 2).0[3], 255);
    }

    #[test]
    fn explicit_rgb_key_matches_only_that_color() {
        let strip = test_strip(4, 3, 2);
        // Key out frame 1's fill (gray value 2).
        let frames = slice_strip(&strip, 4, 3, 2, ColorKey::Rgb([2, 2, 2]));
        assert_eq!(frames[1].get_pixel(2, 2).0[3], 0);
        assert_eq!(frames[0].get_pixel(2, 2).0[3], 255);
    }

    #[test]
    fn opaque_key_changes_nothing() {
        let strip = test_strip(4, 3, 1);
        let frames = slice_strip(&strip, 4, 3, 1, ColorKey::Opaque);
        assert!(frames[0].pixels().all(|p| p.0[3] == 255));
    }

    // ── AtlasLayout ───────────────────────────────────────────────────────

    #[test]
    fn layout_rows_match_variant_count_and_columns_match_widest() {
        let layout = AtlasLayout::for_counts(192, 192, &[5, 5, 3, 5]);
        assert_eq!(layout.rows, 4);
        assert_eq!(layout.columns, 5);
        assert_eq!(layout.atlas_size(), (960, 768));
    }

    #[test]
    fn layout_empty_set_still_has_nonzero_atlas() {
        let layout = AtlasLayout::for_counts(192, 192, &[]);
        assert_eq!(layout.atlas_size(), (1, 1));
    }

    #[test]
    fn layout_pixel_origin_walks_the_grid() {
        let layout = AtlasLayout::for_counts(16, 24, &[5, 5]);
        assert_eq!(layout.pixel_origin(0, 0), (0, 0));
        assert_eq!(layout.pixel_origin(0, 3), (48, 0));
        assert_eq!(layout.pixel_origin(1, 2), (32, 24));
    }

    #[test]
    fn layout_uvs_stay_in_unit_range_and_are_non_degenerate() {
        let layout = AtlasLayout::for_counts(192, 192, &[5, 5, 5, 5]);
        for v in 0..4 {
            for f in 0..5 {
                let (uv_min, uv_max) = layout.uv(v, f);
                for c in uv_min.iter().chain(uv_max.iter()) {
                    assert!((0.0..=1.0).contains(c), "uv {c} out of range");
                }
                assert!(uv_min[0] < uv_max[0]);
                assert!(uv_min[1] < uv_max[1]);
            }
        }
    }
}
