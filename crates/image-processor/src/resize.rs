//! Nearest-neighbor resizing to the fixed card size.
//!
//! Output pixel `(x, y)` samples source pixel
//! `(floor(x * src_w / dst_w), floor(y * src_h / dst_h))`. No interpolation.

use tracing::debug;

use crate::grid::{PixelGrid, TargetDimensions};
use crate::{ProcessError, Result};

/// Resize a grid to exactly `target` using nearest-neighbor sampling.
///
/// Fails when either the source grid or `target` has zero width or height.
pub fn resize_nearest(src: &PixelGrid, target: TargetDimensions) -> Result<PixelGrid> {
    let (src_w, src_h) = (src.width(), src.height());
    if src.is_empty() {
        return Err(ProcessError::EmptyGrid {
            width: src_w,
            height: src_h,
        });
    }

    let TargetDimensions {
        width: dst_w,
        height: dst_h,
    } = target;
    if dst_w == 0 || dst_h == 0 {
        return Err(ProcessError::EmptyTarget {
            width: dst_w,
            height: dst_h,
        });
    }

    if (src_w, src_h) == (dst_w, dst_h) {
        debug!(width = dst_w, height = dst_h, "Grid already at target size, skipping resize");
        return Ok(src.clone());
    }

    debug!(
        src_w,
        src_h,
        dst_w,
        dst_h,
        "Resizing grid with nearest-neighbor sampling"
    );

    let src_x: Vec<u32> = (0..dst_w).map(|x| scale(x, src_w, dst_w)).collect();
    let mut values = Vec::with_capacity(dst_w as usize * dst_h as usize);
    for y in 0..dst_h {
        let sy = scale(y, src_h, dst_h);
        values.extend(src_x.iter().map(|&sx| src.get(sx, sy)));
    }

    PixelGrid::new(dst_w, dst_h, values)
}

/// `floor(i * src / dst)` without intermediate overflow.
fn scale(i: u32, src: u32, dst: u32) -> u32 {
    (u64::from(i) * u64::from(src) / u64::from(dst)) as u32
}
