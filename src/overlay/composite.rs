use crate::foundation::error::{BeeswarmError, BeeswarmResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u16};

/// Source-over of one premultiplied RGBA8 pixel onto another.
pub(crate) fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = add_sat_u8(u16::from(src[i]), mul_div255_u16(u16::from(dst[i]), inv));
    }
    out
}

/// Composite a premultiplied RGBA8 layer over an opaque RGBA8 frame in place.
pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8]) -> BeeswarmResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(BeeswarmError::media(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/composite.rs"]
mod tests;
