/// Copy `height` rows of `bytes_per_line` bytes between blocks with
/// independent row strides, given in bytes.
///
/// A negative stride addresses its block from the last row backward: row 0
/// sits at the highest offset and row `height - 1` at offset 0. Each slice
/// must cover the whole block it addresses, `|stride| * height` bytes.
///
/// When both strides are equal the copy collapses to one bulk copy over
/// the block, gap bytes included.
pub fn copy_strided(
    dst: &mut [u8],
    src: &[u8],
    bytes_per_line: usize,
    height: usize,
    dst_stride: isize,
    src_stride: isize,
) {
    copy_rows(dst, src, bytes_per_line, height, dst_stride, src_stride, false);
}

/// Same as [`copy_strided`], but always skips the bytes between the end of
/// a line and the start of the next, even when the strides are equal.
pub fn copy_strided_rows(
    dst: &mut [u8],
    src: &[u8],
    bytes_per_line: usize,
    height: usize,
    dst_stride: isize,
    src_stride: isize,
) {
    copy_rows(dst, src, bytes_per_line, height, dst_stride, src_stride, true);
}

fn row_offset(row: usize, height: usize, stride: isize) -> usize {
    if stride < 0 {
        (height - 1 - row) * stride.unsigned_abs()
    } else {
        row * stride as usize
    }
}

fn copy_rows(
    dst: &mut [u8],
    src: &[u8],
    bytes_per_line: usize,
    height: usize,
    dst_stride: isize,
    src_stride: isize,
    limit_to_width: bool,
) {
    if height == 0 {
        return;
    }

    if !limit_to_width && dst_stride == src_stride {
        // Uniformly strided: one bulk copy covers the block. With a
        // negative stride the last row holds the lowest offset, so the
        // copy still runs forward from 0.
        let len = src_stride.unsigned_abs() * height;
        dst[..len].copy_from_slice(&src[..len]);
        return;
    }

    for row in 0..height {
        let s = row_offset(row, height, src_stride);
        let d = row_offset(row, height, dst_stride);
        dst[d..d + bytes_per_line].copy_from_slice(&src[s..s + bytes_per_line]);
    }
}
