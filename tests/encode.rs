use enough::Unstoppable;
use zenbmp24::*;

fn le_u32(bytes: &[u8], off: usize) -> u32 {
    u32::from_le_bytes(bytes[off..off + 4].try_into().unwrap())
}

fn le_i32(bytes: &[u8], off: usize) -> i32 {
    i32::from_le_bytes(bytes[off..off + 4].try_into().unwrap())
}

fn le_u16(bytes: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([bytes[off], bytes[off + 1]])
}

fn gradient(w: usize, h: usize) -> Vec<Pixel> {
    let mut pixels = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            pixels.push(Pixel::new((x * 17) as u8, (y * 31) as u8, ((x + y) * 7) as u8));
        }
    }
    pixels
}

fn noise_pattern(w: usize, h: usize) -> Vec<Pixel> {
    let mut state: u32 = 0xDEAD_BEEF;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state as u8
    };
    (0..w * h).map(|_| Pixel::new(next(), next(), next())).collect()
}

// ── Scenarios ────────────────────────────────────────────────────────

#[test]
fn single_red_pixel() {
    let bmp = encode_bmp(&[Pixel::new(255, 0, 0)], 1, 1, Unstoppable).unwrap();
    assert_eq!(bmp.len(), 58);
    assert_eq!(bmp.padding(), 1);
    assert_eq!(&bmp[54..], &[0, 0, 255, 0]);
    assert_eq!(bmp.pixel_data(), &[0, 0, 255, 0]);
}

#[test]
fn unpadded_two_by_four() {
    let pixels = vec![Pixel::new(10, 20, 30); 8];
    let bmp = encode_bmp(&pixels, 4, 2, Unstoppable).unwrap();
    assert_eq!(bmp.padding(), 0);
    assert_eq!(bmp.pixel_data().len(), 24);
    let row: Vec<u8> = [30u8, 20, 10].repeat(4);
    assert_eq!(&bmp.pixel_data()[..12], &row[..]);
    assert_eq!(&bmp.pixel_data()[12..], &row[..]);
}

#[test]
fn ragged_rows_fail_with_shape_mismatch() {
    let p = Pixel::BLACK;
    let rows = vec![vec![p; 4], vec![p; 3]];
    let err = encode_bmp_rows(&rows, Unstoppable).unwrap_err();
    assert!(matches!(
        err,
        BitmapError::ShapeMismatch {
            row: 1,
            expected: 4,
            actual: 3
        }
    ));
}

#[test]
fn shape_mismatch_is_reported_before_dimensions() {
    // First row empty would otherwise be an InvalidDimensions failure.
    let rows: Vec<Vec<Pixel>> = vec![vec![], vec![Pixel::BLACK]];
    let err = encode_bmp_rows(&rows, Unstoppable).unwrap_err();
    assert!(matches!(err, BitmapError::ShapeMismatch { row: 1, .. }));
}

#[test]
fn zero_width_is_invalid() {
    for pixels in [vec![], vec![Pixel::BLACK; 3]] {
        let err = encode_bmp(&pixels, 0, 3, Unstoppable).unwrap_err();
        assert!(matches!(
            err,
            BitmapError::InvalidDimensions {
                width: 0,
                height: 3
            }
        ));
    }
    let err = encode_bmp(&[], 3, 0, Unstoppable).unwrap_err();
    assert!(matches!(err, BitmapError::InvalidDimensions { height: 0, .. }));
}

#[test]
fn empty_grid_is_invalid() {
    let rows: Vec<Vec<Pixel>> = Vec::new();
    let err = encode_bmp_rows(&rows, Unstoppable).unwrap_err();
    assert!(matches!(err, BitmapError::InvalidDimensions { .. }));

    let rows: Vec<Vec<Pixel>> = vec![vec![], vec![]];
    let err = encode_bmp_rows(&rows, Unstoppable).unwrap_err();
    assert!(matches!(
        err,
        BitmapError::InvalidDimensions {
            width: 0,
            height: 2
        }
    ));
}

#[test]
fn pixel_count_mismatch_reports_both_counts() {
    let pixels = vec![Pixel::WHITE; 5];
    let err = encode_bmp(&pixels, 2, 3, Unstoppable).unwrap_err();
    assert!(matches!(
        err,
        BitmapError::PixelCountMismatch {
            provided: 5,
            expected: 6
        }
    ));
    let msg = err.to_string();
    assert!(msg.contains('5') && msg.contains('6'), "{msg}");
}

// ── Properties ───────────────────────────────────────────────────────

#[test]
fn length_matches_header_for_all_small_sizes() {
    for w in 1..=13u32 {
        for h in 1..=5u32 {
            let pixels = gradient(w as usize, h as usize);
            let bmp = encode_bmp(&pixels, w, h, Unstoppable).unwrap();
            let pad = padding_for(w as usize);
            assert!(pad <= 3);
            assert_eq!((w as usize * 3 + pad) % 4, 0);
            let expected = 54 + (w as usize * 3 + pad) * h as usize;
            assert_eq!(bmp.len(), expected, "{w}x{h}");
            assert_eq!(le_u32(&bmp, 2) as usize, bmp.len(), "{w}x{h}");
            assert_eq!(bmp.file_size() as usize, bmp.len());
            assert_eq!(bmp.row_stride(), row_stride(w as usize));
        }
    }
}

#[test]
fn header_fields() {
    let bmp = encode_bmp(&gradient(5, 3), 5, 3, Unstoppable).unwrap();
    assert_eq!(&bmp[0..2], b"BM");
    assert_eq!(le_u32(&bmp, 6), 0);
    assert_eq!(le_u32(&bmp, 10), 54);
    assert_eq!(le_u32(&bmp, 14), 40);
    assert_eq!(le_i32(&bmp, 18), 5);
    assert_eq!(le_i32(&bmp, 22), 3);
    assert_eq!(le_u16(&bmp, 26), 1);
    assert_eq!(le_u16(&bmp, 28), 24);
    assert!(bmp[30..54].iter().all(|&b| b == 0));
    assert_eq!(bmp.file_header().len(), FILE_HEADER_SIZE);
    assert_eq!(bmp.info_header().len(), INFO_HEADER_SIZE);
}

#[test]
fn first_body_row_is_last_input_row() {
    let (w, h) = (3usize, 4usize);
    let pixels = gradient(w, h);
    let bmp = encode_bmp(&pixels, w as u32, h as u32, Unstoppable).unwrap();
    let stride = row_stride(w);
    for (out_row, body_row) in bmp.pixel_data().chunks_exact(stride).enumerate() {
        let src_row = h - 1 - out_row;
        for x in 0..w {
            let p = pixels[src_row * w + x];
            assert_eq!(&body_row[x * 3..x * 3 + 3], &[p.b, p.g, p.r]);
        }
        assert!(body_row[w * 3..].iter().all(|&b| b == 0));
    }
}

#[test]
fn rows_and_flat_input_agree() {
    let (w, h) = (7usize, 5usize);
    let flat = noise_pattern(w, h);
    let rows: Vec<Vec<Pixel>> = flat.chunks(w).map(|r| r.to_vec()).collect();
    let a = encode_bmp(&flat, w as u32, h as u32, Unstoppable).unwrap();
    let b = encode_bmp_rows(&rows, Unstoppable).unwrap();
    assert_eq!(a, b);

    let slices: Vec<&[Pixel]> = flat.chunks(w).collect();
    let c = encode_bmp_rows(&slices, Unstoppable).unwrap();
    assert_eq!(a, c);

    let bytes: Vec<u8> = flat.iter().flat_map(|p| [p.r, p.g, p.b]).collect();
    let d = encode_bmp_rgb8(&bytes, w as u32, h as u32, Unstoppable).unwrap();
    assert_eq!(a, d);
}

#[test]
fn into_vec_returns_file_bytes() {
    let bmp = encode_bmp(&gradient(2, 2), 2, 2, Unstoppable).unwrap();
    let copy = bmp.as_bytes().to_vec();
    let bytes: Vec<u8> = bmp.into();
    assert_eq!(bytes, copy);
}

#[test]
fn cancelled_encode_produces_nothing() {
    struct AlwaysStop;
    impl Stop for AlwaysStop {
        fn check(&self) -> Result<(), StopReason> {
            Err(StopReason::Cancelled)
        }
    }
    let err = encode_bmp(&gradient(4, 4), 4, 4, AlwaysStop).unwrap_err();
    assert!(matches!(err, BitmapError::Cancelled(_)));
}

// ── Cross-check with an independent decoder ──────────────────────────

#[test]
fn image_crate_decodes_output() {
    for (w, h) in [(1, 1), (2, 3), (3, 2), (4, 4), (5, 7), (33, 9)] {
        let pixels = noise_pattern(w, h);
        let bmp = encode_bmp(&pixels, w as u32, h as u32, Unstoppable).unwrap();
        let decoded = image::load_from_memory_with_format(&bmp, image::ImageFormat::Bmp)
            .unwrap()
            .to_rgb8();
        assert_eq!(decoded.width(), w as u32);
        assert_eq!(decoded.height(), h as u32);
        let expected: Vec<u8> = pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect();
        assert_eq!(decoded.as_raw(), &expected, "{w}x{h}");
    }
}

#[cfg(feature = "rgb")]
#[test]
fn rgb8_pixels_convert() {
    let p: Pixel = rgb::RGB8::new(1, 2, 3).into();
    assert_eq!(p, Pixel::new(1, 2, 3));
    let back: rgb::RGB8 = p.into();
    assert_eq!(back, rgb::RGB8::new(1, 2, 3));
}

#[cfg(feature = "imgref")]
#[test]
fn imgref_input_matches_flat_input() {
    let (w, h) = (3usize, 2usize);
    let flat = gradient(w, h);
    let expected = encode_bmp(&flat, w as u32, h as u32, Unstoppable).unwrap();

    let contiguous = imgref::ImgRef::new(&flat[..], w, h);
    let got = EncodeRequest::new()
        .encode_imgref(contiguous, Unstoppable)
        .unwrap();
    assert_eq!(got, expected);

    // Same pixels with one junk pixel of stride padding per row.
    let mut strided = Vec::new();
    for row in flat.chunks(w) {
        strided.extend_from_slice(row);
        strided.push(Pixel::WHITE);
    }
    let img = imgref::ImgRef::new_stride(&strided[..], w, h, w + 1);
    let got = EncodeRequest::new().encode_imgref(img, Unstoppable).unwrap();
    assert_eq!(got, expected);
}
