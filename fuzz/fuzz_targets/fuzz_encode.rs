#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp24::*;

fuzz_target!(|data: &[u8]| {
    let [w, h, rest @ ..] = data else {
        return;
    };
    let (width, height) = (u32::from(*w), u32::from(*h));

    let Ok(bmp) = encode_bmp_rgb8(rest, width, height, enough::Unstoppable) else {
        // Only shape errors are possible for in-range dimensions.
        assert!(width == 0 || height == 0 || rest.len() != (width * height * 3) as usize);
        return;
    };

    let stride = row_stride(width as usize);
    assert_eq!(stride % 4, 0);
    assert_eq!(bmp.len(), 54 + stride * height as usize);
    assert_eq!(bmp.file_size() as usize, bmp.len());

    // Bottom row of the file is the top row of the input.
    let top = &bmp.pixel_data()[stride * (height as usize - 1)..];
    for x in 0..width as usize {
        assert_eq!(top[x * 3], rest[x * 3 + 2]);
        assert_eq!(top[x * 3 + 1], rest[x * 3 + 1]);
        assert_eq!(top[x * 3 + 2], rest[x * 3]);
    }
});
