#![no_main]
use libfuzzer_sys::fuzz_target;
use bmpfx::*;

fuzz_target!(|data: &[u8]| {
    // First 36 bytes pick the kernel, next 2 the width, the rest is pixels
    if data.len() < 38 {
        return;
    }
    let mut weights = [0.0f32; 9];
    for (w, chunk) in weights.iter_mut().zip(data[..36].chunks_exact(4)) {
        *w = f32::from_le_bytes(chunk.try_into().unwrap());
    }
    let width = u32::from(data[36] % 64) + 1;
    let pixels: Vec<RGB8> = data[38..]
        .chunks_exact(3)
        .map(|c| RGB8::new(c[0], c[1], c[2]))
        .collect();
    let height = pixels.len() as u32 / width;
    let pixels = pixels[..(width * height) as usize].to_vec();
    let Ok(mut image) = PixelBuffer::from_pixels(width, height, pixels) else {
        return;
    };

    grayscale(&mut image);
    let before = image.clone();
    convolve(&mut image, &Kernel::from_weights(weights));
    assert!(image.is_gray());

    // Border pixels never change
    if height > 0 {
        assert_eq!(image.row(0), before.row(0));
        assert_eq!(image.row(height - 1), before.row(height - 1));
    }
});
