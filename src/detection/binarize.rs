use image::GrayImage;

/// Global threshold selection for patch normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinarizeMethod {
    /// Automatic bimodal histogram split (Otsu's method).
    #[default]
    Otsu,
    /// Fixed global threshold level.
    Fixed(u8),
}

/// Reduce a patch to two intensity levels. Pixels above the threshold
/// become white, the rest black, preserving the dark-glyphs-on-light
/// convention the OCR engine expects.
pub fn binarize(patch: &GrayImage, method: BinarizeMethod) -> GrayImage {
    let level = match method {
        BinarizeMethod::Fixed(level) => level,
        BinarizeMethod::Otsu => otsu_level(patch),
    };

    let mut out = GrayImage::new(patch.width(), patch.height());
    for (dst, src) in out.iter_mut().zip(patch.iter()) {
        *dst = if *src > level { 255 } else { 0 };
    }
    out
}

/// Otsu's method: pick the threshold that maximizes the between-class
/// variance of the intensity histogram.
pub fn otsu_level(patch: &GrayImage) -> u8 {
    let mut histogram = [0u32; 256];
    for value in patch.iter() {
        histogram[*value as usize] += 1;
    }

    let total = patch.width() as u64 * patch.height() as u64;
    if total == 0 {
        return 0;
    }
    let weighted_sum: u64 = histogram
        .iter()
        .enumerate()
        .map(|(value, count)| value as u64 * *count as u64)
        .sum();

    let mut best_level = 0u8;
    let mut best_variance = 0.0f64;
    let mut background_count = 0u64;
    let mut background_sum = 0u64;

    for level in 0..256usize {
        background_count += histogram[level] as u64;
        if background_count == 0 {
            continue;
        }
        let foreground_count = total - background_count;
        if foreground_count == 0 {
            break;
        }
        background_sum += level as u64 * histogram[level] as u64;

        let background_mean = background_sum as f64 / background_count as f64;
        let foreground_mean = (weighted_sum - background_sum) as f64 / foreground_count as f64;
        let mean_diff = background_mean - foreground_mean;
        let variance =
            background_count as f64 * foreground_count as f64 * mean_diff * mean_diff;
        if variance > best_variance {
            best_variance = variance;
            best_level = level as u8;
        }
    }

    best_level
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn fixed_threshold_splits_at_level() {
        let mut patch = GrayImage::new(4, 1);
        patch.put_pixel(0, 0, Luma([10]));
        patch.put_pixel(1, 0, Luma([120]));
        patch.put_pixel(2, 0, Luma([121]));
        patch.put_pixel(3, 0, Luma([240]));
        let out = binarize(&patch, BinarizeMethod::Fixed(120));
        let values: Vec<u8> = out.iter().copied().collect();
        assert_eq!(values, vec![0, 0, 255, 255]);
    }

    #[test]
    fn otsu_separates_bimodal_patch() {
        let mut patch = GrayImage::new(10, 2);
        for x in 0..10 {
            patch.put_pixel(x, 0, Luma([30]));
            patch.put_pixel(x, 1, Luma([200]));
        }
        let level = otsu_level(&patch);
        assert!((30..200).contains(&level), "level {level}");

        let out = binarize(&patch, BinarizeMethod::Otsu);
        assert_eq!(out.dimensions(), patch.dimensions());
        for x in 0..10 {
            assert_eq!(out.get_pixel(x, 0)[0], 0);
            assert_eq!(out.get_pixel(x, 1)[0], 255);
        }
    }

    #[test]
    fn output_is_strictly_two_level() {
        let mut patch = GrayImage::new(16, 1);
        for (i, pixel) in patch.iter_mut().enumerate() {
            *pixel = (i * 16) as u8;
        }
        let out = binarize(&patch, BinarizeMethod::Otsu);
        assert!(out.iter().all(|v| *v == 0 || *v == 255));
    }
}
