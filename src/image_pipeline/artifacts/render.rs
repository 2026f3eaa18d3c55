//! Rasterisation of difference histograms and heat maps.

use image::{Rgb, RgbImage};

use crate::image_pipeline::compare::{DifferenceHistogram, DifferenceMap};

const HISTOGRAM_WIDTH: u32 = 800;
const HISTOGRAM_HEIGHT: u32 = 400;
const MARGIN: u32 = 40;
/// Heat maps are upscaled until their longer side reaches this many pixels.
const HEATMAP_MIN_SIDE: usize = 512;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([64, 64, 64]);
const BAR: Rgb<u8> = Rgb([70, 130, 180]);
const ZERO_MARK: Rgb<u8> = Rgb([200, 40, 40]);

const COOL: [f64; 3] = [59.0, 76.0, 192.0];
const NEUTRAL: [f64; 3] = [221.0, 221.0, 221.0];
const WARM: [f64; 3] = [180.0, 4.0, 38.0];

/// Diverging blue–gray–red ramp for `t` in `[0, 1]`.
pub fn coolwarm(t: f64) -> Rgb<u8> {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let (from, to, s) = if t < 0.5 {
        (COOL, NEUTRAL, t * 2.0)
    } else {
        (NEUTRAL, WARM, (t - 0.5) * 2.0)
    };
    Rgb([0usize, 1, 2].map(|i| (from[i] + (to[i] - from[i]) * s).round() as u8))
}

fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

/// Bar chart of bin counts with a marker at zero difference.
pub fn render_histogram(histogram: &DifferenceHistogram) -> RgbImage {
    let mut img = RgbImage::from_pixel(HISTOGRAM_WIDTH, HISTOGRAM_HEIGHT, BACKGROUND);
    let plot_w = HISTOGRAM_WIDTH - 2 * MARGIN;
    let plot_h = HISTOGRAM_HEIGHT - 2 * MARGIN;
    let baseline = HISTOGRAM_HEIGHT - MARGIN;

    let bins = histogram.counts.len() as u32;
    let peak = histogram.peak().max(1) as f64;
    for (i, &count) in histogram.counts.iter().enumerate() {
        let i = i as u32;
        let x0 = MARGIN + i * plot_w / bins;
        let x1 = (MARGIN + (i + 1) * plot_w / bins).max(x0 + 1);
        let bar_h = (count as f64 / peak * plot_h as f64).round() as u32;
        // one pixel gap between bars when they are wide enough
        let gap = u32::from(x1 - x0 > 2);
        fill_rect(&mut img, x0, baseline - bar_h, x1 - gap, baseline, BAR);
    }

    if histogram.lower < 0.0 && histogram.upper > 0.0 {
        let zero = -histogram.lower / (histogram.upper - histogram.lower);
        let x = MARGIN + (zero * plot_w as f64).round() as u32;
        fill_rect(&mut img, x, MARGIN, x + 1, baseline, ZERO_MARK);
    }

    fill_rect(&mut img, MARGIN, baseline, MARGIN + plot_w, baseline + 1, AXIS);
    fill_rect(&mut img, MARGIN - 1, MARGIN, MARGIN, baseline + 1, AXIS);
    img
}

/// Absolute differences coloured on the coolwarm ramp, scaled to the largest difference.
pub fn render_heatmap(map: &DifferenceMap) -> RgbImage {
    let abs = map.absolute();
    let max = abs.as_slice().iter().copied().fold(0.0, f64::max);
    let longest = abs.width().max(abs.height()).max(1);
    let scale = (HEATMAP_MIN_SIDE / longest).max(1) as u32;

    let width = abs.width() as u32 * scale;
    let height = abs.height() as u32 * scale;
    RgbImage::from_fn(width, height, |x, y| {
        let v = abs.get((y / scale) as usize, (x / scale) as usize);
        coolwarm(if max > 0.0 { v / max } else { 0.0 })
    })
}
