use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use resample_bench::image_pipeline::compare::{DifferenceHistogram, DifferenceMap, subsample_baseline};
use resample_bench::image_pipeline::artifacts::{render_heatmap, render_histogram};
use resample_bench::image_pipeline::{Grid, PairwiseComparison, ResizeConfig, ResizePipeline, bilinear_resize};

fn generate_mock_plane(width: usize, height: usize) -> Grid<u8> {
    Grid::from_fn(width, height, |r, c| ((r * 3 + c * 7) % 256) as u8)
}

fn generate_mock_dump(width: usize, height: usize) -> Vec<u8> {
    let grid = generate_mock_plane(width, height);
    let mut text = String::new();
    for row in grid.rows() {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        text.push_str(&line.join(" "));
        text.push('\n');
    }
    text.into_bytes()
}

fn benchmark_resize_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("bilinear_by_size");
    let source = generate_mock_plane(1920, 1080);

    let targets = vec![(480, 270, "480x270"), (960, 540, "960x540"), (3840, 2160, "3840x2160")];

    for (width, height, label) in targets {
        group.bench_with_input(BenchmarkId::from_parameter(label), &source, |b, source| {
            b.iter(|| bilinear_resize(black_box(source), height, width));
        });
    }

    group.finish();
}

fn benchmark_text_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_pipeline");
    let dump = generate_mock_dump(1920, 1080);

    group.bench_function("decode_resize_encode", |b| {
        let config = ResizeConfig::builder().target(480, 270).build();
        let pipeline = ResizePipeline::new(1920, 1080, config);

        b.iter(|| {
            let mut output = Vec::new();
            let _ = pipeline.resize(black_box(&dump), &mut output);
        });
    });

    group.finish();
}

fn benchmark_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("comparison");
    let original = generate_mock_plane(1920, 1080);
    let reference = generate_mock_plane(480, 270);
    let candidate = bilinear_resize(&original, 270, 480).map(|g| g.quantize()).unwrap_or_else(|_| reference.clone());

    group.bench_function("baseline_subsample", |b| {
        b.iter(|| subsample_baseline(black_box(&original), 480, 270));
    });

    group.bench_function("pairwise_statistics", |b| {
        b.iter(|| PairwiseComparison::between(black_box(&reference), black_box(&candidate), &[0.0, 1.0, 5.0]));
    });

    group.bench_function("render_artifacts", |b| {
        let map = DifferenceMap::between(&reference, &candidate);
        b.iter(|| {
            if let Ok(map) = &map {
                let histogram = DifferenceHistogram::from_map(map, 100, (-10.0, 10.0));
                black_box(render_histogram(&histogram));
                black_box(render_heatmap(map));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_resize_sizes, benchmark_text_pipeline, benchmark_comparison);
criterion_main!(benches);
