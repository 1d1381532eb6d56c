//! Criterion benchmarks for panel grid computation and cache lookups.
//!
//! The grid is requested before every overlay redraw, so the cache-hit path
//! must stay far cheaper than recomputing the largest (20×20) grid.
//!
//! Run with:
//! ```bash
//! cargo bench --package mosaic-core --bench panel_grid_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mosaic_core::{compute_panel_grid, FieldOfView, MosaicSettings, PanelGridCache};

fn fov() -> Option<FieldOfView> {
    Some(FieldOfView::new(1.2, 0.8).expect("valid field of view"))
}

// ── Benchmarks: compute_panel_grid ────────────────────────────────────────────

/// Benchmarks [`compute_panel_grid`] scaling with the panel count.
fn bench_compute_scaling(c: &mut Criterion) {
    let sizes = [1i32, 5, 10, 20];
    let mut group = c.benchmark_group("compute_panel_grid");

    for &n in &sizes {
        let settings = MosaicSettings::new(true, n, n, 20.0, 30.0);
        group.bench_with_input(BenchmarkId::new("panels_per_axis", n), &settings, |b, s| {
            b.iter(|| compute_panel_grid(black_box(s), black_box(fov())))
        });
    }

    group.finish();
}

// ── Benchmarks: PanelGridCache ────────────────────────────────────────────────

/// Benchmarks the cache-hit path for the largest grid.
fn bench_cache_hit(c: &mut Criterion) {
    let settings = MosaicSettings::new(true, 20, 20, 20.0, 30.0);
    let mut cache = PanelGridCache::new();
    cache.get_or_compute(&settings, fov());

    c.bench_function("panel_grid_cache/hit_20x20", |b| {
        b.iter(|| cache.get_or_compute(black_box(&settings), black_box(fov())))
    });
}

/// Benchmarks the miss path: rotation changes on every iteration.
fn bench_cache_miss(c: &mut Criterion) {
    let base = MosaicSettings::new(true, 20, 20, 20.0, 0.0);
    let mut cache = PanelGridCache::new();
    let mut angle = 0.0;

    c.bench_function("panel_grid_cache/miss_20x20", |b| {
        b.iter(|| {
            angle += 1.0;
            let settings = base.with_rotation_deg(angle);
            cache.get_or_compute(black_box(&settings), black_box(fov()))
        })
    });
}

criterion_group!(benches, bench_compute_scaling, bench_cache_hit, bench_cache_miss);
criterion_main!(benches);
