//! Performance benchmarks for the downloads list
//!
//! Measures view-model building, surface layout and drawing for libraries
//! of different sizes.
//! Run with: cargo bench

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use reel::adapters::mock::{InMemoryAssetSource, RecordingNavigator};
use reel::downloads::{
    DownloadsInteractor, DownloadsPresenter, DownloadsScope, DownloadsViewModelBuilder,
};
use reel::models::{Asset, AssetKind, DownloadState, PlaybackInfo};
use reel::table::{EditingTableAdapter, SurfaceHandle};
use reel::ui::ListSurface;

const SIZES: [usize; 5] = [10, 50, 100, 500, 1000];

/// Generate a library of movies, every fifth one still downloading
fn generate_library(count: usize) -> Vec<Asset> {
    (0..count)
        .map(|i| {
            let mut asset = Asset::new(format!("m-{}", i), AssetKind::Movie, format!("Movie {}", i));
            asset.state = if i % 5 == 0 {
                DownloadState::Downloading { progress: 0.3 }
            } else {
                DownloadState::Completed
            };
            asset.byte_count = 1_200_000_000;
            asset.downloaded_at = Utc
                .with_ymd_and_hms(2024, 1, (i % 28) as u32 + 1, (i % 24) as u32, 0, 0)
                .single();
            asset.playback = Some(PlaybackInfo {
                location: PathBuf::from(format!("/media/m-{}.mp4", i)),
                duration_secs: Some(6000),
                watch_position_secs: None,
            });
            asset
        })
        .collect()
}

fn loaded_presenter(count: usize) -> (DownloadsPresenter, Rc<RefCell<ListSurface>>) {
    let source = Arc::new(InMemoryAssetSource::with_assets(generate_library(count)));
    let surface = Rc::new(RefCell::new(ListSurface::new()));
    let mut presenter = DownloadsPresenter::new(
        DownloadsScope::All,
        DownloadsInteractor::new(source),
        DownloadsViewModelBuilder::default(),
        Rc::new(RecordingNavigator::new()),
        EditingTableAdapter::new(),
    );
    let handle: SurfaceHandle = surface.clone();
    presenter.setup(&handle);
    let outcome = presenter.prepare_load().run();
    presenter.finish_load(outcome);
    (presenter, surface)
}

/// Benchmark a full load: fetch, build rows, apply to the adapter
fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("downloads_load");

    for size in SIZES.iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| black_box(loaded_presenter(size)));
        });
    }

    group.finish();
}

/// Benchmark laying out a screenful of rows at the top of the list
fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("surface_layout");
    let area = Rect::new(0, 0, 120, 40);

    for size in SIZES.iter() {
        let (presenter, surface) = loaded_presenter(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                surface
                    .borrow_mut()
                    .layout(black_box(presenter.adapter()), area);
            });
        });
    }

    group.finish();
}

/// Benchmark jumping to the last row, which scrolls through the pool
fn bench_scroll_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("surface_scroll_to_end");
    let area = Rect::new(0, 0, 120, 40);

    for size in SIZES.iter() {
        let (presenter, surface) = loaded_presenter(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut surface = surface.borrow_mut();
                surface.move_to_first();
                surface.layout(presenter.adapter(), area);
                surface.move_to_last();
                surface.layout(presenter.adapter(), area);
                black_box(surface.visible_rows().len())
            });
        });
    }

    group.finish();
}

/// Benchmark drawing the laid-out rows into a buffer
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("surface_render");
    let area = Rect::new(0, 0, 120, 40);

    for width in [40u16, 80, 120, 200].iter() {
        let (presenter, surface) = loaded_presenter(100);
        let area = Rect { width: *width, ..area };
        surface.borrow_mut().layout(presenter.adapter(), area);
        group.bench_with_input(BenchmarkId::new("width", width), width, |b, _| {
            b.iter(|| {
                let mut buf = Buffer::empty(area);
                surface.borrow().render(&mut buf);
                black_box(buf)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_load,
    bench_layout,
    bench_scroll_to_end,
    bench_render,
);
criterion_main!(benches);
