//! Paint benchmark: Measure fill throughput on a 1280x720 surface.
//!
//! Target: full-window erase well under a millisecond

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fbprogress::device::MemoryDevice;
use fbprogress::{Bgra, Config, Rect, RenderSession, Surface};

fn fill_window(c: &mut Criterion) {
    let mut surface = Surface::in_memory(1280, 720);
    let window = Rect::new(480, 0, 800, 200);

    c.bench_function("fill_window_800x200", |b| {
        b.iter(|| surface.fill_rect(black_box(window), black_box(Bgra::LIGHT_GRAY)))
    });
}

fn fill_clipped(c: &mut Criterion) {
    let mut surface = Surface::in_memory(1280, 720);
    let overhang = Rect::new(1000, 600, 800, 200);

    c.bench_function("fill_clipped_overhang", |b| {
        b.iter(|| surface.fill_rect(black_box(overhang), black_box(Bgra::WHITE)))
    });
}

fn clear_screen(c: &mut Criterion) {
    let mut surface = Surface::in_memory(1280, 720);

    c.bench_function("clear_1280x720", |b| {
        b.iter(|| surface.clear(black_box(Bgra::TRANSPARENT)))
    });
}

fn progress_update(c: &mut Criterion) {
    let mut session = RenderSession::new(Config::default());
    if session.open(MemoryDevice::new(1280, 720), 2).is_err() {
        return;
    }
    session.show();
    let mut percent = 0;

    c.bench_function("session_progress_step", |b| {
        b.iter(|| {
            percent = (percent + 1) % 101;
            session.set_step_progress(black_box(percent));
        })
    });
}

criterion_group!(benches, fill_window, fill_clipped, clear_screen, progress_update);
criterion_main!(benches);
