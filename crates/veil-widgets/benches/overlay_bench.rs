//! Benchmark: overlay open/close cycle and drawer re-render.
//!
//! Run with: `cargo bench -p veil-widgets --bench overlay_bench`
//!
//! Measures a full mount/unmount cycle (portal, backdrop, focus trap and
//! dismissal listeners) and the cost of re-rendering a mounted drawer with
//! a growing body.

use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use veil_core::Document;
use veil_core::event::Event;
use veil_widgets::overlay::{Overlay, OverlayConfig};
use veil_widgets::{Button, Child, Drawer, DrawerProps, El, child};

const DURATION: Duration = Duration::from_millis(300);

fn form(rows: usize) -> Vec<Child> {
    (0..rows)
        .map(|i| child(El::div().child(El::new("input").attr("name", format!("field-{i}")))))
        .collect()
}

// ===========================================================================
// Overlay lifecycle
// ===========================================================================

fn bench_open_close_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlay_cycle");
    for rows in [1usize, 16, 128] {
        let content = form(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &content, |b, content| {
            let mut doc = Document::new();
            let body = doc.body();
            let trigger = doc.create_element("button");
            let _ = doc.append_child(body, trigger);
            let mut overlay = Overlay::new();
            b.iter(|| {
                doc.focus(trigger);
                overlay.render(&mut doc, body, OverlayConfig::new().is_open(true), content);
                overlay.tick(&mut doc, DURATION);
                overlay.render(&mut doc, body, OverlayConfig::new().is_open(false), content);
                overlay.tick(&mut doc, DURATION);
                black_box(doc.active_element())
            });
        });
    }
    group.finish();
}

fn bench_event_routing(c: &mut Criterion) {
    let mut doc = Document::new();
    let body = doc.body();
    let mut overlay = Overlay::new();
    overlay.render(&mut doc, body, OverlayConfig::new().is_open(true), &form(32));
    let Some(backdrop) = overlay.backdrop() else {
        return;
    };
    c.bench_function("overlay_suppressed_backdrop_click", |b| {
        let config = OverlayConfig::new()
            .is_open(true)
            .can_outside_click_close(false);
        overlay.render(&mut doc, body, config, &form(32));
        b.iter(|| black_box(overlay.handle_event(&mut doc, &Event::pointer_down(backdrop))));
    });
}

// ===========================================================================
// Drawer re-render
// ===========================================================================

fn bench_drawer_rerender(c: &mut Criterion) {
    let mut group = c.benchmark_group("drawer_rerender");
    for rows in [4usize, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            let mut doc = Document::new();
            let body = doc.body();
            let mut drawer = Drawer::new();
            let props = move || {
                DrawerProps::new()
                    .is_open(true)
                    .title("Settings")
                    .body(El::div().children(form(rows)))
                    .footer(Button::new().text("Save"))
            };
            drawer.render(&mut doc, body, props());
            b.iter(|| {
                drawer.render(&mut doc, body, props());
                black_box(drawer.element())
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_open_close_cycle,
    bench_event_routing,
    bench_drawer_rerender
);
criterion_main!(benches);
