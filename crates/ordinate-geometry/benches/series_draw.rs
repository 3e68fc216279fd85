//! Benchmarks for the series draw pass

use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ordinate_geometry::Color;
use ordinate_geometry::chart::*;

const POINTS: usize = 10_000;

fn dataset(points: usize) -> DataSet {
    let values: Vec<Option<f64>> = (0..points)
        .map(|i| if i % 97 == 0 { None } else { Some((i as f64 * 0.01).sin() * 50.0 + 50.0) })
        .collect();
    DataSet::from_values(&values)
}

fn series(kind: DrawerType, points: usize) -> Series {
    let x = Rc::new(LinearScale::new(0.0, points as f64));
    let y = Rc::new(LinearScale::new(0.0, 100.0));
    let mut series = Series::new(kind, dataset(points), x, y);
    series.set_bounds(Rect::new(0.0, 0.0, 1920.0, 1080.0));
    series.set_container(LayerId::next());
    series
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("series_rebuild");
    group.throughput(Throughput::Elements(POINTS as u64));

    for kind in [DrawerType::Line, DrawerType::Column, DrawerType::StepArea] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{kind:?}")), &kind, |b, &kind| {
            let mut series = series(kind, POINTS);
            series.draw(None);
            b.iter(|| {
                series.set_value(0, fields::VALUE, black_box(42.0));
                black_box(series.draw(None))
            });
        });
    }

    group.finish();
}

fn bench_repaint(c: &mut Criterion) {
    let mut series = series(DrawerType::Column, POINTS);
    series.draw(None);
    let mut flip = false;

    c.bench_function("series_repaint_column", |b| {
        b.iter(|| {
            flip = !flip;
            series.set_color(if flip { Color::RED } else { Color::BLUE });
            black_box(series.draw(None))
        });
    });
}

fn bench_consistent_skip(c: &mut Criterion) {
    let mut chart = Chart::new(Rect::new(0.0, 0.0, 1920.0, 1080.0));
    let x: Rc<dyn Scale> = Rc::new(LinearScale::new(0.0, POINTS as f64));
    let y: Rc<dyn Scale> = Rc::new(LinearScale::new(0.0, 100.0));
    for kind in [DrawerType::Line, DrawerType::Area, DrawerType::Column] {
        chart.add_series(Series::new(kind, dataset(POINTS), Rc::clone(&x), Rc::clone(&y)));
    }
    chart.draw();

    c.bench_function("chart_draw_consistent", |b| b.iter(|| black_box(chart.draw())));
}

criterion_group!(benches, bench_rebuild, bench_repaint, bench_consistent_skip);
criterion_main!(benches);
