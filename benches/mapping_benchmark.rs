use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pazar_search::mapping::{from_pointer, place_stall, to_scene, to_screen, PixelPoint};
use pazar_search::{GridPosition, MapConfig, SceneConfig};

fn bench_round_trip(c: &mut Criterion) {
    let map = MapConfig::default();
    let scene = SceneConfig::default();
    let cell = GridPosition::flat(7, 4);

    c.bench_function("screen_round_trip", |b| {
        b.iter(|| black_box(from_pointer(to_screen(black_box(cell), &map), &map)));
    });

    c.bench_function("to_scene", |b| {
        b.iter(|| black_box(to_scene(black_box(cell), &scene)));
    });
}

fn bench_placement(c: &mut Criterion) {
    let map = MapConfig::default();
    let stalls: Vec<GridPosition> = (0..map.columns())
        .flat_map(|x| (0..map.rows()).step_by(2).map(move |y| GridPosition::flat(x, y)))
        .collect();

    c.bench_function("place_stall_half_full", |b| {
        b.iter(|| black_box(place_stall(PixelPoint::new(300.0, 60.0), 0, &stalls, &map)));
    });
}

criterion_group!(benches, bench_round_trip, bench_placement);
criterion_main!(benches);
