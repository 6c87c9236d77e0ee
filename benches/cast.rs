use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gridcaster::world::maze;
use gridcaster::{Config, RayCaster, TextureId, Viewpoint};

fn bench_cast_all(c: &mut Criterion) {
    let config = Config::default();
    let palette = [TextureId(1), TextureId(2), TextureId(3)];
    let world = maze::generate(16, 16, 9, &palette);
    let mut caster = RayCaster::new();

    let pov = Viewpoint {
        x: 1.5,
        y: 1.5,
        angle: 0.7,
    };

    c.bench_function("cast_all_800_rays", |b| {
        b.iter(|| {
            caster.cast_all(black_box(pov), &world, &config);
        })
    });
}

fn bench_full_frame(c: &mut Criterion) {
    let config = Config::default();
    let palette = [TextureId(1), TextureId(2), TextureId(3)];
    let world = maze::generate(16, 16, 9, &palette);
    let mut caster = RayCaster::new();
    let mut commands = Vec::new();

    let pov = Viewpoint {
        x: 1.5,
        y: 1.5,
        angle: 0.7,
    };

    c.bench_function("cast_and_project", |b| {
        b.iter(|| {
            let slices = caster.cast_all(black_box(pov), &world, &config);
            gridcaster::view::build_render_queue(slices, &config, &mut commands);
        })
    });
}

criterion_group!(benches, bench_cast_all, bench_full_frame);
criterion_main!(benches);
