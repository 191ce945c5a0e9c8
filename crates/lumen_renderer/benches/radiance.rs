use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lumen_core::presets;
use lumen_renderer::{radiance, render_pixel, Ray, Vec2};

fn bench_radiance(c: &mut Criterion) {
    let file = presets::builtin("heart").unwrap().into_scene_file().unwrap();
    let ray = Ray::new(Vec2::new(0.5, 0.5), Vec2::new(0.6, 0.8));

    c.bench_function("radiance_heart", |b| {
        b.iter(|| radiance(&file.scene, black_box(&ray), 0, &file.config))
    });
}

fn bench_pixel(c: &mut Criterion) {
    let file = presets::builtin("refraction").unwrap().into_scene_file().unwrap();
    let config = file.config.clone().with_samples(16);

    c.bench_function("pixel_refraction_16spp", |b| {
        b.iter(|| render_pixel(&file.scene, black_box(512), black_box(300), &config))
    });
}

criterion_group!(benches, bench_radiance, bench_pixel);
criterion_main!(benches);
