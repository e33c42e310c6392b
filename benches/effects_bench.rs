//! Benchmarks for color math and effect resolution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fluent_backdrop::apply::Compositor;
use fluent_backdrop::codec::{BackdropKind, EncodedAttribute};
use fluent_backdrop::color::Color;
use fluent_backdrop::config::{Palette, Settings, SurfaceColors};
use fluent_backdrop::error::Result;
use fluent_backdrop::fluent::{EffectRequest, Fluent, Target};
use fluent_backdrop::handle::WindowHandle;
use fluent_backdrop::theme::{PersonalizationStore, APPS_USE_LIGHT_THEME, PERSONALIZE};

/// Accepts every call without doing anything.
struct NullCompositor;

impl Compositor for NullCompositor {
    fn set_attribute(&mut self, _window: WindowHandle, attribute: EncodedAttribute) -> Result<()> {
        black_box(attribute);
        Ok(())
    }

    fn paint_surface(&mut self, _window: WindowHandle, colors: SurfaceColors) -> Result<()> {
        black_box(colors);
        Ok(())
    }

    fn clear_transparency_key(&mut self, _window: WindowHandle) -> Result<()> {
        Ok(())
    }
}

/// Reports a dark app theme.
struct DarkStore;

impl PersonalizationStore for DarkStore {
    fn read_u32(&self, path: &str, name: &str) -> Result<Option<u32>> {
        Ok((path == PERSONALIZE && name == APPS_USE_LIGHT_THEME).then_some(0))
    }

    fn value_names(&self, _path: &str) -> Result<Option<Vec<String>>> {
        Ok(None)
    }
}

fn bench_color(c: &mut Criterion) {
    let mut group = c.benchmark_group("color");

    group.bench_function("is_light", |b| {
        b.iter(|| (0..=255u8).filter(|&v| Color::rgb(v, v, v).is_light()).count())
    });

    group.bench_function("transparent_key", |b| {
        b.iter(|| {
            (0..=255u8)
                .map(|v| Color::rgb(v, black_box(22), v).transparent_key().to_argb())
                .fold(0u32, u32::wrapping_add)
        })
    });

    group.bench_function("surface", |b| {
        b.iter(|| Palette::DEFAULT.surface(black_box(true)))
    });

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    let requests = [
        EffectRequest::DEFAULT,
        EffectRequest::DEFAULT.with_transparency(true),
        EffectRequest::DEFAULT.with_backdrop(BackdropKind::None),
        EffectRequest::DEFAULT.with_target(Target::TitleBar),
    ];

    group.bench_function("plan", |b| {
        b.iter(|| {
            requests
                .iter()
                .map(|r| black_box(r).plan().len())
                .sum::<usize>()
        })
    });

    let window = WindowHandle::from_raw(0x1000).unwrap();
    let mut fluent = Fluent::with_settings(NullCompositor, DarkStore, &Settings::DEFAULT);

    group.bench_function("configure_apply", |b| {
        b.iter(|| {
            fluent
                .configure(window)
                .acrylic()
                .auto()
                .transparency()
                .apply()
        })
    });

    group.bench_function("preset", |b| b.iter(|| fluent.mica(black_box(window))));

    group.finish();
}

criterion_group!(benches, bench_color, bench_resolve);
criterion_main!(benches);
