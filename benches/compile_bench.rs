use criterion::{black_box, criterion_group, criterion_main, Criterion};
use routeline::{Compiler, LatLng, OutputFormat, RouteSegment};

// Run with:
//    cargo bench --bench compile_bench

fn route(segments: usize, points: usize) -> Vec<RouteSegment> {
    (0..segments)
        .map(|s| {
            let coords = (0..points)
                .map(|p| LatLng::new(37.0 + s as f64 * 0.01, -122.0 + p as f64 * 0.0001))
                .collect();
            let seg = RouteSegment::new(coords, "#1E88E5");
            if s % 2 == 1 {
                seg.with_dash_array("5,5")
            } else {
                seg
            }
        })
        .collect()
}

fn bench_compile_js(c: &mut Criterion) {
    let compiler = Compiler::default();
    let segments = route(20, 500);
    c.bench_function("compile_js_20x500", |b| {
        b.iter(|| compiler.compile(black_box(&segments)).unwrap())
    });
}

fn bench_compile_json(c: &mut Criterion) {
    let compiler = Compiler::default();
    let segments = route(20, 500);
    let emitter = routeline::new_emitter(OutputFormat::Json);
    c.bench_function("compile_json_20x500", |b| {
        b.iter(|| compiler.compile_with(black_box(&segments), emitter.as_ref()).unwrap())
    });
}

fn bench_instructions_only(c: &mut Criterion) {
    let compiler = Compiler::default();
    let segments = route(200, 50);
    c.bench_function("resolve_200x50", |b| {
        b.iter(|| compiler.compile_instructions(black_box(&segments)).unwrap())
    });
}

criterion_group!(benches, bench_compile_js, bench_compile_json, bench_instructions_only);
criterion_main!(benches);
