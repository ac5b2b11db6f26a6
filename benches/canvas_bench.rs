use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use sketch_canvas::{Canvas, Pattern, Point, Rectangle};

// Canvas drawing benchmarks. Run with:
//    cargo bench --bench canvas_bench

const SIDE: u32 = 512;

/// A canvas crossed by walls with gaps, so the fill has to snake around.
fn maze() -> Canvas {
    let mut canvas = Canvas::new("bench", SIDE, SIDE);
    canvas.flood_fill(Point::new(0, 0), Pattern::Char(b' ')).expect("background");

    let wall = Pattern::Char(b'#');
    for (i, y) in (8..SIDE - 8).step_by(8).enumerate() {
        let gap_left = i % 2 == 0;
        let x = if gap_left { 8 } else { 0 };
        let rect = Rectangle::new(Point::new(x, i64::from(y)), SIDE - 8, 1);
        canvas.draw_rect(&rect, wall, Pattern::None).expect("wall");
    }
    canvas
}

fn bench_flood_fill(c: &mut Criterion) {
    let open = {
        let mut canvas = Canvas::new("bench", SIDE, SIDE);
        canvas
            .draw_rect(
                &Rectangle::new(Point::new(0, 0), SIDE, SIDE),
                Pattern::None,
                Pattern::Char(b'#'),
            )
            .expect("frame");
        canvas
    };
    c.bench_function("flood_fill_open_512", |b| {
        b.iter_batched(
            || open.clone(),
            |mut canvas| {
                canvas.flood_fill(black_box(Point::new(256, 256)), Pattern::Char(b'.')).unwrap();
                canvas
            },
            BatchSize::LargeInput,
        )
    });

    let maze = maze();
    c.bench_function("flood_fill_maze_512", |b| {
        b.iter_batched(
            || maze.clone(),
            |mut canvas| {
                canvas.flood_fill(black_box(Point::new(0, 0)), Pattern::Char(b'~')).unwrap();
                canvas
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_draw_rect(c: &mut Criterion) {
    let mut canvas = Canvas::new("bench", SIDE, SIDE);
    let rect = Rectangle::new(Point::new(16, 16), SIDE - 32, SIDE - 32);
    c.bench_function("draw_rect_filled_480", |b| {
        b.iter(|| {
            canvas
                .draw_rect(black_box(&rect), Pattern::Char(b'x'), Pattern::Char(b'o'))
                .unwrap();
        })
    });
}

fn bench_encode(c: &mut Criterion) {
    let mut canvas = maze();
    let record = canvas.encode().expect("encode");
    c.bench_function("encode_512", |b| b.iter(|| canvas.encode().unwrap()));
    c.bench_function("decode_512", |b| b.iter(|| Canvas::decode(black_box(&record)).unwrap()));
    c.bench_function("render_512", |b| b.iter(|| canvas.render()));
}

criterion_group!(benches, bench_flood_fill, bench_draw_rect, bench_encode);
criterion_main!(benches);
