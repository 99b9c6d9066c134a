use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{
    collides, ActivePiece, Board, EngineConfig, GameLoop, ManualScheduler, PieceController,
    Renderer, Viewport,
};
use blockfall::render::{Pixmap, RasterRenderer, SoftwareGpu, SurfaceRenderer};
use blockfall::types::{Intent, PieceKind, RotationDirection};

fn bench_tick(c: &mut Criterion) {
    let mut game = GameLoop::from_config(EngineConfig::default(), ManualScheduler::new());
    game.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            game.enqueue(Intent::HardDrop);
            if game.tick(black_box(16)).is_err() || !game.snapshot().playable() {
                game.reset();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            black_box(board.clear_completed_rows());
        })
    });
}

fn bench_collides(c: &mut Criterion) {
    let board = Board::from_rows(&["#.#.#.#.#.", ".#.#.#.#.#", "##########"]);
    let piece = ActivePiece::spawn(PieceKind::T);

    c.bench_function("collides", |b| {
        b.iter(|| collides(black_box(&board), black_box(&piece)))
    });
}

fn bench_move(c: &mut Criterion) {
    let board = Board::new();
    let mut controller = PieceController::new();
    controller.spawn(&board, PieceKind::T);

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            controller.move_left(&board);
            controller.move_right(&board);
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let board = Board::new();
    let mut controller = PieceController::new();
    controller.spawn(&board, PieceKind::I);

    c.bench_function("rotate_cw", |b| {
        b.iter(|| controller.rotate(&board, black_box(RotationDirection::Clockwise)))
    });
}

fn bench_renderers(c: &mut Criterion) {
    let mut game = GameLoop::from_config(EngineConfig::default(), ManualScheduler::new());
    game.start();
    let _ = game.tick(0);
    let snap = game.snapshot();
    let viewport = Viewport::new(200, 400);

    let mut surface = SurfaceRenderer::new(Pixmap::new(200, 400));
    c.bench_function("surface_frame", |b| {
        b.iter(|| surface.render(black_box(&snap), viewport))
    });

    let gpu = SoftwareGpu::new(Pixmap::new(200, 400));
    if let Ok(mut raster) = RasterRenderer::new(gpu) {
        c.bench_function("raster_frame", |b| {
            b.iter(|| raster.render(black_box(&snap), viewport))
        });
    }
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_collides,
    bench_move,
    bench_rotate,
    bench_renderers
);
criterion_main!(benches);
