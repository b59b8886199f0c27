use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pixel_tetris::core::{GameState, LockedField, Piece};
use pixel_tetris::types::{Command, Direction, Phase, Rotation, Shape, FIELD_COLUMNS};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            state.tick(black_box(16));
            if state.phase() == Phase::Lost {
                state.apply_command(Command::Restart);
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut field = LockedField::new();
            for y in 15..19 {
                for x in 0..FIELD_COLUMNS as i8 {
                    field.insert_cell(Shape::Long, x, y);
                }
            }
            field.add_piece(&Piece::at(Shape::T, Rotation::North, 3, 6));
            black_box(field.detect_and_clear_lines());
        })
    });
}

fn bench_lateral_move(c: &mut Criterion) {
    let mut field = LockedField::new();
    for x in 0..6 {
        field.insert_cell(Shape::Square, x, 18);
    }
    let mut piece = Piece::at(Shape::LLeft, Rotation::North, 3, 8);

    c.bench_function("lateral_move", |b| {
        b.iter(|| {
            if !piece.move_in(Direction::Right, black_box(&field)) {
                piece = Piece::at(Shape::LLeft, Rotation::North, 0, 8);
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            state.apply_command(black_box(Command::Rotate));
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    let mut snap = state.snapshot();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            state.snapshot_into(black_box(&mut snap));
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_lateral_move,
    bench_rotate,
    bench_snapshot
);
criterion_main!(benches);
