use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sweeper_engine::{Board, Difficulty, DifficultyTable};

fn hard_board() -> Board {
    let setup = DifficultyTable::default().get(Difficulty::Hard);
    let mut board = Board::empty(setup.dimensions());
    board.populate(&mut ChaCha8Rng::seed_from_u64(12345), setup.mines(), [15, 8]);
    board
}

fn bench_populate(c: &mut Criterion) {
    let setup = DifficultyTable::default().get(Difficulty::Hard);
    let mut rng = ChaCha8Rng::seed_from_u64(12345);

    c.bench_function("populate_hard", |b| {
        b.iter(|| {
            let mut board = Board::empty(setup.dimensions());
            board.populate(&mut rng, setup.mines(), black_box([15, 8]));
            board
        })
    });
}

fn bench_flood_first_click(c: &mut Criterion) {
    let board = hard_board();

    c.bench_function("flood_first_click", |b| {
        b.iter(|| board.flood_from([black_box([15, 8])]))
    });
}

fn bench_flood_empty_board(c: &mut Criterion) {
    // No mines at all: a single flood opens all 480 tiles.
    let setup = DifficultyTable::default().get(Difficulty::Hard);
    let mut board = Board::empty(setup.dimensions());
    board.compute_mine_counts();

    c.bench_function("flood_empty_board", |b| {
        b.iter(|| board.flood_from([black_box([0, 0])]))
    });
}

fn bench_reveal_batch(c: &mut Criterion) {
    let board = hard_board();
    let pending = board.flood_from([[15, 8]]);

    c.bench_function("reveal_first_click", |b| {
        b.iter(|| {
            let mut board = board.clone();
            board.reveal_all(black_box(&pending))
        })
    });
}

criterion_group!(
    benches,
    bench_populate,
    bench_flood_first_click,
    bench_flood_empty_board,
    bench_reveal_batch
);
criterion_main!(benches);
