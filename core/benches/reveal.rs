use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sweeper_core::{Board, GameConfig, RandomMineGenerator};

fn bench_flood_fill_empty_board(c: &mut Criterion) {
    let mut board = Board::new((255, 255));
    board.compute_adjacency();

    c.bench_function("flood_fill_255x255_empty", |b| {
        b.iter(|| {
            let mut board = board.clone();
            black_box(board.reveal(black_box((127, 127))));
        })
    });
}

fn bench_reveal_classic(c: &mut Criterion) {
    let board = Board::generate(GameConfig::CLASSIC, RandomMineGenerator::new(12345)).unwrap();
    let start = board
        .iter_cells()
        .find(|(_, cell)| !cell.has_mine && cell.adjacent_mine_count == 0)
        .map(|(pos, _)| pos)
        .unwrap_or((4, 4));

    c.bench_function("reveal_classic_zero_cell", |b| {
        b.iter(|| {
            let mut board = board.clone();
            black_box(board.reveal(black_box(start)));
        })
    });
}

criterion_group!(benches, bench_flood_fill_empty_board, bench_reveal_classic);
criterion_main!(benches);
