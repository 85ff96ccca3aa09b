use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use mayhem_core::{
    board::{Board, MonsterKind, Position},
    game::Game,
    moves::Move,
};

fn scripted_game() -> Game {
    let mut game = Game::new(Some(1234));
    for name in ["A", "B", "C", "D"] {
        game.add_player(name.into()).unwrap();
    }
    game.start();
    game.turn_order = vec![1, 2, 3, 4];
    game.turn_index = 0;
    game
}

pub fn game_benches(c: &mut Criterion) {
    c.bench_function("a full round of placements", |b| {
        b.iter(|| {
            let mut game = scripted_game();
            for (player, position) in [
                (1, Position::new(4, 0)),
                (2, Position::new(4, 9)),
                (3, Position::new(0, 4)),
                (4, Position::new(9, 4)),
            ] {
                game.play_turn(Move::Place {
                    player,
                    kind: MonsterKind::Vampire,
                    position,
                })
                .unwrap();
                game.play_turn(Move::EndTurn { player }).unwrap();
            }
            black_box(game)
        })
    });

    let board = Board::from_string(
        "__ __ __ __ __ __ __ __ __ __\n\
         __ __ __ __ __ __ __ __ __ __\n\
         __ __ __ __ __ __ __ __ __ __\n\
         __ __ __ __ __ __ __ __ __ __\n\
         V1 V1 V1 V1 V1 V1 V1 V1 V1 __\n\
         __ __ __ __ __ __ __ __ __ __\n\
         __ __ __ __ __ __ __ __ __ __\n\
         __ __ __ __ __ __ __ __ __ __\n\
         __ __ __ __ __ __ __ __ __ __\n\
         __ __ __ __ __ __ __ __ __ __",
    );
    c.bench_function("path clearance across the board", |b| {
        b.iter(|| {
            board
                .path_is_clear(black_box(Position::new(4, 0)), Position::new(4, 9), 1)
                .unwrap()
        })
    });
}

criterion_group!(benches, game_benches);
criterion_main!(benches);
