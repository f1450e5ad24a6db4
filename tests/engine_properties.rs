//! Simulation-engine invariants exercised through the public API

use rand::{Rng, SeedableRng, rngs::StdRng};
use sokoban_rl::{Action, Grid, Level, Pos, RewardConfig, SokobanEngine, StateKey, Tile};

const PLAYGROUND: &str = "M\n\
#######\n\
#p..b.#\n\
#..#..#\n\
#..x..#\n\
#######\n\
I\n";

fn engine(source: &str, max_steps: usize) -> SokobanEngine {
    SokobanEngine::new(
        Level::parse(source).unwrap(),
        RewardConfig::default(),
        max_steps,
    )
}

fn player_count(grid: &Grid) -> usize {
    (0..grid.rows())
        .flat_map(|r| (0..grid.cols()).map(move |c| Pos::new(r, c)))
        .filter(|&p| grid.get(p) == Tile::Player)
        .count()
}

#[test]
fn boxes_and_player_conserved_over_random_play() {
    let mut env = engine(PLAYGROUND, 1000);
    let mut rng = StdRng::seed_from_u64(42);
    env.reset();
    let boxes_at_start = env.grid().box_count();

    for _ in 0..500 {
        let action = Action::from_index(rng.random_range(0..Action::COUNT)).unwrap();
        let outcome = env.step(action);
        assert_eq!(env.grid().box_count(), boxes_at_start);
        assert_eq!(player_count(env.grid()), 1);
        if outcome.done {
            env.reset();
        }
    }
}

#[test]
fn blocked_push_is_idempotent() {
    // box against the inner wall: pushing down is rejected, twice over
    let mut env = engine("M\n#####\n#.p.#\n#.b.#\n#.#x#\n#####\nI\n", 100);
    env.reset();

    let before = env.grid().clone();
    env.step(Action::Down);
    let after_first = env.grid().clone();
    env.step(Action::Down);
    let after_second = env.grid().clone();

    assert_eq!(before, after_first);
    assert_eq!(after_first, after_second);
}

#[test]
fn winning_push_empties_the_board_of_plain_boxes() {
    let mut env = engine("M\n#####\n#pbx#\n#####\nI\n", 100);
    env.reset();
    let outcome = env.step(Action::Right);

    assert!(outcome.done);
    assert!(env.grid().is_solved());
    assert_eq!(env.grid().box_count(), env.grid().achieved_targets());
}

#[test]
fn reset_round_trips_to_base_state() {
    let mut env = engine(PLAYGROUND, 1000);
    let base = env.reset();

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let action = Action::from_index(rng.random_range(0..Action::COUNT)).unwrap();
        if env.step(action).done {
            break;
        }
    }

    let restored = env.reset();
    assert_eq!(restored, base);
    assert_eq!(env.steps(), 0);
}

#[test]
fn bordered_corridor_two_rights_win() {
    // walls on the border, player, a gap, then box and target in a row
    let mut env = engine("M\n######\n#p.bx#\n######\nI\n", 100);
    env.reset();

    let first = env.step(Action::Right);
    assert!(!first.done);
    assert_eq!(first.reward, RewardConfig::default().empty_move);

    let second = env.step(Action::Right);
    assert!(second.done);
    assert_eq!(second.reward, RewardConfig::default().win);
    assert_eq!(env.grid().get(Pos::new(1, 4)), Tile::BoxOnTarget);
}

#[test]
fn state_key_tracks_player_and_box_through_a_push() {
    let mut env = engine("M\n#####\n#pb.#\n#..x#\n#####\nI\n", 100);
    env.reset();
    let before = env.state_key();
    assert_eq!((before.player_col, before.player_row), (1, 1));
    assert_eq!((before.box_col, before.box_row), (2, 1));

    env.step(Action::Right);
    let after = env.state_key();
    assert_eq!((after.player_col, after.player_row), (2, 1));
    assert_eq!((after.box_col, after.box_row), (3, 1));

    assert_eq!(StateKey::from_grid(env.grid()), Some(after));
}

#[test]
fn walked_over_targets_always_recover() {
    // the target sits in open floor; walk across it in both directions
    let mut env = engine("M\n#####\n#.x.#\n#p.b#\n#####\nI\n", 100);
    env.reset();

    env.step(Action::Up);
    env.step(Action::Right); // standing on the target
    assert_eq!(env.grid().get(Pos::new(1, 2)), Tile::Player);

    env.step(Action::Right); // stepped off: the target must reappear
    assert_eq!(env.grid().get(Pos::new(1, 2)), Tile::Target);

    env.step(Action::Left);
    env.step(Action::Left);
    assert_eq!(env.grid().get(Pos::new(1, 2)), Tile::Target);
}
