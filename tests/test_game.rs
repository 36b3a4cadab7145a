use std::fs;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use space_invaders::compute::{init_state, Controls};
use space_invaders::entities::*;
use space_invaders::game::Game;
use space_invaders::highscore::HighScoreFile;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn store_in(dir: &TempDir) -> HighScoreFile {
    HighScoreFile::new(dir.path().join("highscore.txt"))
}

fn idle() -> Controls {
    Controls::default()
}

/// A running game with a single crab about to be hit by a player laser.
fn one_shot_from_a_kill(high_score: u32) -> GameState {
    let mut s = init_state(800.0, 800.0, high_score, 0.0, &mut seeded_rng());
    s.aliens = vec![Alien::new(AlienKind::Crab, Vec2::new(300.0, 300.0))];
    s.spaceship.lasers = vec![Laser::new(Vec2::new(310.0, 320.0), -6.0)];
    s
}

#[test]
fn new_game_reads_the_high_score() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("highscore.txt"), "1234").unwrap();

    let game = Game::new(store_in(&dir), 800.0, 800.0, 0.0, &mut seeded_rng());
    assert_eq!(game.state().high_score, 1234);
    assert!(game.is_running());
}

#[test]
fn new_game_without_a_file_starts_at_zero() {
    let dir = TempDir::new().unwrap();
    let game = Game::new(store_in(&dir), 800.0, 800.0, 0.0, &mut seeded_rng());
    assert_eq!(game.state().high_score, 0);
}

#[test]
fn new_record_is_written_to_disk() {
    let dir = TempDir::new().unwrap();
    let mut game = Game::with_state(store_in(&dir), one_shot_from_a_kill(0));

    game.update(&idle(), 0.1, &mut seeded_rng());
    assert_eq!(game.state().score, 100);
    assert_eq!(game.state().high_score, 100);

    let on_disk = fs::read_to_string(dir.path().join("highscore.txt")).unwrap();
    assert_eq!(on_disk.trim(), "100");
}

#[test]
fn lower_scores_leave_the_file_alone() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("highscore.txt");
    fs::write(&path, "5000").unwrap();

    let mut game = Game::with_state(store_in(&dir), one_shot_from_a_kill(5000));
    game.update(&idle(), 0.1, &mut seeded_rng());
    assert_eq!(game.state().score, 100);
    assert_eq!(fs::read_to_string(&path).unwrap(), "5000");
}

#[test]
fn failed_save_does_not_stop_the_game() {
    let dir = TempDir::new().unwrap();
    // A directory cannot be written as a file
    let store = HighScoreFile::new(dir.path());
    let mut game = Game::with_state(store, one_shot_from_a_kill(0));

    game.update(&idle(), 0.1, &mut seeded_rng());
    assert!(game.is_running());
    assert_eq!(game.state().high_score, 100);
}

#[test]
fn explosions_are_handed_out_once() {
    let dir = TempDir::new().unwrap();
    let mut game = Game::with_state(store_in(&dir), one_shot_from_a_kill(0));
    game.update(&idle(), 0.1, &mut seeded_rng());

    assert_eq!(game.take_sounds(), vec![SoundCue::Explosion]);
    assert!(game.take_sounds().is_empty());
}

#[test]
fn input_moves_the_ship_through_the_orchestrator() {
    let dir = TempDir::new().unwrap();
    let mut game = Game::new(store_in(&dir), 800.0, 800.0, 0.0, &mut seeded_rng());
    let start_x = game.state().spaceship.position.x;

    game.handle_input(
        &Controls {
            right: true,
            ..Controls::default()
        },
        0.0,
    );
    assert_eq!(game.state().spaceship.position.x, start_x + 7.0);
}

#[test]
fn losing_the_last_life_ends_the_game() {
    let dir = TempDir::new().unwrap();
    let mut s = init_state(800.0, 800.0, 0, 0.0, &mut seeded_rng());
    s.lives = 1;
    // Falls into the ship after one step
    s.alien_lasers = vec![Laser::new(Vec2::new(390.0, 660.0), 6.0)];
    let mut game = Game::with_state(store_in(&dir), s);

    game.update(&idle(), 0.1, &mut seeded_rng());
    assert_eq!(game.state().lives, 0);
    assert_eq!(game.state().status, GameStatus::GameOver);
    assert!(!game.is_running());
}

#[test]
fn game_over_waits_for_restart() {
    let dir = TempDir::new().unwrap();
    let mut s = init_state(800.0, 800.0, 0, 0.0, &mut seeded_rng());
    s.status = GameStatus::GameOver;
    s.aliens.truncate(3);
    let mut game = Game::with_state(store_in(&dir), s);

    game.update(&idle(), 5.0, &mut seeded_rng());
    assert!(!game.is_running());
    assert_eq!(game.state().aliens.len(), 3);
}

#[test]
fn restart_resets_the_whole_game() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("highscore.txt"), "900").unwrap();

    let mut s = init_state(800.0, 800.0, 900, 0.0, &mut seeded_rng());
    s.status = GameStatus::GameOver;
    s.lives = 0;
    s.score = 700;
    s.level = 6;
    s.aliens.truncate(4);
    s.obstacles.truncate(1);
    s.obstacles[0].blocks.truncate(12);
    s.alien_lasers.push(Laser::new(Vec2::new(10.0, 400.0), 6.0));
    s.spaceship.lasers.push(Laser::new(Vec2::new(10.0, 400.0), -6.0));
    s.spaceship.position.x = 25.0;
    s.alien_laser_interval = 0.3;
    let mut game = Game::with_state(store_in(&dir), s);

    game.update(
        &Controls {
            restart: true,
            ..Controls::default()
        },
        42.0,
        &mut seeded_rng(),
    );

    let s = game.state();
    assert!(game.is_running());
    assert_eq!(s.lives, 3);
    assert_eq!(s.score, 0);
    assert_eq!(s.level, 1);
    assert_eq!(s.high_score, 900);
    assert_eq!(s.aliens.len(), 55);
    assert_eq!(s.obstacles.len(), 4);
    assert!(s.obstacles.iter().all(|o| o.blocks.len() == 230));
    assert!(s.alien_lasers.is_empty());
    assert!(s.spaceship.lasers.is_empty());
    assert_eq!(s.spaceship.position.x, 370.0);
    assert_eq!(s.alien_laser_interval, 0.6);
    assert_eq!(s.last_alien_fire, 42.0);
    assert_eq!(s.last_mystery_spawn, 42.0);
}
