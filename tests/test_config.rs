use std::path::PathBuf;

use clap::Parser;

use space_invaders::config::Config;

#[test]
fn defaults() {
    let config = Config::try_parse_from(["space_invaders"]).unwrap();
    assert_eq!(config.high_score_file, PathBuf::from("highscore.txt"));
    assert_eq!(config.log_file, None);
    assert_eq!(config.fps, 60);
}

#[test]
fn flags_override_defaults() {
    let config = Config::try_parse_from([
        "space_invaders",
        "--high-score-file",
        "/tmp/best.txt",
        "--log-file",
        "game.log",
        "--fps",
        "30",
    ])
    .unwrap();
    assert_eq!(config.high_score_file, PathBuf::from("/tmp/best.txt"));
    assert_eq!(config.log_file, Some(PathBuf::from("game.log")));
    assert_eq!(config.fps, 30);
}

#[test]
fn zero_fps_is_rejected() {
    assert!(Config::try_parse_from(["space_invaders", "--fps", "0"]).is_err());
}
