use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use skyfall::config::*;

#[test]
fn defaults() {
    let config = GameConfig::from(Args::try_parse_from(["skyfall"]).unwrap());
    assert_eq!(config, GameConfig::default());
    assert_eq!(config.frame, Duration::from_micros(16_666));
    assert_eq!(config.canvas_size(80, 24), (800.0, 480.0));
}

#[test]
fn flags_override_defaults() {
    let args = Args::try_parse_from([
        "skyfall",
        "--fps",
        "30",
        "--cell-width",
        "8",
        "--cell-height",
        "16",
        "--seed",
        "7",
        "--log-file",
        "game.log",
    ])
    .unwrap();
    let config = GameConfig::from(args);
    assert_eq!(config.frame, Duration::from_micros(33_333));
    assert_eq!(config.canvas_size(100, 40), (800.0, 640.0));
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.log_file, Some(PathBuf::from("game.log")));
}

#[test]
fn rejects_out_of_range_values() {
    assert!(Args::try_parse_from(["skyfall", "--fps", "0"]).is_err());
    assert!(Args::try_parse_from(["skyfall", "--fps", "1000"]).is_err());
    assert!(Args::try_parse_from(["skyfall", "--cell-width", "0"]).is_err());
}
