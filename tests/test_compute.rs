use std::time::Duration;

use skyfall::compute::*;
use skyfall::entities::*;
use skyfall::input::FrameInput;
use skyfall::spawn::{spawn_enemy, spawn_item};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn make_state() -> GameState {
    init_state(800.0, 600.0)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn enemy_at(x: f32, y: f32) -> Sprite {
    Sprite { y, ..new_enemy(x, EnemyVariant::Default) }
}

fn item_at(x: f32, y: f32) -> Sprite {
    Sprite { y, ..new_item(x) }
}

const FIRE: FrameInput = FrameInput { left: false, right: false, fire: true };

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_player_position() {
    let s = make_state();
    assert_eq!(s.player.x, 375.0); // width / 2 - 25
    assert_eq!(s.player.y, 540.0); // height - 50 - 10
    assert_eq!(s.player.width, 50.0);
    assert_eq!(s.player.height, 50.0);
    assert_eq!(s.player.speed, 8.0);
}

#[test]
fn init_state_empty_collections() {
    let s = make_state();
    assert!(s.projectiles.is_empty());
    assert!(s.enemies.is_empty());
    assert!(s.items.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(s.frame, 0);
    assert_eq!(s.last_shot, None);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.game_over_cause, None);
}

// ── player movement ───────────────────────────────────────────────────────────

#[test]
fn move_left_normal() {
    let mut s = make_state();
    s.player.x = 100.0;
    let s2 = move_player_left(&s);
    assert_eq!(s2.player.x, 92.0);
}

#[test]
fn move_left_clamps_at_zero() {
    let mut s = make_state();
    s.player.x = 5.0;
    assert_eq!(move_player_left(&s).player.x, 0.0);
    s.player.x = 0.0;
    assert_eq!(move_player_left(&s).player.x, 0.0);
}

#[test]
fn move_right_clamps_at_canvas_edge() {
    let mut s = make_state();
    s.player.x = 745.0;
    assert_eq!(move_player_right(&s).player.x, 750.0);
    s.player.x = 750.0;
    assert_eq!(move_player_right(&s).player.x, 750.0);
}

#[test]
fn moves_never_change_y() {
    let s = make_state();
    assert_eq!(move_player_left(&s).player.y, s.player.y);
    assert_eq!(move_player_right(&s).player.y, s.player.y);
}

#[test]
fn move_does_not_mutate_original() {
    let s = make_state();
    let _s2 = move_player_left(&s);
    let _s3 = move_player_right(&s);
    assert_eq!(s.player.x, 375.0);
}

#[test]
fn random_moves_stay_on_canvas() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    for _ in 0..5000 {
        s = if rng.gen_bool(0.5) {
            move_player_left(&s)
        } else {
            move_player_right(&s)
        };
        assert!(s.player.x >= 0.0);
        assert!(s.player.x + s.player.width <= s.width);
    }
}

// ── player_shoot ──────────────────────────────────────────────────────────────

#[test]
fn shoot_adds_centred_projectile() {
    let s = make_state();
    let s2 = player_shoot(&s, ms(500), &mut seeded_rng());
    assert_eq!(s2.projectiles.len(), 1);
    let p = &s2.projectiles[0];
    assert_eq!(p.kind, SpriteKind::Projectile);
    assert_eq!(p.x + p.width / 2.0, s.player.x + 25.0);
    assert_eq!(p.y, s.player.y);
    assert_eq!(s2.last_shot, Some(ms(500)));
}

#[test]
fn shoot_stats_match_special_flag() {
    let mut rng = seeded_rng();
    let (mut normal, mut special) = (0, 0);
    for i in 0..500 {
        let s2 = player_shoot(&make_state(), ms(i), &mut rng);
        let p = &s2.projectiles[0];
        match p.tint {
            Tint::Red => {
                normal += 1;
                assert_eq!((p.width, p.height, p.speed), (10.0, 40.0, 15.0));
            }
            Tint::Yellow => {
                special += 1;
                assert_eq!((p.width, p.height, p.speed), (20.0, 60.0, 20.0));
            }
            other => panic!("unexpected projectile tint {:?}", other),
        }
    }
    assert!(normal > 0 && special > 0);
    assert!(special < normal);
}

#[test]
fn shoot_is_rate_limited() {
    let mut rng = seeded_rng();
    let s = player_shoot(&make_state(), ms(1000), &mut rng);
    let too_soon = player_shoot(&s, ms(1199), &mut rng);
    assert_eq!(too_soon.projectiles.len(), 1);
    assert_eq!(too_soon.last_shot, Some(ms(1000)));

    let on_time = player_shoot(&s, ms(1200), &mut rng);
    assert_eq!(on_time.projectiles.len(), 2);
    assert_eq!(on_time.last_shot, Some(ms(1200)));
}

#[test]
fn first_shot_is_never_limited() {
    let s2 = player_shoot(&make_state(), Duration::ZERO, &mut seeded_rng());
    assert_eq!(s2.projectiles.len(), 1);
}

#[test]
fn shoot_does_not_mutate_original() {
    let s = make_state();
    let _ = player_shoot(&s, ms(0), &mut seeded_rng());
    assert!(s.projectiles.is_empty());
}

#[test]
fn apply_input_moves_then_fires() {
    let mut s = make_state();
    s.player.x = 100.0;
    let input = FrameInput { left: true, right: false, fire: true };
    let s2 = apply_input(&s, input, ms(0), &mut seeded_rng());
    assert_eq!(s2.player.x, 92.0);
    let p = &s2.projectiles[0];
    assert_eq!(p.x + p.width / 2.0, 117.0);
}

// ── advance ───────────────────────────────────────────────────────────────────

#[test]
fn advance_moves_by_kind() {
    let p = advance(&new_projectile(0.0, 100.0, false));
    assert_eq!(p.y, 85.0);
    let e = advance(&enemy_at(0.0, 100.0));
    assert_eq!(e.y, 102.0);
    let i = advance(&item_at(0.0, 100.0));
    assert_eq!(i.y, 102.0);
    let slow = advance(&new_enemy(0.0, EnemyVariant::Red));
    assert_eq!(slow.y, 0.5);
}

// ── tick — projectiles ────────────────────────────────────────────────────────

#[test]
fn tick_increments_frame() {
    let mut s = make_state();
    s.frame = 5;
    assert_eq!(tick(&s).frame, 6);
}

#[test]
fn tick_projectile_moves_up() {
    let mut s = make_state();
    s.projectiles.push(new_projectile(20.0, 100.0, true));
    let s2 = tick(&s);
    assert_eq!(s2.projectiles[0].y, 80.0);
}

#[test]
fn tick_projectile_above_top_is_removed() {
    let mut s = make_state();
    s.projectiles.push(new_projectile(20.0, -1.0, false));
    s.projectiles.push(new_projectile(40.0, 0.0, false));
    let s2 = tick(&s);
    assert_eq!(s2.projectiles.len(), 1);
    assert_eq!(s2.projectiles[0].x, 40.0);
    assert_eq!(s2.projectiles[0].y, -15.0);
    assert!(tick(&s2).projectiles.is_empty());
}

// ── tick — enemies ────────────────────────────────────────────────────────────

#[test]
fn tick_enemy_near_bottom_keeps_falling() {
    let mut s = make_state();
    s.enemies.push(enemy_at(0.0, 590.0));
    let s2 = tick(&s);
    assert_eq!(s2.enemies[0].y, 592.0);
    assert_eq!(s2.status, GameStatus::Playing);
}

#[test]
fn tick_enemy_exactly_at_bottom_is_not_game_over() {
    let mut s = make_state();
    s.enemies.push(enemy_at(0.0, 600.0));
    let s2 = tick(&s);
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s2.enemies[0].y, 602.0);
    let s3 = tick(&s2);
    assert_eq!(s3.status, GameStatus::GameOver);
    assert_eq!(s3.game_over_cause, Some(GameOverCause::EnemyEscaped));
}

#[test]
fn tick_escaped_enemy_is_not_moved() {
    let mut s = make_state();
    s.enemies.push(enemy_at(0.0, 601.0));
    let s2 = tick(&s);
    assert_eq!(s2.status, GameStatus::GameOver);
    assert_eq!(s2.enemies[0].y, 601.0);
}

#[test]
fn tick_enemy_touching_player_ends_round() {
    let mut s = make_state(); // player at (375, 540)
    s.enemies.push(enemy_at(380.0, 500.0));
    let s2 = tick(&s);
    assert_eq!(s2.status, GameStatus::GameOver);
    assert_eq!(s2.game_over_cause, Some(GameOverCause::PlayerHit));
}

#[test]
fn tick_enemy_just_above_player_is_safe() {
    let mut s = make_state();
    // bottom edge lands exactly on the player's top edge after moving
    s.enemies.push(enemy_at(375.0, 488.0));
    let s2 = tick(&s);
    assert_eq!(s2.enemies[0].y, 490.0);
    assert_eq!(s2.status, GameStatus::Playing);
}

#[test]
fn tick_projectile_destroys_enemy() {
    let mut s = make_state();
    s.projectiles.push(new_projectile(45.0, 100.0, false));
    s.enemies.push(enemy_at(40.0, 120.0));
    let s2 = tick(&s);
    assert!(s2.projectiles.is_empty());
    assert!(s2.enemies.is_empty());
    assert_eq!(s2.score, 10);
}

#[test]
fn tick_enemy_hit_by_two_projectiles_scores_once() {
    let mut s = make_state();
    s.projectiles.push(new_projectile(45.0, 100.0, false));
    s.projectiles.push(new_projectile(60.0, 110.0, false));
    s.enemies.push(enemy_at(40.0, 120.0));
    let s2 = tick(&s);
    assert!(s2.enemies.is_empty());
    assert_eq!(s2.score, 10);
    // both projectiles touched the enemy, so both are gone
    assert!(s2.projectiles.is_empty());
}

#[test]
fn tick_one_projectile_can_destroy_overlapping_enemies() {
    let mut s = make_state();
    s.projectiles.push(new_projectile(45.0, 100.0, false));
    s.enemies.push(enemy_at(40.0, 120.0));
    s.enemies.push(enemy_at(42.0, 118.0));
    let s2 = tick(&s);
    assert!(s2.enemies.is_empty());
    assert_eq!(s2.score, 20);
    assert!(s2.projectiles.is_empty());
}

#[test]
fn tick_projectile_missing_enemy_flies_on() {
    let mut s = make_state();
    s.projectiles.push(new_projectile(45.0, 100.0, false));
    s.projectiles.push(new_projectile(300.0, 100.0, false));
    s.enemies.push(enemy_at(40.0, 120.0));
    let s2 = tick(&s);
    assert_eq!(s2.score, 10);
    assert_eq!(s2.projectiles.len(), 1);
    assert_eq!(s2.projectiles[0].x, 300.0);
}

#[test]
fn tick_preserves_creation_order() {
    let mut s = make_state();
    s.enemies.push(enemy_at(0.0, 10.0));
    s.enemies.push(enemy_at(100.0, 10.0)); // will be shot
    s.enemies.push(enemy_at(200.0, 10.0));
    s.projectiles.push(new_projectile(110.0, 30.0, false));
    let s2 = tick(&s);
    let xs: Vec<f32> = s2.enemies.iter().map(|e| e.x).collect();
    assert_eq!(xs, vec![0.0, 200.0]);
}

// ── tick — items ──────────────────────────────────────────────────────────────

#[test]
fn tick_item_falls() {
    let mut s = make_state();
    s.items.push(item_at(0.0, 100.0));
    let s2 = tick(&s);
    assert_eq!(s2.items[0].y, 102.0);
}

#[test]
fn tick_item_collected_by_player() {
    let mut s = make_state();
    s.items.push(item_at(385.0, 540.0));
    let s2 = tick(&s);
    assert!(s2.items.is_empty());
    assert_eq!(s2.score, 50);
    assert_eq!(s2.status, GameStatus::Playing);
}

#[test]
fn tick_item_past_bottom_vanishes_silently() {
    let mut s = make_state();
    s.items.push(item_at(0.0, 601.0));
    let s2 = tick(&s);
    assert!(s2.items.is_empty());
    assert_eq!(s2.score, 0);
    assert_eq!(s2.status, GameStatus::Playing);
}

#[test]
fn tick_scores_enemy_and_item_together() {
    let mut s = make_state();
    s.projectiles.push(new_projectile(45.0, 100.0, false));
    s.enemies.push(enemy_at(40.0, 120.0));
    s.items.push(item_at(385.0, 540.0));
    assert_eq!(tick(&s).score, 60);
}

// ── game over ─────────────────────────────────────────────────────────────────

#[test]
fn game_over_freezes_everything() {
    let mut s = make_state();
    s.enemies.push(enemy_at(0.0, 601.0));
    s.items.push(item_at(100.0, 100.0));
    s.projectiles.push(new_projectile(300.0, 300.0, false));
    let over = tick(&s);
    assert_eq!(over.status, GameStatus::GameOver);

    let mut rng = seeded_rng();
    let held = FrameInput { left: true, right: false, fire: true };
    let later = step(&tick(&over), held, ms(5000), &mut rng);
    assert_eq!(later.status, GameStatus::GameOver);
    assert_eq!(later.score, over.score);
    assert_eq!(later.frame, over.frame);
    assert_eq!(later.player, over.player);
    assert_eq!(later.enemies, over.enemies);
    assert_eq!(later.items, over.items);
    assert_eq!(later.projectiles, over.projectiles);
}

#[test]
fn score_only_grows_in_tens_and_fifties() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut s = init_state(300.0, 400.0);
    let mut now = Duration::ZERO;
    for frame in 0..20_000u64 {
        now += ms(16);
        if frame % 40 == 0 {
            s = spawn_enemy(&s, &mut rng);
        }
        if frame % 300 == 0 {
            s = spawn_item(&s, &mut rng);
        }
        let input = FrameInput {
            left: rng.gen_bool(0.3),
            right: rng.gen_bool(0.3),
            fire: true,
        };
        let before = s.score;
        s = step(&s, input, now, &mut rng);
        assert!(s.score >= before);
        assert_eq!((s.score - before) % 10, 0);
        if s.status == GameStatus::GameOver {
            break;
        }
    }
}

#[test]
fn step_fires_and_ticks_in_one_frame() {
    let s = make_state();
    let s2 = step(&s, FIRE, ms(0), &mut seeded_rng());
    assert_eq!(s2.projectiles.len(), 1);
    let p = &s2.projectiles[0];
    assert_eq!(p.y, s.player.y - p.speed);
    assert_eq!(s2.frame, 1);
}
