//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, the current time in seconds and an RNG
//! handle) and returns a brand-new `GameState`.  Side effects are limited to
//! the injected RNG.

use rand::Rng;

use crate::entities::{
    Alien, AlienKind, GameState, GameStatus, Laser, MysteryShip, Obstacle, SoundCue, Spaceship,
    Vec2, MYSTERY_SHIP_SIZE, OBSTACLE_WIDTH, SPACESHIP_SIZE,
};

// ── Tuning ────────────────────────────────────────────────────────────────────

/// Distance kept between moving entities and the arena's side edges.
const EDGE_MARGIN: f32 = 25.0;

const STARTING_LIVES: u32 = 3;

const SPACESHIP_STEP: f32 = 7.0;
const SPACESHIP_BOTTOM_GAP: f32 = 100.0;
const SPACESHIP_FIRE_COOLDOWN: f64 = 0.35;
const PLAYER_LASER_SPEED: f32 = -6.0;

/// Lasers are switched off once they leave the band `[25, height - 100]`.
const LASER_TOP_LIMIT: f32 = 25.0;
const LASER_BOTTOM_GAP: f32 = 100.0;

pub const ALIEN_ROWS: usize = 5;
pub const ALIEN_COLUMNS: usize = 11;
const ALIEN_ORIGIN: Vec2 = Vec2::new(75.0, 110.0);
const ALIEN_SPACING: f32 = 55.0;
pub const ALIEN_DROP: f32 = 4.0;
const ALIEN_LASER_SPEED: f32 = 6.0;

pub const INITIAL_ALIEN_LASER_INTERVAL: f64 = 0.6;
pub const ALIEN_LASER_INTERVAL_STEP: f64 = 0.02;
/// The per-wave tightening never goes below this.
pub const MIN_ALIEN_LASER_INTERVAL: f64 = 0.1;

pub const OBSTACLE_COUNT: usize = 4;
const OBSTACLE_BOTTOM_GAP: f32 = 200.0;
/// Obstacles are rebuilt on new waves only while the level is below this.
pub const OBSTACLE_REBUILD_LEVEL_CUTOFF: u32 = 5;

const MYSTERY_SHIP_Y: f32 = 90.0;
const MYSTERY_SHIP_SPEED: f32 = 3.0;
pub const MYSTERY_SHIP_POINTS: u32 = 500;
const MYSTERY_SPAWN_MIN_SECS: u32 = 10;
const MYSTERY_SPAWN_MAX_SECS: u32 = 20;

// ── Constructors ─────────────────────────────────────────────────────────────

fn initial_spaceship(width: f32, height: f32) -> Spaceship {
    Spaceship {
        position: Vec2::new(
            (width - SPACESHIP_SIZE.x) / 2.0,
            height - SPACESHIP_SIZE.y - SPACESHIP_BOTTOM_GAP,
        ),
        lasers: Vec::new(),
        last_fire_time: None,
    }
}

/// Row 0 is squids, rows 1–2 octopuses, rows 3–4 crabs.
fn alien_kind_for_row(row: usize) -> AlienKind {
    match row {
        0 => AlienKind::Squid,
        1 | 2 => AlienKind::Octopus,
        _ => AlienKind::Crab,
    }
}

/// A full 5 × 11 formation in its starting position.
pub fn create_aliens() -> Vec<Alien> {
    (0..ALIEN_ROWS)
        .flat_map(|row| {
            (0..ALIEN_COLUMNS).map(move |column| {
                Alien::new(
                    alien_kind_for_row(row),
                    Vec2::new(
                        ALIEN_ORIGIN.x + column as f32 * ALIEN_SPACING,
                        ALIEN_ORIGIN.y + row as f32 * ALIEN_SPACING,
                    ),
                )
            })
        })
        .collect()
}

/// Four evenly spaced shields sitting `200` units above the bottom edge.
pub fn create_obstacles(width: f32, height: f32) -> Vec<Obstacle> {
    let gap = (width - OBSTACLE_COUNT as f32 * OBSTACLE_WIDTH) / (OBSTACLE_COUNT as f32 + 1.0);
    (0..OBSTACLE_COUNT)
        .map(|i| {
            let x = (i as f32 + 1.0) * gap + i as f32 * OBSTACLE_WIDTH;
            Obstacle::new(Vec2::new(x, height - OBSTACLE_BOTTOM_GAP))
        })
        .collect()
}

fn random_spawn_interval(rng: &mut impl Rng) -> f64 {
    f64::from(rng.gen_range(MYSTERY_SPAWN_MIN_SECS..=MYSTERY_SPAWN_MAX_SECS))
}

/// Build the initial game state for an arena of `width` × `height` units.
pub fn init_state(
    width: f32,
    height: f32,
    high_score: u32,
    now: f64,
    rng: &mut impl Rng,
) -> GameState {
    GameState {
        spaceship: initial_spaceship(width, height),
        aliens: create_aliens(),
        alien_direction: 1.0,
        alien_lasers: Vec::new(),
        obstacles: create_obstacles(width, height),
        mystery_ship: MysteryShip::new(),
        lives: STARTING_LIVES,
        score: 0,
        high_score,
        level: 1,
        status: GameStatus::Playing,
        alien_laser_interval: INITIAL_ALIEN_LASER_INTERVAL,
        last_alien_fire: now,
        mystery_spawn_interval: random_spawn_interval(rng),
        last_mystery_spawn: now,
        sounds: Vec::new(),
        width,
        height,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_spaceship_left(state: &GameState) -> GameState {
    let x = (state.spaceship.position.x - SPACESHIP_STEP).max(EDGE_MARGIN);
    let mut next = state.clone();
    next.spaceship.position.x = x;
    next
}

pub fn move_spaceship_right(state: &GameState) -> GameState {
    let limit = state.width - SPACESHIP_SIZE.x - EDGE_MARGIN;
    let x = (state.spaceship.position.x + SPACESHIP_STEP).min(limit);
    let mut next = state.clone();
    next.spaceship.position.x = x;
    next
}

/// Fire a laser from the ship's nose, at most once every 0.35 s.
pub fn fire_laser(state: &GameState, now: f64) -> GameState {
    let ship = &state.spaceship;
    if let Some(last) = ship.last_fire_time {
        if now - last < SPACESHIP_FIRE_COOLDOWN {
            return state.clone();
        }
    }
    let origin = Vec2::new(
        ship.position.x + SPACESHIP_SIZE.x / 2.0 - 2.0,
        ship.position.y,
    );
    let mut next = state.clone();
    next.spaceship.lasers.push(Laser::new(origin, PLAYER_LASER_SPEED));
    next.spaceship.last_fire_time = Some(now);
    next.sounds.push(SoundCue::Laser);
    next
}

/// Keys held during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub restart: bool,
}

/// Apply one frame of held keys.  Ignored once the game is over.
///
/// One action per frame: left beats right, and the ship only fires while
/// standing still.
pub fn handle_input(state: &GameState, controls: &Controls, now: f64) -> GameState {
    if !state.is_running() {
        state.clone()
    } else if controls.left {
        move_spaceship_left(state)
    } else if controls.right {
        move_spaceship_right(state)
    } else if controls.fire {
        fire_laser(state, now)
    } else {
        state.clone()
    }
}

// ── Wave manager ────────────────────────────────────────────────────────────

/// Start the next wave once every alien is gone.
pub fn check_for_new_wave(state: &GameState) -> GameState {
    if !state.aliens.is_empty() {
        return state.clone();
    }
    let mut next = state.clone();
    next.lives = STARTING_LIVES;
    next.alien_lasers.clear();
    next.aliens = create_aliens();
    next.alien_laser_interval =
        (state.alien_laser_interval - ALIEN_LASER_INTERVAL_STEP).max(MIN_ALIEN_LASER_INTERVAL);
    next.level += 1;
    if next.level < OBSTACLE_REBUILD_LEVEL_CUTOFF {
        next.obstacles = create_obstacles(state.width, state.height);
    }
    next
}

// ── Entity updates ──────────────────────────────────────────────────────────

fn update_laser(laser: &mut Laser, height: f32) {
    if !laser.active {
        return;
    }
    laser.position.y += laser.speed;
    if laser.position.y > height - LASER_BOTTOM_GAP || laser.position.y < LASER_TOP_LIMIT {
        laser.active = false;
    }
}

pub fn update_player_lasers(state: &GameState) -> GameState {
    let mut next = state.clone();
    for laser in &mut next.spaceship.lasers {
        update_laser(laser, state.height);
    }
    next
}

pub fn update_alien_lasers(state: &GameState) -> GameState {
    let mut next = state.clone();
    for laser in &mut next.alien_lasers {
        update_laser(laser, state.height);
    }
    next
}

/// Drop every laser that hit something or left the play area.
pub fn delete_inactive_lasers(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.spaceship.lasers.retain(|l| l.active);
    next.alien_lasers.retain(|l| l.active);
    next
}

/// March the formation sideways, reversing and dropping at the edges.
///
/// Edge detection runs over the whole formation before anything moves, so
/// the formation flips and drops at most once per frame no matter how many
/// aliens cross the edge together.
pub fn move_aliens(state: &GameState) -> GameState {
    let right_limit = state.width - EDGE_MARGIN;
    let mut next = state.clone();

    let flip = if state.alien_direction > 0.0 {
        state
            .aliens
            .iter()
            .any(|a| a.position.x + a.kind.size().x > right_limit)
    } else {
        state.aliens.iter().any(|a| a.position.x < EDGE_MARGIN)
    };

    if flip {
        next.alien_direction = -state.alien_direction;
        for alien in &mut next.aliens {
            alien.position.y += ALIEN_DROP;
        }
    }

    for alien in &mut next.aliens {
        alien.position.x += next.alien_direction;
    }
    next
}

/// One random alien fires once the interval has elapsed.
pub fn alien_shoot_laser(state: &GameState, now: f64, rng: &mut impl Rng) -> GameState {
    if state.aliens.is_empty() || now - state.last_alien_fire < state.alien_laser_interval {
        return state.clone();
    }
    let alien = &state.aliens[rng.gen_range(0..state.aliens.len())];
    let size = alien.kind.size();
    let origin = Vec2::new(
        alien.position.x + size.x / 2.0,
        alien.position.y + size.y,
    );
    let mut next = state.clone();
    next.alien_lasers.push(Laser::new(origin, ALIEN_LASER_SPEED));
    next.last_alien_fire = now;
    next
}

/// Send the mystery ship across from a random side.
pub fn spawn_mystery_ship(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    let ship = &mut next.mystery_ship;
    ship.position.y = MYSTERY_SHIP_Y;
    if rng.gen_bool(0.5) {
        ship.position.x = EDGE_MARGIN;
        ship.speed = MYSTERY_SHIP_SPEED;
    } else {
        ship.position.x = state.width - MYSTERY_SHIP_SIZE.x - EDGE_MARGIN;
        ship.speed = -MYSTERY_SHIP_SPEED;
    }
    ship.alive = true;
    next
}

/// Spawn the mystery ship whenever its randomised timer runs out.
pub fn check_mystery_spawn(state: &GameState, now: f64, rng: &mut impl Rng) -> GameState {
    if now - state.last_mystery_spawn <= state.mystery_spawn_interval {
        return state.clone();
    }
    let mut next = spawn_mystery_ship(state, rng);
    next.last_mystery_spawn = now;
    next.mystery_spawn_interval = random_spawn_interval(rng);
    next
}

pub fn update_mystery_ship(state: &GameState) -> GameState {
    let mut next = state.clone();
    let ship = &mut next.mystery_ship;
    if ship.alive {
        ship.position.x += ship.speed;
        if ship.position.x > state.width - MYSTERY_SHIP_SIZE.x - EDGE_MARGIN
            || ship.position.x < EDGE_MARGIN
        {
            ship.alive = false;
        }
    }
    next
}

// ── Collisions ──────────────────────────────────────────────────────────────

fn add_score(state: &mut GameState, points: u32) {
    state.score += points;
    if state.score > state.high_score {
        state.high_score = state.score;
    }
}

/// Remove the first block of each obstacle that `laser` overlaps.
fn laser_hits_obstacles(laser: &mut Laser, obstacles: &mut [Obstacle]) {
    let rect = laser.rect();
    for obstacle in obstacles.iter_mut() {
        if let Some(i) = obstacle.blocks.iter().position(|b| b.rect().intersects(&rect)) {
            obstacle.blocks.remove(i);
            laser.active = false;
        }
    }
}

/// Resolve every collision for this frame.
///
/// Three independent passes: player lasers, alien lasers, then alien bodies.
pub fn check_for_collisions(state: &GameState) -> GameState {
    let mut next = state.clone();

    // ── 1. Player lasers ↔ aliens, obstacles, mystery ship ──────────────────
    let mut lasers = std::mem::take(&mut next.spaceship.lasers);
    for laser in &mut lasers {
        let rect = laser.rect();
        if let Some(i) = next.aliens.iter().position(|a| a.rect().intersects(&rect)) {
            let alien = next.aliens.remove(i);
            next.sounds.push(SoundCue::Explosion);
            add_score(&mut next, alien.kind.points());
            laser.active = false;
        }

        laser_hits_obstacles(laser, &mut next.obstacles);

        if next
            .mystery_ship
            .rect()
            .is_some_and(|ship| ship.intersects(&rect))
        {
            next.sounds.push(SoundCue::Explosion);
            next.mystery_ship.alive = false;
            laser.active = false;
            add_score(&mut next, MYSTERY_SHIP_POINTS);
        }
    }
    next.spaceship.lasers = lasers;

    // ── 2. Alien lasers ↔ spaceship, obstacles ──────────────────────────────
    let ship_rect = next.spaceship.rect();
    let mut lasers = std::mem::take(&mut next.alien_lasers);
    for laser in &mut lasers {
        if laser.rect().intersects(&ship_rect) {
            laser.active = false;
            next.lives = next.lives.saturating_sub(1);
            if next.lives == 0 {
                next.status = GameStatus::GameOver;
            }
        }

        laser_hits_obstacles(laser, &mut next.obstacles);
    }
    next.alien_lasers = lasers;

    // ── 3. Aliens ↔ obstacles, spaceship ────────────────────────────────────
    for alien in &next.aliens {
        let rect = alien.rect();
        for obstacle in &mut next.obstacles {
            obstacle.blocks.retain(|b| !b.rect().intersects(&rect));
        }
        if rect.intersects(&ship_rect) {
            next.status = GameStatus::GameOver;
        }
    }

    next
}

// ── Per-frame tick (nearly pure — time and RNG are injected) ────────────────

/// Advance a running game by one frame.  A finished game is returned as is;
/// restarting is the orchestrator's business since it re-reads the high score.
pub fn tick(state: &GameState, now: f64, rng: &mut impl Rng) -> GameState {
    if !state.is_running() {
        return state.clone();
    }
    let state = check_for_new_wave(state);
    let state = check_mystery_spawn(&state, now, rng);
    let state = update_player_lasers(&state);
    let state = move_aliens(&state);
    let state = alien_shoot_laser(&state, now, rng);
    let state = update_alien_lasers(&state);
    let state = delete_inactive_lasers(&state);
    let state = update_mystery_ship(&state);
    check_for_collisions(&state)
}
