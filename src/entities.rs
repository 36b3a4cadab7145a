//! All game entity types — plain data plus their bounding boxes.
//!
//! Coordinates are world units of a fixed arena (800 × 800 by default); the
//! renderer scales them to whatever terminal size is available.

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Strict overlap test: rectangles that only share an edge do not collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

// ── Sprite sizes ──────────────────────────────────────────────────────────────

pub const LASER_SIZE: Vec2 = Vec2::new(4.0, 15.0);
pub const BLOCK_SIZE: f32 = 3.0;
pub const SPACESHIP_SIZE: Vec2 = Vec2::new(60.0, 32.0);
pub const MYSTERY_SHIP_SIZE: Vec2 = Vec2::new(80.0, 34.0);

/// Shield bitmap shared by every obstacle: 13 rows × 23 columns.
pub const OBSTACLE_GRID: [&str; 13] = [
    ".....#############.....",
    "....###############....",
    "...#################...",
    "..###################..",
    ".#####################.",
    "#######################",
    "#######################",
    "#######################",
    "#######################",
    "#######################",
    "######...........######",
    "#####.............#####",
    "####...............####",
];

pub const OBSTACLE_WIDTH: f32 = 23.0 * BLOCK_SIZE;

// ── Status ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Audio cues raised by the simulation; the front-end decides how to play them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SoundCue {
    Laser,
    Explosion,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Laser {
    pub position: Vec2,
    /// Vertical units per frame: negative travels up (player), positive down (aliens).
    pub speed: f32,
    pub active: bool,
}

impl Laser {
    pub fn new(position: Vec2, speed: f32) -> Self {
        Self {
            position,
            speed,
            active: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, LASER_SIZE.x, LASER_SIZE.y)
    }
}

// ── Aliens ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AlienKind {
    /// Bottom two rows.
    Crab,
    /// Middle two rows.
    Octopus,
    /// Top row.
    Squid,
}

impl AlienKind {
    /// Numeric type (1–3) as used for row assignment.
    pub fn number(self) -> u8 {
        match self {
            AlienKind::Crab => 1,
            AlienKind::Octopus => 2,
            AlienKind::Squid => 3,
        }
    }

    pub fn points(self) -> u32 {
        u32::from(self.number()) * 100
    }

    pub fn size(self) -> Vec2 {
        match self {
            AlienKind::Crab | AlienKind::Octopus => Vec2::new(44.0, 32.0),
            AlienKind::Squid => Vec2::new(40.0, 32.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub kind: AlienKind,
    pub position: Vec2,
}

impl Alien {
    pub fn new(kind: AlienKind, position: Vec2) -> Self {
        Self { kind, position }
    }

    pub fn rect(&self) -> Rect {
        let size = self.kind.size();
        Rect::new(self.position.x, self.position.y, size.x, size.y)
    }
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub position: Vec2,
}

impl Block {
    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, BLOCK_SIZE, BLOCK_SIZE)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub position: Vec2,
    pub blocks: Vec<Block>,
}

impl Obstacle {
    /// Lay out a full shield with its top-left corner at `position`.
    pub fn new(position: Vec2) -> Self {
        let blocks = OBSTACLE_GRID
            .iter()
            .enumerate()
            .flat_map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .filter(|(_, c)| *c == '#')
                    .map(move |(col, _)| Block {
                        position: Vec2::new(
                            position.x + col as f32 * BLOCK_SIZE,
                            position.y + row as f32 * BLOCK_SIZE,
                        ),
                    })
            })
            .collect();
        Self { position, blocks }
    }
}

// ── Mystery ship ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct MysteryShip {
    pub position: Vec2,
    pub speed: f32,
    pub alive: bool,
}

impl MysteryShip {
    pub fn new() -> Self {
        Self {
            position: Vec2::new(0.0, 0.0),
            speed: 0.0,
            alive: false,
        }
    }

    /// A dead ship has no collision box.
    pub fn rect(&self) -> Option<Rect> {
        self.alive.then(|| {
            Rect::new(
                self.position.x,
                self.position.y,
                MYSTERY_SHIP_SIZE.x,
                MYSTERY_SHIP_SIZE.y,
            )
        })
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Spaceship {
    pub position: Vec2,
    pub lasers: Vec<Laser>,
    /// Seconds timestamp of the last shot; `None` until the first one.
    pub last_fire_time: Option<f64>,
}

impl Spaceship {
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            SPACESHIP_SIZE.x,
            SPACESHIP_SIZE.y,
        )
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so the step functions in `compute` can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub spaceship: Spaceship,
    pub aliens: Vec<Alien>,
    /// Shared horizontal direction of the formation: +1 right, −1 left.
    pub alien_direction: f32,
    pub alien_lasers: Vec<Laser>,
    pub obstacles: Vec<Obstacle>,
    pub mystery_ship: MysteryShip,
    pub lives: u32,
    pub score: u32,
    /// The highest score seen so far (updated live during play).
    pub high_score: u32,
    pub level: u32,
    pub status: GameStatus,
    /// Seconds between two alien shots; tightens every wave.
    pub alien_laser_interval: f64,
    pub last_alien_fire: f64,
    pub mystery_spawn_interval: f64,
    pub last_mystery_spawn: f64,
    /// Cues raised since the front-end last drained them.
    pub sounds: Vec<SoundCue>,
    pub width: f32,
    pub height: f32,
}

impl GameState {
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Playing
    }
}
