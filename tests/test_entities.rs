use space_invaders::entities::*;

#[test]
fn rect_overlap_is_strict() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
    assert!(a.intersects(&Rect::new(2.0, 2.0, 1.0, 1.0))); // fully contained

    // Sharing an edge is not a hit
    assert!(!a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0)));
    assert!(!a.intersects(&Rect::new(0.0, 10.0, 5.0, 5.0)));
    assert!(!a.intersects(&Rect::new(30.0, 30.0, 5.0, 5.0)));
}

#[test]
fn alien_kind_numbers_and_points() {
    assert_eq!(AlienKind::Crab.points(), 100);
    assert_eq!(AlienKind::Octopus.points(), 200);
    assert_eq!(AlienKind::Squid.points(), 300);

    assert_eq!(AlienKind::Crab.number(), 1);
    assert_eq!(AlienKind::Octopus.number(), 2);
    assert_eq!(AlienKind::Squid.number(), 3);
}

#[test]
fn alien_rect_uses_sprite_size() {
    let squid = Alien::new(AlienKind::Squid, Vec2::new(10.0, 20.0));
    assert_eq!(squid.rect(), Rect::new(10.0, 20.0, 40.0, 32.0));
    let crab = Alien::new(AlienKind::Crab, Vec2::new(10.0, 20.0));
    assert_eq!(crab.rect().width, 44.0);
}

#[test]
fn obstacle_is_laid_out_from_the_grid() {
    let obstacle = Obstacle::new(Vec2::new(100.0, 600.0));
    assert_eq!(obstacle.blocks.len(), 230);

    // Top-left corner of the arch is empty; first block sits 5 columns in
    let first = &obstacle.blocks[0];
    assert_eq!(first.position, Vec2::new(100.0 + 5.0 * BLOCK_SIZE, 600.0));
    assert_eq!(first.rect().width, BLOCK_SIZE);

    // Every block lies inside the shield's footprint
    for block in &obstacle.blocks {
        assert!(block.position.x >= 100.0 && block.position.x < 100.0 + OBSTACLE_WIDTH);
        assert!(block.position.y >= 600.0 && block.position.y < 600.0 + 13.0 * BLOCK_SIZE);
    }
}

#[test]
fn dead_mystery_ship_cannot_be_hit() {
    let mut ship = MysteryShip::new();
    assert!(!ship.alive);
    assert!(ship.rect().is_none());

    ship.alive = true;
    ship.position = Vec2::new(25.0, 90.0);
    assert_eq!(ship.rect(), Some(Rect::new(25.0, 90.0, 80.0, 34.0)));
}

#[test]
fn new_laser_is_active() {
    let laser = Laser::new(Vec2::new(1.0, 2.0), -6.0);
    assert!(laser.active);
    assert_eq!(laser.rect(), Rect::new(1.0, 2.0, 4.0, 15.0));
}
