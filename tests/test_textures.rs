use arcade_shooter::entities::{BULLET_SIZE, ENEMY_SIZE, SHIP_SIZE};
use arcade_shooter::textures::*;

#[test]
fn generated_sizes_match_collision_bounds() {
    let set = TextureSet::generate();
    assert_eq!((set.ship.width as f32, set.ship.height as f32), SHIP_SIZE);
    assert_eq!((set.bullet.width as f32, set.bullet.height as f32), BULLET_SIZE);
    assert_eq!((set.enemy.width as f32, set.enemy.height as f32), ENEMY_SIZE);
}

#[test]
fn generated_colours() {
    let set = TextureSet::generate();
    assert_eq!(set.ship.color, 0x00ff00);
    assert_eq!(set.bullet.color, 0x00ffff);
    assert_eq!(set.enemy.color, 0xff0000);
}

#[test]
fn bullet_is_solid() {
    let set = TextureSet::generate();
    assert_eq!(set.bullet.filled(), 4 * 8);
}

#[test]
fn ship_is_a_triangle_pointing_up() {
    let ship = TextureSet::generate().ship;
    // Apex column is set near the top, corners are not
    assert!(ship.is_set(10, 2));
    assert!(!ship.is_set(0, 0));
    assert!(!ship.is_set(19, 0));
    // Base row is (nearly) full width
    assert!(ship.is_set(1, 29));
    assert!(ship.is_set(18, 29));
    // Roughly half the box is covered
    let area = ship.filled();
    assert!(area > 250 && area < 350, "area {}", area);
}

#[test]
fn enemy_is_a_triangle() {
    let enemy = TextureSet::generate().enemy;
    assert!(enemy.is_set(10, 2));
    assert!(!enemy.is_set(0, 0));
    assert!(enemy.is_set(10, 19));
    let area = enemy.filled();
    assert!(area > 150 && area < 250, "area {}", area);
}

#[test]
fn out_of_range_pixels_are_unset() {
    let bullet = TextureSet::generate().bullet;
    assert!(!bullet.is_set(4, 0));
    assert!(!bullet.is_set(0, 8));
}

#[test]
fn degenerate_path_fills_nothing() {
    let tex = Texture::polygon("line", 4, 4, 0xffffff, &[(0.0, 0.0), (1.0, 1.0)]);
    assert_eq!(tex.filled(), 0);
}

#[test]
fn downsample_to_single_cell() {
    let ship = TextureSet::generate().ship;
    assert_eq!(ship.downsample(1, 1), vec![vec![true]]);
}

#[test]
fn downsample_keeps_triangle_shape() {
    let ship = TextureSet::generate().ship;
    let grid = ship.downsample(3, 3);
    // Top row: only the middle column; bottom row: all three
    assert_eq!(grid[0], vec![false, true, false]);
    assert_eq!(grid[2], vec![true, true, true]);
}

#[test]
fn downsample_zero_is_clamped() {
    let bullet = TextureSet::generate().bullet;
    assert_eq!(bullet.downsample(0, 0), vec![vec![true]]);
}
