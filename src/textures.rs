//! Procedural sprite textures.
//!
//! The three sprites are described as vector paths centred on the origin and
//! rasterised once into boolean masks.  The renderer samples the masks to
//! draw sprites; the simulation uses their dimensions as collision bounds.

/// A packed 0xRRGGBB colour.
pub type Rgb = u32;

pub const SHIP_COLOR: Rgb = 0x00ff00;
pub const BULLET_COLOR: Rgb = 0x00ffff;
pub const ENEMY_COLOR: Rgb = 0xff0000;

/// A rasterised sprite.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub color: Rgb,
    mask: Vec<bool>,
}

impl Texture {
    /// Fill a convex polygon whose coordinates are relative to the texture
    /// centre.  A pixel is set when its centre lies inside the polygon.
    pub fn polygon(
        name: &'static str,
        width: u32,
        height: u32,
        color: Rgb,
        path: &[(f32, f32)],
    ) -> Self {
        let (ox, oy) = (width as f32 / 2.0, height as f32 / 2.0);
        let mut mask = vec![false; (width * height) as usize];
        for py in 0..height {
            for px in 0..width {
                let x = px as f32 + 0.5 - ox;
                let y = py as f32 + 0.5 - oy;
                mask[(py * width + px) as usize] = inside_convex(path, x, y);
            }
        }
        Self { name, width, height, color, mask }
    }

    /// A solid rectangle covering the whole texture.
    pub fn rect(name: &'static str, width: u32, height: u32, color: Rgb) -> Self {
        Self {
            name,
            width,
            height,
            color,
            mask: vec![true; (width * height) as usize],
        }
    }

    pub fn is_set(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.mask[(y * self.width + x) as usize]
    }

    /// Number of set pixels.
    pub fn filled(&self) -> usize {
        self.mask.iter().filter(|&&p| p).count()
    }

    /// Shrink the mask to a `cols` × `rows` grid; a cell is set when any pixel
    /// that falls into it is set.
    pub fn downsample(&self, cols: usize, rows: usize) -> Vec<Vec<bool>> {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let mut grid = vec![vec![false; cols]; rows];
        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_set(x, y) {
                    let cx = (x as usize * cols) / self.width as usize;
                    let cy = (y as usize * rows) / self.height as usize;
                    grid[cy][cx] = true;
                }
            }
        }
        grid
    }
}

/// Point-in-convex-polygon test; works for either winding order.
fn inside_convex(path: &[(f32, f32)], x: f32, y: f32) -> bool {
    if path.len() < 3 {
        return false;
    }
    let mut sign = 0.0_f32;
    for i in 0..path.len() {
        let (ax, ay) = path[i];
        let (bx, by) = path[(i + 1) % path.len()];
        let cross = (bx - ax) * (y - ay) - (by - ay) * (x - ax);
        if cross != 0.0 {
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
    }
    true
}

/// The three sprites every round draws with.
#[derive(Clone, Debug)]
pub struct TextureSet {
    pub ship: Texture,
    pub bullet: Texture,
    pub enemy: Texture,
}

impl TextureSet {
    pub fn generate() -> Self {
        let ship = Texture::polygon(
            "ship",
            20,
            30,
            SHIP_COLOR,
            &[(0.0, -15.0), (10.0, 15.0), (-10.0, 15.0)],
        );
        let bullet = Texture::rect("bullet", 4, 8, BULLET_COLOR);
        let enemy = Texture::polygon(
            "enemy",
            20,
            20,
            ENEMY_COLOR,
            &[(0.0, -10.0), (10.0, 10.0), (-10.0, 10.0)],
        );
        log::debug!(
            "Generated textures: ship {}px, bullet {}px, enemy {}px",
            ship.filled(),
            bullet.filled(),
            enemy.filled()
        );
        Self { ship, bullet, enemy }
    }
}
