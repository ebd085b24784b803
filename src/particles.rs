//! Explosion particles.
//!
//! A burst is a fixed number of sparks thrown in random directions that
//! shrink to nothing over their lifespan.  Purely cosmetic: the simulation
//! never reads particle state.

use rand::Rng;

use crate::config::GameConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub age_ms: f32,
}

#[derive(Clone, Debug)]
pub struct ParticleSystem {
    pub quantity: usize,
    pub speed: f32,
    pub lifespan_ms: f32,
    pub start_scale: f32,
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            quantity: config.particle_quantity,
            speed: config.particle_speed,
            lifespan_ms: config.particle_lifespan_ms,
            start_scale: config.particle_start_scale,
            particles: Vec::new(),
        }
    }

    /// Fire one burst centred on (x, y).
    pub fn emit_at(&mut self, x: f32, y: f32, rng: &mut impl Rng) {
        for _ in 0..self.quantity {
            let speed = rng.gen_range(-self.speed..=self.speed);
            let angle = rng.gen_range(0.0_f32..360.0).to_radians();
            self.particles.push(Particle {
                x,
                y,
                vx: speed * angle.cos(),
                vy: speed * angle.sin(),
                age_ms: 0.0,
            });
        }
    }

    /// Age and move every particle, dropping the ones that burnt out.
    pub fn update(&mut self, dt_ms: f32) {
        let dt = dt_ms / 1000.0;
        for p in &mut self.particles {
            p.age_ms += dt_ms;
            p.x += p.vx * dt;
            p.y += p.vy * dt;
        }
        let lifespan = self.lifespan_ms;
        self.particles.retain(|p| p.age_ms < lifespan);
    }

    /// Current scale of a particle: linear from the start scale down to 0.
    pub fn scale_of(&self, particle: &Particle) -> f32 {
        let t = (particle.age_ms / self.lifespan_ms).clamp(0.0, 1.0);
        self.start_scale * (1.0 - t)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
