// Simple particle struct to keep track of individual position, velocity, and radius

use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub radius: f64,
}

impl Particle {
    pub const MIN_RADIUS: f64 = 2.0;
    pub const MAX_RADIUS: f64 = 4.0;
    // Each velocity component is drawn from [-MAX_DRIFT, MAX_DRIFT)
    pub const MAX_DRIFT: f64 = 0.5;

    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, radius: f64) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            radius,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = (rng.gen::<f64>() - 0.5) * Particle::MAX_DRIFT * 2.0;
        let vel_y = (rng.gen::<f64>() - 0.5) * Particle::MAX_DRIFT * 2.0;
        let radius =
            Particle::MIN_RADIUS + rng.gen::<f64>() * (Particle::MAX_RADIUS - Particle::MIN_RADIUS);
        Particle::new(pos_x, pos_y, vel_x, vel_y, radius)
    }

    // Advances one frame inside [0, width] x [0, height]
    pub fn step(&mut self, width: f64, height: f64) {
        bounce_axis(&mut self.pos[0], &mut self.vel[0], width);
        bounce_axis(&mut self.pos[1], &mut self.vel[1], height);
    }
}

// The velocity only flips while heading outward, so a particle left outside
// by a shrinking surface keeps drifting back in instead of getting stuck.
// An axis with no extent (hidden 0x0 viewport) holds still until it grows.
fn bounce_axis(pos: &mut f64, vel: &mut f64, limit: f64) {
    if limit.is_nan() || limit <= 0.0 {
        return;
    }
    let next = *pos + *vel;
    if (next <= 0.0 && *vel < 0.0) || (next >= limit && *vel > 0.0) {
        *vel = -*vel;
    }
    *pos += *vel;
}
