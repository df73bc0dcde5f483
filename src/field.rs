// The particle collection and the pairwise link pass.
//
// A field owns a fixed number of particles inside `[0, width] x [0, height]`.
// Positions are bounds-relative but are never rescaled when the bounds change;
// see `ParticleField::resize`.

use crate::particle::Particle;
use rand::Rng;
use vecmath::Vector2;

// Above this many particles the O(n²) link pass is likely to blow the frame budget.
pub const RECOMMENDED_MAX_PARTICLES: usize = 500;

// A connection between two particles closer than the link distance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub distance: f64,
    // `1 - distance / max_link_distance`, in `(0, 1]`.
    pub alpha: f64,
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    width: f64,
    height: f64,
    max_link_distance: f64,
    particles: Vec<Particle>,
}

impl ParticleField {
    // Creates `count` randomly placed particles inside `width x height`.
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        width: f64,
        height: f64,
        count: usize,
        max_link_distance: f64,
    ) -> Self {
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(Particle::random(rng, width, height));
        }
        Self::from_particles(width, height, max_link_distance, particles)
    }

    // Builds a field from explicit particles, mostly useful for deterministic setups.
    pub fn from_particles(
        width: f64,
        height: f64,
        max_link_distance: f64,
        particles: Vec<Particle>,
    ) -> Self {
        ParticleField {
            width,
            height,
            max_link_distance: max_link_distance.max(0.0),
            particles,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn max_link_distance(&self) -> f64 {
        self.max_link_distance
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn update(&mut self) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.step(width, height);
        }
    }

    // Changes the bounds without touching particle positions. Particles left
    // outside a smaller surface drift back in on their own.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    // Re-seeds every position inside the current bounds, keeping the count.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            *particle = Particle::random(rng, width, height);
        }
    }

    // Every unordered pair `i < j` closer than the link distance.
    pub fn links(&self) -> Links<'_> {
        Links {
            particles: &self.particles,
            max_distance: self.max_link_distance,
            i: 0,
            j: 1,
        }
    }
}

pub fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    let delta: Vector2<f64> = vecmath::vec2_sub(a, b);
    vecmath::vec2_len(delta)
}

// Link alpha fades linearly from 1 at distance 0 to 0 at the threshold.
pub fn link_alpha(distance: f64, max_distance: f64) -> Option<f64> {
    if distance < max_distance {
        Some(1.0 - distance / max_distance)
    } else {
        None
    }
}

pub struct Links<'a> {
    particles: &'a [Particle],
    max_distance: f64,
    i: usize,
    j: usize,
}

impl<'a> Iterator for Links<'a> {
    type Item = Link;

    fn next(&mut self) -> Option<Link> {
        let n = self.particles.len();
        while self.i < n {
            while self.j < n {
                let (i, j) = (self.i, self.j);
                self.j += 1;
                let d = distance(self.particles[i].pos, self.particles[j].pos);
                if let Some(alpha) = link_alpha(d, self.max_distance) {
                    return Some(Link {
                        from: i,
                        to: j,
                        distance: d,
                        alpha,
                    });
                }
            }
            self.i += 1;
            self.j = self.i + 1;
        }
        None
    }
}
