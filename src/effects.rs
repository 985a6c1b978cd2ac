//! Laser beam and spark visuals.
//!
//! Both effects are driven by the animator's tick outcome: they read the
//! marker position and the engraving flag and own no session state of their
//! own. The beam is a unit cylinder instance stretched between the emitter
//! and the marker; the sparks are a fixed-size particle pool with slot
//! reuse, so no allocation happens during a session.

use cgmath::{InnerSpace, Quaternion, Vector3, Zero};
use instant::Duration;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{data_structures::instance::Instance, engrave::TickOutcome};

/// Number of spark particles in the pool.
pub const SPARK_COUNT: usize = 100;

const SPARK_FLOOR_Y: f32 = -2.0;
const GRAVITY: f32 = 9.8;
const GRAVITY_DAMPING: f32 = 0.1;

/// Where the laser head sits, object-local.
pub fn emitter_position() -> Vector3<f32> {
    Vector3::new(0.0, 5.0, 5.0)
}

/// Thin cylinder stretched between the emitter and the marker.
///
/// The instance assumes a host mesh of a unit cylinder aligned with +y.
/// When the beam is hidden its length collapses to zero instead of the
/// instance being dropped, so the host never churns allocations.
#[derive(Clone, Debug)]
pub struct LaserBeam {
    pub instance: Instance,
    emitter: Vector3<f32>,
}

impl LaserBeam {
    pub fn new() -> Self {
        let mut instance = Instance::new();
        instance.scale.y = 0.0;
        Self {
            instance,
            emitter: emitter_position(),
        }
    }

    /// Re-aim the beam at `target`, or collapse it when not visible.
    pub fn update(&mut self, target: Vector3<f32>, visible: bool) {
        if !visible {
            self.instance.scale.y = 0.0;
            return;
        }
        let offset = target - self.emitter;
        let distance = offset.magnitude();
        if distance <= f32::EPSILON {
            self.instance.scale.y = 0.0;
            return;
        }
        self.instance.position = self.emitter + offset / 2.0;
        self.instance.scale.y = distance;
        self.instance.rotation = Quaternion::from_arc(Vector3::unit_y(), offset / distance, None);
    }
}

impl Default for LaserBeam {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug)]
struct Spark {
    position: Vector3<f32>,
    velocity: Vector3<f32>,
}

/// Fixed pool of spark particles fed by the marker position.
///
/// While engraving, every particle integrates simple gravity; a particle
/// that falls below the floor respawns at the marker with a randomized
/// outward velocity. When inactive the pool freezes in place.
pub struct Sparks {
    pool: Vec<Spark>,
    rng: SmallRng,
}

impl Sparks {
    pub fn new() -> Self {
        Self::with_seed(0x0e7c_417e)
    }

    /// Deterministic pool for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            pool: vec![
                Spark {
                    position: Vector3::zero(),
                    velocity: Vector3::zero(),
                };
                SPARK_COUNT
            ],
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Advance the pool by `dt` seconds toward `origin`.
    pub fn tick(&mut self, dt: f32, origin: Vector3<f32>, active: bool) {
        if !active {
            return;
        }
        for spark in &mut self.pool {
            spark.velocity.y -= GRAVITY * dt * GRAVITY_DAMPING;
            spark.position += spark.velocity * dt;
            // Respawn on a coin flip so slots restart staggered rather than
            // in a single burst.
            if spark.position.y < SPARK_FLOOR_Y && self.rng.random_bool(0.5) {
                spark.position = origin;
                spark.velocity = Vector3::new(
                    self.rng.random_range(-1.0..1.0),
                    self.rng.random_range(0.0..2.5),
                    self.rng.random_range(-1.0..1.0),
                );
            }
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Vector3<f32>> + '_ {
        self.pool.iter().map(|spark| spark.position)
    }

    /// Pool positions as tightly packed vertex data for a point cloud.
    pub fn raw_positions(&self) -> Vec<[f32; 3]> {
        self.pool.iter().map(|spark| spark.position.into()).collect()
    }
}

impl Default for Sparks {
    fn default() -> Self {
        Self::new()
    }
}

/// Beam and sparks bundled behind a single per-frame update.
pub struct LaserRig {
    pub beam: LaserBeam,
    pub sparks: Sparks,
}

impl LaserRig {
    pub fn new() -> Self {
        Self {
            beam: LaserBeam::new(),
            sparks: Sparks::new(),
        }
    }

    /// Feed the animator's tick outcome through both effects.
    pub fn tick(&mut self, dt: Duration, outcome: &TickOutcome) {
        let visible = outcome.engraving && outcome.marker.visible;
        self.beam.update(outcome.marker.position, visible);
        self.sparks
            .tick(dt.as_secs_f32(), outcome.marker.position, visible);
    }
}

impl Default for LaserRig {
    fn default() -> Self {
        Self::new()
    }
}
