//! Face-to-texture-atlas mapping.
//!
//! All engravable faces of an object share one square texture. Each face
//! owns a single cell of a conceptual 4x4 grid so that painting one face can
//! never bleed into another. Two fixed tables exist: the six-face layout
//! used by box-mapped shapes and the two-face layout used by the panel,
//! which only exposes its front and back.
//!
//! The tables are pure data; [`resolve`] is the only operation.

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use crate::store::ObjectShape;

/// Logical names of engravable faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngravingFace {
    Front,
    Back,
    Top,
    Bottom,
    Left,
    Right,
}

impl EngravingFace {
    pub const ALL: [EngravingFace; 6] = [
        EngravingFace::Front,
        EngravingFace::Back,
        EngravingFace::Top,
        EngravingFace::Bottom,
        EngravingFace::Left,
        EngravingFace::Right,
    ];
}

/// Fraction of the texture edge covered by one atlas cell.
pub const TILE_SIZE: f32 = 0.25;

/// Placement of one face on the shared texture.
#[derive(Clone, Copy, Debug)]
pub struct FaceDescriptor {
    pub face: EngravingFace,
    /// Lower-left corner of the face's cell in UV space, each axis in [0, 1).
    pub tile_origin: (f32, f32),
    pub rotation_degrees: f32,
    normal: [f32; 3],
}

impl FaceDescriptor {
    const fn new(face: EngravingFace, u: f32, v: f32, normal: [f32; 3]) -> Self {
        Self {
            face,
            tile_origin: (u, v),
            rotation_degrees: 0.0,
            normal,
        }
    }

    /// Outward unit normal of the face in object-local space.
    pub fn normal(&self) -> Vector3<f32> {
        self.normal.into()
    }
}

/// Which atlas table a shape maps its faces through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    SixFace,
    TwoFace,
}

impl Topology {
    pub fn of(shape: ObjectShape) -> Self {
        match shape {
            ObjectShape::Panel => Topology::TwoFace,
            _ => Topology::SixFace,
        }
    }

    /// All face descriptors defined under this topology.
    pub fn faces(&self) -> &'static [FaceDescriptor] {
        match self {
            Topology::SixFace => &SIX_FACE,
            Topology::TwoFace => &TWO_FACE,
        }
    }
}

// Cell origins follow the UV unwrap of a standard box mapping.
static SIX_FACE: [FaceDescriptor; 6] = [
    FaceDescriptor::new(EngravingFace::Right, 0.0, 0.25, [1.0, 0.0, 0.0]),
    FaceDescriptor::new(EngravingFace::Left, 0.5, 0.25, [-1.0, 0.0, 0.0]),
    FaceDescriptor::new(EngravingFace::Top, 0.25, 0.5, [0.0, 1.0, 0.0]),
    FaceDescriptor::new(EngravingFace::Bottom, 0.25, 0.0, [0.0, -1.0, 0.0]),
    FaceDescriptor::new(EngravingFace::Front, 0.25, 0.25, [0.0, 0.0, 1.0]),
    FaceDescriptor::new(EngravingFace::Back, 0.75, 0.25, [0.0, 0.0, -1.0]),
];

static TWO_FACE: [FaceDescriptor; 2] = [
    FaceDescriptor::new(EngravingFace::Front, 0.25, 0.25, [0.0, 0.0, 1.0]),
    FaceDescriptor::new(EngravingFace::Back, 0.75, 0.25, [0.0, 0.0, -1.0]),
];

/// Look up the placement of `face` under `topology`.
///
/// `None` means the face is not engravable on the current shape. That is not
/// an error; callers skip the face silently.
pub fn resolve(topology: Topology, face: EngravingFace) -> Option<&'static FaceDescriptor> {
    topology.faces().iter().find(|descriptor| descriptor.face == face)
}
