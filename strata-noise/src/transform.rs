//! Coordinate transformers.
//!
//! These change the point a source is sampled at and return the source's value
//! unchanged. [`ScalePoint`] and [`TranslatePoint`] work in any dimension; rotation
//! and displacement are defined in 3D only.

use glam::{Mat3, Vec3};
use smallvec::smallvec;

use crate::graph::{Dimensions, Module, NodeId, NoiseGraph, Point, Sources, sample_every_dimension};
use crate::math::DEG_TO_RAD;

/// Multiplies each axis of the incoming point by a per-axis factor.
///
/// Factors are stored for four axes; lower-dimensional points use the leading ones.
#[derive(Debug, Clone)]
pub struct ScalePoint {
    source: NodeId,
    scale: [f32; 4],
}

impl ScalePoint {
    /// Default factor on every axis.
    pub const DEFAULT_SCALE: f32 = 1.0;

    /// Scales points by 1 on every axis.
    #[must_use]
    pub const fn new(source: NodeId) -> Self {
        Self::with_scale(source, [Self::DEFAULT_SCALE; 4])
    }

    /// Scales points by `scale` (x, y, z, w).
    #[must_use]
    pub const fn with_scale(source: NodeId, scale: [f32; 4]) -> Self {
        Self { source, scale }
    }

    /// Source node.
    #[must_use]
    pub const fn source(&self) -> NodeId {
        self.source
    }

    /// Per-axis factors.
    #[must_use]
    pub const fn scale(&self) -> [f32; 4] {
        self.scale
    }

    /// Sets the per-axis factors.
    pub const fn set_scale(&mut self, scale: [f32; 4]) {
        self.scale = scale;
    }

    fn sample<P: Point>(&self, graph: &NoiseGraph, point: P) -> f32 {
        point.zip(self.scale, |v, s| v * s).evaluate(graph, self.source)
    }
}

impl Module for ScalePoint {
    fn dimensions(&self) -> Dimensions {
        Dimensions::all()
    }

    fn sources(&self) -> Sources {
        smallvec![self.source]
    }

    sample_every_dimension!();
}

/// Adds a per-axis offset to the incoming point.
#[derive(Debug, Clone)]
pub struct TranslatePoint {
    source: NodeId,
    translation: [f32; 4],
}

impl TranslatePoint {
    /// Default offset on every axis.
    pub const DEFAULT_TRANSLATION: f32 = 1.0;

    /// Translates points by 1 on every axis.
    #[must_use]
    pub const fn new(source: NodeId) -> Self {
        Self::with_translation(source, [Self::DEFAULT_TRANSLATION; 4])
    }

    /// Translates points by `translation` (x, y, z, w).
    #[must_use]
    pub const fn with_translation(source: NodeId, translation: [f32; 4]) -> Self {
        Self {
            source,
            translation,
        }
    }

    /// Source node.
    #[must_use]
    pub const fn source(&self) -> NodeId {
        self.source
    }

    /// Per-axis offsets.
    #[must_use]
    pub const fn translation(&self) -> [f32; 4] {
        self.translation
    }

    /// Sets the per-axis offsets.
    pub const fn set_translation(&mut self, translation: [f32; 4]) {
        self.translation = translation;
    }

    fn sample<P: Point>(&self, graph: &NoiseGraph, point: P) -> f32 {
        point
            .zip(self.translation, |v, t| v + t)
            .evaluate(graph, self.source)
    }
}

impl Module for TranslatePoint {
    fn dimensions(&self) -> Dimensions {
        Dimensions::all()
    }

    fn sources(&self) -> Sources {
        smallvec![self.source]
    }

    sample_every_dimension!();
}

/// Rotates the incoming point by three angles in degrees.
#[derive(Debug, Clone)]
pub struct RotatePoint {
    source: NodeId,
    angles: Vec3,
    matrix: Mat3,
}

impl RotatePoint {
    /// No rotation.
    #[must_use]
    pub const fn new(source: NodeId) -> Self {
        Self {
            source,
            angles: Vec3::ZERO,
            matrix: Mat3::IDENTITY,
        }
    }

    /// Rotation by `x`, `y` and `z` degrees.
    #[must_use]
    pub fn with_angles(source: NodeId, x: f32, y: f32, z: f32) -> Self {
        let mut rotate = Self::new(source);
        rotate.set_angles(x, y, z);
        rotate
    }

    /// Source node.
    #[must_use]
    pub const fn source(&self) -> NodeId {
        self.source
    }

    /// Rotation angles around x, y and z, in degrees.
    #[must_use]
    pub const fn angles(&self) -> Vec3 {
        self.angles
    }

    /// Sets all three angles, in degrees, and rebuilds the rotation matrix.
    pub fn set_angles(&mut self, x: f32, y: f32, z: f32) {
        let (x_sin, x_cos) = sin_cos(x);
        let (y_sin, y_cos) = sin_cos(y);
        let (z_sin, z_cos) = sin_cos(z);

        // columns hold the weights of the incoming x, y and z
        self.matrix = Mat3::from_cols(
            Vec3::new(
                y_sin * x_sin * z_sin + y_cos * z_cos,
                y_sin * x_sin * z_cos - y_cos * z_sin,
                -y_sin * x_cos,
            ),
            Vec3::new(x_cos * z_sin, x_cos * z_cos, x_sin),
            Vec3::new(
                y_sin * z_cos - y_cos * x_sin * z_sin,
                -y_cos * x_sin * z_cos - y_sin * z_sin,
                y_cos * x_cos,
            ),
        );
        self.angles = Vec3::new(x, y, z);
    }

    /// Sets the angle around x, in degrees.
    pub fn set_x_angle(&mut self, x: f32) {
        self.set_angles(x, self.angles.y, self.angles.z);
    }

    /// Sets the angle around y, in degrees.
    pub fn set_y_angle(&mut self, y: f32) {
        self.set_angles(self.angles.x, y, self.angles.z);
    }

    /// Sets the angle around z, in degrees.
    pub fn set_z_angle(&mut self, z: f32) {
        self.set_angles(self.angles.x, self.angles.y, z);
    }
}

fn sin_cos(degrees: f32) -> (f32, f32) {
    let (sin, cos) = f64::from(degrees * DEG_TO_RAD).sin_cos();
    (sin as f32, cos as f32)
}

impl Module for RotatePoint {
    fn dimensions(&self) -> Dimensions {
        Dimensions::THREE
    }

    fn sources(&self) -> Sources {
        smallvec![self.source]
    }

    fn get_value_3d(&self, graph: &NoiseGraph, x: f32, y: f32, z: f32) -> f32 {
        let p = self.matrix * Vec3::new(x, y, z);
        graph.at(self.source).get_value_3d(graph, p.x, p.y, p.z)
    }
}

/// Offsets each axis of the point by the value of a per-axis displacement source,
/// all sampled at the incoming point.
#[derive(Debug, Clone)]
pub struct Displace {
    source: NodeId,
    x: NodeId,
    y: NodeId,
    z: NodeId,
}

impl Displace {
    /// Displaces `source` by the fields `x`, `y` and `z`.
    #[must_use]
    pub const fn new(source: NodeId, x: NodeId, y: NodeId, z: NodeId) -> Self {
        Self { source, x, y, z }
    }

    /// Source node.
    #[must_use]
    pub const fn source(&self) -> NodeId {
        self.source
    }

    /// Displacement sources for x, y and z.
    #[must_use]
    pub const fn displacements(&self) -> [NodeId; 3] {
        [self.x, self.y, self.z]
    }
}

impl Module for Displace {
    fn dimensions(&self) -> Dimensions {
        Dimensions::THREE
    }

    fn sources(&self) -> Sources {
        smallvec![self.source, self.x, self.y, self.z]
    }

    fn get_value_3d(&self, graph: &NoiseGraph, x: f32, y: f32, z: f32) -> f32 {
        let dx = x + graph.at(self.x).get_value_3d(graph, x, y, z);
        let dy = y + graph.at(self.y).get_value_3d(graph, x, y, z);
        let dz = z + graph.at(self.z).get_value_3d(graph, x, y, z);
        graph.at(self.source).get_value_3d(graph, dx, dy, dz)
    }
}

/// Sample offsets that decorrelate the three distortion fields of a [`Turbulence`].
const TURBULENCE_OFFSETS: [[f32; 3]; 3] = [
    [12414.0 / 65536.0, 65124.0 / 65536.0, 31337.0 / 65536.0],
    [26519.0 / 65536.0, 18128.0 / 65536.0, 60493.0 / 65536.0],
    [53820.0 / 65536.0, 11213.0 / 65536.0, 44845.0 / 65536.0],
];

/// Like [`Displace`], but each distortion field is sampled at its own fixed offset
/// from the point and scaled by `power`.
#[derive(Debug, Clone)]
pub struct Turbulence {
    source: NodeId,
    x: NodeId,
    y: NodeId,
    z: NodeId,
    power: f32,
}

impl Turbulence {
    /// Default distortion scale.
    pub const DEFAULT_POWER: f32 = 1.0;

    /// Distorts `source` by the fields `x`, `y` and `z` with power 1.
    #[must_use]
    pub const fn new(source: NodeId, x: NodeId, y: NodeId, z: NodeId) -> Self {
        Self {
            source,
            x,
            y,
            z,
            power: Self::DEFAULT_POWER,
        }
    }

    /// Source node.
    #[must_use]
    pub const fn source(&self) -> NodeId {
        self.source
    }

    /// Distortion sources for x, y and z.
    #[must_use]
    pub const fn distortions(&self) -> [NodeId; 3] {
        [self.x, self.y, self.z]
    }

    /// Distortion scale.
    #[must_use]
    pub const fn power(&self) -> f32 {
        self.power
    }

    /// Sets the distortion scale.
    pub const fn set_power(&mut self, power: f32) {
        self.power = power;
    }

    #[inline]
    fn distortion(&self, graph: &NoiseGraph, field: NodeId, offset: [f32; 3], p: Vec3) -> f32 {
        let [ox, oy, oz] = offset;
        graph.at(field).get_value_3d(graph, p.x + ox, p.y + oy, p.z + oz) * self.power
    }
}

impl Module for Turbulence {
    fn dimensions(&self) -> Dimensions {
        Dimensions::THREE
    }

    fn sources(&self) -> Sources {
        smallvec![self.source, self.x, self.y, self.z]
    }

    fn get_value_3d(&self, graph: &NoiseGraph, x: f32, y: f32, z: f32) -> f32 {
        let p = Vec3::new(x, y, z);
        let dx = x + self.distortion(graph, self.x, TURBULENCE_OFFSETS[0], p);
        let dy = y + self.distortion(graph, self.y, TURBULENCE_OFFSETS[1], p);
        let dz = z + self.distortion(graph, self.z, TURBULENCE_OFFSETS[2], p);
        graph.at(self.source).get_value_3d(graph, dx, dy, dz)
    }
}
