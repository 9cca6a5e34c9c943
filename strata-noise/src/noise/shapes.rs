//! Constant and geometric primitives.

use crate::graph::{Dimensions, Module, NoiseGraph};
use crate::math::fast_floor;

/// Outputs the same value everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant {
    value: f32,
}

impl Constant {
    /// Default output value.
    pub const DEFAULT_VALUE: f32 = 0.5;

    /// Creates a constant node.
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Self { value }
    }

    /// Output value.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Sets the output value.
    pub const fn set_value(&mut self, value: f32) {
        self.value = value;
    }
}

impl Default for Constant {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VALUE)
    }
}

impl Module for Constant {
    fn dimensions(&self) -> Dimensions {
        Dimensions::all()
    }

    fn get_value_1d(&self, _graph: &NoiseGraph, _x: f32) -> f32 {
        self.value
    }

    fn get_value_2d(&self, _graph: &NoiseGraph, _x: f32, _y: f32) -> f32 {
        self.value
    }

    fn get_value_3d(&self, _graph: &NoiseGraph, _x: f32, _y: f32, _z: f32) -> f32 {
        self.value
    }

    fn get_value_4d(&self, _graph: &NoiseGraph, _x: f32, _y: f32, _z: f32, _w: f32) -> f32 {
        self.value
    }
}

/// Alternates `1` and `-1` between neighbouring unit cubes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checkerboard;

impl Module for Checkerboard {
    fn dimensions(&self) -> Dimensions {
        Dimensions::THREE
    }

    fn get_value_3d(&self, _graph: &NoiseGraph, x: f32, y: f32, z: f32) -> f32 {
        let parity = (fast_floor(x) & 1) ^ (fast_floor(y) & 1) ^ (fast_floor(z) & 1);
        if parity == 0 { 1.0 } else { -1.0 }
    }
}

/// `1 - 4·min(frac, 1 - frac)` of a distance: `1` on every shell, `-1` halfway between.
#[inline]
fn shell(distance: f32) -> f32 {
    let inner = distance - distance.floor();
    let outer = 1.0 - inner;
    1.0 - inner.min(outer) * 4.0
}

/// Concentric spheres around the origin, one per unit of scaled distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spheres {
    frequency: f32,
}

impl Spheres {
    /// Default shells per unit.
    pub const DEFAULT_FREQUENCY: f32 = 1.0;

    /// Creates the pattern with `frequency` shells per unit.
    #[must_use]
    pub const fn new(frequency: f32) -> Self {
        Self { frequency }
    }

    /// Shells per unit.
    #[must_use]
    pub const fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Sets the shells per unit.
    pub const fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
    }
}

impl Default for Spheres {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FREQUENCY)
    }
}

impl Module for Spheres {
    fn dimensions(&self) -> Dimensions {
        Dimensions::THREE
    }

    fn get_value_3d(&self, _graph: &NoiseGraph, x: f32, y: f32, z: f32) -> f32 {
        let (x, y, z) = (x * self.frequency, y * self.frequency, z * self.frequency);
        shell(f64::from(x * x + y * y + z * z).sqrt() as f32)
    }
}

/// Concentric cylinders around the y axis, one per unit of scaled distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinders {
    frequency: f32,
}

impl Cylinders {
    /// Default shells per unit.
    pub const DEFAULT_FREQUENCY: f32 = 1.0;

    /// Creates the pattern with `frequency` shells per unit.
    #[must_use]
    pub const fn new(frequency: f32) -> Self {
        Self { frequency }
    }

    /// Shells per unit.
    #[must_use]
    pub const fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Sets the shells per unit.
    pub const fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
    }
}

impl Default for Cylinders {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FREQUENCY)
    }
}

impl Module for Cylinders {
    fn dimensions(&self) -> Dimensions {
        Dimensions::THREE
    }

    fn get_value_3d(&self, _graph: &NoiseGraph, x: f32, _y: f32, z: f32) -> f32 {
        let (x, z) = (x * self.frequency, z * self.frequency);
        shell(f64::from(x * x + z * z).sqrt() as f32)
    }
}
