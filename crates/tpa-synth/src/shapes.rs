use rand::Rng;
use tpa_core::PathCategory;

/// Which of the two operating matrices a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixRole {
    Transfer,
    Force,
}

/// Gaussian bump over the band index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bump {
    pub amplitude: f64,
    pub center: f64,
    pub width: f64,
}

impl Bump {
    pub const fn new(amplitude: f64, center: f64, width: f64) -> Self {
        Self {
            amplitude,
            center,
            width,
        }
    }

    pub fn at(&self, index: usize) -> f64 {
        let z = (index as f64 - self.center) / self.width;
        self.amplitude * (-0.5 * z * z).exp()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowShape {
    Gaussian(Bump),
    /// Engine forcing: fundamental bump plus a narrower bump at the second order.
    EngineOrders { base: Bump, harmonic: Bump },
    /// `amplitude * (sin(i / 2) + 1) / 2`
    HalfSine { amplitude: f64 },
    /// Independent uniform draws in `[0, ceiling)`.
    Uniform { ceiling: f64 },
}

const ENGINE_TRANSFER: Bump = Bump::new(0.8, 1.0, 1.5);
const EXHAUST_TRANSFER: Bump = Bump::new(0.6, 3.0, 2.0);
const ENGINE_FORCE_PEAK: f64 = 2.0;
const ENGINE_FORCE: Bump = Bump::new(0.9, ENGINE_FORCE_PEAK, 1.0);
const ENGINE_FORCE_HARMONIC: Bump = Bump::new(0.3, 2.0 * ENGINE_FORCE_PEAK, 0.5);
const TRANSMISSION_FORCE: Bump = Bump::new(0.7, 4.0, 2.0);
const AIR_INTAKE_FORCE: Bump = Bump::new(0.5, 5.0, 1.0);

pub fn shape_for(category: PathCategory, role: MatrixRole) -> RowShape {
    match (role, category) {
        (MatrixRole::Transfer, PathCategory::Engine) => RowShape::Gaussian(ENGINE_TRANSFER),
        (MatrixRole::Transfer, PathCategory::Exhaust) => RowShape::Gaussian(EXHAUST_TRANSFER),
        (MatrixRole::Transfer, PathCategory::Suspension) => RowShape::HalfSine { amplitude: 0.5 },
        (MatrixRole::Transfer, _) => RowShape::Uniform { ceiling: 0.4 },
        (MatrixRole::Force, PathCategory::Engine) => RowShape::EngineOrders {
            base: ENGINE_FORCE,
            harmonic: ENGINE_FORCE_HARMONIC,
        },
        (MatrixRole::Force, PathCategory::Transmission) => RowShape::Gaussian(TRANSMISSION_FORCE),
        (MatrixRole::Force, PathCategory::AirIntake) => RowShape::Gaussian(AIR_INTAKE_FORCE),
        (MatrixRole::Force, _) => RowShape::Uniform { ceiling: 0.3 },
    }
}

impl RowShape {
    /// Writes the noiseless shape into `row`. Only `Uniform` consumes randomness.
    pub fn fill<R: Rng + ?Sized>(&self, row: &mut [f64], rng: &mut R) {
        for (i, slot) in row.iter_mut().enumerate() {
            *slot = match *self {
                RowShape::Gaussian(bump) => bump.at(i),
                RowShape::EngineOrders { base, harmonic } => base.at(i) + harmonic.at(i),
                RowShape::HalfSine { amplitude } => amplitude * ((i as f64 / 2.0).sin() + 1.0) / 2.0,
                RowShape::Uniform { ceiling } => ceiling * rng.gen::<f64>(),
            };
        }
    }
}
