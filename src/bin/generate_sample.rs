//! Write a small synthetic SIR data set for trying the viewer.
//!
//! Usage: `generate_sample [DIR]` (default `sample_data`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use sir_viewer::{write_model, write_profile, ModelColumn, ModelHeader, ModelRecord, ProfileRecord};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Physical parameters of one synthetic pixel.
struct Pixel {
    name: &'static str,
    /// Field strength in G.
    field: f64,
    /// Inclination in degrees.
    inclination: f64,
    /// LOS velocity in cm/s.
    velocity: f64,
    extended: bool,
    with_profile: bool,
    with_errors: bool,
}

const PIXELS: [Pixel; 4] = [
    Pixel {
        name: "quiet",
        field: 50.0,
        inclination: 80.0,
        velocity: -2.0e4,
        extended: true,
        with_profile: true,
        with_errors: true,
    },
    Pixel {
        name: "plage",
        field: 1200.0,
        inclination: 20.0,
        velocity: 5.0e4,
        extended: true,
        with_profile: true,
        with_errors: false,
    },
    Pixel {
        name: "penumbra",
        field: 1800.0,
        inclination: 65.0,
        velocity: 2.5e5,
        extended: false,
        with_profile: true,
        with_errors: true,
    },
    Pixel {
        name: "umbra",
        field: 2800.0,
        inclination: 5.0,
        velocity: 1.0e4,
        extended: false,
        with_profile: false,
        with_errors: false,
    },
];

/// Gaussian absorption line with a Zeeman-like V lobe pair.
fn synthesize_profile(p: &Pixel, rng: &mut SimpleRng) -> ProfileRecord {
    let mut profile = ProfileRecord::default();
    let width = 80.0;
    let shift = p.velocity / 3.0e5 * 20.0;
    let sin2 = p.inclination.to_radians().sin().powi(2);
    let cos = p.inclination.to_radians().cos();
    let b = p.field / 3000.0;

    for k in 0..121 {
        let wl = -300.0 + 5.0 * k as f64;
        let u = (wl - shift) / width;
        let g = (-u * u).exp();
        let dg = -2.0 * u * g;
        let i = 1.0 - 0.6 * g + rng.gauss(0.0, 1e-3);
        let q = 0.05 * b * b * sin2 * (g - 0.5 * dg * dg) + rng.gauss(0.0, 1e-4);
        let u_ = 0.02 * b * b * sin2 * g + rng.gauss(0.0, 1e-4);
        let v = 0.2 * b * cos * dg + rng.gauss(0.0, 1e-4);
        profile.push_row([1.0, wl, i, q, u_, v]);
    }
    profile
}

/// A rough solar-like stratification from log τ = -4 to 1.2.
fn synthesize_model(p: &Pixel, scale: f64) -> ModelRecord {
    let header = ModelHeader {
        vmac: 0.5 * scale,
        filling_factor: 1.0,
        stray_light: 0.0,
    };
    let mut model = ModelRecord::new(header, p.extended);

    for k in 0..53 {
        let tau = -4.0 + 0.1 * k as f64;
        let temp = 4400.0 + 1600.0 * (tau + 4.0) / 5.2 + 2000.0 * tau.max(0.0);
        let pe = 10f64.powf(-1.5 + 0.9 * (tau + 4.0));
        let z = 130.0 * (-tau);
        let rho = 10f64.powf(-9.0 + 0.8 * (tau + 4.0));
        let pg = 10f64.powf(2.0 + 0.8 * (tau + 4.0));
        let row = [
            tau,
            temp * scale,
            pe * scale,
            1.0e5 * scale,
            p.field * scale,
            p.velocity * scale,
            p.inclination * scale,
            30.0 * scale,
            z * scale,
            rho * scale,
            pg * scale,
        ];
        let n = if p.extended {
            ModelColumn::COUNT
        } else {
            ModelColumn::BASIC_COUNT
        };
        model.push_row(&row[..n]);
    }
    model
}

fn main() -> Result<()> {
    env_logger::init();

    let dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data"));
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SimpleRng::new(42);

    for p in &PIXELS {
        if p.with_profile {
            let profile = synthesize_profile(p, &mut rng);
            write_profile(&dir.join(format!("{}.per", p.name)), &profile)?;
        }
        let model = synthesize_model(p, 1.0);
        write_model(&dir.join(format!("{}.mod", p.name)), &model, p.extended)?;
        if p.with_errors {
            // Errors are 5% of the model values; the τ grid is shared.
            let err = synthesize_model(p, 0.05);
            write_model(&dir.join(format!("{}.err", p.name)), &err, p.extended)?;
        }
    }

    println!(
        "Wrote {} pixels to {} (select the .per and .mod files in the viewer)",
        PIXELS.len(),
        dir.display()
    );
    Ok(())
}
