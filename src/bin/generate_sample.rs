use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Gaussian peak: (center eV, width eV, height)
type Peak = (f64, f64, f64);

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Peaks on a sloped background, plus noise.
fn generate_spectrum(
    energies: &[f64],
    peaks: &[Peak],
    slope: f64,
    offset: f64,
    noise_level: f64,
    noise: &mut Noise,
) -> Vec<f64> {
    energies
        .iter()
        .map(|&e| {
            let signal: f64 = peaks
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(e, mu, sigma, amp))
                .sum();
            signal + slope * (e - energies[0]) + offset + noise.gauss(noise_level)
        })
        .collect()
}

/// Deterministic noise source (splitmix64), so regenerated files match.
struct Noise {
    state: u64,
}

impl Noise {
    fn new(seed: u64) -> Self {
        Noise { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in (0, 1].
    fn unit(&mut self) -> f64 {
        ((self.next_u64() >> 11) + 1) as f64 / (1u64 << 53) as f64
    }

    /// Normal sample via Box-Muller.
    fn gauss(&mut self, sigma: f64) -> f64 {
        let r = (-2.0 * self.unit().ln()).sqrt();
        let theta = 2.0 * std::f64::consts::PI * self.unit();
        sigma * r * theta.cos()
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut noise = Noise::new(42);

    // Binding energies: 280 → 300 eV, step 0.05
    let energies: Vec<f64> = (0..401).map(|i| 280.0 + i as f64 * 0.05).collect();

    // C 1s-like envelopes with different chemical shifts.
    let samples: [(&str, Vec<Peak>, f64); 3] = [
        ("graphite", vec![(284.5, 0.45, 120.0), (290.8, 0.9, 8.0)], 0.8),
        ("oxidized", vec![(284.8, 0.5, 80.0), (286.4, 0.6, 35.0), (288.9, 0.7, 20.0)], 1.5),
        ("carbonate", vec![(285.0, 0.55, 40.0), (289.6, 0.6, 70.0)], -0.6),
    ];

    let mut written = 0;
    for (name, peaks, slope) in &samples {
        for run in 1..=2 {
            let y = generate_spectrum(&energies, peaks, *slope, 10.0, 1.2 * run as f64, &mut noise);

            let mut text = String::new();
            for (e, i) in energies.iter().zip(&y) {
                writeln!(text, "{e:.3}\t{i:.4}")?;
            }

            let path = out_dir.join(format!("{name}_run{run}.txt"));
            std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
            log::info!("Wrote {}", path.display());
            written += 1;
        }
    }

    println!(
        "Wrote {written} spectra ({} samples each) to {}",
        energies.len(),
        out_dir.display()
    );
    Ok(())
}
