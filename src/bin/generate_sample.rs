//! Write a synthetic death-rate CSV for trying out the viewer.
//!
//! Usage: `generate_sample [OUTPUT]` (default `death-rates-sample.csv`).

use anyhow::{Context, Result};

const FIRST_YEAR: i32 = 1990;
const LAST_YEAR: i32 = 2017;

/// (name, code, ozone, household pollution, particulate) rates in 1990.
const COUNTRIES: &[(&str, &str, f64, f64, f64)] = &[
    ("Albania", "ALB", 4.2, 60.1, 38.5),
    ("Bonaire, Sint Eustatius and Saba", "BES", 1.1, 2.3, 14.8),
    ("Chad", "TCD", 5.9, 210.4, 46.2),
    ("India", "IND", 9.8, 152.3, 72.6),
    ("Micronesia (country)", "FSM", 1.4, 95.7, 18.9),
    ("Saint Helena, Ascension and Tristan da Cunha", "SHN", 0.6, 8.2, 9.1),
    ("United States", "USA", 6.3, 0.6, 24.4),
];

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
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `-spread..spread`.
    fn jitter(&mut self, spread: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        (unit * 2.0 - 1.0) * spread
    }
}

/// Rate after `years` of steady decline, with up to 3% noise.
fn rate(start: f64, decline: f64, years: i32, rng: &mut SimpleRng) -> f64 {
    let trend = start * (1.0 - decline).powi(years);
    (trend * (1.0 + rng.jitter(0.03))).max(0.0)
}

fn main() -> Result<()> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "death-rates-sample.csv".to_string());

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("creating {output}"))?;

    writer.write_record([
        "Entity",
        "Code",
        "Year",
        "Outdoor ozone pollution (deaths per 100,000)",
        "Indoor air pollution (deaths per 100,000)",
        "Outdoor particulate matter (deaths per 100,000)",
    ])?;

    let mut rows = 0usize;
    for &(name, code, ozone, pollution, particulate) in COUNTRIES {
        for year in FIRST_YEAR..=LAST_YEAR {
            let elapsed = year - FIRST_YEAR;
            writer.write_record([
                name.to_string(),
                code.to_string(),
                year.to_string(),
                format!("{:.6}", rate(ozone, 0.01, elapsed, &mut rng)),
                format!("{:.6}", rate(pollution, 0.035, elapsed, &mut rng)),
                format!("{:.6}", rate(particulate, 0.015, elapsed, &mut rng)),
            ])?;
            rows += 1;
        }
    }
    writer.flush().context("flushing CSV")?;

    println!(
        "Wrote {rows} rows ({} countries, {FIRST_YEAR}-{LAST_YEAR}) to {output}",
        COUNTRIES.len()
    );
    Ok(())
}
