use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};

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

/// First-order step from 0 to `amplitude` starting at `onset`.
fn step_response(t: f64, onset: f64, amplitude: f64, tau: f64) -> f64 {
    if t < onset {
        0.0
    } else {
        amplitude * (1.0 - (-(t - onset) / tau).exp())
    }
}

const SECONDS: usize = 3600;
const START: u64 = 10 * 3600;
const EPOCH: f64 = 3_812_000_000.0;

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // (row, comment, step amplitude)
    let events: [(usize, &str, f64); 4] = [
        (420, "buffer change", 0.0),
        (900, "analyte 10 uM", 0.8),
        (1800, "analyte 50 uM", 2.1),
        (2700, "wash", -2.9),
    ];

    let output_path = "sample_recording.txt";
    let file = File::create(output_path).with_context(|| format!("creating {output_path}"))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "Biosensor Export")?;
    writeln!(out, "Instrument:\tBIO-1000")?;
    writeln!(out, "Operator:\tsynthetic")?;
    writeln!(out, "Start:\t10/18/2026 10:00:00")?;
    writeln!(out, "Channels:\t1")?;
    writeln!(out, "Rate:\t1 Hz")?;
    writeln!(out, "Date\tTime\tTime Stamp\tTime from Start\tBIO 1\tComment")?;

    let mut spikes = 0;
    let mut gaps = 0;
    for i in 0..SECONDS {
        let t = i as f64;
        let drift = 0.0002 * t;
        let level: f64 = events
            .iter()
            .map(|&(row, _, amp)| step_response(t, row as f64, amp, 40.0))
            .sum();
        let mut signal = 1.0 + drift + level + rng.gauss(0.0, 0.01);

        // Occasional spikes and dropouts for the outlier filter to deal with
        let roll = rng.next_f64();
        let cell = if roll < 0.004 {
            gaps += 1;
            String::new()
        } else {
            if roll > 0.995 {
                signal += rng.gauss(0.0, 1.5);
                spikes += 1;
            }
            format!("{signal:.5}")
        };

        let comment = events
            .iter()
            .find(|(row, _, _)| *row == i)
            .map_or("", |(_, c, _)| c);

        let secs = START + i as u64;
        writeln!(
            out,
            "10/18/2026 \t{:02}:{:02}:{:02} \t{:.3}\t{i}\t{cell}\t{comment}",
            secs / 3600,
            secs / 60 % 60,
            secs % 60,
            EPOCH + t,
        )?;
    }
    out.flush()?;

    println!(
        "Wrote {SECONDS} rows ({} events, {spikes} spikes, {gaps} gaps) to {output_path}",
        events.len()
    );
    Ok(())
}
