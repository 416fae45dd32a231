use rand::{rngs::StdRng, Rng, SeedableRng};
use crate::ecg::source::{Channel, WaveformBuffer};

/// Gaussian bumps making up one beat: (position within the beat, width in s, amplitude in mV).
const PQRST: [(f64, f64, f64); 5] = [
    (0.20, 0.025, 0.15),  // P
    (0.36, 0.010, -0.10), // Q
    (0.40, 0.012, 1.20),  // R
    (0.44, 0.010, -0.25), // S
    (0.65, 0.040, 0.30),  // T
];

/// Device order, deliberately not the clinical one.
const LEADS: [(&str, f64); 12] = [
    ("V1", -0.45),
    ("V2", 0.30),
    ("V3", 0.60),
    ("V4", 1.10),
    ("V5", 1.00),
    ("V6", 0.85),
    ("I", 0.60),
    ("II", 1.00),
    ("III", 0.45),
    ("aVR", -0.80),
    ("aVL", 0.30),
    ("aVF", 0.70),
];

pub struct SyntheticEcg {
    sample_rate_hz: f64,
    heart_rate_bpm: f64,
    noise_mv: f64,
    seed: u64,
}

impl SyntheticEcg {
    pub fn new(sample_rate_hz: f64, heart_rate_bpm: f64) -> Self {
        Self {
            sample_rate_hz,
            heart_rate_bpm: heart_rate_bpm.max(1.0),
            noise_mv: 0.0,
            seed: 0,
        }
    }

    pub fn with_noise(mut self, noise_mv: f64, seed: u64) -> Self {
        self.noise_mv = noise_mv.abs();
        self.seed = seed;
        self
    }

    fn beat(&self, t: f64) -> f64 {
        let period = 60.0 / self.heart_rate_bpm;
        let phase = t.rem_euclid(period);
        PQRST
            .iter()
            .map(|&(at, width, amp)| {
                let d = phase - at * period;
                amp * (-(d * d) / (2.0 * width * width)).exp()
            })
            .sum()
    }

    pub fn twelve_lead(&self, seconds: f64) -> WaveformBuffer {
        let count = (seconds.max(0.0) * self.sample_rate_hz).round() as usize;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let dt = 1.0 / self.sample_rate_hz;
        let base: Vec<f64> = (0..count).map(|i| self.beat(i as f64 * dt)).collect();

        let mut channels = Vec::with_capacity(LEADS.len());
        let mut buffer = Vec::with_capacity(LEADS.len());
        for (label, gain) in LEADS {
            channels.push(Channel {
                label: label.to_owned(),
                sample_rate: self.sample_rate_hz,
            });
            let samples = base
                .iter()
                .map(|v| {
                    let noise = if self.noise_mv > 0.0 {
                        rng.gen_range(-self.noise_mv..self.noise_mv)
                    } else {
                        0.0
                    };
                    v * gain + noise
                })
                .collect();
            buffer.push(samples);
        }
        WaveformBuffer { channels, buffer }
    }
}
