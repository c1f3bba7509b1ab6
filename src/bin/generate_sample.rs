//! Writes the bundled yearly datasets to `assets/data/{2025,2026}.json`.
//!
//! Deterministic: the same seed always produces the same files, so the
//! bundled data stays reproducible.

use serde::Serialize;

/// One generated settlement row. Field order is the bundled files' key order.
#[derive(Debug, Serialize)]
struct SampleRecord {
    amount: f64,
    isp: &'static str,
    local: &'static str,
    payer: &'static str,
    purpose: &'static str,
    remote: &'static str,
    traffic_gb: f64,
}

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

    fn pick(&mut self, items: &[&'static str]) -> &'static str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn generate_year(rng: &mut SimpleRng, base_amount: f64) -> Vec<SampleRecord> {
    let isps = [
        "Northlink", "Westgrid", "Transpac", "Corelane", "Baltnet", "Sunfiber",
    ];
    let cities = [
        "Amsterdam", "Frankfurt", "Stockholm", "Warsaw", "Vienna", "Madrid",
    ];
    let purposes = ["transit", "peering", "backup", "cdn"];

    let mut records = Vec::new();
    for isp in isps {
        for purpose in purposes {
            let rows = 1 + (rng.next_u64() % 2) as usize;
            for _ in 0..rows {
                let local = rng.pick(&cities);
                let remote = loop {
                    let c = rng.pick(&cities);
                    if c != local {
                        break c;
                    }
                };
                // A few rows ship without a purpose to exercise the
                // unclassified bucket.
                let purpose_value = if rng.next_f64() < 0.08 { "" } else { purpose };
                let payer = if rng.next_f64() < 0.5 { "local" } else { "remote" };
                let amount = round2(base_amount * (0.4 + rng.next_f64() * 1.6));
                let traffic_gb = round2(50.0 + rng.next_f64() * 950.0);

                records.push(SampleRecord {
                    amount,
                    isp,
                    local,
                    payer,
                    purpose: purpose_value,
                    remote,
                    traffic_gb,
                });
            }
        }
    }
    records
}

fn main() {
    let mut rng = SimpleRng::new(42);

    for (year, base_amount) in [(2025, 1000.0), (2026, 1150.0)] {
        let records = generate_year(&mut rng, base_amount);
        let path = format!("assets/data/{year}.json");
        let text =
            serde_json::to_string_pretty(&records).expect("Failed to serialize records");
        std::fs::write(&path, text).expect("Failed to write dataset file");
        println!("Wrote {} records to {path}", records.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sample_records_serialize_with_the_bundled_key_order() {
        let rec = SampleRecord {
            amount: 1077.03,
            isp: "Northlink",
            local: "Frankfurt",
            payer: "remote",
            purpose: "transit",
            remote: "Amsterdam",
            traffic_gb: 714.32,
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(
            json,
            r#"{"amount":1077.03,"isp":"Northlink","local":"Frankfurt","payer":"remote","purpose":"transit","remote":"Amsterdam","traffic_gb":714.32}"#
        );
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate_year(&mut SimpleRng::new(42), 1000.0);
        let b = generate_year(&mut SimpleRng::new(42), 1000.0);
        assert_eq!(a.len(), b.len());
        assert_eq!(
            serde_json::to_string(&a[0]).unwrap(),
            serde_json::to_string(&b[0]).unwrap()
        );
    }
}
