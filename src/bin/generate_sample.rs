//! Generate two deterministic NHANES-like body-measurement CSV files for
//! demos and manual testing: `sample_male_bmx.csv` and `sample_female_bmx.csv`.

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

/// Population parameters for one group: (mean, std dev) per column.
struct GroupProfile {
    file_name: &'static str,
    seed: u64,
    weight: (f64, f64),
    height: (f64, f64),
    upper_arm_length: (f64, f64),
    upper_leg_length: (f64, f64),
    arm_circumference: (f64, f64),
    hip_circumference: (f64, f64),
    waist_circumference: (f64, f64),
}

const MALE: GroupProfile = GroupProfile {
    file_name: "sample_male_bmx.csv",
    seed: 42,
    weight: (88.4, 19.5),
    height: (175.3, 7.5),
    upper_arm_length: (39.2, 2.2),
    upper_leg_length: (41.5, 3.0),
    arm_circumference: (34.3, 4.4),
    hip_circumference: (104.2, 10.1),
    waist_circumference: (101.5, 14.7),
};

const FEMALE: GroupProfile = GroupProfile {
    file_name: "sample_female_bmx.csv",
    seed: 1337,
    weight: (76.1, 20.6),
    height: (161.6, 7.0),
    upper_arm_length: (36.1, 2.1),
    upper_leg_length: (38.8, 3.1),
    arm_circumference: (32.6, 5.3),
    hip_circumference: (108.5, 13.6),
    waist_circumference: (96.7, 16.3),
};

const ROWS_PER_GROUP: usize = 500;

fn write_group(profile: &GroupProfile) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = SimpleRng::new(profile.seed);
    let mut writer = csv::Writer::from_path(profile.file_name)?;

    writer.write_record([
        "Weight",
        "Height",
        "Upper_arm_length",
        "Upper_leg_length",
        "Arm_circumference",
        "Hip_circumference",
        "Waist_circumference",
    ])?;

    for _ in 0..ROWS_PER_GROUP {
        let cells = [
            profile.weight,
            profile.height,
            profile.upper_arm_length,
            profile.upper_leg_length,
            profile.arm_circumference,
            profile.hip_circumference,
            profile.waist_circumference,
        ]
        .map(|(mean, sd)| {
            // Keep values physically plausible; a gaussian tail can dip
            // below zero for the wider distributions.
            let v = rng.gauss(mean, sd).max(mean * 0.3);
            format!("{v:.1}")
        });
        writer.write_record(&cells)?;
    }

    writer.flush()?;
    println!("Wrote {ROWS_PER_GROUP} subjects to {}", profile.file_name);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    write_group(&MALE)?;
    write_group(&FEMALE)?;
    Ok(())
}
