//! Make-rate aggregation for sweeps

use serde::Serialize;

use super::config::PowerSetting;
use super::sweep::ShotSample;

/// Shots whose launch distance fell in `[start, end)`
#[derive(Debug, Clone, Default, Serialize)]
pub struct DistanceBand {
    pub start: f32,
    pub end: f32,
    pub attempts: u32,
    pub makes: u32,
    pub three_attempts: u32,
    pub three_makes: u32,
    pub points: u32,
}

impl DistanceBand {
    /// Make rate (0.0 - 1.0); 0 when the band is empty
    pub fn make_rate(&self) -> f32 {
        if self.attempts == 0 {
            0.0
        } else {
            self.makes as f32 / self.attempts as f32
        }
    }

    /// Average points per attempt
    pub fn points_per_shot(&self) -> f32 {
        if self.attempts == 0 {
            0.0
        } else {
            self.points as f32 / self.attempts as f32
        }
    }

    fn add(&mut self, sample: &ShotSample) {
        self.attempts += 1;
        self.points += sample.points;
        if sample.made {
            self.makes += 1;
        }
        if sample.three_point {
            self.three_attempts += 1;
            if sample.made {
                self.three_makes += 1;
            }
        }
    }
}

/// Results for one power setting
#[derive(Debug, Clone, Serialize)]
pub struct PowerSummary {
    pub setting: PowerSetting,
    pub total: DistanceBand,
    /// Sweetspot share of the shots
    pub in_sweetspot: u32,
    pub bands: Vec<DistanceBand>,
}

/// Whole-sweep summary, also written as JSON by `simulate --output`
#[derive(Debug, Clone, Serialize)]
pub struct SweepSummary {
    pub seed: u64,
    pub spots: usize,
    pub band_width: f32,
    pub powers: Vec<PowerSummary>,
}

/// Bucket samples of one setting by launch distance.
/// Bands are `band_width` wide starting at 0; empty trailing bands are dropped.
pub fn summarize_setting(
    setting: PowerSetting,
    samples: &[ShotSample],
    band_width: f32,
) -> PowerSummary {
    let band_width = if band_width > 0.0 { band_width } else { 1.0 };
    let mut bands: Vec<DistanceBand> = Vec::new();
    let mut total = DistanceBand::default();
    let mut in_sweetspot = 0;

    for sample in samples.iter().filter(|s| s.setting == setting) {
        let index = (sample.distance / band_width).floor().max(0.0) as usize;
        while bands.len() <= index {
            let start = bands.len() as f32 * band_width;
            bands.push(DistanceBand {
                start,
                end: start + band_width,
                ..Default::default()
            });
        }
        bands[index].add(sample);
        total.add(sample);
        if sample.in_sweetspot {
            in_sweetspot += 1;
        }
    }

    total.end = bands.last().map(|b| b.end).unwrap_or(0.0);

    PowerSummary {
        setting,
        total,
        in_sweetspot,
        bands,
    }
}

/// Summaries for every setting, in the order given
pub fn summarize(
    samples: &[ShotSample],
    powers: &[PowerSetting],
    spots: usize,
    band_width: f32,
    seed: u64,
) -> SweepSummary {
    SweepSummary {
        seed,
        spots,
        band_width,
        powers: powers
            .iter()
            .map(|setting| summarize_setting(*setting, samples, band_width))
            .collect(),
    }
}

impl SweepSummary {
    /// Format as ASCII table
    pub fn format_table(&self) -> String {
        let mut output = String::new();

        for power in &self.powers {
            output.push_str(&format!(
                "\nPower {} ({} shots, {} in sweetspot):\n\n",
                power.setting.label(),
                power.total.attempts,
                power.in_sweetspot
            ));
            output.push_str(&format!(
                "{:>13} | {:>6} | {:>6} | {:>7} | {:>9} | {:>6}\n",
                "Distance", "Shots", "Makes", "Rate", "3PT", "Pts/FG"
            ));
            output.push_str(&format!(
                "{:-<14}+{:-<8}+{:-<8}+{:-<9}+{:-<11}+{:-<7}\n",
                "", "", "", "", "", ""
            ));

            for band in power.bands.iter().filter(|b| b.attempts > 0) {
                output.push_str(&format!(
                    "{:>5.1} - {:>5.1} | {:>6} | {:>6} | {:>6.1}% | {:>4}/{:<4} | {:>6.2}\n",
                    band.start,
                    band.end,
                    band.attempts,
                    band.makes,
                    band.make_rate() * 100.0,
                    band.three_makes,
                    band.three_attempts,
                    band.points_per_shot()
                ));
            }

            output.push_str(&format!(
                "\nOverall: {}/{} made ({:.1}%), {:.2} points per shot\n",
                power.total.makes,
                power.total.attempts,
                power.total.make_rate() * 100.0,
                power.total.points_per_shot()
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Basket;

    fn sample(distance: f32, setting: PowerSetting, made: bool, three_point: bool) -> ShotSample {
        let points = match (made, three_point) {
            (false, _) => 0,
            (true, false) => 2,
            (true, true) => 3,
        };
        ShotSample {
            x: 14.4 - distance,
            z: 0.0,
            target: Basket::Right,
            distance,
            setting,
            power: 50,
            in_sweetspot: made,
            three_point,
            made,
            points,
            frames: 100,
        }
    }

    #[test]
    fn test_bands_by_distance() {
        let ideal = PowerSetting::Ideal;
        let samples = vec![
            sample(0.5, ideal, true, false),
            sample(1.2, ideal, false, false),
            sample(7.0, ideal, true, true),
            sample(7.4, PowerSetting::Fixed(10), false, true),
        ];
        let summary = summarize_setting(ideal, &samples, 1.5);

        assert_eq!(summary.total.attempts, 3);
        assert_eq!(summary.total.makes, 2);
        assert_eq!(summary.total.points, 5);
        assert_eq!(summary.in_sweetspot, 2);
        assert_eq!(summary.bands.len(), 5);
        assert_eq!(summary.bands[0].attempts, 2);
        assert!((summary.bands[0].make_rate() - 0.5).abs() < 1e-6);
        assert_eq!(summary.bands[4].three_makes, 1);
        assert!(summary.bands[1..4].iter().all(|b| b.attempts == 0));
    }

    #[test]
    fn test_empty_band_rates_are_zero() {
        let band = DistanceBand::default();
        assert_eq!(band.make_rate(), 0.0);
        assert_eq!(band.points_per_shot(), 0.0);
    }

    #[test]
    fn test_table_lists_each_setting() {
        let samples = vec![
            sample(2.0, PowerSetting::Ideal, true, false),
            sample(2.0, PowerSetting::Fixed(40), false, false),
        ];
        let summary = summarize(
            &samples,
            &[PowerSetting::Ideal, PowerSetting::Fixed(40)],
            1,
            1.5,
            7,
        );
        let table = summary.format_table();
        assert!(table.contains("Power ideal"));
        assert!(table.contains("Power 40"));
        assert!(table.contains("100.0%"));
    }
}
