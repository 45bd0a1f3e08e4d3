//! Power gauge readout, built from the same aim reading the launch uses

use bevy::prelude::*;

use crate::constants::*;
use crate::game::GameState;
use crate::shooting::AimReading;

/// Power gauge text component
#[derive(Component)]
pub struct PowerGaugeText;

/// Text bar over 0..=100: `#` up to the chosen power, `=` marks the
/// sweetspot beyond it, `.` elsewhere.
pub fn gauge_bar(reading: &AimReading, cells: usize) -> String {
    let power = reading.power.as_f32();
    let cell_width = MAX_POWER as f32 / cells as f32;
    let bar: String = (0..cells)
        .map(|i| {
            let center = (i as f32 + 0.5) * cell_width;
            if center <= power {
                '#'
            } else if center >= reading.sweetspot.start && center <= reading.sweetspot.end {
                '='
            } else {
                '.'
            }
        })
        .collect();
    format!("[{}]", bar)
}

/// Full gauge line, with "Perfect!" when the power sits in the sweetspot
pub fn gauge_line(reading: &AimReading) -> String {
    let mut line = format!(
        "Power {} {}  ideal {:.0} ({} rim, {:.1}m)",
        reading.power,
        gauge_bar(reading, GAUGE_CELLS),
        reading.ideal_power,
        reading.basket.name(),
        reading.distance,
    );
    if reading.perfect {
        line.push_str("  Perfect!");
    }
    line
}

/// Update power gauge display; the text turns gold inside the sweetspot
pub fn update_power_gauge(
    game: Res<GameState>,
    mut text_query: Query<(&mut Text, &mut TextColor), With<PowerGaugeText>>,
) {
    let Ok((mut text, mut color)) = text_query.single_mut() else {
        return;
    };
    let reading = game.aim();
    text.0 = gauge_line(&reading);
    color.0 = if reading.perfect {
        TEXT_ACCENT
    } else {
        TEXT_PRIMARY
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shooting::{ShotPower, Sweetspot};
    use crate::world::Basket;

    fn reading(power: i32, ideal: f32) -> AimReading {
        let sweetspot = Sweetspot::around(ideal, 7.0);
        let power = ShotPower::new(power);
        AimReading {
            basket: Basket::Right,
            distance: 4.0,
            ideal_power: ideal,
            sweetspot,
            power,
            scale: 1.0,
            perfect: sweetspot.contains(power),
        }
    }

    #[test]
    fn test_bar_marks_sweetspot() {
        assert_eq!(gauge_bar(&reading(0, 50.0), 20), "[.........==.........]");
    }

    #[test]
    fn test_bar_fills_to_power() {
        assert_eq!(gauge_bar(&reading(100, 50.0), 10), "[##########]");
        assert_eq!(gauge_bar(&reading(30, 80.0), 10), "[###....==.]");
    }

    #[test]
    fn test_perfect_only_in_sweetspot() {
        assert!(gauge_line(&reading(50, 50.0)).ends_with("Perfect!"));
        assert!(!gauge_line(&reading(70, 50.0)).contains("Perfect!"));
    }
}
