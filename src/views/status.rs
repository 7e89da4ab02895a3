use rust_decimal::{Decimal, RoundingStrategy};

use crate::monitor::models::SensorReading;
use crate::views::page::{ids, FontWeight, Page};

/// Highlight colour for a running pump.
pub const PUMP_ON_COLOR: &str = "#0d47a1";
pub const PUMP_OFF_COLOR: &str = "#555";

/// Writes the latest reading into the fixed status elements.
pub struct StatusPanel;

impl StatusPanel {
    pub fn render(page: &mut Page, reading: &SensorReading) {
        page.element_mut(ids::TEMP_VALUE).text = format!("{} °C", to_fixed(reading.temperature, 2));
        page.element_mut(ids::LEVEL_VALUE).text = format!("{} %", reading.water_level);

        let pump = page.element_mut(ids::PUMP_STATUS);
        pump.text.clone_from(&reading.pump_status);
        if reading.is_pump_on() {
            pump.style.font_weight = FontWeight::Bold;
            pump.style.color = Some(PUMP_ON_COLOR.to_string());
        } else {
            pump.style.font_weight = FontWeight::Normal;
            pump.style.color = Some(PUMP_OFF_COLOR.to_string());
        }

        let anomaly = page.element_mut(ids::ANOMALY_STATUS);
        anomaly.text.clone_from(&reading.anomaly_status);
        anomaly.style.class = Some(reading.anomaly_status.clone());

        page.element_mut(ids::ANOMALY_VALUE).text = format!("Value: {}", reading.anomaly_value);
    }
}

/// Fixed-point text with ties rounded away from zero, on the exact binary value.
fn to_fixed(value: f64, digits: u32) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    match Decimal::from_f64_retain(value) {
        Some(exact) => {
            let rounded = exact.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.prec$}", prec = digits as usize)
        }
        // NaN, or too large for a decimal
        None => format!("{value:.prec$}", prec = digits as usize),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(pump_status: &str, anomaly_status: &str) -> SensorReading {
        SensorReading {
            temperature: 21.37,
            water_level: 80.0,
            pump_status: pump_status.to_string(),
            anomaly_status: anomaly_status.to_string(),
            anomaly_value: 0.02,
        }
    }

    #[test]
    fn nominal_reading_renders_expected_text() {
        let mut page = Page::new();
        StatusPanel::render(&mut page, &reading("OFF", "NOMINAL"));

        assert_eq!(page.text(ids::TEMP_VALUE), "21.37 °C");
        assert_eq!(page.text(ids::LEVEL_VALUE), "80 %");
        assert_eq!(page.text(ids::PUMP_STATUS), "OFF");
        assert_eq!(page.text(ids::ANOMALY_STATUS), "NOMINAL");
        assert_eq!(page.text(ids::ANOMALY_VALUE), "Value: 0.02");

        let pump = page.element(ids::PUMP_STATUS).unwrap();
        assert_eq!(pump.style.font_weight, FontWeight::Normal);
        assert_eq!(pump.style.color.as_deref(), Some(PUMP_OFF_COLOR));
    }

    #[test]
    fn running_pump_is_highlighted() {
        let mut page = Page::new();
        StatusPanel::render(&mut page, &reading("ON", "NOMINAL"));

        let pump = page.element(ids::PUMP_STATUS).unwrap();
        assert_eq!(pump.style.font_weight, FontWeight::Bold);
        assert_eq!(pump.style.color.as_deref(), Some(PUMP_ON_COLOR));

        // Back to normal once the pump stops
        StatusPanel::render(&mut page, &reading("STANDBY", "NOMINAL"));
        let pump = page.element(ids::PUMP_STATUS).unwrap();
        assert_eq!(pump.text, "STANDBY");
        assert_eq!(pump.style.font_weight, FontWeight::Normal);
    }

    #[test]
    fn anomaly_status_sets_class() {
        let mut page = Page::new();
        StatusPanel::render(&mut page, &reading("OFF", "ANOMALY"));

        let status = page.element(ids::ANOMALY_STATUS).unwrap();
        assert_eq!(status.style.class.as_deref(), Some("ANOMALY"));
    }

    #[test]
    fn temperature_is_rounded_to_two_decimals() {
        let mut page = Page::new();
        let mut r = reading("OFF", "NOMINAL");
        r.temperature = 19.999;
        r.water_level = 42.5;
        StatusPanel::render(&mut page, &r);

        assert_eq!(page.text(ids::TEMP_VALUE), "20.00 °C");
        assert_eq!(page.text(ids::LEVEL_VALUE), "42.5 %");
    }

    #[test]
    fn temperature_ties_round_away_from_zero() {
        let mut page = Page::new();
        let mut r = reading("OFF", "NOMINAL");

        for (temperature, expected) in [
            (21.125, "21.13 °C"),
            (21.625, "21.63 °C"),
            (-0.125, "-0.13 °C"),
            (20.0, "20.00 °C"),
            (-3.5, "-3.50 °C"),
        ] {
            r.temperature = temperature;
            StatusPanel::render(&mut page, &r);
            assert_eq!(page.text(ids::TEMP_VALUE), expected, "temperature {temperature}");
        }
    }

    #[test]
    fn non_finite_temperature_is_spelled_out() {
        assert_eq!(to_fixed(f64::NAN, 2), "NaN");
        assert_eq!(to_fixed(f64::INFINITY, 2), "Infinity");
        assert_eq!(to_fixed(f64::NEG_INFINITY, 2), "-Infinity");
    }
}
