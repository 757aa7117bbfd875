pub type Meter = f32;
pub type BitsPerSecond = f64;


const BPS_PREFIX_STEP: BitsPerSecond = 1_000.0;

const BPS_UNITS: [&str; 5] = ["bps", "Kbps", "Mbps", "Gbps", "Tbps"];


/// Scales a bit rate to the largest decimal unit that keeps the mantissa 
/// below 1000 and prints it with `precision` fractional digits.
#[must_use]
pub fn format_bps(value: BitsPerSecond, precision: usize) -> String {
    let mut scaled = value;
    let mut unit_index = 0;

    while scaled.abs() >= BPS_PREFIX_STEP && unit_index + 1 < BPS_UNITS.len() {
        scaled /= BPS_PREFIX_STEP;
        unit_index += 1;
    }

    format!("{scaled:.precision$} {}", BPS_UNITS[unit_index])
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_rates_stay_in_bps() {
        assert_eq!("0 bps", format_bps(0.0, 0));
        assert_eq!("999.00 bps", format_bps(999.0, 2));
    }

    #[test]
    fn rates_scale_by_thousands() {
        assert_eq!("1.50 Kbps", format_bps(1_500.0, 2));
        assert_eq!("12 Mbps", format_bps(12_000_000.0, 0));
        assert_eq!("2.25 Gbps", format_bps(2_250_000_000.0, 2));
    }

    #[test]
    fn largest_unit_is_not_exceeded() {
        assert_eq!("5000 Tbps", format_bps(5.0e15, 0));
    }

    #[test]
    fn negative_rates_keep_sign() {
        assert_eq!("-3.0 Kbps", format_bps(-3_000.0, 1));
    }
}
