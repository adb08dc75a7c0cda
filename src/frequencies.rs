//! Caduceus preset frequencies.
//!
//! A static series of named frequencies indexed by an integer exponent in
//! [185, 201]. Pure data, no mutation, no errors.

/// Smallest exponent with a preset frequency.
pub const CADUCEUS_MIN_EXPONENT: u32 = 185;

/// Largest exponent with a preset frequency.
pub const CADUCEUS_MAX_EXPONENT: u32 = 201;

/// Preset values in Hz, indexed by `exponent - CADUCEUS_MIN_EXPONENT`.
const CADUCEUS_HZ: [f64; 17] = [
    0.25109329,
    0.406277478,
    0.657370768,
    1.063648245,
    1.721019013,
    2.784667259,
    4.505686274,
    7.290353535,
    11.79603981,
    19.08639335,
    30.88242217,
    49.96882653,
    80.85125972,
    130.8200863,
    211.671346,
    342.4914324,
    554.1627785,
];

/// Look up the caduceus frequency for an exponent.
///
/// Returns `None` when the exponent falls outside [185, 201].
pub fn caduceus_frequency(exponent: u32) -> Option<f64> {
    if !(CADUCEUS_MIN_EXPONENT..=CADUCEUS_MAX_EXPONENT).contains(&exponent) {
        return None;
    }
    Some(CADUCEUS_HZ[(exponent - CADUCEUS_MIN_EXPONENT) as usize])
}

/// Iterate over all `(exponent, hz)` presets in ascending exponent order.
pub fn caduceus_presets() -> impl Iterator<Item = (u32, f64)> {
    CADUCEUS_HZ
        .iter()
        .enumerate()
        .map(|(i, &hz)| (CADUCEUS_MIN_EXPONENT + i as u32, hz))
}
