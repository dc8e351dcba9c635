/// Guitar note presets: open-string tunings plus a 1 kHz test tone
/// The table is fixed at startup and never mutated

/// A named frequency preset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub frequency: f32,
}

/// Standard-tuning open strings (low to high), A440 reference,
/// high C, and a test tone
pub static PRESETS: [Preset; 9] = [
    Preset { name: "E2", frequency: 82.4 },    // Low E (6th string)
    Preset { name: "A2", frequency: 110.0 },   // A (5th string)
    Preset { name: "D3", frequency: 146.8 },   // D (4th string)
    Preset { name: "G3", frequency: 196.0 },   // G (3rd string)
    Preset { name: "B3", frequency: 246.9 },   // B (2nd string)
    Preset { name: "E4", frequency: 329.6 },   // High E (1st string)
    Preset { name: "A4", frequency: 440.0 },   // A440 reference
    Preset { name: "C5", frequency: 523.3 },   // High C
    Preset { name: "TEST", frequency: 1000.0 }, // 1kHz test tone
];

/// Look up a preset by name, case-insensitive; first match wins
pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
