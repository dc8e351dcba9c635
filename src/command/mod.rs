/// One parsed operator command
/// Waveform and preset names stay as raw strings here; the dispatcher
/// validates them so rejections can report the valid options
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Status,
    On,
    Off,
    SetFreq(f32),
    SetAmp(f32),
    SetWave(String),
    ListNotes,
    SetNote(String),
    Tune(f32),
    Sweep,
    Unknown,
}

impl Command {
    /// Parse one line of operator input
    ///
    /// The line is trimmed and lowercased; the command token runs up to
    /// the first space and the remainder is the argument. Returns `None`
    /// for empty input. Numeric arguments that fail to parse become 0.0,
    /// which then falls into the ordinary range validation downstream.
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim().to_lowercase();
        if line.is_empty() {
            return None;
        }

        let (token, arg) = match line.split_once(' ') {
            Some((token, rest)) => (token, Some(rest.trim())),
            None => (line.as_str(), None),
        };

        let command = match (token, arg) {
            ("help" | "h", None) => Command::Help,
            ("status" | "s", None) => Command::Status,
            ("on" | "start", None) => Command::On,
            ("off" | "stop", None) => Command::Off,
            ("freq" | "f", Some(arg)) => Command::SetFreq(parse_float(arg)),
            ("amp" | "a", Some(arg)) => Command::SetAmp(parse_float(arg)),
            ("wave" | "w", Some(arg)) => Command::SetWave(arg.to_string()),
            ("notes" | "n", None) => Command::ListNotes,
            ("note", Some(arg)) => Command::SetNote(arg.to_string()),
            ("tune", Some(arg)) => Command::Tune(parse_float(arg)),
            ("sweep", None) => Command::Sweep,
            _ => Command::Unknown,
        };
        Some(command)
    }
}

/// Malformed numbers become 0.0 rather than a parse error
/// Non-finite parses ("nan", "inf") count as malformed: they would
/// bypass the clamp downstream and corrupt the frequency state
fn parse_float(arg: &str) -> f32 {
    arg.parse()
        .ok()
        .filter(|value: &f32| value.is_finite())
        .unwrap_or(0.0)
}
