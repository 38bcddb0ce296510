use std::io::Write;

use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

/// Start the stderr logger at `level` (unknown levels fall back to `warn`).
/// A second call is a no-op.
pub fn init(level: &str) {
    let filter = level.parse().unwrap_or(LevelFilter::Warn);
    let _ = TermLogger::init(
        filter,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Never,
    );
}

/// Append a decision record to ~/.local/share/tablegate/decisions.log.
/// Best-effort: failures are silently ignored (logging must never stop the stream).
pub fn log_decision(relation: &str, emit: bool) {
    let Some(home) = std::env::var_os("HOME") else {
        return;
    };
    let log_dir = std::path::Path::new(&home).join(".local/share/tablegate");
    let _ = std::fs::create_dir_all(&log_dir);

    let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("decisions.log"))
    else {
        return;
    };

    let _ = writeln!(file, "{}", record_line(&timestamp_now(), relation, emit));
}

/// One tab-separated record. Control characters in the name are escaped so
/// a record never spans lines or gains fields.
fn record_line(ts: &str, relation: &str, emit: bool) -> String {
    let decision = if emit { "emit" } else { "skip" };
    let mut line = format!("{ts}\t{decision}\t");
    for c in relation.chars() {
        if c.is_control() {
            line.extend(c.escape_default());
        } else {
            line.push(c);
        }
    }
    line
}

/// UTC timestamp, second precision.
fn timestamp_now() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let (year, month, day) = civil_from_days(secs / 86_400);
    let rem = secs % 86_400;
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}Z",
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60
    )
}

/// Days since 1970-01-01 to (year, month, day), proleptic Gregorian.
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    // Civil calendar from days algorithm (Howard Hinnant)
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year, month, day)
}
