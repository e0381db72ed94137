//! Utility functions for common operations.

use std::time::Duration;

/// Format elapsed game time as MM:SS, or H:MM:SS past the hour
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

/// Group SAN moves into numbered rows: `1. e4 e5`
///
/// `black_first` is set when the game started from a position with black to
/// move, in which case the first row reads `1... e5`.
pub fn numbered_moves(sans: &[String], first_move_number: u32, black_first: bool) -> Vec<String> {
    let mut rows = Vec::new();
    let mut number = first_move_number;
    let mut rest = sans;

    if black_first {
        if let Some((first, tail)) = rest.split_first() {
            rows.push(format!("{}... {}", number, first));
            number += 1;
            rest = tail;
        }
    }

    for pair in rest.chunks(2) {
        match pair {
            [white, black] => rows.push(format!("{}. {} {}", number, white, black)),
            [white] => rows.push(format!("{}. {}", number, white)),
            _ => {}
        }
        number += 1;
    }

    rows
}
