/// Size formatting utilities — byte-unit constants and human-readable labels.
///
/// All internal sizes are `u64` bytes. Floating point is only used
/// at the display-formatting boundary.

/// One kibibyte. Labelled "KB" throughout, matching what users expect.
pub const KB: u64 = 1024;
/// One mebibyte.
pub const MB: u64 = KB * 1024;
/// One gibibyte.
pub const GB: u64 = MB * 1024;
/// One tebibyte.
pub const TB: u64 = GB * 1024;

/// Format a byte count into a human-readable string with appropriate unit.
///
/// Uses binary units (KiB = 1024) but labels them with common short forms
/// (KB, MB, GB, TB).
pub fn format_size(bytes: u64) -> String {
    let b = bytes as f64;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", b / KB as f64)
    } else if bytes < GB {
        format!("{:.1} MB", b / MB as f64)
    } else if bytes < TB {
        format!("{:.2} GB", b / GB as f64)
    } else {
        format!("{:.2} TB", b / TB as f64)
    }
}

/// Format a bucket boundary as a compact, exact label (`128B`, `16KB`, `16TB`).
///
/// Picks the largest unit that divides `bytes` evenly so the label never
/// loses precision; `1536` therefore renders as `1536B`, not `1.5KB`.
pub fn format_bound(bytes: u64) -> String {
    const UNITS: [(u64, &str); 4] = [(TB, "TB"), (GB, "GB"), (MB, "MB"), (KB, "KB")];

    if bytes == 0 {
        return "0B".to_string();
    }
    for (unit, suffix) in UNITS {
        if bytes % unit == 0 {
            return format!("{}{suffix}", bytes / unit);
        }
    }
    format!("{bytes}B")
}

/// Format a file count with thousand separators.
pub fn format_count(count: u64) -> String {
    if count < 1_000 {
        return count.to_string();
    }
    let s = count.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}
