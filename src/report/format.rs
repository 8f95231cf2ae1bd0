//! Formatted terminal output.
//!
//! Kept apart from fetching so output changes stay localized.

use crate::domain::{Category, ConnectivityProbe, ModelTypeRecord};
use crate::report::Summary;

/// Format the per-category count table and the recent listings.
pub fn format_summary(summary: &Summary) -> String {
    let mut out = String::new();

    out.push_str("=== cheongyak - 청약 공고 요약 ===\n");
    for c in &summary.counts {
        out.push_str(&format!(
            "{} {:>6}건 ({:>5.1}%)\n",
            pad(c.category.display_name(), 26),
            c.count,
            c.share
        ));
    }
    out.push_str(&format!("{} {:>6}건\n", pad("합계", 26), summary.total));

    if summary.recent.is_empty() {
        return out;
    }

    out.push_str(&format!("\n최근 공고 {}건:\n", summary.recent.len()));
    for (category, listing) in &summary.recent {
        let date = if listing.announcement_date.is_empty() {
            "-"
        } else {
            listing.announcement_date.as_str()
        };
        let line = format!(
            "{:<10} {} {} {}",
            date,
            pad(category.display_name(), 26),
            truncate(&listing.house_name, 30),
            listing.supply_region.as_deref().unwrap_or(""),
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// Format the model-type rows of one listing.
pub fn format_model_types(category: Category, house_manage_no: &str, models: &[ModelTypeRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {house_manage_no}: 주택형 {}건\n",
        category.display_name(),
        models.len()
    ));
    if models.is_empty() {
        return out;
    }

    out.push_str(format!("{:<6} {:<16} {:>10} {:>8} {:>8} {:>12}", "모델", "주택형", "공급면적", "일반", "특별", "최고분양가").trim_end());
    out.push('\n');
    for m in models {
        let line = format!(
            "{:<6} {:<16} {:>10} {:>8} {:>8} {:>12}",
            m.model_no,
            truncate(&m.house_type, 16),
            m.supply_area,
            m.general_units,
            m.special_units.as_deref().unwrap_or("-"),
            m.top_price,
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub fn format_probe(probe: &ConnectivityProbe) -> String {
    if probe.ok {
        "API connection: OK\n".to_string()
    } else {
        format!("API connection: FAILED ({})\n", probe.message)
    }
}

/// Pad to a display width, counting Hangul as two columns.
fn pad(s: &str, width: usize) -> String {
    let used: usize = s.chars().map(char_width).sum();
    let mut out = s.to_string();
    for _ in used..width {
        out.push(' ');
    }
    out
}

fn char_width(ch: char) -> usize {
    if ('\u{1100}'..='\u{11FF}').contains(&ch) || ('\u{AC00}'..='\u{D7A3}').contains(&ch) {
        2
    } else {
        1
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}
