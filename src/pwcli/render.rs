use colored::Colorize;
use pwcli::model::{Bundle, Patch, Series};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_NAME_WIDTH: usize = 60;

pub(crate) fn series_table(series: &[Series]) -> String {
    if series.is_empty() {
        return "No series found.".to_string();
    }
    let rows: Vec<Vec<String>> = series
        .iter()
        .map(|series| {
            vec![
                series.id.to_string(),
                series.date.clone(),
                truncate_to_width(series.name.as_deref().unwrap_or(""), MAX_NAME_WIDTH),
                series.version.to_string(),
                series.submitter.to_string(),
            ]
        })
        .collect();
    table(&["ID", "Date", "Name", "Version", "Submitter"], &rows)
}

pub(crate) fn patch_table(patches: &[Patch]) -> String {
    if patches.is_empty() {
        return "No patches found.".to_string();
    }
    let rows: Vec<Vec<String>> = patches
        .iter()
        .map(|patch| {
            vec![
                patch.id.to_string(),
                patch.date.clone(),
                truncate_to_width(&patch.name, MAX_NAME_WIDTH),
                patch.state.clone(),
                patch.submitter.to_string(),
                patch
                    .delegate
                    .as_ref()
                    .map(|delegate| delegate.username.clone())
                    .unwrap_or_default(),
            ]
        })
        .collect();
    table(
        &["ID", "Date", "Name", "State", "Submitter", "Delegate"],
        &rows,
    )
}

pub(crate) fn bundle_table(bundles: &[Bundle]) -> String {
    if bundles.is_empty() {
        return "No bundles found.".to_string();
    }
    let rows: Vec<Vec<String>> = bundles
        .iter()
        .map(|bundle| {
            vec![
                bundle.id.to_string(),
                truncate_to_width(&bundle.name, MAX_NAME_WIDTH),
                bundle.owner.to_string(),
                yes_no(bundle.public).to_string(),
            ]
        })
        .collect();
    table(&["ID", "Name", "Owner", "Public"], &rows)
}

pub(crate) fn series_detail(series: &Series) -> String {
    let mut rows = vec![
        property("ID", series.id.to_string()),
        property("URL", series.url.clone().unwrap_or_default()),
        property("Date", series.date.clone()),
        property("Name", series.name.clone().unwrap_or_default()),
        property("Submitter", series.submitter.to_string()),
        property("Project", series.project.name.clone()),
        property("Version", series.version.to_string()),
        property(
            "Received",
            format!("{}/{}", series.received_total, series.total),
        ),
        property("Complete", yes_no(series.received_all).to_string()),
        property(
            "Cover",
            series
                .cover_letter
                .as_ref()
                .map(|cover| labelled(cover.id, cover.name.as_deref()))
                .unwrap_or_default(),
        ),
    ];
    for (i, patch) in series.patches.iter().enumerate() {
        let key = if i == 0 { "Patches" } else { "" };
        rows.push(property(key, labelled(patch.id, patch.name.as_deref())));
    }
    table(&["Property", "Value"], &rows)
}

pub(crate) fn patch_detail(patch: &Patch) -> String {
    let mut rows = vec![
        property("ID", patch.id.to_string()),
        property("URL", patch.url.clone().unwrap_or_default()),
        property("Date", patch.date.clone()),
        property("Name", patch.name.clone()),
        property("Message ID", patch.msgid.clone().unwrap_or_default()),
        property("Submitter", patch.submitter.to_string()),
        property("State", patch.state.clone()),
        property("Archived", yes_no(patch.archived).to_string()),
        property(
            "Delegate",
            patch
                .delegate
                .as_ref()
                .map(|delegate| delegate.to_string())
                .unwrap_or_default(),
        ),
        property("Hash", patch.hash.clone().unwrap_or_default()),
    ];
    for (i, series) in patch.series.iter().enumerate() {
        let key = if i == 0 { "Series" } else { "" };
        rows.push(property(key, labelled(series.id, series.name.as_deref())));
    }
    table(&["Property", "Value"], &rows)
}

pub(crate) fn bundle_detail(bundle: &Bundle) -> String {
    let mut rows = vec![
        property("ID", bundle.id.to_string()),
        property("URL", bundle.url.clone().unwrap_or_default()),
        property("Name", bundle.name.clone()),
        property("Owner", bundle.owner.to_string()),
        property("Public", yes_no(bundle.public).to_string()),
    ];
    for (i, patch) in bundle.patches.iter().enumerate() {
        let key = if i == 0 { "Patches" } else { "" };
        rows.push(property(key, labelled(patch.id, patch.name.as_deref())));
    }
    table(&["Property", "Value"], &rows)
}

fn property(key: &str, value: String) -> Vec<String> {
    vec![key.to_string(), value]
}

fn labelled(id: u32, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("{} {}", id, name),
        None => id.to_string(),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Lay out rows under bold headers, padding every column to its widest
/// cell. Widths are computed before any styling is applied so escape
/// codes never skew the alignment.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let columns = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|header| header.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(columns) {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let mut out = String::new();
    for (i, header) in headers.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(&header.bold().to_string());
        if i + 1 < columns {
            out.push_str(&" ".repeat(widths[i] - header.width()));
        }
    }
    out.push('\n');
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(&"-".repeat(*width));
    }
    for row in rows {
        out.push('\n');
        for (i, cell) in row.iter().enumerate().take(columns) {
            if i > 0 {
                out.push_str("  ");
            }
            out.push_str(cell);
            if i + 1 < columns {
                out.push_str(&" ".repeat(widths[i].saturating_sub(cell.width())));
            }
        }
    }
    out
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
