use super::TaskResult;

const HEADERS: [&str; 7] = [
    "Task name",
    "Total",
    "Average",
    "Fastest",
    "Slowest",
    "Median",
    "Std dev",
];

/// Render results as a plain-text table, one row per task.
pub fn render_table(results: &[TaskResult]) -> String {
    let unit = results
        .first()
        .map(|r| r.unit.symbol())
        .unwrap_or("ns");

    let header: Vec<String> = HEADERS
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.to_string()
            } else {
                format!("{} ({})", h, unit)
            }
        })
        .collect();

    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                format!("{:.3}", r.total),
                format!("{:.3}", r.average),
                format!("{:.3}", r.fastest),
                format!("{:.3}", r.slowest),
                format!("{:.3}", r.median),
                format!("{:.3}", r.std_dev),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut output = String::new();
    output.push_str(&format_row(&header, &widths));
    output.push_str(&separator(&widths));
    for row in &rows {
        output.push_str(&format_row(row, &widths));
    }
    output
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, width))| {
            let pad = width - cell.chars().count();
            if i == 0 {
                format!("{}{}", cell, " ".repeat(pad))
            } else {
                format!("{}{}", " ".repeat(pad), cell)
            }
        })
        .collect();
    format!("| {} |\n", padded.join(" | "))
}

fn separator(widths: &[usize]) -> String {
    let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    format!("|-{}-|\n", dashes.join("-|-"))
}
