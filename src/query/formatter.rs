use crate::record::models::TractorRecord;

/// Render records as an aligned plain-text table.
///
/// `model` and `company` always lead; `columns` follow, with `-` for
/// values a record does not have.
pub fn format_records(records: &[&TractorRecord], columns: &[&str]) -> String {
    let mut header: Vec<String> = vec!["model".to_string(), "company".to_string()];
    header.extend(columns.iter().map(|c| c.to_string()));

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            let mut row = vec![record.model.clone(), record.company_display().to_string()];
            row.extend(columns.iter().map(|c| {
                record
                    .get(c)
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string())
            }));
            row
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(header[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::models::FieldValue;

    #[test]
    fn test_table_alignment() {
        let mut a = TractorRecord::new("a", "8R 370", Some("John Deere".to_string()));
        a.set("rated_power_net_kw", FieldValue::Float(275.9));
        let b = TractorRecord::new("b", "724", None);

        let table = format_records(&[&a, &b], &["rated_power_net_kw"]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "model   company     rated_power_net_kw");
        assert_eq!(lines[1], "8R 370  John Deere  275.9");
        assert_eq!(lines[2], "724     -           -");
    }

    #[test]
    fn test_empty_result_prints_header_only() {
        let table = format_records(&[], &[]);
        assert_eq!(table, "model  company\n");
    }
}
