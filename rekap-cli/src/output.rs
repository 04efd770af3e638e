//! Result rendering: stdout tables, JSON, and CSV files for the spreadsheet side.

use anyhow::{Context, Result};
use rekap_core::{
    format_dmy, AnomalyRecord, CategorizedTransaction, Category, RowDate, RunConfig,
    WeeklySummaryRow,
};
use rekap_finance::RecapReport;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const CATEGORIZED_FILE: &str = "kategori.csv";
pub const WEEKLY_FILE: &str = "rekap_mingguan.csv";
pub const ANOMALY_FILE: &str = "anomali_tanggal.csv";

const DATE_INVALID: &str = "date invalid";

fn amount(v: f64) -> String {
    format!("{:.2}", v)
}

fn row_date(d: &RowDate) -> String {
    match d {
        RowDate::Parsed(d) => format_dmy(*d),
        RowDate::Invalid { raw } => format!("{DATE_INVALID} ({raw})"),
        RowDate::Missing => DATE_INVALID.to_string(),
    }
}

pub fn write_categorized<W: Write>(w: W, rows: &[CategorizedTransaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(["VOUCHER NO", "TRANS. DATE", "DESCRIPTION", "DEBIT", "KATEGORI"])?;
    for r in rows {
        let t = &r.transaction;
        wtr.write_record([
            t.voucher.clone().unwrap_or_default(),
            row_date(&t.trans_date),
            t.description.clone().unwrap_or_default(),
            amount(t.debit),
            r.category.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_weekly<W: Write>(w: W, rows: &[WeeklySummaryRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    let mut header = vec!["Minggu".to_string()];
    header.extend(Category::SUMMARY_ORDER.iter().map(|c| c.to_string()));
    wtr.write_record(&header)?;
    for r in rows {
        let mut record = vec![r.label.clone()];
        record.extend(r.totals.iter().map(|(_, v)| amount(v)));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_anomalies<W: Write>(w: W, rows: &[AnomalyRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record([
        "VOUCHER NO",
        "TRANS. DATE",
        "ENTRY DATE",
        "SELISIH HARI",
        "DESCRIPTION",
        "DEBIT",
    ])?;
    for a in rows {
        wtr.write_record([
            a.voucher.clone().unwrap_or_default(),
            format_dmy(a.trans_date),
            format_dmy(a.entry_date),
            a.day_diff.to_string(),
            a.description.clone().unwrap_or_default(),
            amount(a.debit),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the three result files into `dir`, creating it if needed.
pub fn write_outputs(report: &RecapReport, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;

    let categorized = dir.join(CATEGORIZED_FILE);
    let weekly = dir.join(WEEKLY_FILE);
    let anomalies = dir.join(ANOMALY_FILE);

    let open = |p: &Path| fs::File::create(p).with_context(|| format!("write {}", p.display()));
    write_categorized(open(categorized.as_path())?, &report.categorized)?;
    write_weekly(open(weekly.as_path())?, &report.weekly)?;
    write_anomalies(open(anomalies.as_path())?, &report.anomalies)?;

    Ok(vec![categorized, weekly, anomalies])
}

pub fn print_json(report: &RecapReport) -> Result<()> {
    let s = serde_json::to_string_pretty(report).context("serialize report")?;
    println!("{s}");
    Ok(())
}

pub fn print_text(report: &RecapReport, cfg: &RunConfig) {
    println!("# Rekap mingguan (mulai {})\n", format_dmy(cfg.week_start));

    if report.weekly.is_empty() {
        println!("(no transactions on or after the start date)\n");
    } else {
        print!("{:<25}", "Minggu");
        for c in Category::SUMMARY_ORDER {
            print!("{:>14}", c.as_str());
        }
        println!();
        for r in &report.weekly {
            print!("{:<25}", r.label);
            for (_, v) in r.totals.iter() {
                print!("{:>14}", amount(v));
            }
            println!();
        }
        print!("{:<25}", "Total");
        for (_, v) in report.grand_total().iter() {
            print!("{:>14}", amount(v));
        }
        println!("\n");
    }

    println!("## Anomali tanggal (> {} hari)\n", cfg.anomaly_threshold_days);
    if report.anomalies.is_empty() {
        println!("no anomalies\n");
    } else {
        for a in &report.anomalies {
            println!(
                "- {} | trans {} | entry {} | {:+} hari | {} | {}",
                a.voucher.as_deref().unwrap_or("-"),
                format_dmy(a.trans_date),
                format_dmy(a.entry_date),
                a.day_diff,
                a.description.as_deref().unwrap_or(""),
                amount(a.debit)
            );
        }
        println!();
    }

    if !report.date_issues.is_empty() {
        println!("## Baris dengan tanggal bermasalah\n");
        for i in &report.date_issues {
            println!(
                "- row {} ({}): {} {}",
                i.row_index + 1,
                i.voucher.as_deref().unwrap_or("-"),
                i.field.as_str(),
                match &i.raw {
                    Some(raw) => format!("{DATE_INVALID}: {raw}"),
                    None => "missing".to_string(),
                }
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rekap_core::Transaction;
    use rekap_finance::build_report;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_report() -> RecapReport {
        let rows = vec![
            Transaction::new(ymd(2025, 1, 6), "Dibayar BBM untuk transport asmen (irfan)", 150000.0)
                .with_voucher("V1001")
                .with_entry_date(ymd(2025, 1, 20)),
        ];
        build_report(&rows, &RunConfig::new(ymd(2025, 1, 6)))
    }

    #[test]
    fn test_weekly_csv_has_all_columns_in_order() {
        let mut buf = Vec::new();
        write_weekly(&mut buf, &sample_report().weekly).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Minggu,Admin,Asmen,Other,Manager,MIS,StaffLapang");
        assert_eq!(
            lines[1],
            "06/01/2025 - 12/01/2025,0.00,150000.00,0.00,0.00,0.00,0.00"
        );
    }

    #[test]
    fn test_categorized_csv_marks_bad_dates() {
        let mut t = Transaction::new(ymd(2025, 1, 6), "bbm", 1.0);
        t.trans_date = RowDate::Invalid { raw: "31/02/2025".into() };
        let report = build_report(&[t], &RunConfig::new(ymd(2025, 1, 6)));
        let mut buf = Vec::new();
        write_categorized(&mut buf, &report.categorized).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("date invalid (31/02/2025)"), "{text}");
        assert!(text.lines().nth(1).unwrap().ends_with(",Other"));
    }

    #[test]
    fn test_anomaly_csv_row() {
        let mut buf = Vec::new();
        write_anomalies(&mut buf, &sample_report().anomalies).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text.lines().nth(1).unwrap(),
            "V1001,06/01/2025,20/01/2025,14,Dibayar BBM untuk transport asmen (irfan),150000.00"
        );
    }

    #[test]
    fn test_write_outputs_creates_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("hasil");
        let written = write_outputs(&sample_report(), &out).unwrap();
        assert_eq!(written.len(), 3);
        for p in &written {
            assert!(p.exists(), "{}", p.display());
        }
        assert!(out.join(WEEKLY_FILE).exists());
    }

    #[test]
    fn test_json_contains_every_result_set() {
        let v = serde_json::to_value(sample_report()).unwrap();
        for key in ["categorized", "windows", "weekly", "anomalies", "date_issues"] {
            assert!(v.get(key).is_some(), "{key}");
        }
        assert_eq!(v["weekly"][0]["totals"]["Asmen"], 150000.0);
    }
}
