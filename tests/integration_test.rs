use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use anyhow::Result;
use tempfile::TempDir;

const HEADER: &str = "Data transakcji;Data księgowania;Dane kontrahenta;Tytuł;Nr rachunku;Nazwa banku;Szczegóły;Nr transakcji;Kwota transakcji (waluta rachunku);Waluta;Kwota blokady/zwolnienie blokady;Waluta;Kwota płatności w walucie;Waluta;Konto;Saldo po transakcji;Waluta;;;";

fn export_row(date: &str, contractor: &str, title: &str, amount: &str, account: &str) -> String {
    format!("{date};{date};{contractor};{title};;;;'1';{amount};PLN;;;;;{account};1000,00;PLN;;;")
}

fn write_export(folder: &Path, rows: &[String]) -> Result<()> {
    let mut content = String::from(HEADER);

    for row in rows {
        content.push_str("\r\n");
        content.push_str(row);
    }

    let (bytes, _, _) = encoding_rs::WINDOWS_1250.encode(&content);
    fs::write(folder.join("Lista_transakcji_nr_0001.csv"), bytes)?;

    Ok(())
}

fn write_settings(root: &Path) -> Result<std::path::PathBuf> {
    let input = root.join("files");
    let settings = serde_json::json!({
        "input_folder": input,
        "contractor_mapping": input.join("contractor_mapping.json"),
        "title_mapping": input.join("title_mapping.json"),
        "uncategorised_folder": input.join("uncategorised"),
        "output_folder": input.join("output"),
        "logs_folder": root.join("logs"),
        "batch_size": 2
    });

    fs::create_dir_all(&input)?;
    fs::write(input.join("contractor_mapping.json"), r#"{"lidl": "GROCERIES", "orlen": "FUEL"}"#)?;
    fs::write(input.join("title_mapping.json"), r#"{"blik": "CASH", "czynsz": "RENT"}"#)?;

    let path = root.join("settings.json");
    fs::write(&path, serde_json::to_string_pretty(&settings)?)?;

    Ok(path)
}

fn run_binary(settings: &Path) -> Result<Output> {
    let binary_path = env!("CARGO_BIN_EXE_transaction-categoriser");

    Ok(Command::new(binary_path).arg(settings).arg("debug").output()?)
}

#[test]
fn test_cli_categorises_sample_export() -> Result<()> {
    let root = TempDir::new()?;
    let settings = write_settings(root.path())?;
    let account = "KONTO Direct - KD";

    write_export(&root.path().join("files"), &[
        export_row("2024-03-01", "LIDL SP. Z O.O.", "Płatność kartą", "-45,20", account),
        export_row("2024-03-02", "Spółdzielnia Mieszkaniowa", "Czynsz marzec", "-650,00", account),
        export_row("2024-03-03", "Kiosk Ruch", "Gazeta", "-6,50", account),
        export_row("2024-03-04", "Pracodawca", "Wynagrodzenie", "5000,00", account),
        export_row("2024-03-05", "ORLEN Stacja", "Paliwo", "", account),
        export_row("2024-03-06", "Piekarnia", "Bułki", "-12,00", "Konto Oszczędnościowe")
    ])?;

    let output = run_binary(&settings)?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("rows_read,6"));
    assert!(stdout.contains("rows_kept,3"));
    assert!(stdout.contains("rows_uncategorised,1"));

    let categorised = fs::read_to_string(root.path().join("files").join("output").join("Lista_transakcji_nr_0001_categorised.csv"))?;
    let lines: Vec<&str> = categorised.lines().collect();

    assert_eq!(lines, vec![
        "Data transakcji;Dane kontrahenta;Tytuł;Kwota transakcji (waluta rachunku);Konto;category",
        "2024-03-03;Kiosk Ruch;Gazeta;-6.50;KONTO Direct - KD;NO CATEGORY",
        "2024-03-01;LIDL SP. Z O.O.;Płatność kartą;-45.20;KONTO Direct - KD;GROCERIES",
        "2024-03-02;Spółdzielnia Mieszkaniowa;Czynsz marzec;-650.00;KONTO Direct - KD;RENT"
    ]);

    let uncategorised = root.path().join("files").join("uncategorised");
    let contractors: serde_json::Value = serde_json::from_str(&fs::read_to_string(uncategorised.join("contractor.json"))?)?;
    let titles: serde_json::Value = serde_json::from_str(&fs::read_to_string(uncategorised.join("title.json"))?)?;

    assert_eq!(contractors, serde_json::json!({"Kiosk Ruch": "NO CATEGORY"}));
    assert_eq!(titles, serde_json::json!({"Gazeta": "NO CATEGORY"}));

    Ok(())
}

#[test]
fn test_cli_writes_log_files() -> Result<()> {
    let root = TempDir::new()?;
    let settings = write_settings(root.path())?;

    write_export(&root.path().join("files"), &[
        export_row("2024-03-01", "LIDL", "Zakupy", "-10,00", "KONTO Direct - KD")
    ])?;

    let output = run_binary(&settings)?;

    assert!(output.status.success());

    let logs = root.path().join("logs");
    let info_log = fs::read_to_string(logs.join("Task_ING_summary.log"))?;
    let debug_log = fs::read_to_string(logs.join("Task_ING_summary_all.log"))?;

    assert!(info_log.contains("Processing transaction file"));
    assert!(!info_log.contains("DEBUG"));
    assert!(debug_log.contains("DEBUG"));

    Ok(())
}

#[test]
fn test_cli_fails_without_transaction_file() -> Result<()> {
    let root = TempDir::new()?;
    let settings = write_settings(root.path())?;

    let output = run_binary(&settings)?;

    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr)?;

    assert!(stderr.contains("No transaction file with pattern 'lista_transakcji_nr_'"));

    Ok(())
}

#[test]
fn test_cli_reports_missing_columns() -> Result<()> {
    let root = TempDir::new()?;
    let settings = write_settings(root.path())?;
    let content = "Data transakcji;Konto\r\n2024-03-01;KONTO Direct - KD";

    fs::write(root.path().join("files").join("lista_transakcji_nr_7.csv"), content)?;

    let output = run_binary(&settings)?;

    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr)?;

    assert!(stderr.contains("Provided CSV file missed the following headers: Dane kontrahenta, Tytuł, Kwota transakcji (waluta rachunku)"));

    Ok(())
}
