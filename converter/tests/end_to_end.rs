//! Whole-file conversions: spreadsheet on disk to JSON on disk.

use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use varsheet::{convert, convert_and_report, ConvertError, ConvertOptions, LoadError};

fn brca1_workbook(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("variants.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    sheet.write_string(0, 0, "Gene").unwrap();
    sheet.write_string(0, 1, "Chr").unwrap();
    sheet.write_string(0, 2, "Pos").unwrap();

    sheet.write_string(1, 0, "BRCA1").unwrap();
    sheet.write_string(1, 1, "17").unwrap();
    sheet.write_number(1, 2, 100.0).unwrap();

    sheet.write_string(2, 0, "BRCA1").unwrap();
    sheet.write_string(2, 1, "17").unwrap();
    sheet.write_number(2, 2, 200.0).unwrap();

    sheet.write_string(3, 0, "").unwrap();
    sheet.write_string(3, 1, "1").unwrap();
    sheet.write_number(3, 2, 5.0).unwrap();

    workbook.save(&path).unwrap();
    path
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_groups_rows_and_drops_missing_gene() {
    let dir = tempdir().unwrap();
    let input = brca1_workbook(&dir);
    let output = dir.path().join("data.json");

    let summary = convert(&input, &output, &ConvertOptions::default()).unwrap();

    let expected = r#"{
    "BRCA1": {
        "fullName": "",
        "chromosome": "",
        "summary": "",
        "variants": [
            {
                "Chr": "17",
                "Pos": 100
            },
            {
                "Chr": "17",
                "Pos": 200
            }
        ]
    }
}"#;
    assert_eq!(fs::read_to_string(&output).unwrap(), expected);
    assert_eq!(summary.row_count, 3);
    assert_eq!(summary.gene_count, 1);
    assert_eq!(summary.variant_count, 2);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].row, 4);
}

#[test]
fn test_output_is_byte_identical_across_runs() {
    let dir = tempdir().unwrap();
    let input = brca1_workbook(&dir);
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    convert(&input, &first, &ConvertOptions::default()).unwrap();
    convert(&input, &second, &ConvertOptions::default()).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_dates_become_iso_strings_and_gaps_become_null() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("dated.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    for (col, name) in ["Gene", "Date of classification", "Reviewed", "PMID", "Curated by"]
        .iter()
        .enumerate()
    {
        sheet.write_string(0, col as u16, *name).unwrap();
    }

    let classified = ExcelDateTime::from_ymd(2023, 1, 5).unwrap();
    let reviewed = ExcelDateTime::from_ymd(2024, 6, 30)
        .unwrap()
        .and_hms(14, 5, 9)
        .unwrap();

    sheet.write_string(1, 0, "LDLR").unwrap();
    sheet.write_datetime_with_format(1, 1, &classified, &date_format).unwrap();
    sheet.write_datetime_with_format(1, 2, &reviewed, &datetime_format).unwrap();
    // column 3 left empty
    sheet.write_string(1, 4, "Müller").unwrap();

    sheet.write_string(2, 0, "LDLR").unwrap();
    sheet.write_string(2, 1, "N/A").unwrap();
    sheet.write_boolean(2, 2, true).unwrap();
    sheet.write_number(2, 3, 31_415_926.0).unwrap();
    sheet.write_number(2, 4, 0.5).unwrap();

    workbook.save(&input).unwrap();

    let output = dir.path().join("data.json");
    convert(&input, &output, &ConvertOptions::default()).unwrap();

    let raw = fs::read_to_string(&output).unwrap();
    assert!(raw.contains("Müller"), "non-ASCII text must not be escaped");

    assert_eq!(
        read_json(&output)["LDLR"]["variants"],
        json!([
            {
                "Date of classification": "2023-01-05T00:00:00",
                "Reviewed": "2024-06-30T14:05:09",
                "PMID": null,
                "Curated by": "Müller"
            },
            {
                "Date of classification": null,
                "Reviewed": true,
                "PMID": 31415926,
                "Curated by": 0.5
            }
        ])
    );
}

#[test]
fn test_header_below_title_rows_and_right_of_blank_column() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("offset.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    // Header at B3; column A and rows 1-2 stay empty.
    sheet.write_string(2, 1, "Gene").unwrap();
    sheet.write_string(2, 2, "Pos").unwrap();
    sheet.write_string(3, 1, "LDLR").unwrap();
    sheet.write_number(3, 2, 1.0).unwrap();
    sheet.write_number(4, 2, 2.0).unwrap();
    workbook.save(&input).unwrap();

    let output = dir.path().join("data.json");
    let summary = convert(&input, &output, &ConvertOptions::default()).unwrap();

    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].row, 5);
    assert_eq!(
        read_json(&output)["LDLR"]["variants"],
        json!([{"Unnamed: 0": null, "Pos": 1}])
    );
}

#[test]
fn test_time_and_duration_cells() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("times.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let time_format = Format::new().set_num_format("hh:mm");
    let duration_format = Format::new().set_num_format("[h]:mm:ss");

    sheet.write_string(0, 0, "Gene").unwrap();
    sheet.write_string(0, 1, "Time").unwrap();
    sheet.write_string(0, 2, "Elapsed").unwrap();
    sheet.write_string(1, 0, "APOB").unwrap();
    sheet.write_number_with_format(1, 1, 0.5, &time_format).unwrap();
    sheet.write_number_with_format(1, 2, 1.5, &duration_format).unwrap();
    workbook.save(&input).unwrap();

    let output = dir.path().join("data.json");
    convert(&input, &output, &ConvertOptions::default()).unwrap();

    assert_eq!(
        read_json(&output)["APOB"]["variants"],
        json!([{"Time": "12:00:00", "Elapsed": "PT129600S"}])
    );
}

#[test]
fn test_missing_gene_column_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = brca1_workbook(&dir);
    let output = dir.path().join("data.json");
    fs::write(&output, "previous").unwrap();

    let options = ConvertOptions::default().with_gene_column("Symbol");
    let err = convert(&input, &output, &options).unwrap_err();

    match err {
        ConvertError::MissingGroupColumn { column, available } => {
            assert_eq!(column, "Symbol");
            assert_eq!(available, vec!["Gene", "Chr", "Pos"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
}

#[test]
fn test_missing_input_is_reported_not_raised() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("absent.xlsx");
    let output = dir.path().join("data.json");

    let err = convert(&input, &output, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::Load(LoadError::NotFound { .. })));

    assert!(!convert_and_report(&input, &output, &ConvertOptions::default()));
    assert!(!output.exists());
}

#[test]
fn test_corrupt_workbook_is_unreadable() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.xlsx");
    fs::write(&input, b"this is not a zip archive").unwrap();
    let output = dir.path().join("data.json");

    let err = convert(&input, &output, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::Load(LoadError::Unreadable { .. })));
    assert!(!output.exists());
}

#[test]
fn test_sheet_selection() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("two_sheets.xlsx");

    let mut workbook = Workbook::new();
    let notes = workbook.add_worksheet();
    notes.set_name("Notes").unwrap();
    notes.write_string(0, 0, "Comment").unwrap();

    let curated = workbook.add_worksheet();
    curated.set_name("Curated").unwrap();
    curated.write_string(0, 0, "Gene").unwrap();
    curated.write_string(0, 1, "c.").unwrap();
    curated.write_string(1, 0, "PCSK9").unwrap();
    curated.write_string(1, 1, "c.94G>A").unwrap();
    workbook.save(&input).unwrap();

    let output = dir.path().join("data.json");

    let err = convert(&input, &output, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::MissingGroupColumn { .. }));

    let options = ConvertOptions::default().with_sheet("Curated");
    convert(&input, &output, &options).unwrap();
    assert_eq!(read_json(&output)["PCSK9"]["variants"][0]["c."], "c.94G>A");

    let options = ConvertOptions::default().with_sheet("Missing");
    let err = convert(&input, &output, &options).unwrap_err();
    match err {
        ConvertError::Load(LoadError::UnknownSheet { available, .. }) => {
            assert_eq!(available, vec!["Notes", "Curated"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_csv_input_with_custom_column() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("variants.csv");
    fs::write(
        &input,
        "Symbol;c.;Has functional study?;PMID\n\
         APOB;c.10580G>A;TRUE;12345\n\
         0;c.1A>G;FALSE;1\n\
         APOB;c.3383G>A;NA;\n\
         LDLR;c.68-2A>G;false;2.5\n",
    )
    .unwrap();
    let output = dir.path().join("data.json");

    let options = ConvertOptions::default().with_gene_column("Symbol").with_indent(2);
    let summary = convert(&input, &output, &options).unwrap();

    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(
        read_json(&output),
        json!({
            "APOB": {
                "fullName": "",
                "chromosome": "",
                "summary": "",
                "variants": [
                    {"c.": "c.10580G>A", "Has functional study?": true, "PMID": 12345},
                    {"c.": "c.3383G>A", "Has functional study?": null, "PMID": null}
                ]
            },
            "LDLR": {
                "fullName": "",
                "chromosome": "",
                "summary": "",
                "variants": [
                    {"c.": "c.68-2A>G", "Has functional study?": false, "PMID": 2.5}
                ]
            }
        })
    );

    let raw = fs::read_to_string(&output).unwrap();
    assert!(raw.starts_with("{\n  \"APOB\""));
    let apob = raw.find("\"APOB\"").unwrap();
    let ldlr = raw.find("\"LDLR\"").unwrap();
    assert!(apob < ldlr);
}

#[test]
fn test_unwritable_output_is_reported() {
    let dir = tempdir().unwrap();
    let input = brca1_workbook(&dir);
    let output = dir.path().join("no_such_dir").join("data.json");

    let err = convert(&input, &output, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::OutputWrite { .. }));
    assert!(!convert_and_report(&input, &output, &ConvertOptions::default()));
}
