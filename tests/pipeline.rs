use std::fs;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use serde_json::{Value, json};
use tempfile::tempdir;
use timetable_tools::catalog::ModuleCatalog;
use timetable_tools::consolidate::ConsolidateOptions;
use timetable_tools::grid::ExtractConfig;
use timetable_tools::io::csv_grid;
use timetable_tools::sync::{self, RunSummary};
use timetable_tools::ToolError;

fn write_timetable(path: &Path) {
    let mut workbook = Workbook::new();
    let merged = Format::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Semester 2").expect("sheet named");

    sheet
        .write_string(0, 0, "BIUST - Semester 2 Timetable")
        .expect("title written");
    for (col, header) in ["Time", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
        .into_iter()
        .enumerate()
    {
        sheet
            .write_string(1, col as u16, header)
            .expect("header written");
    }

    sheet
        .merge_range(2, 0, 2, 5, "BIUST - AUDITORIUM", &merged)
        .expect("venue merged");
    sheet.write_string(3, 0, "0800-0850").expect("slot written");
    sheet.write_string(4, 0, "0850-0940").expect("slot written");
    sheet.write_string(5, 0, "0940-1030").expect("slot written");
    sheet
        .merge_range(3, 1, 4, 1, "MATH 101 Lecture Group A", &merged)
        .expect("lecture merged");
    sheet.write_string(3, 2, "CHEM 101 Lab").expect("cell written");
    sheet.write_string(4, 2, "CHEM 101 Lab").expect("cell written");
    sheet
        .write_string(5, 3, "MATH 101 Lecture Group B")
        .expect("cell written");

    sheet
        .merge_range(6, 0, 6, 5, "BIUST - LAB 2", &merged)
        .expect("venue merged");
    sheet.write_string(7, 0, "0800-0850").expect("slot written");
    sheet.write_string(7, 5, "CHEM 101 Lab").expect("cell written");
    sheet.write_string(8, 0, "9am-10am").expect("slot written");
    sheet.write_string(8, 4, "MATH 101 Makeup").expect("cell written");

    workbook.save(path).expect("workbook saved");
}

fn config() -> ExtractConfig {
    ExtractConfig::new(ModuleCatalog::from_codes(["MATH 101", "CHEM 101", "PHYS 101"]))
}

fn expected_schedule() -> Value {
    json!({
        "Module Schedules": {
            "CHEM 101": [
                {
                    "location": "BIUST - AUDITORIUM",
                    "day": "Tuesday",
                    "time": "0800-0940",
                    "class": "CHEM 101 Lab"
                },
                {
                    "location": "BIUST - LAB 2",
                    "day": "Friday",
                    "time": "0800-0850",
                    "class": "CHEM 101 Lab"
                }
            ],
            "MATH 101": [
                {
                    "location": "BIUST - AUDITORIUM",
                    "day": "Monday",
                    "time": "0800-0940",
                    "class": "MATH 101 Lecture Group A"
                },
                {
                    "location": "BIUST - AUDITORIUM",
                    "day": "Wednesday",
                    "time": "0940-1030",
                    "class": "MATH 101 Lecture Group B"
                }
            ]
        }
    })
}

fn read_json(path: &Path) -> Value {
    let written = fs::read_to_string(path).expect("schedule read");
    serde_json::from_str(&written).expect("schedule parsed")
}

#[test]
fn excel_timetable_becomes_consolidated_schedule() {
    let dir = tempdir().expect("temporary directory");
    let xlsx_path = dir.path().join("timetable.xlsx");
    let json_path = dir.path().join("schedule.json");
    write_timetable(&xlsx_path);

    let summary = sync::excel_to_schedule(
        &xlsx_path,
        &json_path,
        None,
        &config(),
        &ConsolidateOptions::default(),
    )
    .expect("schedule built");

    assert_eq!(
        summary,
        RunSummary {
            modules: 2,
            sessions: 4,
            observations: 7,
            malformed: 1,
        }
    );
    assert_eq!(read_json(&json_path), expected_schedule());
}

#[test]
fn csv_conversion_flattens_merges_and_feeds_the_same_pipeline() {
    let dir = tempdir().expect("temporary directory");
    let xlsx_path = dir.path().join("timetable.xlsx");
    let csv_path = dir.path().join("timetable.csv");
    let json_path = dir.path().join("schedule.json");
    write_timetable(&xlsx_path);

    let rows = sync::excel_to_csv(&xlsx_path, &csv_path, Some("Semester 2")).expect("converted");
    assert_eq!(rows, 9);

    let grid = csv_grid::read_csv_grid(&csv_path).expect("CSV read");
    assert_eq!(grid.cell(4, 1), "MATH 101 Lecture Group A");
    assert_eq!(grid.cell(6, 5), "BIUST - LAB 2");

    sync::csv_to_schedule(&csv_path, &json_path, &config(), &ConsolidateOptions::default())
        .expect("schedule built");
    assert_eq!(read_json(&json_path), expected_schedule());
}

#[test]
fn missing_sheet_is_reported() {
    let dir = tempdir().expect("temporary directory");
    let xlsx_path = dir.path().join("timetable.xlsx");
    write_timetable(&xlsx_path);

    let error = sync::excel_to_csv(&xlsx_path, &dir.path().join("out.csv"), Some("Semester 9"))
        .expect_err("sheet does not exist");
    assert!(matches!(error, ToolError::InvalidWorkbook(_)));
}

#[test]
fn uncombined_document_is_merged_and_stays_stable() {
    let dir = tempdir().expect("temporary directory");
    let input_path = dir.path().join("uncombined.json");
    let first_path = dir.path().join("combined.json");
    let second_path = dir.path().join("recombined.json");

    let uncombined = json!({
        "ALSS 101": [
            {"location": "BIUST - AUDITORIUM", "day": "Monday", "time": "1000-1050", "details": "ALSS 101 Lecture Group A"},
            {"location": "BIUST - AUDITORIUM", "day": "Monday", "time": "0900-0950", "details": "ALSS 101 Lecture Group A"},
            {"location": "BIUST - AUDITORIUM", "day": "Monday", "time": "0950-1000", "details": "ALSS 101 Lecture Group A"},
            {"location": "BIUST - AUDITORIUM", "day": "Monday", "time": "1000-1050", "details": "ALSS 101 Tutorial Group K"},
            {"location": "BIUST - AUDITORIUM", "day": "Friday", "time": "1600-1650", "details": "ALSS 101 Tutorial Group E"},
            {"location": "BIUST - AUDITORIUM", "day": "Friday", "time": "1600-1650", "details": "ALSS 101 Tutorial Group E"}
        ],
        "STAT 202": [
            {"location": "BIUST - LAB 1", "day": "Thursday", "time": "later", "details": "STAT 202 Lab"}
        ]
    });
    fs::write(&input_path, serde_json::to_string_pretty(&uncombined).expect("serialized"))
        .expect("input written");

    let options = ConsolidateOptions::default();
    let summary = sync::consolidate_document(&input_path, &first_path, &options).expect("merged");
    assert_eq!(summary.modules, 1);
    assert_eq!(summary.sessions, 3);
    assert_eq!(summary.observations, 7);
    assert_eq!(summary.malformed, 1);

    let combined = read_json(&first_path);
    assert_eq!(
        combined,
        json!({
            "Module Schedules": {
                "ALSS 101": [
                    {"location": "BIUST - AUDITORIUM", "day": "Monday", "time": "0900-1050", "class": "ALSS 101 Lecture Group A"},
                    {"location": "BIUST - AUDITORIUM", "day": "Monday", "time": "1000-1050", "class": "ALSS 101 Tutorial Group K"},
                    {"location": "BIUST - AUDITORIUM", "day": "Friday", "time": "1600-1650", "class": "ALSS 101 Tutorial Group E"}
                ]
            }
        })
    );

    sync::consolidate_document(&first_path, &second_path, &options).expect("re-merged");
    assert_eq!(read_json(&second_path), combined);
}
