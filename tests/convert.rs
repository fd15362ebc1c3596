//! End-to-end conversion tests.
//!
//! Workbooks are written to temporary directories as .twb files or packed
//! into .twbx archives, then run through the public API.

use chrono::NaiveDate;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use twp::render::{ReportOptions, LINE_BIG};
use twp::{convert_with_options, parse_file, ConnectionField, Error};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const SALES_WORKBOOK: &str = r#"<?xml version='1.0' encoding='utf-8' ?>
<workbook source-build='2021.4.0' source-platform='win' version='18.1'>
  <datasources>
    <datasource hasconnection='false' inline='true' name='Parameters' version='18.1'>
      <aliases enabled='yes' />
    </datasource>
    <datasource caption='OrdersDB' inline='true' name='ds1' version='18.1'>
      <connection class='federated'>
        <named-connections>
          <named-connection caption='sf1' name='snowflake.0abc'>
            <connection class='snowflake' dbname='ORD' schema='PUBLIC' server='sf1' username='alice' warehouse='WH' />
          </named-connection>
        </named-connections>
        <relation connection='ds1' name='CustomQuery' type='text'>SELECT * FROM t WHERE x &lt;&lt;5&gt;&gt;</relation>
      </connection>
    </datasource>
  </datasources>
  <worksheets>
    <worksheet name='Sales'>
      <table>
        <view>
          <datasources>
            <datasource caption='OrdersDB' name='ds1' />
          </datasources>
        </view>
      </table>
    </worksheet>
  </worksheets>
</workbook>
"#;

fn fixed_options() -> ReportOptions {
    ReportOptions::new().with_author("alice").with_created_on(
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap(),
    )
}

fn write_twb(dir: &TempDir, name: &str, xml: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, xml).unwrap();
    path
}

fn write_twbx(dir: &TempDir, name: &str, entries: &[(&str, &str)]) -> PathBuf {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = SimpleFileOptions::default();
        for (entry, content) in entries {
            zip.start_file(*entry, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
    let path = dir.path().join(name);
    fs::write(&path, buffer).unwrap();
    path
}

fn expected_sales_report(source: &Path) -> String {
    let rule = "-".repeat(LINE_BIG);
    let mut expected = String::new();
    expected.push_str(&format!(
        "{rule}\n-- Created by: alice\n-- Created on: 2024-03-05 09:30AM\n-- Source: {}\n{rule}\n\n\n",
        source.display()
    ));
    expected.push_str(&format!("-- Worksheets w/ Datasources {}\n", "-".repeat(48)));
    expected.push_str("-- Sales\n  -- OrdersDB\n\n\n\n");
    expected.push_str(&format!("-- Datasources & Connections {}\n", "-".repeat(48)));
    expected.push_str(
        "-- ds1\n  -- Source name: ds1\n  -- Source caption: OrdersDB\n  -- Server: sf1\n  -- Username: alice\n  -- Engine: snowflake\n  -- Database: ORD\n  -- Schema: PUBLIC\n\n\n",
    );
    expected.push_str(&format!("-- Queries {}\n", "-".repeat(66)));
    expected.push_str(&format!("-- CustomQuery {}\n", "-".repeat(35)));
    expected.push_str(" -- Connection: ds1\nSELECT * FROM t WHERE x <5>\n;\n\n\n");
    expected
}

#[test]
fn test_sales_report_twb() {
    let dir = TempDir::new().unwrap();
    let path = write_twb(&dir, "sales.twb", SALES_WORKBOOK);

    let report = convert_with_options(&path, &fixed_options()).unwrap();
    assert_eq!(report, expected_sales_report(&path));
}

#[test]
fn test_sales_report_twbx_matches_twb() {
    let dir = TempDir::new().unwrap();
    let twb = write_twb(&dir, "sales.twb", SALES_WORKBOOK);
    let twbx = write_twbx(
        &dir,
        "sales.twbx",
        &[
            ("Data/Extracts/orders.hyper", "not xml"),
            ("sales.twb", SALES_WORKBOOK),
        ],
    );

    let from_twb = convert_with_options(&twb, &fixed_options()).unwrap();
    let from_twbx = convert_with_options(&twbx, &fixed_options()).unwrap();

    // Only the source line differs
    let strip_source = |s: &str| {
        s.lines()
            .filter(|l| !l.starts_with("-- Source: "))
            .collect::<Vec<_>>()
            .join("\n")
    };
    assert_eq!(strip_source(&from_twb), strip_source(&from_twbx));
    assert!(from_twbx.contains(&format!("-- Source: {}\n", twbx.display())));
}

#[test]
fn test_output_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let path = write_twb(&dir, "sales.twb", SALES_WORKBOOK);

    let first = convert_with_options(&path, &fixed_options()).unwrap();
    let second = convert_with_options(&path, &fixed_options()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_default_options_stamp_header() {
    let dir = TempDir::new().unwrap();
    let path = write_twb(&dir, "sales.twb", SALES_WORKBOOK);

    let report = twp::convert(&path).unwrap();
    let lines: Vec<_> = report.lines().collect();
    assert!(lines[1].starts_with("-- Created by: "));
    assert!(lines[2].starts_with("-- Created on: "));
    assert!(lines[2].ends_with("AM") || lines[2].ends_with("PM"));
}

#[test]
fn test_unsupported_extension_fails_before_reading() {
    let dir = TempDir::new().unwrap();
    let path = write_twb(&dir, "sales.csv", SALES_WORKBOOK);

    let err = twp::convert(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(ref p) if p == &path));
}

#[test]
fn test_uppercase_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_twb(&dir, "sales.TWB", SALES_WORKBOOK);
    assert!(matches!(parse_file(&path), Err(Error::InvalidInput(_))));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nowhere.twb");
    assert!(matches!(parse_file(&path), Err(Error::InvalidInput(_))));
}

#[test]
fn test_twbx_without_workbook_member() {
    let dir = TempDir::new().unwrap();
    let path = write_twbx(&dir, "assets.twbx", &[("Image/logo.png", "png")]);

    let err = parse_file(&path).unwrap_err();
    assert!(matches!(err, Error::MalformedDocument(_)), "got {err:?}");
}

#[test]
fn test_corrupt_twbx() {
    let dir = TempDir::new().unwrap();
    let path = write_twb(&dir, "broken.twbx", "definitely not a zip");
    assert!(matches!(parse_file(&path), Err(Error::ZipArchive(_))));
}

#[test]
fn test_malformed_xml() {
    let dir = TempDir::new().unwrap();
    let path = write_twb(&dir, "broken.twb", "<workbook><worksheets></datasources></workbook>");
    assert!(matches!(parse_file(&path), Err(Error::MalformedDocument(_))));
}

#[test]
fn test_invalid_utf8_workbook_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("latin1.twb");
    fs::write(
        &path,
        b"<workbook><worksheets><worksheet name='Caf\xe9'/></worksheets></workbook>",
    )
    .unwrap();

    assert!(matches!(parse_file(&path), Err(Error::MalformedDocument(_))));
}

#[test]
fn test_table_relation_with_columns_keeps_whitespace_text() {
    let xml = "<workbook><datasources><datasource caption='DB' name='db'>\
<relation connection='c' name='orders' table='[dbo].[orders]' type='table'>\n    <columns/>\n  </relation>\
</datasource></datasources></workbook>";

    let dir = TempDir::new().unwrap();
    let path = write_twb(&dir, "columns.twb", xml);
    let report = convert_with_options(&path, &fixed_options()).unwrap();

    assert!(report.ends_with(" -- Connection: c\n\n    \n;\n\n\n"));
}

#[test]
fn test_records_from_realistic_workbook() {
    let xml = r#"<?xml version='1.0' encoding='utf-8' ?>
<workbook version='18.1'>
  <datasources>
    <datasource caption='Excel Sheet' name='xl.1'>
      <connection class='excel-direct' filename='orders.xlsx'>
        <relation connection='excel-direct.1' name='Orders' table='[Orders$]' type='table' />
      </connection>
    </datasource>
    <datasource caption='Warehouse' name='sf.2'>
      <connection class='federated'>
        <named-connections>
          <named-connection name='snowflake.1'>
            <connection class='snowflake' server='acme.snowflakecomputing.com' />
          </named-connection>
        </named-connections>
        <relation join='left' type='join'>
          <clause type='join' />
          <relation connection='snowflake.1' name='ORDERS' table='[PUBLIC].[ORDERS]' type='table' />
          <relation connection='snowflake.1' name='Custom SQL Query' type='text'>SELECT id&#13;&#10;FROM returns&#13;&#10;WHERE qty &lt;&lt;&gt;&gt; 0</relation>
        </relation>
      </connection>
    </datasource>
  </datasources>
</workbook>"#;

    let dir = TempDir::new().unwrap();
    let path = write_twb(&dir, "mixed.twb", xml);
    let wb = parse_file(&path).unwrap();

    assert!(wb.worksheets.is_empty());

    let excel = &wb.datasources[&Some("xl.1".to_string())];
    assert!(!excel.has_connection());
    assert_eq!(excel.database.to_string(), "No snowflake connection");

    let warehouse = &wb.datasources[&Some("sf.2".to_string())];
    assert_eq!(
        warehouse.server,
        ConnectionField::Value("acme.snowflakecomputing.com".into())
    );
    assert_eq!(warehouse.user, ConnectionField::Missing);
    assert_eq!(warehouse.user.to_string(), "None");

    let keys: Vec<_> = wb.queries.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Orders", "ORDERS", "Custom SQL Query"]);
    assert_eq!(wb.queries["Orders"].query_text, "-- LINKED TO: [Orders$]");
    assert_eq!(
        wb.queries["Custom SQL Query"].query_text,
        "SELECT id\nFROM returns\nWHERE qty <> 0"
    );
}

#[test]
fn test_parse_bytes_twbx() {
    let dir = TempDir::new().unwrap();
    let path = write_twbx(&dir, "sales.twbx", &[("sales.twb", SALES_WORKBOOK)]);

    let data = fs::read(&path).unwrap();
    let wb = twp::parse_bytes(&data).unwrap();
    assert_eq!(wb.worksheets["Sales"].datasource_captions, vec!["OrdersDB"]);
}

#[test]
fn test_json_output() {
    let dir = TempDir::new().unwrap();
    let path = write_twb(&dir, "sales.twb", SALES_WORKBOOK);
    let wb = parse_file(&path).unwrap();

    let json = twp::render::to_json(&wb, twp::render::JsonFormat::Pretty).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["datasources"][0]["database"], "ORD");
    assert_eq!(value["queries"][0]["query_text"], "SELECT * FROM t WHERE x <5>");
}
