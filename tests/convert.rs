// tests/convert.rs
use std::fs;
use std::path::PathBuf;

use panjika_scrape::file::convert_json_to_csv;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("panjika_convert_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

#[test]
fn camel_json_converts_with_camel_headers() {
    let dir = tmp_dir("camel");
    let input = dir.join("bengali_months_2020-2020.json");
    fs::write(
        &input,
        r#"[
          {"monthName": "Magh", "startingDate": "15-01-2020", "endingDate": "13-02-2020"},
          {"monthName": "Falgun", "startingDate": "14-02-2020", "endingDate": "not a date"}
        ]"#,
    )
    .unwrap();
    let output = dir.join("out.csv");

    let written = convert_json_to_csv(&input, Some(&output)).unwrap();
    assert_eq!(written, output);

    let csv = fs::read_to_string(&output).unwrap();
    assert_eq!(
        csv,
        "monthName,startingDate,endingDate\nMagh,15-jan-2020,13-feb-2020\nFalgun,14-feb-2020,not a date\n"
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn snake_json_keeps_snake_headers() {
    let dir = tmp_dir("snake");
    let input = dir.join("in.json");
    fs::write(
        &input,
        r#"[{"month_name": "Magh", "starting_date": "15/01/2020", "ending_date": "13/02/2020"}]"#,
    )
    .unwrap();
    let output = dir.join("nested").join("in.csv");

    convert_json_to_csv(&input, Some(&output)).unwrap();
    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("month_name,starting_date,ending_date\n"));
    assert!(csv.contains("Magh,15-jan-2020,13-feb-2020"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn malformed_json_is_an_error() {
    let dir = tmp_dir("bad");
    let input = dir.join("bad.json");
    fs::write(&input, "{ not json").unwrap();
    assert!(convert_json_to_csv(&input, Some(&dir.join("x.csv"))).is_err());
    let _ = fs::remove_dir_all(&dir);
}
