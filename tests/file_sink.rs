mod helpers;
use helpers::*;

use std::fs;

use time::macros::date;
use tracelog::{Error, ErrorKind, Logger};

#[test]
fn daily_file_is_shared_and_appended() -> tracelog::Result<()> {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("logs");
    let day = date!(2024 - 06 - 15);

    let first = Logger::builder()
        .dir(&dir)
        .date(day)
        .format("${traceCode} ${value}")
        .trace_code("one")
        .build();
    first.log_info("a")?;

    let second = Logger::builder()
        .dir(&dir)
        .date(day)
        .format("${traceCode} ${value}")
        .trace_code("two")
        .build();
    assert_eq!(first.file_path(), second.file_path());
    second.log_info("b")?;
    first.log_info("c")?;

    let text = fs::read_to_string(dir.join("20240615.log")).unwrap();
    assert_eq!(text, "one a\ntwo b\none c\n");
    Ok(())
}

#[test]
fn n_calls_give_n_lines_in_order() -> tracelog::Result<()> {
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("app.log");
    let lg = Logger::builder().file(&p).format("${counter}:${value}").build();

    for i in 0..20 {
        lg.log_info(&format!("line {i}"))?;
    }
    // a new logger, as after a restart, keeps appending
    let again = Logger::builder().file(&p).format("${counter}:${value}").build();
    again.log_info("restarted")?;

    let lines: Vec<String> = fs::read_to_string(&p)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect();
    assert_eq!(lines.len(), 21);
    assert_eq!(lines[0], "0000:line 0");
    assert_eq!(lines[19], "0019:line 19");
    assert_eq!(lines[20], "0000:restarted");
    Ok(())
}

#[test]
fn missing_file_without_create_is_a_configuration_error() {
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("nope").join("app.log");
    let lg = Logger::builder().file(&p).create_if_missing(false).build();

    let err = lg.log_info("lost").unwrap_err();
    assert!(matches!(err, Error::MissingFile { .. }), "{err}");
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(!p.exists());
    assert!(!p.parent().unwrap().exists());
}

#[test]
fn existing_file_without_create_is_appended() -> tracelog::Result<()> {
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("app.log");
    fs::write(&p, "kept\n").unwrap();

    let lg = Logger::builder()
        .file(&p)
        .create_if_missing(false)
        .format("${value}")
        .build();
    lg.log_warning("new")?;

    assert_eq!(fs::read_to_string(&p).unwrap(), "kept\nnew\n");
    Ok(())
}

#[test]
fn directory_in_the_way_is_an_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    // the target path is itself a directory, so open fails
    let lg = Logger::builder().file(tmp.path()).build();
    let err = lg.log_error("x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io, "{err}");
    assert_eq!(lg.counter(), 1, "a rendered line consumes its number");
}

#[test]
fn console_and_file_get_the_same_line() -> tracelog::Result<()> {
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("both.log");
    let (b, buf) = mem_logger();
    let lg = b.file(&p).sync(true).build();

    lg.log_info("same")?;

    let file = fs::read_to_string(&p).unwrap();
    assert_eq!(file.lines().collect::<Vec<_>>(), lines_from(&buf));
    Ok(())
}

#[test]
#[should_panic(expected = "does not exist")]
fn fatal_mode_panics() {
    let tmp = tempfile::tempdir().unwrap();
    let lg = Logger::builder()
        .file(tmp.path().join("absent.log"))
        .create_if_missing(false)
        .fatal(true)
        .build();
    let _ = lg.log_info("boom");
}
