use std::io::Cursor;
use std::time::{Duration, UNIX_EPOCH};

use crate::base::*;
use crate::logging::{builder, CurveLogReader};
use crate::serialization::CurveSnapshot;
use crate::st::DecayCurve;
use crate::tests::util::*;

fn curve_with(times: &[i64]) -> DecayCurve {
    let mut curve = DecayCurve::new(settings(0.0, 500.0, 100, 1)).unwrap();
    curve.fold(&batch(CHAN, times)).unwrap();
    curve
}

#[test]
fn written_log_reads_back() {
    let base = UNIX_EPOCH + Duration::from_secs(1_000);
    let mut writer = builder()
        .base_time(base)
        .write_format_version()
        .write_legend()
        .sink(Vec::<u8>::new())
        .build()
        .unwrap();

    let mut first = curve_with(&[1, 2, 3]);
    first.meta_data.set_tag_string("donor".to_string());
    let second = curve_with(&[100, 200, 300, 400]);

    succ!(writer.log_with_start_end(&first, base + Duration::from_millis(1500), base + Duration::from_secs(4)));
    succ!(writer.log_with_start_end(&second, base + Duration::from_secs(4), base + Duration::from_secs(5)));
    let log = writer.into_inner();

    let mut reader = CurveLogReader::<_, u64>::new(Cursor::new(log));
    let entry = reader.next().unwrap().unwrap();
    assert_eq!(Some(1000.0), reader.base_time());
    assert_eq!(Some("donor".to_string()), entry.tag);
    assert_approx_eq!(entry.start_timestamp, 1.5, 1e-9);
    assert_approx_eq!(entry.interval_length, 2.5, 1e-9);
    assert_eq!(3, entry.total_count);
    match entry.snapshot() {
        Ok(snapshot) => assert_eq!(&CurveSnapshot::of(&first), snapshot),
        Err(e) => panic!("{}", e),
    }

    let entry = reader.next().unwrap().unwrap();
    assert_eq!(None, entry.tag);
    assert_eq!(4, entry.total_count);
    assert!(entry.snapshot().is_ok());

    assert!(reader.next().is_none());
}

#[test]
fn tag_with_delimiters_is_refused() {
    let mut writer = builder().sink(Vec::<u8>::new()).build().unwrap();
    let mut curve = curve_with(&[1]);
    curve.meta_data.set_tag_string("two words".to_string());

    match writer.log(&curve) {
        Err(LoggingError::TagHasDelimiters) => {}
        other => panic!("unexpected {:?}", other.map(|_| ())),
    }
}

#[test]
fn header_carries_start_time() {
    let start = UNIX_EPOCH + Duration::from_secs(42);
    let writer = builder().write_start_time(start).header_comment("run 7").sink(Vec::<u8>::new()).build().unwrap();
    let text = String::from_utf8(writer.into_inner()).unwrap();
    assert!(text.starts_with("#run 7\n"));

    let mut reader = CurveLogReader::<_, u64>::new(Cursor::new(text.into_bytes()));
    assert!(reader.next().is_none());
    assert_eq!(Some(42.0), reader.start_time());
}

#[test]
fn full_header_precedes_entries() {
    let base = UNIX_EPOCH + Duration::from_secs(7);
    let mut writer = builder()
        .sink(Vec::<u8>::new())
        .base_time(base)
        .header_comment("bench")
        .build_with_header()
        .unwrap();
    writer.log_with_start_end(&curve_with(&[10]), base, base + Duration::from_secs(1)).unwrap();
    let text = String::from_utf8(writer.into_inner()).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(6, lines.len());
    assert_eq!("#bench", lines[0]);
    assert_eq!("#[Decay curve log format version 1.0]", lines[1]);
    assert!(lines[2].starts_with("#[StartTime: "));
    assert_eq!("#[BaseTime: 7.000 (seconds since epoch)]", lines[3]);
    assert!(lines[4].starts_with("\"StartTimestamp\""));
    assert!(lines[5].starts_with("0.000,1.000,1,"));
}

#[test]
fn malformed_line_is_reported() {
    let mut reader = CurveLogReader::<_, u64>::new(Cursor::new(b"1.0,abc\n".to_vec()));
    match reader.next() {
        Some(Err(LogReadError::MalformedLine(line))) => assert_eq!("1.0,abc", line),
        _ => panic!("expected a malformed line"),
    }
}

#[test]
fn corrupt_payload_surfaces_lazily() {
    let mut reader = CurveLogReader::<_, u64>::new(Cursor::new(b"0.000,1.000,3,!!notbase64\n".to_vec()));
    let entry = reader.next().unwrap().unwrap();
    assert_eq!(3, entry.total_count);
    assert!(entry.snapshot().is_err());
}
