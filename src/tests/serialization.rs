use bytes::{Buf, BufMut, BytesMut};

use crate::base::*;
use crate::serialization::{CurveSnapshot, SerializableCurve};
use crate::st::DecayCurve;
use crate::tests::util::*;

fn populated_curve() -> DecayCurve {
    let mut curve = DecayCurve::new(settings(-20.0, 1000.0, 400, 4)).unwrap();
    let mut times: Vec<i64> = (0..2000).map(|i| (i * 37) % 1100 - 30).collect();
    times.sort();
    curve.fold(&batch(CHAN, &times)).unwrap();
    curve
}

#[test]
fn snapshot_restores_session() {
    let curve = populated_curve();
    let serialized = curve.serialize().unwrap();
    let snapshot = CurveSnapshot::<u64>::deserialize_from(&mut serialized.freeze()).unwrap();

    assert_eq!(CurveSnapshot::of(&curve), snapshot);

    let restored = DecayCurve::from_snapshot(curve.settings().clone(), snapshot).unwrap();
    assert!(curve == restored);
    assert_eq!(curve.project().unwrap(), restored.project().unwrap());
}

#[test]
fn compressed_snapshot_restores_session() {
    let curve = populated_curve();
    let plain = curve.serialize().unwrap();
    let compressed = curve.serialize_compressed().unwrap();

    let snapshot = CurveSnapshot::<u64>::deserialize_from(&mut compressed.freeze()).unwrap();

    assert_eq!(CurveSnapshot::of(&curve), snapshot);
    assert!(plain.len() > 0);
}

#[test]
fn restored_session_keeps_folding() {
    let mut curve = populated_curve();
    let snapshot = CurveSnapshot::<u64>::deserialize_from(&mut curve.serialize().unwrap().freeze()).unwrap();
    let mut restored = DecayCurve::from_snapshot(curve.settings().clone(), snapshot).unwrap();

    let more = batch(CHAN, &[1, 2, 3, 500]);
    curve.fold(&more).unwrap();
    restored.fold(&more).unwrap();

    assert_eq!(curve.counts(), restored.counts());
    assert_eq!(curve.edges(), restored.edges());
}

#[test]
fn empty_bins_are_run_length_folded() {
    let mut curve = DecayCurve::<u64>::new(settings(0.0, 10000.0, 20000, 1)).unwrap();
    curve.fold(&batch(CHAN, &[5000])).unwrap();
    let serialized = curve.serialize().unwrap();

    // 10001 edges take one byte each, the counts only three varints
    assert!(serialized.len() < 10001 + 32, "{} bytes", serialized.len());
}

#[test]
fn uninitialized_curve_cannot_be_serialized() {
    let curve = DecayCurve::<u64>::new(settings(0.0, 10.0, 20, 1)).unwrap();
    assert_eq!(Err(SerializationError::Uninitialized), curve.serialize().map(|_| ()));
}

#[test]
fn truncated_snapshot_is_rejected() {
    let curve = populated_curve();
    let serialized = curve.serialize().unwrap();
    let mut cut = serialized.freeze().slice(0..20);
    assert_eq!(
        Err(DeserializationError::Truncated),
        CurveSnapshot::<u64>::deserialize_from(&mut cut)
    );
}

#[test]
fn unknown_cookie_is_rejected() {
    let mut buf = BytesMut::new();
    buf.put_u32(0xdead_beef);
    buf.put_u32(0);
    assert_eq!(
        Err(DeserializationError::UnknownCookie(0xdead_beef)),
        CurveSnapshot::<u64>::deserialize_from(&mut buf.freeze())
    );
}

#[test]
fn counts_too_wide_for_counter_are_rejected() {
    let mut curve = DecayCurve::<u64>::new(settings(0.0, 10.0, 20, 1)).unwrap();
    curve.fold(&batch(CHAN, &vec![1_i64; 70000])).unwrap();
    let serialized = curve.serialize().unwrap();

    assert_eq!(
        Err(DeserializationError::CountExceedsTypeMax),
        CurveSnapshot::<u16>::deserialize_from(&mut serialized.freeze())
    );
}

#[test]
fn snapshot_over_ceiling_is_refused() {
    let curve = populated_curve();
    let snapshot = CurveSnapshot::of(&curve);
    let edges = snapshot.edges.len();
    let mut narrow = curve.settings().clone();
    narrow.max_num_histogram_bins = 10;

    let res = DecayCurve::from_snapshot(narrow, snapshot).map(|_| ());
    assert_eq!(Err(DeserializationError::ExceedsEdgeCeiling { edges, max_edges: 10 }), res);
}

#[test]
fn snapshot_from_another_range_is_refused() {
    let curve = populated_curve();
    let snapshot = CurveSnapshot::of(&curve);
    let (first, last) = (snapshot.edges[0], *snapshot.edges.last().unwrap());

    let shifted = settings(0.0, 1000.0, 400, 4);
    let res = DecayCurve::from_snapshot(shifted, snapshot.clone()).map(|_| ());
    assert_eq!(Err(DeserializationError::EdgesOutsideRange { first, last }), res);

    let shrunk = settings(-20.0, 500.0, 400, 4);
    let res = DecayCurve::from_snapshot(shrunk, snapshot).map(|_| ());
    assert_eq!(Err(DeserializationError::EdgesOutsideRange { first, last }), res);
}

#[test]
fn reader_stops_after_one_snapshot() {
    let curve = populated_curve();
    let mut buf = BytesMut::new();
    curve.serialize_into(&mut buf).unwrap();
    curve.serialize_into_compressed(&mut buf).unwrap();

    let mut bytes = buf.freeze();
    let first = CurveSnapshot::<u64>::deserialize_from(&mut bytes).unwrap();
    let second = CurveSnapshot::<u64>::deserialize_from(&mut bytes).unwrap();

    assert_eq!(first, second);
    assert!(!bytes.has_remaining());
}
