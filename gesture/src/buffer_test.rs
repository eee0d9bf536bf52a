#![allow(clippy::float_cmp, clippy::cast_precision_loss)]

use super::*;
use crate::consts::DEFAULT_MAX_POINTS;

fn pt(i: usize) -> Point {
    Point::new(i as f64, -(i as f64))
}

#[test]
fn default_capacity_is_sixty() {
    let buf = PointBuffer::default();
    assert_eq!(buf.capacity(), DEFAULT_MAX_POINTS);
    assert_eq!(buf.capacity(), 60);
    assert!(buf.is_empty());
}

#[test]
fn zero_capacity_is_raised_to_one() {
    let mut buf = PointBuffer::with_capacity(0);
    assert_eq!(buf.capacity(), 1);
    buf.push(pt(1));
    buf.push(pt(2));
    assert_eq!(buf.to_vec(), vec![pt(2)]);
}

#[test]
fn push_below_capacity_evicts_nothing() {
    let mut buf = PointBuffer::with_capacity(3);
    assert_eq!(buf.push(pt(0)), None);
    assert_eq!(buf.push(pt(1)), None);
    assert_eq!(buf.push(pt(2)), None);
    assert_eq!(buf.len(), 3);
}

#[test]
fn push_beyond_capacity_evicts_oldest_first() {
    let mut buf = PointBuffer::with_capacity(3);
    for i in 0..3 {
        buf.push(pt(i));
    }
    assert_eq!(buf.push(pt(3)), Some(pt(0)));
    assert_eq!(buf.push(pt(4)), Some(pt(1)));
    assert_eq!(buf.to_vec(), vec![pt(2), pt(3), pt(4)]);
}

#[test]
fn length_never_exceeds_capacity() {
    let mut buf = PointBuffer::with_capacity(7);
    for i in 0..500 {
        buf.push(pt(i));
        assert!(buf.len() <= buf.capacity());
    }
    assert_eq!(buf.len(), 7);
}

#[test]
fn long_run_keeps_exactly_the_newest_window() {
    let mut buf = PointBuffer::default();
    let mut evicted = Vec::new();
    for i in 0..150 {
        if let Some(old) = buf.push(pt(i)) {
            evicted.push(old);
        }
    }
    let expected_kept: Vec<Point> = (90..150).map(pt).collect();
    let expected_evicted: Vec<Point> = (0..90).map(pt).collect();
    assert_eq!(buf.to_vec(), expected_kept);
    assert_eq!(evicted, expected_evicted);
}

#[test]
fn newest_tracks_last_push() {
    let mut buf = PointBuffer::with_capacity(2);
    assert_eq!(buf.newest(), None);
    buf.push(pt(5));
    buf.push(pt(6));
    buf.push(pt(7));
    assert_eq!(buf.newest(), Some(pt(7)));
}

#[test]
fn clear_empties_buffer_and_keeps_capacity() {
    let mut buf = PointBuffer::with_capacity(4);
    buf.push(pt(1));
    buf.push(pt(2));
    buf.clear();
    assert!(buf.is_empty());
    assert_eq!(buf.capacity(), 4);
    assert_eq!(buf.iter().count(), 0);
}

#[test]
fn huge_capacity_does_not_reserve_up_front() {
    let mut buf = PointBuffer::with_capacity(usize::MAX);
    assert_eq!(buf.capacity(), usize::MAX);
    buf.push(pt(1));
    assert_eq!(buf.len(), 1);
}

#[test]
fn iter_can_be_walked_twice() {
    let mut buf = PointBuffer::with_capacity(4);
    for i in 0..3 {
        buf.push(pt(i));
    }
    let it = buf.iter();
    let count = it.clone().count();
    let sum: f64 = it.map(|p| p.x).sum();
    assert_eq!(count, 3);
    assert_eq!(sum, 3.0);
}
