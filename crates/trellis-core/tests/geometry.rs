//! Rect algebra checked over a grid of overlapping and disjoint rects.

use trellis_core::geometry::{Point, Rect, Size};

fn grid() -> Vec<Rect> {
    let mut rects = Vec::new();
    for x in [-10.0, 0.0, 5.0, 20.0] {
        for y in [-5.0, 0.0, 15.0] {
            for (w, h) in [(0.0, 10.0), (10.0, 10.0), (30.0, 5.0), (4.0, 40.0)] {
                rects.push(Rect::new(x, y, w, h));
            }
        }
    }
    rects
}

#[test]
fn test_intersection_lies_within_both() {
    for a in grid() {
        for b in grid() {
            let overlap = a.intersect(b);
            if overlap.is_empty() {
                assert!(!a.intersects(b), "{a} and {b}");
                continue;
            }
            assert!(a.contains_rect(overlap), "{overlap} outside {a}");
            assert!(b.contains_rect(overlap), "{overlap} outside {b}");
            assert_eq!(overlap, b.intersect(a));
        }
    }
}

#[test]
fn test_union_covers_both() {
    for a in grid() {
        for b in grid() {
            let union = a.union(b);
            for rect in [a, b] {
                if !rect.is_empty() {
                    assert!(union.contains_rect(rect), "{rect} outside {union}");
                }
            }
        }
    }
}

#[test]
fn test_translation_preserves_size() {
    let rect = Rect::new(3.0, 4.0, 10.0, 20.0);
    let moved = rect.translated(-3.0, 6.0);
    assert_eq!(moved.size(), Size::new(10.0, 20.0));
    assert_eq!(moved.origin(), Point::new(0.0, 10.0));
    assert_eq!(moved.with_origin(rect.origin()), rect);
}
