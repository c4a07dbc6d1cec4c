//! Geometry value types in logical (unscaled) coordinates.
//!
//! All types are plain `f32` values. A [`Rect`] is an origin plus a size;
//! any rect whose width or height is not positive is empty, and empty rects
//! absorb intersections and vanish from unions.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<glam::Vec2> for Point {
    fn from(v: glam::Vec2) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<Point> for glam::Vec2 {
    fn from(p: Point) -> Self {
        glam::Vec2::new(p.x, p.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Size { width, height }
    }

    /// Grow by the total horizontal and vertical extent of `insets`.
    pub fn add_insets(self, insets: Insets) -> Size {
        Size::new(self.width + insets.width(), self.height + insets.height())
    }

    /// Shrink by the total horizontal and vertical extent of `insets`.
    /// Components may go negative; callers decide how to clamp.
    pub fn subtract_insets(self, insets: Insets) -> Size {
        Size::new(self.width - insets.width(), self.height - insets.height())
    }

    /// Component-wise maximum.
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Component-wise minimum.
    pub fn min(self, other: Size) -> Size {
        Size::new(self.width.min(other.width), self.height.min(other.height))
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        Size::new(self.width + rhs.width, self.height + rhs.height)
    }
}

impl Sub for Size {
    type Output = Size;

    fn sub(self, rhs: Size) -> Size {
        Size::new(self.width - rhs.width, self.height - rhs.height)
    }
}

impl From<glam::Vec2> for Size {
    fn from(v: glam::Vec2) -> Self {
        Size::new(v.x, v.y)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Margins on each side of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Insets {
    pub const ZERO: Insets = Insets::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Insets { top, left, bottom, right }
    }

    pub const fn uniform(value: f32) -> Self {
        Insets::new(value, value, value, value)
    }

    /// `left + right`
    pub fn width(&self) -> f32 {
        self.left + self.right
    }

    /// `top + bottom`
    pub fn height(&self) -> f32 {
        self.top + self.bottom
    }
}

impl Add for Insets {
    type Output = Insets;

    fn add(self, rhs: Insets) -> Insets {
        Insets::new(
            self.top + rhs.top,
            self.left + rhs.left,
            self.bottom + rhs.bottom,
            self.right + rhs.right,
        )
    }
}

impl AddAssign for Insets {
    fn add_assign(&mut self, rhs: Insets) {
        *self = *self + rhs;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Rect::new(origin.x, origin.y, size.width, size.height)
    }

    /// A rect at the origin with the given size.
    pub const fn from_size(size: Size) -> Self {
        Rect::new(0.0, 0.0, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        !self.is_empty()
            && point.x >= self.x
            && point.x < self.right()
            && point.y >= self.y
            && point.y < self.bottom()
    }

    /// Whether `other` lies entirely within this rect.
    pub fn contains_rect(&self, other: Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn intersects(&self, other: Rect) -> bool {
        !self.intersect(other).is_empty()
    }

    /// The overlapping region. An empty operand or a disjoint pair yields an
    /// empty rect anchored at this rect's origin.
    pub fn intersect(&self, other: Rect) -> Rect {
        if self.is_empty() || other.is_empty() {
            return Rect::new(self.x, self.y, 0.0, 0.0);
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return Rect::new(self.x, self.y, 0.0, 0.0);
        }
        Rect::new(x, y, right - x, bottom - y)
    }

    /// The bounding box of both rects; empty operands do not contribute.
    pub fn union(&self, other: Rect) -> Rect {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => Rect::new(self.x, self.y, 0.0, 0.0),
            (true, false) => other,
            (false, true) => *self,
            (false, false) => {
                let x = self.x.min(other.x);
                let y = self.y.min(other.y);
                let right = self.right().max(other.right());
                let bottom = self.bottom().max(other.bottom());
                Rect::new(x, y, right - x, bottom - y)
            }
        }
    }

    /// Shrink by `insets`; the resulting width and height never go below 0.
    pub fn inset(&self, insets: Insets) -> Rect {
        Rect::new(
            self.x + insets.left,
            self.y + insets.top,
            (self.width - insets.width()).max(0.0),
            (self.height - insets.height()).max(0.0),
        )
    }

    pub fn inset_uniform(&self, amount: f32) -> Rect {
        self.inset(Insets::uniform(amount))
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    pub fn with_origin(&self, origin: Point) -> Rect {
        Rect::from_origin_size(origin, self.size())
    }

    pub fn with_size(&self, size: Size) -> Rect {
        Rect::from_origin_size(self.origin(), size)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_when_either_extent_not_positive() {
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_empty());
        assert!(Rect::new(0.0, 0.0, 10.0, -1.0).is_empty());
        assert!(!Rect::new(5.0, 5.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(29.9, 29.9)));
        assert!(!r.contains(Point::new(30.0, 15.0)));
        assert!(!r.contains(Point::new(15.0, 30.0)));
        assert!(!Rect::ZERO.contains(Point::ZERO));
    }

    #[test]
    fn intersect_overlapping() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        let b = Rect::new(25.0, 10.0, 50.0, 20.0);
        assert_eq!(a.intersect(b), Rect::new(25.0, 10.0, 25.0, 20.0));
        assert_eq!(a.intersect(b), b.intersect(a));
    }

    #[test]
    fn intersect_with_empty_is_empty() {
        let a = Rect::new(5.0, 6.0, 50.0, 50.0);
        let empty = Rect::new(10.0, 10.0, 0.0, 10.0);
        let result = a.intersect(empty);
        assert!(result.is_empty());
        assert_eq!(result.origin(), a.origin());
    }

    #[test]
    fn intersect_disjoint_is_empty() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersect(b).is_empty());
        assert!(!a.intersects(b));
    }

    #[test]
    fn union_ignores_empty_operands() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let empty = Rect::new(100.0, 100.0, 0.0, 0.0);
        assert_eq!(a.union(empty), a);
        assert_eq!(empty.union(a), a);
        assert!(empty.union(empty).is_empty());
        assert_eq!(
            a.union(Rect::new(20.0, 5.0, 10.0, 10.0)),
            Rect::new(0.0, 0.0, 30.0, 15.0)
        );
    }

    #[test]
    fn inset_clamps_at_zero() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let inset = r.inset(Insets::new(2.0, 3.0, 2.0, 3.0));
        assert_eq!(inset, Rect::new(3.0, 2.0, 4.0, 6.0));
        let collapsed = r.inset(Insets::uniform(20.0));
        assert_eq!(collapsed.width, 0.0);
        assert_eq!(collapsed.height, 0.0);
    }

    #[test]
    fn insets_add_componentwise() {
        let total = Insets::uniform(1.0) + Insets::new(2.0, 3.0, 4.0, 5.0);
        assert_eq!(total, Insets::new(3.0, 4.0, 5.0, 6.0));
        assert_eq!(total.width(), 10.0);
        assert_eq!(total.height(), 8.0);
    }

    #[test]
    fn glam_round_trip() {
        let p: Point = glam::Vec2::new(1.5, -2.0).into();
        assert_eq!(p, Point::new(1.5, -2.0));
        let v: glam::Vec2 = p.into();
        assert_eq!(v.x, 1.5);
    }
}
