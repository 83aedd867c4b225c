//! Axis-aligned bounding box for spatial acceleration structures (BVH).

use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box defined by its two extreme corners.
///
/// Invariant: `min` is component-wise <= `max`, except for [`Aabb::EMPTY`]
/// whose inverted corners (+inf mins, -inf maxes) make it the identity
/// element of [`Aabb::union`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from two opposite corners (in any order).
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Tightest box enclosing a set of points.
    ///
    /// An empty input yields the inverted [`Aabb::EMPTY`] box, which
    /// unions correctly with anything.
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        points.into_iter().fold(Self::EMPTY, |acc, p| Self {
            min: acc.min.min(p),
            max: acc.max.max(p),
        })
    }

    /// The box enclosing both `a` and `b`: component-wise min of mins,
    /// max of maxes.
    pub fn union(a: &Aabb, b: &Aabb) -> Self {
        Self {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        }
    }

    /// Grow to also enclose `other`.
    pub fn grow(&mut self, other: &Aabb) {
        *self = Self::union(self, other);
    }

    /// Test if a ray intersects this box within the given interval.
    ///
    /// Slab method. Each axis contributes an entry/exit pair computed
    /// from both bounds; the pair is re-ordered per axis with min/max
    /// because a negative direction component makes the `min` bound the
    /// *far* plane. Zero direction components divide to IEEE infinities
    /// and drop out of the running max/min naturally (f32 min/max ignore
    /// the NaN produced when the origin sits exactly on a bound).
    /// Touching the boundary counts as a hit.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> bool {
        let mut near = ray_t.min;
        let mut far = ray_t.max;

        for axis in 0..3 {
            let inv = 1.0 / ray.direction[axis];
            let t0 = (self.min[axis] - ray.origin[axis]) * inv;
            let t1 = (self.max[axis] - ray.origin[axis]) * inv;

            near = near.max(t0.min(t1));
            far = far.min(t0.max(t1));

            if near > far {
                return false;
            }
        }

        true
    }

    /// All 8 corners of the box (every min/max sign combination).
    ///
    /// Used to rebound transformed geometry: a rotated box is bounded by
    /// re-enclosing its projected corners, never by transforming min/max
    /// directly.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Lower bound along one axis (0=X, 1=Y, 2=Z).
    ///
    /// Ordering key for spatial partitioning during BVH construction.
    pub fn min_on_axis(&self, axis: usize) -> f32 {
        self.min[axis]
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the longest extent.
    pub fn longest_axis(&self) -> usize {
        let size = self.max - self.min;
        if size.x > size.y && size.x > size.z {
            0
        } else if size.y > size.z {
            1
        } else {
            2
        }
    }

    /// Copy with every face pushed outward by `delta`.
    ///
    /// Flat primitives (quads, axis-aligned triangles) pad their boxes so
    /// zero-thickness slabs survive floating point noise.
    pub fn padded(&self, delta: f32) -> Aabb {
        Aabb {
            min: self.min - Vec3::splat(delta),
            max: self.max + Vec3::splat(delta),
        }
    }

    /// The inverted box containing nothing; identity for `union`.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };
}
