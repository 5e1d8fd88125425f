use std::iter::FromIterator;

use super::delaunay_core::Mesh;
use crate::{HintGenerator, LastUsedFaceHintGenerator, Point, Triangulation};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A two dimensional [Delaunay triangulation](https://en.wikipedia.org/wiki/Delaunay_triangulation)
/// of points carrying a `z` value.
///
/// A Delaunay triangulation is a triangulation that fulfills the *Delaunay Property*: No
/// vertex of the triangulation is contained in the
/// [circumcircle](https://en.wikipedia.org/wiki/Circumscribed_circle) of any triangle.
/// Triangles of a Delaunay triangulation avoid long, thin shapes whenever possible, which
/// makes them well suited for interpolating a surface between scattered samples.
///
/// The region outside of the convex hull is covered by *half-plane* faces, one for each edge
/// of the hull. Together with the bounded faces they tile the whole plane: every position
/// belongs to some face.
///
/// Most methods on this type require the [Triangulation] trait. Refer to its documentation
/// for more details on how to use `DelaunayTriangulation`.
///
/// # Basic Usage
///  ```
/// use surface_delaunay::{DelaunayTriangulation, Triangulation, Point, InsertionError};
///
/// fn main() -> Result<(), InsertionError> {
///
///     let mut triangulation: DelaunayTriangulation = DelaunayTriangulation::new();
///
///     // Insert three vertices that span one triangle (face)
///     triangulation.insert(Point::new(0.0, 1.0, 1.0))?;
///     triangulation.insert(Point::new(1.0, 1.0, 1.0))?;
///     triangulation.insert(Point::new(0.5, -1.0, 3.0))?;
///
///     assert_eq!(triangulation.num_vertices(), 3);
///     assert_eq!(triangulation.num_inner_faces(), 1);
///     // One half-plane per convex hull edge
///     assert_eq!(triangulation.num_all_faces(), 4);
///
///     // Vertices return their exact z value
///     assert_eq!(triangulation.interpolate(0.5, -1.0), Some(3.0));
///     // Positions outside of the convex hull have no z value
///     assert_eq!(triangulation.interpolate(5.0, 5.0), None);
///     Ok(())
/// }
/// ```
///
/// # Extracting geometry information
///
/// Faces are accessed with handles, see the [handles](crate::handles) module. Bounded faces
/// can be converted into a standalone [Triangle](crate::Triangle):
///
///  ```
/// use surface_delaunay::{DelaunayTriangulation, Triangulation, Point, InsertionError};
///
/// fn main() -> Result<(), InsertionError> {
///     let triangulation: DelaunayTriangulation = DelaunayTriangulation::bulk_load(vec![
///         Point::new(0.0, 0.0, 0.0),
///         Point::new(2.0, 0.0, 0.0),
///         Point::new(2.0, 2.0, 0.0),
///         Point::new(0.0, 2.0, 0.0),
///     ])?;
///
///     for face in triangulation.inner_faces() {
///         let triangle = face.triangle();
///         assert_eq!(triangle.area(), 2.0);
///         for neighbor in face.neighbors() {
///             // Each neighbor is either another bounded face or a half-plane
///             assert_eq!(neighbor.is_half_plane(), neighbor.as_inner().is_none());
///         }
///     }
///     Ok(())
/// }
/// ```
///
/// # Performance
///
/// Inserting a point first locates it by walking from face to face. The walk starts at the
/// face returned by the [HintGenerator]; the default [LastUsedFaceHintGenerator] starts at
/// the face touched by the last operation. Inserting `n` uniformly distributed points thus
/// takes `O(n * sqrt(n))` on average, while spatially coherent insertion orders are much
/// faster.
#[doc(alias = "Delaunay")]
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct DelaunayTriangulation<H = LastUsedFaceHintGenerator>
where
    H: HintGenerator,
{
    mesh: Mesh,
    hint_generator: H,
}

impl<H> Default for DelaunayTriangulation<H>
where
    H: HintGenerator,
{
    fn default() -> Self {
        Self {
            mesh: Default::default(),
            hint_generator: Default::default(),
        }
    }
}

impl<H> Triangulation for DelaunayTriangulation<H>
where
    H: HintGenerator,
{
    type HintGenerator = H;

    fn s(&self) -> &Mesh {
        &self.mesh
    }

    fn s_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    fn hint_generator(&self) -> &Self::HintGenerator {
        &self.hint_generator
    }

    fn hint_generator_mut(&mut self) -> &mut Self::HintGenerator {
        &mut self.hint_generator
    }
}

impl<H> FromIterator<Point> for DelaunayTriangulation<H>
where
    H: HintGenerator,
{
    /// Inserts all points in iteration order.
    ///
    /// Points that cannot be inserted are skipped with a warning. Use
    /// [Triangulation::bulk_load] to reject invalid input instead.
    fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
        let mut result = Self::default();
        for point in iter {
            if let Err(error) = result.insert(point) {
                log::warn!("Skipping point {}: {}", point, error);
            }
        }
        result
    }
}

#[cfg(test)]
mod test {
    use std::iter::FromIterator;

    use rand::distributions::{Distribution, Uniform};
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use crate::handles::FixedVertexHandle;
    use crate::test_utilities::{random_points_in_range, random_points_with_seed, SEED, SEED2};
    use crate::{
        BoundingBox, DelaunayTriangulation, InsertionError, Point, PositionInTriangulation,
        Triangulation,
    };

    #[allow(unused)]
    #[cfg(feature = "serde")]
    // Just needs to compile
    fn check_serde() {
        use serde::{Deserialize, Serialize};

        use crate::LastUsedFaceHintGenerator;

        fn requires_serde<'de, T: Serialize + Deserialize<'de>>() {}

        requires_serde::<super::DelaunayTriangulation<LastUsedFaceHintGenerator>>();
        requires_serde::<Point>();
    }

    fn grid_points() -> Vec<Point> {
        let mut result = Vec::new();
        for y in [-4.0, -2.0, 0.0, 2.0] {
            for x in [-4.0, -2.0, 0.0, 2.0] {
                result.push(Point::new(x, y, x * y));
            }
        }
        result
    }

    fn check_mutual_neighbors(d: &DelaunayTriangulation) {
        for face in d.all_faces() {
            for neighbor in face.neighbors() {
                assert!(
                    neighbor.neighbors().contains(&face),
                    "{:?} is a neighbor of {:?} but not vice versa",
                    neighbor,
                    face
                );
            }
        }
    }

    #[test]
    fn test_empty() {
        let d: DelaunayTriangulation = DelaunayTriangulation::default();
        assert_eq!(d.num_vertices(), 0);
        assert_eq!(d.num_all_faces(), 0);
        assert_eq!(d.num_inner_faces(), 0);
        assert_eq!(d.convex_hull_size(), 0);
        d.sanity_check();
    }

    #[test]
    fn test_insert_first() -> Result<(), InsertionError> {
        let mut d: DelaunayTriangulation = DelaunayTriangulation::default();
        d.insert(Point::default())?;
        assert_eq!(d.num_vertices(), 1);
        assert_eq!(d.num_all_faces(), 0);
        d.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_second() -> Result<(), InsertionError> {
        let mut d: DelaunayTriangulation = DelaunayTriangulation::default();
        d.insert(Point::default())?;
        d.insert(Point::flat(0.123, 1.234))?;
        assert_eq!(d.num_vertices(), 2);
        assert_eq!(d.num_all_faces(), 2);
        assert_eq!(d.num_inner_faces(), 0);
        d.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_third_point() -> Result<(), InsertionError> {
        let mut d: DelaunayTriangulation = DelaunayTriangulation::default();
        d.insert(Point::flat(1.0, 0.0))?;
        d.insert(Point::flat(0.0, 1.0))?;
        d.insert(Point::flat(1.0, 1.0))?;

        assert_eq!(d.num_vertices(), 3);
        assert_eq!(d.num_inner_faces(), 1);
        assert_eq!(d.num_all_faces(), 4);
        d.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_five_points() -> Result<(), InsertionError> {
        let mut d: DelaunayTriangulation = DelaunayTriangulation::default();
        d.insert(Point::flat(1.0, 0.0))?;
        d.insert(Point::flat(0.0, 1.0))?;

        let v3 = Point::flat(0.433_833_144_214_401, 0.900_993_231_373_602_9);
        let v4 = Point::flat(2.0, 2.0);
        let v5 = Point::flat(0.5, 0.25);
        d.insert(v3)?;
        d.sanity_check();
        d.insert(v4)?;
        d.s().sanity_check();
        d.insert(v5)?;
        d.sanity_check();
        assert_eq!(d.num_vertices(), 5);
        Ok(())
    }

    #[test]
    fn test_small_triangulation_iterators() -> Result<(), InsertionError> {
        let mut d: DelaunayTriangulation = DelaunayTriangulation::default();
        assert_eq!(d.all_faces().count(), 0);
        assert_eq!(d.inner_faces().count(), 0);

        d.insert(Point::flat(1.0, 1.0))?;
        assert_eq!(d.all_faces().count(), 0);
        assert_eq!(d.vertices().count(), 1);

        d.insert(Point::flat(-1.0, 1.0))?;
        assert_eq!(d.all_faces().count(), 2);
        assert_eq!(d.inner_faces().count(), 0);
        assert_eq!(d.convex_hull().count(), 2);
        Ok(())
    }

    #[test]
    fn test_iterate_faces() {
        const SIZE: usize = 1000;
        let points = random_points_with_seed(SIZE, SEED);
        let d: DelaunayTriangulation = DelaunayTriangulation::from_iter(points);
        d.sanity_check();

        assert_eq!(d.all_faces().count(), d.num_all_faces());
        assert_eq!(d.inner_faces().count(), d.num_inner_faces());
        assert_eq!(d.fixed_inner_faces().count(), d.num_inner_faces());
        assert_eq!(d.vertices().count(), SIZE);

        // Euler's formula for a triangulated point set with `h` hull vertices
        let hull = d.convex_hull_size();
        assert_eq!(d.num_inner_faces(), 2 * SIZE - hull - 2);
        assert_eq!(d.num_all_faces(), d.num_inner_faces() + hull);
    }

    #[test]
    fn test_insert_many_points() {
        const SIZE: usize = 10000;
        let points = random_points_with_seed(SIZE, SEED);
        let d: DelaunayTriangulation = DelaunayTriangulation::from_iter(points);
        assert_eq!(d.num_vertices(), SIZE);
        d.sanity_check();
    }

    #[test]
    fn test_insert_outside_convex_hull() -> Result<(), InsertionError> {
        const NUM: usize = 100;
        let mut rng = rand::rngs::StdRng::from_seed(*SEED);
        let range = Uniform::new(0., 2.0 * ::std::f64::consts::PI);

        let mut d: DelaunayTriangulation = DelaunayTriangulation::default();

        // Insert points on a circle. Every new point lies outside the convex hull.
        for _ in 0..NUM {
            let ang = range.sample(&mut rng);
            d.insert(Point::flat(ang.sin(), ang.cos()))?;
        }
        assert_eq!(d.num_vertices(), NUM);
        d.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_same_point_small() -> Result<(), InsertionError> {
        let points = vec![
            Point::flat(0.2, 0.1),
            Point::flat(1.3, 2.2),
            Point::flat(0.0, 0.0),
        ];
        let mut d: DelaunayTriangulation = DelaunayTriangulation::from_iter(points.clone());

        for p in &points {
            d.insert(*p)?;
            d.sanity_check();
        }
        assert_eq!(d.num_vertices(), points.len());
        assert_eq!(d.num_all_faces(), 4);
        Ok(())
    }

    #[test]
    fn test_insert_same_point() -> Result<(), InsertionError> {
        const SIZE: usize = 300;
        let points = random_points_with_seed(SIZE, SEED);
        let mut d: DelaunayTriangulation = DelaunayTriangulation::from_iter(points.clone());
        let num_faces = d.num_all_faces();
        for p in points {
            d.insert(p)?;
        }
        assert_eq!(d.num_vertices(), SIZE);
        assert_eq!(d.num_all_faces(), num_faces);
        d.sanity_check();
        Ok(())
    }

    #[test]
    fn test_duplicate_keeps_z() -> Result<(), InsertionError> {
        let mut d: DelaunayTriangulation = DelaunayTriangulation::default();
        let first = d.insert(Point::new(1.0, 2.0, 3.0))?;
        assert_eq!(d.insert(Point::new(1.0, 2.0, 100.0))?, first);
        d.insert(Point::flat(4.0, 2.0))?;
        d.insert(Point::flat(2.0, 5.0))?;
        assert_eq!(d.insert(Point::new(1.0, 2.0, -7.0))?, first);

        assert_eq!(d.num_vertices(), 3);
        assert_eq!(d.vertex(first).z(), 3.0);
        assert_eq!(d.interpolate(1.0, 2.0), Some(3.0));
        Ok(())
    }

    #[test]
    fn test_insert_point_on_ch_edge() -> Result<(), InsertionError> {
        let points = vec![
            Point::flat(0., 0.),
            Point::flat(1., 0.),
            Point::flat(0., 1.),
            Point::flat(0., 0.4),
        ];
        let d: DelaunayTriangulation = DelaunayTriangulation::from_iter(points);
        d.sanity_check();
        assert_eq!(d.num_inner_faces(), 2);
        assert_eq!(d.convex_hull_size(), 4);
        Ok(())
    }

    #[test]
    fn test_insert_on_edges() -> Result<(), InsertionError> {
        let points = vec![Point::flat(0., 0.), Point::flat(1., 0.)];
        let mut d: DelaunayTriangulation = DelaunayTriangulation::from_iter(points);

        d.insert(Point::flat(1., 1.))?;
        d.sanity_check();
        d.insert(Point::flat(0.5, 0.5))?;
        d.sanity_check();
        d.insert(Point::flat(0., 0.4))?;
        d.sanity_check();
        d.insert(Point::flat(1., 0.5))?;
        d.sanity_check();
        d.insert(Point::flat(0.5, 1.))?;
        d.sanity_check();
        d.insert(Point::flat(0.7, 0.))?;
        d.sanity_check();
        assert_eq!(d.num_vertices(), 8);
        Ok(())
    }

    #[test]
    fn test_degenerate_triangulation() -> Result<(), InsertionError> {
        let mut d: DelaunayTriangulation = DelaunayTriangulation::default();
        for i in -50..50 {
            d.insert(Point::flat(f64::from(i), 0.))?;
        }

        d.sanity_check();
        assert!(d.all_vertices_on_line());
        assert_eq!(d.num_inner_faces(), 0);
        // Both sides of each of the 99 segments
        assert_eq!(d.num_all_faces(), 198);
        Ok(())
    }

    #[test]
    fn test_small_insert_on_line() -> Result<(), InsertionError> {
        let mut d: DelaunayTriangulation = DelaunayTriangulation::default();
        d.insert(Point::flat(0.0, 0.0))?;
        d.insert(Point::flat(2.0, 0.0))?;
        d.insert(Point::flat(1.0, 0.0))?;
        d.sanity_check();
        assert_eq!(d.num_all_faces(), 4);
        Ok(())
    }

    #[test]
    fn test_insert_points_on_line() -> Result<(), InsertionError> {
        let mut d: DelaunayTriangulation = DelaunayTriangulation::default();
        d.insert(Point::flat(0.0, 1.0))?;
        for i in -50..50 {
            d.insert(Point::flat(f64::from(i), 0.))?;
        }
        d.sanity_check();
        assert!(!d.all_vertices_on_line());
        Ok(())
    }

    #[test]
    fn test_insert_points_on_line_2() -> Result<(), InsertionError> {
        let mut d: DelaunayTriangulation = DelaunayTriangulation::default();
        d.insert(Point::flat(0.0, 1.0))?;

        for i in -50..50 {
            d.insert(Point::flat(f64::from(i), 0.))?;
            d.sanity_check();
        }

        for i in -10..10 {
            d.insert(Point::flat(f64::from(i), 0.5 * f64::from(i)))?;
            d.sanity_check();
        }
        Ok(())
    }

    #[test]
    fn test_insert_points_on_grid2() -> Result<(), InsertionError> {
        let mut d: DelaunayTriangulation = DelaunayTriangulation::default();

        for y in 0..20 {
            for x in 0..7 {
                d.insert(Point::flat(f64::from(x), f64::from(y)))?;
                d.sanity_check();
            }
        }
        // Every grid cell is split into two triangles
        assert_eq!(d.num_inner_faces(), 2 * 6 * 19);
        Ok(())
    }

    #[test]
    fn test_insert_points_with_increasing_distance() {
        let mut points = random_points_with_seed(1000, SEED);
        points.sort_by(|p1, p2| {
            p1.distance2(Point::default())
                .partial_cmp(&p2.distance2(Point::default()))
                .unwrap()
        });
        let d: DelaunayTriangulation = DelaunayTriangulation::from_iter(points);
        d.sanity_check();
    }

    #[test]
    fn test_insert_points_on_grid_with_increasing_distance() {
        // This test inserts points on a grid with increasing distance from (0., 0.)
        let mut points = Vec::new();
        const SIZE: i64 = 7;
        for x in -SIZE..SIZE {
            for y in -SIZE..SIZE {
                points.push(Point::flat(x as f64, y as f64));
            }
        }
        points.sort_by(|p1, p2| {
            p1.distance2(Point::default())
                .partial_cmp(&p2.distance2(Point::default()))
                .unwrap()
        });
        let d: DelaunayTriangulation = DelaunayTriangulation::from_iter(points);
        d.sanity_check();
    }

    #[test]
    fn test_grid_regression() -> Result<(), InsertionError> {
        let d: DelaunayTriangulation = DelaunayTriangulation::bulk_load(grid_points())?;
        d.sanity_check();
        check_mutual_neighbors(&d);

        assert_eq!(d.num_vertices(), 16);
        // 16 vertices, 12 of them on the hull: 2 * 16 - 12 - 2 bounded faces
        assert_eq!(d.num_inner_faces(), 18);
        assert_eq!(d.convex_hull_size(), 12);
        assert_eq!(d.num_all_faces(), 30);

        for face in d.inner_faces() {
            assert_eq!(face.area(), 2.0);
        }
        Ok(())
    }

    #[test]
    fn test_grid_regression_in_any_order() {
        let mut rng = rand::rngs::StdRng::from_seed(*SEED2);
        for _ in 0..10 {
            let mut points = grid_points();
            points.shuffle(&mut rng);
            let d: DelaunayTriangulation = DelaunayTriangulation::from_iter(points);
            d.sanity_check();
            check_mutual_neighbors(&d);
            assert_eq!(d.num_inner_faces(), 18);
            assert_eq!(d.convex_hull_size(), 12);
        }
    }

    #[test]
    fn test_global_delaunay_property() {
        for seed in [SEED, SEED2] {
            let points = random_points_with_seed(50, seed);
            let d: DelaunayTriangulation = DelaunayTriangulation::from_iter(points.clone());
            d.sanity_check();
            check_mutual_neighbors(&d);

            for face in d.inner_faces() {
                for point in &points {
                    assert!(
                        !face.circumcircle_contains(*point),
                        "{:?} violates the circumcircle of {:?}",
                        point,
                        face
                    );
                }
            }
        }
    }

    #[test]
    fn test_locate_when_empty() {
        let triangulation: DelaunayTriangulation = DelaunayTriangulation::default();
        assert_eq!(
            triangulation.locate(0.0, 0.0),
            PositionInTriangulation::NoTriangulation
        )
    }

    #[test]
    fn test_locate_with_single_vertex() -> Result<(), InsertionError> {
        let mut triangulation: DelaunayTriangulation = DelaunayTriangulation::default();
        triangulation.insert(Point::flat(0.0, 0.0))?;
        assert_eq!(
            triangulation.locate(0.0, 0.0),
            PositionInTriangulation::OnVertex(FixedVertexHandle::new(0))
        );
        assert_eq!(
            triangulation.locate(1.0, 1.0),
            PositionInTriangulation::NoTriangulation
        );
        Ok(())
    }

    #[test]
    fn test_locate_every_vertex() {
        let points = random_points_in_range(100.0, 500, SEED2);
        let d: DelaunayTriangulation = DelaunayTriangulation::from_iter(points.clone());
        for point in points {
            let vertex = d
                .locate_vertex(point.x, point.y)
                .expect("inserted point must be found");
            assert_eq!(vertex.position(), point);
            assert_eq!(vertex.z(), point.z);
        }
    }

    #[test]
    fn test_interpolate() -> Result<(), InsertionError> {
        let d: DelaunayTriangulation = DelaunayTriangulation::bulk_load(vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 5.0),
        ])?;

        assert_eq!(d.interpolate(0.0, 1.0), Some(5.0));
        assert_eq!(d.interpolate(0.0, 0.0), Some(0.0));
        assert_eq!(d.interpolate(0.0, 0.5), Some(2.5));
        approx::assert_relative_eq!(d.interpolate(0.25, 0.25).unwrap(), 1.25);
        assert_eq!(d.interpolate(1.0, 1.0), None);
        assert_eq!(d.interpolate(f64::NAN, 0.0), None);
        Ok(())
    }

    #[test]
    fn test_interpolate_plane() {
        // All points lie on the plane z = 2x - 3y + 1
        let points: Vec<_> = random_points_with_seed(200, SEED)
            .into_iter()
            .map(|p| p.with_z(2.0 * p.x - 3.0 * p.y + 1.0))
            .collect();
        let d: DelaunayTriangulation = DelaunayTriangulation::from_iter(points);

        for query in random_points_in_range(0.5, 100, SEED2) {
            if let Some(z) = d.interpolate(query.x, query.y) {
                approx::assert_abs_diff_eq!(z, 2.0 * query.x - 3.0 * query.y + 1.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_interpolate_on_line() -> Result<(), InsertionError> {
        let d: DelaunayTriangulation = DelaunayTriangulation::bulk_load(vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 4.0),
            Point::new(4.0, 0.0, 0.0),
        ])?;

        assert!(d.all_vertices_on_line());
        assert_eq!(d.interpolate(2.0, 0.0), Some(4.0));
        assert_eq!(d.interpolate(1.0, 0.0), Some(2.0));
        assert_eq!(d.interpolate(3.0, 0.0), Some(2.0));
        assert_eq!(d.interpolate(5.0, 0.0), None);
        assert_eq!(d.interpolate(1.0, 1.0), None);
        Ok(())
    }

    #[test]
    fn test_find_face() -> Result<(), InsertionError> {
        let d: DelaunayTriangulation = DelaunayTriangulation::bulk_load(grid_points())?;

        let face = d.find_face(-3.5, -3.9).expect("point is inside the hull");
        assert!(face.contains(Point::flat(-3.5, -3.9)));

        // Vertices and edges still map to a single face
        assert!(d.find_face(-2.0, -2.0).is_some());
        assert!(d.find_face(-3.0, -4.0).is_some());
        assert!(d.find_face(-5.0, 0.0).is_none());
        Ok(())
    }

    #[test]
    fn test_insertion_errors() -> Result<(), InsertionError> {
        let mut d: DelaunayTriangulation = DelaunayTriangulation::default();
        d.insert(Point::flat(0.0, 0.0))?;

        assert_eq!(d.insert(Point::flat(f64::NAN, 0.0)), Err(InsertionError::NAN));
        assert_eq!(
            d.insert(Point::flat(0.0, f64::INFINITY)),
            Err(InsertionError::TooLarge)
        );
        assert_eq!(d.insert(Point::flat(1e-300, 1.0)), Err(InsertionError::TooSmall));
        assert_eq!(d.num_vertices(), 1);

        // z values are not validated
        d.insert(Point::new(1.0, 0.0, f64::NAN))?;
        assert_eq!(d.num_vertices(), 2);
        Ok(())
    }

    #[test]
    fn test_bulk_load_rejects_invalid_points() {
        let result = DelaunayTriangulation::<crate::LastUsedFaceHintGenerator>::bulk_load(vec![
            Point::flat(0.0, 0.0),
            Point::flat(1.0, 0.0),
            Point::flat(f64::NAN, 1.0),
        ]);
        assert_eq!(result.err(), Some(InsertionError::NAN));
    }

    #[test]
    fn test_from_iter_skips_invalid_points() {
        let d: DelaunayTriangulation = DelaunayTriangulation::from_iter(vec![
            Point::flat(0.0, 0.0),
            Point::flat(f64::NEG_INFINITY, 1.0),
            Point::flat(1.0, 0.0),
            Point::flat(0.0, 1.0),
        ]);
        assert_eq!(d.num_vertices(), 3);
        assert_eq!(d.num_inner_faces(), 1);
    }

    #[test]
    fn test_bounded_faces_in_rectangle() -> Result<(), InsertionError> {
        let mut d: DelaunayTriangulation = DelaunayTriangulation::bulk_load(grid_points())?;

        let everything = BoundingBox::from_corners(Point::flat(-10.0, -10.0), Point::flat(10.0, 10.0));
        assert_eq!(d.bounded_faces_in_rectangle(&everything).len(), 18);

        // A small box inside the lower left cell only touches its two halves
        let cell = BoundingBox::from_corners(Point::flat(-3.6, -3.6), Point::flat(-3.4, -3.4));
        let found = d.bounded_faces_in_rectangle(&cell);
        assert_eq!(found.len(), 2);
        for face in &found {
            assert!(d.face(*face).bounding_box().intersects(&cell));
        }

        // Centered outside of the hull but overlapping the right column of cells
        let right = BoundingBox::from_corners(Point::flat(1.0, -10.0), Point::flat(6.0, 10.0));
        let found = d.bounded_faces_in_rectangle(&right);
        assert_eq!(found.len(), 6);

        // Marks are cleared again
        assert!(d.all_faces().all(|face| !face.is_marked()));
        Ok(())
    }

    #[test]
    fn test_bounding_box() -> Result<(), InsertionError> {
        let d: DelaunayTriangulation = DelaunayTriangulation::bulk_load(grid_points())?;
        let bbox = d.bounding_box();
        assert_eq!(bbox.lower(), Point::flat(-4.0, -4.0));
        assert_eq!(bbox.upper(), Point::flat(2.0, 2.0));
        Ok(())
    }

    #[test]
    fn test_clear() -> Result<(), InsertionError> {
        let mut d: DelaunayTriangulation = DelaunayTriangulation::bulk_load(grid_points())?;
        d.clear();
        assert_eq!(d.num_vertices(), 0);
        assert_eq!(d.num_all_faces(), 0);
        d.insert(Point::flat(1.0, 1.0))?;
        d.insert(Point::flat(2.0, 1.0))?;
        d.insert(Point::flat(1.0, 2.0))?;
        d.sanity_check();
        assert_eq!(d.num_inner_faces(), 1);
        Ok(())
    }
}
