//! Mesh Cross-Section Geometry
//!
//! Clips triangulated meshes against a planar quadrilateral region and
//! stitches the boundary into ordered polylines, and builds filled planar
//! surfaces from near-coplanar vertex sets using earcutr triangulation
//! and nalgebra for the vector math.

pub mod clip;
pub mod error;
pub mod mesh;
pub mod plane;
pub mod predicates;
pub mod projection;
pub mod stitch;
pub mod surface;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use clip::{clip_segments, cross_section, ClipQuad, Segment};
pub use error::{Error, Result};
pub use mesh::Mesh;
pub use plane::Plane;
pub use predicates::{point_in_quad, segment_intersection, LINE_TOLERANCE, MERGE_EPSILON};
pub use projection::{are_points_coplanar, fitted_normal, project_to_plane, triangle_normal};
pub use stitch::{stitch_segments, Path};
pub use surface::build_planar_surface;
pub use triangulation::triangulate_polygon;
