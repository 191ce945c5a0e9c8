//! Scene representation for Lumen.
//!
//! A scene is anything that maps a point to a [`SurfaceSample`]. Hand
//! written closures work directly through the [`Sdf`] trait; scenes loaded
//! from files or presets are [`SceneNode`] trees of primitives, CSG
//! operators and point transforms.

use lumen_math::{mirror, polar_fold, rotate_about, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::csg::{self, IntersectRule};
use crate::material::{Material, MaterialError};
use crate::primitives;
use crate::surface::SurfaceSample;

/// Tolerance for the unit-length check on plane normals.
const UNIT_NORMAL_TOLERANCE: f32 = 1e-3;

/// Shape parameter out of range.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("{name} must be finite and >= 0, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("plane normal must be unit length, got {0}")]
    PlaneNormal(Vec2),

    #[error("ngon needs at least 3 sides, got {0}")]
    TooFewSides(u32),

    #[error("triangle vertices must wind counter-clockwise")]
    Clockwise,
}

/// Errors found while validating a scene graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("invalid geometry at {path}: {source}")]
    InvalidGeometry { path: String, source: GeometryError },

    #[error("invalid material at {path}: {source}")]
    InvalidMaterial { path: String, source: MaterialError },

    #[error("invalid operator at {path}: {reason}")]
    InvalidOperator { path: String, reason: String },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Trait for anything that can be sphere traced.
///
/// Implementations must be exact (1-Lipschitz) signed distances for the
/// tracer to be conservative, and must be safe to evaluate concurrently.
pub trait Sdf: Send + Sync {
    /// Evaluate distance and material at `point`.
    fn evaluate(&self, point: Vec2) -> SurfaceSample;

    /// Evaluate the signed distance only.
    fn distance(&self, point: Vec2) -> f32 {
        self.evaluate(point).sd
    }
}

impl<F> Sdf for F
where
    F: Fn(Vec2) -> SurfaceSample + Send + Sync,
{
    fn evaluate(&self, point: Vec2) -> SurfaceSample {
        self(point)
    }
}

/// A primitive shape with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum Geometry {
    Circle {
        center: Vec2,
        radius: f32,
    },
    Plane {
        anchor: Vec2,
        /// Unit normal pointing out of the solid half
        normal: Vec2,
    },
    /// A zero-thickness segment; only useful as an emitter or inside `round`
    Segment {
        a: Vec2,
        b: Vec2,
    },
    Capsule {
        a: Vec2,
        b: Vec2,
        radius: f32,
    },
    #[serde(rename = "box")]
    Rect {
        center: Vec2,
        #[serde(default)]
        rotation: f32,
        half_extents: Vec2,
    },
    Ngon {
        center: Vec2,
        radius: f32,
        sides: u32,
    },
    /// Vertices in counter-clockwise order
    Triangle {
        a: Vec2,
        b: Vec2,
        c: Vec2,
    },
}

impl Geometry {
    /// Signed distance from `p` to this shape.
    pub fn distance(&self, p: Vec2) -> f32 {
        match *self {
            Geometry::Circle { center, radius } => primitives::circle(p, center, radius),
            Geometry::Plane { anchor, normal } => primitives::plane(p, anchor, normal),
            Geometry::Segment { a, b } => primitives::segment(p, a, b),
            Geometry::Capsule { a, b, radius } => primitives::capsule(p, a, b, radius),
            Geometry::Rect {
                center,
                rotation,
                half_extents,
            } => primitives::rect(p, center, rotation, half_extents),
            Geometry::Ngon {
                center,
                radius,
                sides,
            } => primitives::ngon(p, center, radius, sides),
            Geometry::Triangle { a, b, c } => primitives::triangle(p, a, b, c),
        }
    }

    fn check(&self) -> Result<(), GeometryError> {
        match *self {
            Geometry::Circle { radius, .. } | Geometry::Capsule { radius, .. } => {
                non_negative("radius", radius)
            }
            Geometry::Plane { normal, .. } => {
                if (normal.length() - 1.0).abs() > UNIT_NORMAL_TOLERANCE {
                    Err(GeometryError::PlaneNormal(normal))
                } else {
                    Ok(())
                }
            }
            Geometry::Segment { .. } => Ok(()),
            Geometry::Rect { half_extents, .. } => {
                non_negative("half_extents.x", half_extents.x)?;
                non_negative("half_extents.y", half_extents.y)
            }
            Geometry::Ngon { radius, sides, .. } => {
                if sides < 3 {
                    return Err(GeometryError::TooFewSides(sides));
                }
                non_negative("radius", radius)
            }
            Geometry::Triangle { a, b, c } => {
                if (b - a).perp_dot(c - a) <= 0.0 {
                    Err(GeometryError::Clockwise)
                } else {
                    Ok(())
                }
            }
        }
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), GeometryError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GeometryError::Negative { name, value })
    }
}

/// Coordinate axis folded by a mirror node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorAxis {
    /// Fold x about the vertical line `x = at`
    X,
    /// Fold y about the horizontal line `y = at`
    Y,
}

/// A node in a scene graph.
///
/// Operand order is significant for everything except `union`, and
/// `union` children are combined left to right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum SceneNode {
    Shape {
        geometry: Geometry,
        #[serde(default)]
        material: Material,
    },
    Union {
        children: Vec<SceneNode>,
    },
    Intersect {
        a: Box<SceneNode>,
        b: Box<SceneNode>,
        #[serde(default)]
        rule: IntersectRule,
    },
    Subtract {
        a: Box<SceneNode>,
        b: Box<SceneNode>,
    },
    Complement {
        child: Box<SceneNode>,
    },
    /// Grow the child's boundary outward by `radius`
    Round {
        child: Box<SceneNode>,
        radius: f32,
    },
    Translate {
        child: Box<SceneNode>,
        offset: Vec2,
    },
    /// Rotate the child counter-clockwise by `angle` radians about `center`
    Rotate {
        child: Box<SceneNode>,
        center: Vec2,
        angle: f32,
    },
    Mirror {
        child: Box<SceneNode>,
        axis: MirrorAxis,
        at: f32,
    },
    /// Repeat the child, authored in the wedge `[0, 2π / count)` around
    /// `center`, `count` times
    PolarRepeat {
        child: Box<SceneNode>,
        center: Vec2,
        count: u32,
    },
}

impl SceneNode {
    /// A primitive with a material.
    pub fn shape(geometry: Geometry, material: Material) -> Self {
        SceneNode::Shape { geometry, material }
    }

    pub fn union(children: Vec<SceneNode>) -> Self {
        SceneNode::Union { children }
    }

    pub fn intersect(a: SceneNode, b: SceneNode) -> Self {
        Self::intersect_with(a, b, IntersectRule::Bounding)
    }

    pub fn intersect_with(a: SceneNode, b: SceneNode, rule: IntersectRule) -> Self {
        SceneNode::Intersect {
            a: Box::new(a),
            b: Box::new(b),
            rule,
        }
    }

    pub fn subtract(a: SceneNode, b: SceneNode) -> Self {
        SceneNode::Subtract {
            a: Box::new(a),
            b: Box::new(b),
        }
    }

    pub fn complement(self) -> Self {
        SceneNode::Complement {
            child: Box::new(self),
        }
    }

    pub fn rounded(self, radius: f32) -> Self {
        SceneNode::Round {
            child: Box::new(self),
            radius,
        }
    }

    pub fn translated(self, offset: Vec2) -> Self {
        SceneNode::Translate {
            child: Box::new(self),
            offset,
        }
    }

    pub fn rotated(self, center: Vec2, angle: f32) -> Self {
        SceneNode::Rotate {
            child: Box::new(self),
            center,
            angle,
        }
    }

    pub fn mirrored(self, axis: MirrorAxis, at: f32) -> Self {
        SceneNode::Mirror {
            child: Box::new(self),
            axis,
            at,
        }
    }

    pub fn polar_repeat(self, center: Vec2, count: u32) -> Self {
        SceneNode::PolarRepeat {
            child: Box::new(self),
            center,
            count,
        }
    }

    /// Evaluate this subtree at `p`.
    pub fn evaluate(&self, p: Vec2) -> SurfaceSample {
        match self {
            SceneNode::Shape { geometry, material } => {
                SurfaceSample::new(geometry.distance(p), *material)
            }
            SceneNode::Union { children } => children
                .iter()
                .map(|child| child.evaluate(p))
                .reduce(csg::union)
                .unwrap_or_else(SurfaceSample::empty),
            SceneNode::Intersect { a, b, rule } => {
                csg::intersect_with(*rule, a.evaluate(p), b.evaluate(p))
            }
            SceneNode::Subtract { a, b } => csg::subtract(a.evaluate(p), b.evaluate(p)),
            SceneNode::Complement { child } => csg::complement(child.evaluate(p)),
            SceneNode::Round { child, radius } => {
                let inner = child.evaluate(p);
                SurfaceSample::new(primitives::rounded(inner.sd, *radius), inner.material)
            }
            SceneNode::Translate { child, offset } => child.evaluate(p - *offset),
            SceneNode::Rotate {
                child,
                center,
                angle,
            } => child.evaluate(rotate_about(p, *center, -*angle)),
            SceneNode::Mirror { child, axis, at } => {
                let folded = match axis {
                    MirrorAxis::X => Vec2::new(mirror(p.x, *at), p.y),
                    MirrorAxis::Y => Vec2::new(p.x, mirror(p.y, *at)),
                };
                child.evaluate(folded)
            }
            SceneNode::PolarRepeat {
                child,
                center,
                count,
            } => child.evaluate(polar_fold(p, *center, *count)),
        }
    }

    /// Check every parameter in this subtree.
    ///
    /// `path` names this node in error messages, e.g. `root.children[2].a`.
    pub fn validate(&self, path: &str) -> SceneResult<()> {
        let operator_error = |reason: String| SceneError::InvalidOperator {
            path: path.to_string(),
            reason,
        };

        match self {
            SceneNode::Shape { geometry, material } => {
                geometry
                    .check()
                    .map_err(|source| SceneError::InvalidGeometry {
                        path: path.to_string(),
                        source,
                    })?;
                material
                    .check()
                    .map_err(|source| SceneError::InvalidMaterial {
                        path: path.to_string(),
                        source,
                    })
            }
            SceneNode::Union { children } => {
                if children.is_empty() {
                    return Err(operator_error("union has no children".to_string()));
                }
                children
                    .iter()
                    .enumerate()
                    .try_for_each(|(i, child)| child.validate(&format!("{}.children[{}]", path, i)))
            }
            SceneNode::Intersect { a, b, .. } | SceneNode::Subtract { a, b } => {
                a.validate(&format!("{}.a", path))?;
                b.validate(&format!("{}.b", path))
            }
            SceneNode::Complement { child } | SceneNode::Translate { child, .. } => {
                child.validate(&format!("{}.child", path))
            }
            SceneNode::Round { child, radius } => {
                if !radius.is_finite() {
                    return Err(operator_error(format!("round radius must be finite, got {}", radius)));
                }
                child.validate(&format!("{}.child", path))
            }
            SceneNode::Rotate { child, angle, .. } => {
                if !angle.is_finite() {
                    return Err(operator_error(format!("rotation angle must be finite, got {}", angle)));
                }
                child.validate(&format!("{}.child", path))
            }
            SceneNode::Mirror { child, at, .. } => {
                if !at.is_finite() {
                    return Err(operator_error(format!("mirror line must be finite, got {}", at)));
                }
                child.validate(&format!("{}.child", path))
            }
            SceneNode::PolarRepeat { child, count, .. } => {
                if *count == 0 {
                    return Err(operator_error("polar repeat count must be at least 1".to_string()));
                }
                child.validate(&format!("{}.child", path))
            }
        }
    }

    /// Count the primitive shapes in this subtree.
    pub fn shape_count(&self) -> usize {
        match self {
            SceneNode::Shape { .. } => 1,
            SceneNode::Union { children } => children.iter().map(SceneNode::shape_count).sum(),
            SceneNode::Intersect { a, b, .. } | SceneNode::Subtract { a, b } => {
                a.shape_count() + b.shape_count()
            }
            SceneNode::Complement { child }
            | SceneNode::Round { child, .. }
            | SceneNode::Translate { child, .. }
            | SceneNode::Rotate { child, .. }
            | SceneNode::Mirror { child, .. }
            | SceneNode::PolarRepeat { child, .. } => child.shape_count(),
        }
    }
}

impl Sdf for SceneNode {
    fn evaluate(&self, point: Vec2) -> SurfaceSample {
        SceneNode::evaluate(self, point)
    }
}

/// A named, validated scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Scene name (from the preset or file)
    pub name: String,
    root: SceneNode,
}

impl Scene {
    /// Validate `root` and wrap it as a scene.
    pub fn new(name: impl Into<String>, root: SceneNode) -> SceneResult<Self> {
        root.validate("root")?;
        Ok(Self {
            name: name.into(),
            root,
        })
    }

    /// Number of primitive shapes in the scene.
    pub fn shape_count(&self) -> usize {
        self.root.shape_count()
    }
}

impl Sdf for Scene {
    fn evaluate(&self, point: Vec2) -> SurfaceSample {
        self.root.evaluate(point)
    }
}
