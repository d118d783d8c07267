//! Geometric solids and their derived measurements

use crate::error::{ShapeResult, ShapeSortError};
use crate::ordering::SortKey;
use std::f64::consts::{PI, SQRT_2};
use std::fmt;
use std::str::FromStr;

/// The closed set of solid kinds a shape file may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Cylinder,
    Cone,
    Pyramid,
    SquarePrism,
    TriangularPrism,
    PentagonalPrism,
    OctagonalPrism,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Cylinder,
        ShapeKind::Cone,
        ShapeKind::Pyramid,
        ShapeKind::SquarePrism,
        ShapeKind::TriangularPrism,
        ShapeKind::PentagonalPrism,
        ShapeKind::OctagonalPrism,
    ];

    /// Tag used for this kind in shape files
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Cylinder => "Cylinder",
            ShapeKind::Cone => "Cone",
            ShapeKind::Pyramid => "Pyramid",
            ShapeKind::SquarePrism => "SquarePrism",
            ShapeKind::TriangularPrism => "TriangularPrism",
            ShapeKind::PentagonalPrism => "PentagonalPrism",
            ShapeKind::OctagonalPrism => "OctagonalPrism",
        }
    }

    /// Area of the base for the given secondary parameter (radius or edge length)
    pub fn base_area(self, secondary: f64) -> f64 {
        let sq = secondary * secondary;
        match self {
            ShapeKind::Cylinder | ShapeKind::Cone => PI * sq,
            ShapeKind::Pyramid | ShapeKind::SquarePrism => sq,
            ShapeKind::TriangularPrism => 3f64.sqrt() / 4.0 * sq,
            ShapeKind::PentagonalPrism => 5.0 * sq * 54f64.to_radians().tan() / 4.0,
            ShapeKind::OctagonalPrism => 2.0 * (1.0 + SQRT_2) * sq,
        }
    }

    /// Volume as a fraction of base area times height: 1/3 for the pointed solids
    fn volume_factor(self) -> f64 {
        match self {
            ShapeKind::Cone | ShapeKind::Pyramid => 1.0 / 3.0,
            _ => 1.0,
        }
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ShapeSortError::unknown_shape_kind(s))
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable solid parsed from one input record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    height: f64,
    secondary: f64,
}

impl Shape {
    /// Construct a shape, rejecting non-positive or non-finite parameters
    pub fn new(kind: ShapeKind, height: f64, secondary: f64) -> ShapeResult<Self> {
        check_positive("height", height)?;
        check_positive("secondary parameter", secondary)?;
        Ok(Self {
            kind,
            height,
            secondary,
        })
    }

    /// Parse a record of the form `<ShapeKind> <height> <secondary>`
    pub fn parse_record(record: &str) -> ShapeResult<Self> {
        let fields: Vec<&str> = record.split_whitespace().collect();
        let [kind, height, secondary] = fields[..] else {
            return Err(ShapeSortError::malformed_record(&format!(
                "expected 3 fields, found {}: {:?}",
                fields.len(),
                record.trim()
            )));
        };

        let kind = kind.parse::<ShapeKind>()?;
        let height = parse_number(height)?;
        let secondary = parse_number(secondary)?;
        Self::new(kind, height, secondary)
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Radius for round solids, base edge length for the rest
    pub fn secondary(&self) -> f64 {
        self.secondary
    }

    pub fn base_area(&self) -> f64 {
        self.kind.base_area(self.secondary)
    }

    pub fn volume(&self) -> f64 {
        self.base_area() * self.height * self.kind.volume_factor()
    }

    /// The derived measurement selected by `key`
    pub fn metric(&self, key: SortKey) -> f64 {
        match key {
            SortKey::Height => self.height(),
            SortKey::BaseArea => self.base_area(),
            SortKey::Volume => self.volume(),
        }
    }

    /// Display adapter printing the kind and the metric selected by `key`
    pub fn display(&self, key: SortKey) -> ShapeDisplay<'_> {
        ShapeDisplay { shape: self, key }
    }
}

/// Renders a shape as `Kind [Metric=value]`
pub struct ShapeDisplay<'a> {
    shape: &'a Shape,
    key: SortKey,
}

impl fmt::Display for ShapeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.shape.metric(self.key);
        write!(f, "{} [{}=", self.shape.kind, self.key.label())?;
        // Whole numbers keep one fractional digit, e.g. `2.0` rather than `2`
        if value.fract() == 0.0 {
            write!(f, "{value:.1}]")
        } else {
            write!(f, "{value}]")
        }
    }
}

fn parse_number(field: &str) -> ShapeResult<f64> {
    field
        .parse::<f64>()
        .map_err(|_| ShapeSortError::malformed_number(field))
}

fn check_positive(name: &str, value: f64) -> ShapeResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ShapeSortError::malformed_parameter(&format!(
            "{name} must be a positive finite number, got {value}"
        )))
    }
}
