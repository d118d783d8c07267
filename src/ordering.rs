//! Ordering keys and comparators over shapes

use crate::error::{ShapeResult, ShapeSortError};
use crate::shape::Shape;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Which derived measurement drives comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Height,
    BaseArea,
    #[default]
    Volume,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortKey {
    /// Single-letter selector used on the command line
    pub fn flag(self) -> char {
        match self {
            SortKey::Height => 'h',
            SortKey::BaseArea => 'a',
            SortKey::Volume => 'v',
        }
    }

    /// Human-readable metric name used in output
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Height => "Height",
            SortKey::BaseArea => "Base Area",
            SortKey::Volume => "Volume",
        }
    }

    /// Ascending three-way comparison of the selected metric
    pub fn compare(self, a: &Shape, b: &Shape) -> Ordering {
        a.metric(self).total_cmp(&b.metric(self))
    }

    /// Comparator for this key in the given direction
    pub fn comparator(self, order: SortOrder) -> impl Fn(&Shape, &Shape) -> Ordering + Copy {
        move |a: &Shape, b: &Shape| match order {
            SortOrder::Ascending => self.compare(a, b),
            SortOrder::Descending => self.compare(a, b).reverse(),
        }
    }

    /// Parse `value`, falling back to the default key with a warning
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_else(|err: ShapeSortError| {
            let fallback = Self::default();
            log::warn!("{err}; using {}", fallback.label().to_lowercase());
            fallback
        })
    }
}

impl FromStr for SortKey {
    type Err = ShapeSortError;

    fn from_str(s: &str) -> ShapeResult<Self> {
        match s.to_lowercase().as_str() {
            "h" | "height" => Ok(SortKey::Height),
            "a" | "area" | "base-area" => Ok(SortKey::BaseArea),
            "v" | "volume" => Ok(SortKey::Volume),
            _ => Err(ShapeSortError::invalid_sort_key(s)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortOrder {
    type Err = ShapeSortError;

    fn from_str(s: &str) -> ShapeResult<Self> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(ShapeSortError::invalid_config(&format!(
                "unknown sort order: {s}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;

    fn shape(kind: ShapeKind, height: f64, secondary: f64) -> Shape {
        Shape::new(kind, height, secondary).unwrap()
    }

    #[test]
    fn test_key_from_str() {
        assert_eq!("h".parse::<SortKey>().unwrap(), SortKey::Height);
        assert_eq!("V".parse::<SortKey>().unwrap(), SortKey::Volume);
        assert_eq!("A".parse::<SortKey>().unwrap(), SortKey::BaseArea);
        assert_eq!("base-area".parse::<SortKey>().unwrap(), SortKey::BaseArea);
        assert!(matches!(
            "x".parse::<SortKey>(),
            Err(ShapeSortError::InvalidSortKey { .. })
        ));
    }

    #[test]
    fn test_parse_or_default_falls_back_to_volume() {
        assert_eq!(SortKey::parse_or_default("h"), SortKey::Height);
        assert_eq!(SortKey::parse_or_default("nonsense"), SortKey::Volume);
    }

    #[test]
    fn test_keys_rank_differently() {
        // Tall and thin versus short and wide
        let tall = shape(ShapeKind::SquarePrism, 10.0, 1.0);
        let wide = shape(ShapeKind::SquarePrism, 1.0, 5.0);

        assert_eq!(SortKey::Height.compare(&tall, &wide), Ordering::Greater);
        assert_eq!(SortKey::BaseArea.compare(&tall, &wide), Ordering::Less);
        assert_eq!(SortKey::Volume.compare(&tall, &wide), Ordering::Less);
    }

    #[test]
    fn test_descending_reverses_comparator() {
        let small = shape(ShapeKind::Cone, 1.0, 1.0);
        let big = shape(ShapeKind::Cylinder, 3.0, 2.0);

        let asc = SortKey::Volume.comparator(SortOrder::Ascending);
        let desc = SortKey::Volume.comparator(SortOrder::Descending);
        assert_eq!(asc(&small, &big), Ordering::Less);
        assert_eq!(desc(&small, &big), Ordering::Greater);
        assert_eq!(desc(&big, &big), Ordering::Equal);
    }

    #[test]
    fn test_order_from_str() {
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Descending);
        assert!("up".parse::<SortOrder>().is_err());
    }
}
