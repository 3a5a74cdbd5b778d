//! Grid resolution presets selectable from the panel

use std::fmt;
use std::str::FromStr;

use crate::location::{get_parameter_by_name, replace_url_param};

/// Query parameter carrying the selected preset
pub const SIZE_PARAM: &str = "size";

/// Segment-count preset for both grid axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GridSize {
    Small,
    Medium,
    #[default]
    Big,
}

impl GridSize {
    pub const ALL: [GridSize; 3] = [GridSize::Small, GridSize::Medium, GridSize::Big];

    /// Segments along each axis
    pub fn segments(self) -> u32 {
        match self {
            GridSize::Small => 10,
            GridSize::Medium => 40,
            GridSize::Big => 160,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GridSize::Small => "small",
            GridSize::Medium => "medium",
            GridSize::Big => "big",
        }
    }

    /// Preset named by the location's `size` parameter, `Big` if missing or unknown
    pub fn from_location(location: &str) -> Self {
        match get_parameter_by_name(SIZE_PARAM, location) {
            Some(value) => value.parse().unwrap_or_else(|_| {
                tracing::debug!("Unknown size {:?}, using {}", value, GridSize::default());
                GridSize::default()
            }),
            None => {
                tracing::debug!("No size in {}, using {}", location, GridSize::default());
                GridSize::default()
            }
        }
    }

    /// `location` with its `size` parameter set to this preset
    pub fn apply_to_location(self, location: &str) -> String {
        replace_url_param(location, SIZE_PARAM, self.as_str())
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GridSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(GridSize::Small),
            "medium" => Ok(GridSize::Medium),
            "big" => Ok(GridSize::Big),
            other => Err(format!("unknown grid size '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments() {
        assert_eq!(GridSize::Small.segments(), 10);
        assert_eq!(GridSize::Medium.segments(), 40);
        assert_eq!(GridSize::Big.segments(), 160);
    }

    #[test]
    fn test_from_location() {
        assert_eq!(GridSize::from_location("wireframe://grid?size=small"), GridSize::Small);
        assert_eq!(GridSize::from_location("wireframe://grid?size=medium"), GridSize::Medium);
        assert_eq!(GridSize::from_location("wireframe://grid?size=big"), GridSize::Big);
    }

    #[test]
    fn test_from_location_falls_back_to_big() {
        assert_eq!(GridSize::from_location("wireframe://grid"), GridSize::Big);
        assert_eq!(GridSize::from_location("wireframe://grid?size="), GridSize::Big);
        assert_eq!(GridSize::from_location("wireframe://grid?size=huge"), GridSize::Big);
        assert_eq!(GridSize::from_location("wireframe://grid?size=Small"), GridSize::Big);
    }

    #[test]
    fn test_apply_to_location() {
        let location = GridSize::Medium.apply_to_location("wireframe://grid");
        assert_eq!(location, "wireframe://grid?size=medium");
        let location = GridSize::Small.apply_to_location(&location);
        assert_eq!(location, "wireframe://grid?size=small");
        assert_eq!(GridSize::from_location(&location), GridSize::Small);
    }

    #[test]
    fn test_parse_round_trip() {
        for size in GridSize::ALL {
            assert_eq!(size.as_str().parse::<GridSize>(), Ok(size));
        }
        assert!("tiny".parse::<GridSize>().is_err());
    }
}
