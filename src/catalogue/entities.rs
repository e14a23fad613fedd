use itertools::Itertools;

use crate::geo::Coordinates;

#[derive(Clone, Debug, PartialEq)]
pub struct Stop {
    pub name: String,
    pub coordinates: Coordinates,
}

impl Stop {
    pub fn new(name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            name: name.into(),
            coordinates,
        }
    }
}

/// A named route. `stops` holds stop names only: for a circular route the cycle
/// without the closing repeat, for a linear route the outbound leg.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bus {
    pub name: String,
    pub stops: Vec<String>,
    pub is_circular: bool,
}

impl Bus {
    pub fn new(name: impl Into<String>, stops: Vec<String>, is_circular: bool) -> Self {
        Self {
            name: name.into(),
            stops,
            is_circular,
        }
    }

    /// Stop visits along the full traversal.
    pub fn stop_count(&self) -> usize {
        match (self.is_circular, self.stops.len()) {
            (_, 0) => 0,
            (true, n) => n,
            (false, n) => 2 * n - 1,
        }
    }

    pub fn unique_stop_count(&self) -> usize {
        self.stops.iter().unique().count()
    }

    /// Consecutive `(from, to)` pairs of the full traversal. A circular route ends
    /// with the leg back to its first stop; a linear route runs out and back.
    pub fn legs(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
        let stops = self.stops.iter().map(String::as_str);

        if self.is_circular {
            let closing = self.stops.last().zip(self.stops.first());
            let legs = stops
                .tuple_windows::<(&str, &str)>()
                .chain(closing.map(|(last, first)| (last.as_str(), first.as_str())));
            Box::new(legs)
        } else {
            let back = self.stops.iter().rev().map(String::as_str);
            Box::new(
                stops
                    .tuple_windows::<(&str, &str)>()
                    .chain(back.tuple_windows()),
            )
        }
    }

    /// Stop names in travel order, with the start repeated at the end of a circular route.
    pub fn traversal(&self) -> impl Iterator<Item = &str> {
        self.stops
            .first()
            .map(String::as_str)
            .into_iter()
            .chain(self.legs().map(|(_, to)| to))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceRecord {
    pub from: String,
    pub to: String,
    pub meters: u32,
}

impl DistanceRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>, meters: u32) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            meters,
        }
    }
}
