//! Catalog store and cross-venue machine aggregation.
//!
//! [`CatalogStore`] holds the immutable venue list for the session. The catalog
//! data source itself is external: whatever supplies the venues (a static table,
//! a file, a remote fetch) hands the finished list to [`CatalogStore::new`]
//! before first render. A built-in sample catalog lives in
//! [`sample_venues`](crate::domain::sample_venues).

use std::collections::HashMap;

use crate::domain::venue::{Machine, Venue, VenueId};

/// A machine name grouped across all venues that carry it.
///
/// Derived on demand, never stored. Venue names are listed in first-seen
/// catalog order and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedMachine {
    /// Machine name the group is keyed on.
    pub name: String,
    /// Release year. When venues disagree on the year for the same name, the
    /// first-seen year wins.
    pub year: i32,
    /// Names of the venues carrying a machine of this name, in first-seen
    /// order, deduplicated.
    pub venue_names: Vec<String>,
}

/// Immutable venue catalog for the session.
///
/// Read-only after construction; the single-threaded event model means no
/// locking is needed. Lookup by id is linear, which is fine at catalog scale.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    venues: Vec<Venue>,
}

impl CatalogStore {
    /// Builds a catalog from a venue list, enforcing coordinate validity.
    ///
    /// Venues with out-of-range or non-finite coordinates are skipped with a
    /// warning rather than failing startup: a bad row in the data source must
    /// never block the application.
    #[must_use]
    pub fn new(venues: Vec<Venue>) -> Self {
        let venues: Vec<Venue> = venues
            .into_iter()
            .filter(|venue| {
                if venue.coords.is_valid() {
                    true
                } else {
                    tracing::warn!(
                        venue_id = %venue.id,
                        venue_name = %venue.name,
                        lat = venue.coords.lat,
                        lng = venue.coords.lng,
                        "skipping venue with invalid coordinates"
                    );
                    false
                }
            })
            .collect();

        tracing::debug!(venue_count = venues.len(), "catalog initialized");
        Self { venues }
    }

    /// All venues in catalog order.
    #[must_use]
    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    /// Looks up a venue by id.
    ///
    /// Returns `None` for ids not in the catalog; callers treat that as a
    /// stale reference and skip, never as an error.
    #[must_use]
    pub fn get(&self, id: VenueId) -> Option<&Venue> {
        self.venues.iter().find(|venue| venue.id == id)
    }

    /// Number of venues in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.venues.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    /// Groups machines across all venues by name.
    ///
    /// Groups appear in first-seen order (catalog order, then machine order
    /// within each venue). On a name collision with differing years the
    /// first-seen year wins; venue names are appended in encounter order and
    /// deduplicated.
    #[must_use]
    pub fn aggregated_machines(&self) -> Vec<AggregatedMachine> {
        let mut groups: Vec<AggregatedMachine> = Vec::new();
        let mut index_by_name: HashMap<&str, usize> = HashMap::new();

        for venue in &self.venues {
            for machine in &venue.machines {
                match index_by_name.get(machine.name.as_str()) {
                    Some(&i) => {
                        let group = &mut groups[i];
                        if !group.venue_names.contains(&venue.name) {
                            group.venue_names.push(venue.name.clone());
                        }
                    }
                    None => {
                        index_by_name.insert(machine.name.as_str(), groups.len());
                        groups.push(AggregatedMachine {
                            name: machine.name.clone(),
                            year: machine.year,
                            venue_names: vec![venue.name.clone()],
                        });
                    }
                }
            }
        }

        groups
    }
}

/// Built-in sample catalog: three venues with their machine lists.
///
/// Useful for demos and as a deterministic fixture; production hosts supply
/// their own list to [`CatalogStore::new`].
#[must_use]
pub fn sample_venues() -> Vec<Venue> {
    use crate::domain::venue::Coordinates;

    vec![
        Venue {
            id: VenueId(1),
            name: "Barcade Manhattan".to_string(),
            coords: Coordinates { lat: 40.7211, lng: -73.9573 },
            address: "148 West 24th St, New York, NY 10011".to_string(),
            distance_label: "0.8 km".to_string(),
            hours: "Mon-Fri: 4pm-12am, Sat-Sun: 12pm-2am".to_string(),
            phone: "(212) 582-4575".to_string(),
            website: "www.barcade.com".to_string(),
            machines: vec![
                Machine::new("The Addams Family", 1992),
                Machine::new("Medieval Madness", 1997),
                Machine::new("Attack from Mars", 1995),
                Machine::new("Theatre of Magic", 1995),
            ],
        },
        Venue {
            id: VenueId(2),
            name: "Modern Pinball NYC".to_string(),
            coords: Coordinates { lat: 40.7589, lng: -73.9851 },
            address: "362 8th Ave, New York, NY 10001".to_string(),
            distance_label: "5.2 km".to_string(),
            hours: "Daily: 11am-11pm".to_string(),
            phone: "(212) 904-1543".to_string(),
            website: "www.modernpinballnyc.com".to_string(),
            machines: vec![
                Machine::new("Star Wars", 2017),
                Machine::new("The Avengers", 2012),
                Machine::new("The Walking Dead", 2014),
                Machine::new("Game of Thrones", 2015),
                Machine::new("AC/DC", 2012),
            ],
        },
        Venue {
            id: VenueId(3),
            name: "Four Quarters East London".to_string(),
            coords: Coordinates { lat: 51.5238, lng: -0.0765 },
            address: "187 Rivington St, London EC2A 3EY, UK".to_string(),
            distance_label: "572 km".to_string(),
            hours: "Mon-Sat: 10am-10pm, Sun: 12pm-8pm".to_string(),
            phone: "+44 20 7729 4782".to_string(),
            website: "www.fourquarters.bar".to_string(),
            machines: vec![
                Machine::new("The Getaway: High Speed II", 1992),
                Machine::new("Twilight Zone", 1993),
                Machine::new("Indiana Jones: The Pinball Adventure", 1993),
                Machine::new("Terminator 2: Judgment Day", 1991),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::venue::Coordinates;

    fn bare_venue(id: i64, name: &str, machines: Vec<Machine>) -> Venue {
        Venue {
            id: VenueId(id),
            name: name.to_string(),
            coords: Coordinates { lat: 40.0, lng: -73.0 },
            address: String::new(),
            distance_label: String::new(),
            hours: "Daily".to_string(),
            phone: String::new(),
            website: String::new(),
            machines,
        }
    }

    #[test]
    fn invalid_coordinates_are_skipped_not_fatal() {
        let mut bad = bare_venue(9, "Nowhere", vec![]);
        bad.coords = Coordinates { lat: 120.0, lng: 0.0 };
        let catalog = CatalogStore::new(vec![bare_venue(1, "Ok", vec![]), bad]);

        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(VenueId(9)).is_none());
    }

    #[test]
    fn aggregation_groups_by_name_in_first_seen_order() {
        let catalog = CatalogStore::new(vec![
            bare_venue(1, "A", vec![Machine::new("Twilight Zone", 1993), Machine::new("Star Wars", 2017)]),
            bare_venue(2, "B", vec![Machine::new("Twilight Zone", 1993)]),
        ]);

        let groups = catalog.aggregated_machines();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Twilight Zone");
        assert_eq!(groups[0].venue_names, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(groups[1].name, "Star Wars");
        assert_eq!(groups[1].venue_names, vec!["A".to_string()]);
    }

    #[test]
    fn aggregation_first_seen_year_wins_on_collision() {
        let catalog = CatalogStore::new(vec![
            bare_venue(1, "A", vec![Machine::new("Star Wars", 2017)]),
            bare_venue(2, "B", vec![Machine::new("Star Wars", 1992)]),
        ]);

        let groups = catalog.aggregated_machines();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].year, 2017);
    }

    #[test]
    fn aggregation_deduplicates_venue_names() {
        let catalog = CatalogStore::new(vec![bare_venue(
            1,
            "A",
            vec![Machine::new("Star Wars", 2017), Machine::new("Star Wars", 2017)],
        )]);

        let groups = catalog.aggregated_machines();
        assert_eq!(groups[0].venue_names, vec!["A".to_string()]);
    }

    #[test]
    fn sample_catalog_is_well_formed() {
        let catalog = CatalogStore::new(sample_venues());
        assert_eq!(catalog.len(), 3);
        assert!(catalog.venues().iter().all(|v| v.coords.is_valid()));
        assert!(catalog.venues().iter().all(|v| !v.machines.is_empty()));
    }
}
