//! Resolves an IANA timezone for a coordinate, fully offline.
//!
//! The resolver keeps an R-Tree over an embedded table of zone anchor points
//! and returns the zone of the nearest anchor by great-circle distance. The
//! tree search runs on squared lat/lon distance (cheap, good enough to rank
//! candidates); the final pick among the closest candidates is re-ranked with
//! Haversine so longitude compression near the poles doesn't mislead.

use crate::zone::anchors::ZONE_ANCHORS;
use crate::zone::error::ZoneError;
use chrono_tz::Tz;
use haversine::{distance, Location as HaversineLocation, Units};
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use std::collections::HashMap;
use std::sync::RwLock;

/// How many tree candidates get the exact-distance re-rank.
const REFINE_CANDIDATES: usize = 4;

/// A single anchor point: the representative location of one IANA zone.
#[derive(Debug, Clone)]
pub(crate) struct ZoneAnchor {
    latitude: f64,
    longitude: f64,
    zone: Tz,
}

impl RTreeObject for ZoneAnchor {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.latitude, self.longitude])
    }
}

impl PointDistance for ZoneAnchor {
    /// Squared Euclidean distance in degrees. An approximation, only used to
    /// shortlist candidates before the Haversine re-rank.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.latitude - point[0];
        let dy = self.longitude - point[1];
        dx * dx + dy * dy
    }
}

/// Offline `(lat, lon) -> Tz` resolver with per-coordinate memoisation.
///
/// Memoisation is write-once per quantised coordinate: two requests racing on
/// the same coordinate both compute the same zone, so the second writer is
/// harmless.
#[derive(Debug)]
pub struct ZoneResolver {
    rtree: RTree<ZoneAnchor>,
    memo: RwLock<HashMap<(i64, i64), Tz>>,
}

impl ZoneResolver {
    /// Builds the resolver from the embedded anchor table.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::UnknownZone`] if an anchor names a zone the IANA
    /// database bundled with `chrono-tz` does not know. This indicates a
    /// build-time table defect, not a runtime condition.
    pub fn new() -> Result<Self, ZoneError> {
        let anchors = ZONE_ANCHORS
            .iter()
            .map(|&(latitude, longitude, name)| {
                let zone: Tz = name
                    .parse()
                    .map_err(|_| ZoneError::UnknownZone(name.to_string()))?;
                Ok(ZoneAnchor {
                    latitude,
                    longitude,
                    zone,
                })
            })
            .collect::<Result<Vec<_>, ZoneError>>()?;

        Ok(ZoneResolver {
            rtree: RTree::bulk_load(anchors),
            memo: RwLock::new(HashMap::new()),
        })
    }

    /// Resolves the IANA zone for a coordinate.
    ///
    /// # Errors
    ///
    /// * [`ZoneError::InvalidCoordinate`] when the coordinate is out of range.
    /// * [`ZoneError::NoZoneFound`] if the anchor table produced no candidate
    ///   (cannot happen with the embedded table, kept for contract clarity).
    pub fn resolve(&self, lat: f64, lon: f64) -> Result<Tz, ZoneError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(ZoneError::InvalidCoordinate { lat, lon });
        }

        let key = quantise(lat, lon);
        {
            let memo = self.memo.read().unwrap_or_else(|e| e.into_inner());
            if let Some(zone) = memo.get(&key) {
                return Ok(*zone);
            }
        }

        let zone = self.lookup(lat, lon)?;

        // A racing second writer computed the same value; last write wins.
        let mut memo = self.memo.write().unwrap_or_else(|e| e.into_inner());
        memo.insert(key, zone);
        Ok(zone)
    }

    fn lookup(&self, lat: f64, lon: f64) -> Result<Tz, ZoneError> {
        let here = HaversineLocation {
            latitude: lat,
            longitude: lon,
        };
        self.rtree
            .nearest_neighbor_iter(&[lat, lon])
            .take(REFINE_CANDIDATES)
            .map(|anchor| {
                let there = HaversineLocation {
                    latitude: anchor.latitude,
                    longitude: anchor.longitude,
                };
                (
                    anchor.zone,
                    distance(
                        HaversineLocation {
                            latitude: here.latitude,
                            longitude: here.longitude,
                        },
                        there,
                        Units::Kilometers,
                    ),
                )
            })
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(zone, _)| zone)
            .ok_or(ZoneError::NoZoneFound { lat, lon })
    }
}

/// Quantises to ~0.01 degree so nearby queries share a memo slot.
fn quantise(lat: f64, lon: f64) -> (i64, i64) {
    ((lat * 100.0).round() as i64, (lon * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> ZoneResolver {
        ZoneResolver::new().expect("embedded anchor table must parse")
    }

    #[test]
    fn resolves_major_cities() {
        let r = resolver();
        assert_eq!(
            r.resolve(52.52, 13.40).unwrap(),
            chrono_tz::Europe::Berlin
        );
        assert_eq!(
            r.resolve(40.71, -74.01).unwrap(),
            chrono_tz::America::New_York
        );
        assert_eq!(
            r.resolve(-3.7319, -38.5267).unwrap(),
            chrono_tz::America::Fortaleza
        );
        assert_eq!(
            r.resolve(35.68, 139.69).unwrap(),
            chrono_tz::Asia::Tokyo
        );
    }

    #[test]
    fn memoises_and_returns_same_zone() {
        let r = resolver();
        let first = r.resolve(48.86, 2.35).unwrap();
        let second = r.resolve(48.86, 2.35).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, chrono_tz::Europe::Paris);
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let r = resolver();
        assert!(matches!(
            r.resolve(91.0, 0.0),
            Err(ZoneError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            r.resolve(0.0, -181.0),
            Err(ZoneError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn poles_fall_back_to_polar_anchors() {
        let r = resolver();
        // Must resolve to *something* even far from civilisation.
        assert!(r.resolve(-89.9, 12.0).is_ok());
        assert!(r.resolve(89.9, -150.0).is_ok());
    }
}
