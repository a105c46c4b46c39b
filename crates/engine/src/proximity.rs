//! Proximity Resolver
//!
//! Nearest supply facility by great-circle distance, plus the coarse
//! sector-based volume estimate.

use std::cmp::Ordering;

use lead_pulse_config::{RegistryConfig, VolumeTable};
use lead_pulse_core::{Coordinates, Error, Facility, Proximity, Result, VolumeEstimate};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Round a distance to one decimal place for display
pub fn format_distance_km(distance_km: f64) -> String {
    format!("{:.1}", distance_km)
}

/// Resolves the nearest facility for a site
#[derive(Debug, Clone)]
pub struct ProximityResolver {
    facilities: Vec<Facility>,
    volume: VolumeTable,
}

impl ProximityResolver {
    pub fn new(facilities: Vec<Facility>, volume: VolumeTable) -> Result<Self> {
        if facilities.is_empty() {
            return Err(Error::configuration("facility registry is empty"));
        }
        Ok(Self { facilities, volume })
    }

    pub fn from_registry(config: &RegistryConfig) -> Result<Self> {
        Self::new(config.facilities.clone(), config.volume.clone())
    }

    /// Facility with the minimum haversine distance, and that distance
    ///
    /// Equal distances resolve to the facility whose name sorts first, so the
    /// answer does not depend on registry order.
    pub fn nearest_facility(&self, latitude: f64, longitude: f64) -> Result<(&Facility, f64)> {
        let site = Coordinates::new(latitude, longitude);
        if !site.is_valid() {
            return Err(Error::validation(
                "coordinates",
                format!("invalid site coordinates ({}, {})", latitude, longitude),
            ));
        }

        self.facilities
            .iter()
            .map(|f| {
                let dist = haversine_distance(latitude, longitude, f.latitude, f.longitude);
                (f, dist)
            })
            .min_by(|a, b| match a.1.total_cmp(&b.1) {
                Ordering::Equal => a.0.name.cmp(&b.0.name),
                other => other,
            })
            .ok_or_else(|| Error::configuration("facility registry is empty"))
    }

    /// Proximity record stored on a lead
    pub fn resolve(&self, site: Coordinates) -> Result<Proximity> {
        let (facility, distance_km) = self.nearest_facility(site.latitude, site.longitude)?;
        Ok(Proximity {
            nearest_facility: facility.name.clone(),
            distance_km,
        })
    }

    /// Coarse shipment volume for an industry sector
    pub fn estimate_volume(&self, sector: &str) -> VolumeEstimate {
        VolumeEstimate::new(self.volume.tonnes_for(sector))
    }

    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }
}
