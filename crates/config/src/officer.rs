//! Regional sales officer registry

use lead_pulse_core::Officer;

fn officer(name: &str, region: &str, hub: &str, phone: &str) -> Officer {
    Officer {
        name: name.to_string(),
        region: region.to_string(),
        hub: hub.to_string(),
        phone: phone.to_string(),
    }
}

/// Built-in officer registry
pub fn default_officers() -> Vec<Officer> {
    vec![
        officer("Rohan Sharma", "Nagpur, MH", "Maharashtra West", "+919988776655"),
        officer("Amit Das", "Kolkata, WB", "Bengal Regional", "+918877665544"),
        officer("Suresh Reddy", "Visakhapatnam, AP", "Andhra Coastal", "+917766554433"),
        officer("Priya Patel", "Ahmedabad, GJ", "Gujarat Central", "+916655443322"),
        officer("Vikram Singh", "Jamshedpur, JH", "Jharkhand Industrial", "+915544332211"),
        officer("Meera Krishnan", "Chennai, TN", "Tamil Nadu North", "N/A"),
    ]
}

/// Officer returned when no region matches
pub fn default_fallback_officer() -> Officer {
    officer("Regional Sales Manager", "Zonal", "Zonal Office", "N/A")
}
