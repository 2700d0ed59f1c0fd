//! Built-in provider and package tables

use super::{Package, Provider};

fn provider(id: &str, name: &str, logo: &str, rating: f32, sla: &str) -> Provider {
    Provider {
        id: id.to_string(),
        name: name.to_string(),
        logo: logo.to_string(),
        rating,
        sla: sla.to_string(),
    }
}

// Every built-in package is a month-to-month, uncapped deal with router and installation.
fn package(
    id: &str,
    provider_id: &str,
    name: &str,
    (speed_down, speed_up): (u32, u32),
    price: u32,
    features: [&str; 3],
) -> Package {
    Package {
        id: id.to_string(),
        provider_id: provider_id.to_string(),
        name: name.to_string(),
        speed_down,
        speed_up,
        price,
        features: features.iter().map(|f| f.to_string()).collect(),
        contract_term: "Month-to-Month".to_string(),
        has_router: true,
        has_installation: true,
        uncapped: true,
    }
}

pub fn providers() -> Vec<Provider> {
    vec![
        provider("frogfoot", "Frogfoot", "https://picsum.photos/id/1/64/64", 4.8, "99.9% Uptime"),
        provider("openserve", "Openserve", "https://picsum.photos/id/2/64/64", 4.7, "99.8% Uptime"),
        provider("vumatel", "Vumatel", "https://picsum.photos/id/3/64/64", 4.9, "99.95% Uptime"),
    ]
}

pub fn packages() -> Vec<Package> {
    vec![
        // Frogfoot, symmetrical
        package("ff-10", "frogfoot", "Budget User", (10, 10), 499,
            ["Symmetrical Speed", "Best for Browsing", "Free Router"]),
        package("ff-20", "frogfoot", "Light User", (20, 20), 599,
            ["Symmetrical Speed", "HD Streaming", "Free Installation"]),
        package("ff-50", "frogfoot", "Family Plan", (50, 50), 749,
            ["Symmetrical Speed", "4K Streaming", "Multi-User Home"]),
        // Openserve, asymmetric
        package("os-10", "openserve", "Budget User", (10, 5), 289,
            ["Uncapped", "Reliable Connection", "Starter Pack"]),
        package("os-20", "openserve", "Light User", (20, 10), 305,
            ["Uncapped", "Widest Coverage", "Free Activation"]),
        package("os-50", "openserve", "Family Plan", (50, 25), 622,
            ["Uncapped", "Fast Downloads", "Free Router"]),
        // Vumatel, the fallback network
        package("vuma-10", "vumatel", "Budget User", (10, 10), 479,
            ["Uncapped Data", "Budget Friendly", "Free WiFi Router"]),
        package("vuma-20", "vumatel", "Light User", (20, 10), 599,
            ["Uncapped Data", "Free WiFi Router", "Best Value"]),
        package("vuma-50", "vumatel", "Family Plan", (50, 50), 799,
            ["Uncapped Data", "Ultra Fast", "Free WiFi Router"]),
    ]
}
