//! Web hosting tiers

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostingPlan {
    pub name: String,
    /// Monthly
    pub price: u32,
    pub description: String,
    pub features: Vec<String>,
    pub highlight: bool,
}

const SHARED: [&str; 6] = [
    "Superior and secure hosting",
    "Easy-to-use control panel",
    "Lightning-fast loading speed",
    "Free website migration",
    "Offsite backup",
    "SSL certificate",
];

fn plan(name: &str, price: u32, description: &str, extra: &[&str], highlight: bool) -> HostingPlan {
    HostingPlan {
        name: name.to_string(),
        price,
        description: description.to_string(),
        features: SHARED.iter().chain(extra).map(|f| f.to_string()).collect(),
        highlight,
    }
}

pub fn hosting_plans() -> Vec<HostingPlan> {
    vec![
        plan(
            "Basic Package",
            39,
            "Superior and secure hosting for personal sites.",
            &[
                "Initial assessment and strategic IT roadmap",
                "2 GB NVMe storage",
                "30 GB traffic",
                "1 MySQL database",
                "5 email accounts",
                "1 website",
                "3 domain aliases",
            ],
            false,
        ),
        plan(
            "Standard Package",
            59,
            "Perfect for growing businesses with more traffic.",
            &[
                "Detailed assessment and ongoing advisory",
                "5 GB NVMe storage",
                "Unlimited traffic",
                "3 MySQL databases",
                "30 email accounts",
                "5 websites",
                "5 domain aliases",
            ],
            true,
        ),
        plan(
            "Premium Package",
            149,
            "Advanced performance for e-commerce.",
            &[
                "Comprehensive assessment and ongoing advisory",
                "30 GB NVMe storage",
                "Unlimited traffic",
                "5 MySQL databases",
                "90 email accounts",
                "15 websites",
                "15 domain aliases",
            ],
            false,
        ),
    ]
}
