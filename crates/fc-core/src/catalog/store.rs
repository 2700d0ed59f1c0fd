//! Storefront power-backup products

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    All,
    Generators,
    Ups,
    Powerbanks,
}

impl Category {
    pub fn matches(self, other: Category) -> bool {
        self == Category::All || self == other
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Category::All),
            "generators" | "generator" => Ok(Category::Generators),
            "ups" => Ok(Category::Ups),
            "powerbanks" | "powerbank" => Ok(Category::Powerbanks),
            other => Err(CoreError::Validation(format!("unknown category '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSpec {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub price: u32,
    pub image: String,
    pub short_desc: String,
    pub description: String,
    pub specs: Vec<ProductSpec>,
    pub features: Vec<String>,
    pub in_box: Vec<String>,
    pub rating: f32,
}

struct Draft<'a> {
    id: &'a str,
    name: &'a str,
    category: Category,
    price: u32,
    short_desc: &'a str,
    description: &'a str,
    specs: &'a [(&'a str, &'a str)],
    features: &'a [&'a str],
    in_box: &'a [&'a str],
    rating: f32,
}

impl Draft<'_> {
    fn build(self) -> Product {
        Product {
            id: self.id.to_string(),
            name: self.name.to_string(),
            category: self.category,
            price: self.price,
            image: format!("/assets/store/{}.jpg", self.id),
            short_desc: self.short_desc.to_string(),
            description: self.description.to_string(),
            specs: self
                .specs
                .iter()
                .map(|(label, value)| ProductSpec {
                    label: label.to_string(),
                    value: value.to_string(),
                })
                .collect(),
            features: self.features.iter().map(|f| f.to_string()).collect(),
            in_box: self.in_box.iter().map(|i| i.to_string()).collect(),
            rating: self.rating,
        }
    }
}

/// Products in the given category, in catalog order
pub fn products_in(category: Category) -> Vec<Product> {
    products()
        .into_iter()
        .filter(|p| category.matches(p.category))
        .collect()
}

pub fn find_product(id: &str) -> Option<Product> {
    products().into_iter().find(|p| p.id == id)
}

pub fn products() -> Vec<Product> {
    vec![
        Draft {
            id: "gen-1",
            name: "Titan 3000 Inverter Generator",
            category: Category::Generators,
            price: 12999,
            short_desc: "Portable power for the whole home office.",
            description: "Pure sine wave output, safe for laptops and fibre ONTs. Runs 7 hours at 50% load.",
            specs: &[("Output", "3000W"), ("Fuel Type", "Petrol"), ("Noise Level", "58dB"), ("Start", "Electric/Recoil")],
            features: &["Silent Operation Technology", "Eco-Mode Fuel Saving", "Digital Load Display", "Overload Protection"],
            in_box: &["Titan 3000 Generator", "Oil Funnel", "Spark Plug Wrench", "DC Charging Cables"],
            rating: 4.8,
        },
        Draft {
            id: "ups-1",
            name: "Mini DC UPS 8800mAh",
            category: Category::Ups,
            price: 899,
            short_desc: "Keep your Fibre WiFi running during loadshedding.",
            description: "Plug-and-play backup for WiFi routers and fibre ONT devices with seamless switchover.",
            specs: &[("Capacity", "8800mAh"), ("Output", "9V / 12V Selectable"), ("Runtime", "4-6 Hours"), ("Ports", "DC + USB")],
            features: &["Zero-lag switchover", "Lithium-ion battery", "Over-charge protection", "Universal compatibility"],
            in_box: &["Mini DC UPS", "DC Splitter Cable", "AC Power Cord", "User Manual"],
            rating: 4.9,
        },
        Draft {
            id: "ups-2",
            name: "Quantum Power Station 500",
            category: Category::Ups,
            price: 6499,
            short_desc: "Power your laptop, monitor and wifi.",
            description: "A 500Wh station that charges a laptop 8 times or runs a TV and router for 5 hours.",
            specs: &[("Capacity", "500Wh"), ("AC Output", "300W Pure Sine"), ("Recharge", "Wall/Solar/Car"), ("Weight", "4.5kg")],
            features: &["LCD Info Screen", "Built-in LED Flashlight", "Solar Charging Compatible", "3x USB-A, 1x USB-C"],
            in_box: &["Power Station 500", "AC Adapter", "Car Charger Cable", "Cigarette Lighter Socket"],
            rating: 4.7,
        },
        Draft {
            id: "pb-1",
            name: "PocketJuice 20k",
            category: Category::Powerbanks,
            price: 599,
            short_desc: "Fast charging for phones and tablets.",
            description: "Slim high capacity power bank with Power Delivery fast charging.",
            specs: &[("Capacity", "20,000mAh"), ("Output", "20W PD"), ("Ports", "2x USB-A, 1x USB-C"), ("Material", "Aluminum Alloy")],
            features: &["Fast Charge Support", "Digital % Display", "Flight Safe", "Short-circuit Protection"],
            in_box: &["PocketJuice 20k", "USB-C to USB-C Cable", "Travel Pouch"],
            rating: 4.6,
        },
        Draft {
            id: "ups-3",
            name: "RouterGuard Pro UPS",
            category: Category::Ups,
            price: 1299,
            short_desc: "Extended battery life for dual-band routers.",
            description: "Up to 8 hours of backup power for high-performance routers, with auto-start.",
            specs: &[("Capacity", "14000mAh"), ("Output", "5V/9V/12V"), ("Runtime", "6-8 Hours"), ("Ports", "Multi-DC")],
            features: &["High Capacity Cells", "Intelligent Charging", "Over-voltage Protection", "POE Support"],
            in_box: &["RouterGuard Pro", "Splitter Cable", "Manual"],
            rating: 4.8,
        },
        Draft {
            id: "gen-2",
            name: "MaxPower 5kW Generator",
            category: Category::Generators,
            price: 18999,
            short_desc: "Heavy duty backup for larger homes.",
            description: "Runs essential appliances including fridges and lights. Push-button start.",
            specs: &[("Output", "5000W"), ("Fuel", "Petrol"), ("Tank", "25L"), ("Start", "Electric Key")],
            features: &["AVR Voltage Regulation", "Low Oil Alert", "Heavy Duty Wheels", "Circuit Breaker"],
            in_box: &["Generator Unit", "Wheel Kit", "Tools"],
            rating: 4.7,
        },
        Draft {
            id: "pb-2",
            name: "SlimLine 10k",
            category: Category::Powerbanks,
            price: 349,
            short_desc: "Pocket-sized power for daily use.",
            description: "Ultra-thin design for keeping your phone topped up during the day.",
            specs: &[("Capacity", "10000mAh"), ("Output", "2.1A"), ("Ports", "2x USB-A"), ("Weight", "180g")],
            features: &["Slim Profile", "LED Indicator", "Dual Charging", "Durable Casing"],
            in_box: &["Powerbank", "Micro-USB Cable"],
            rating: 4.5,
        },
        Draft {
            id: "pb-3",
            name: "TravelMate 10k",
            category: Category::Powerbanks,
            price: 399,
            short_desc: "Rugged power for on the go.",
            description: "Textured grip and compact size with a built-in flashlight.",
            specs: &[("Capacity", "10000mAh"), ("Output", "2.1A"), ("Feature", "Flashlight"), ("Weight", "200g")],
            features: &["Textured Grip", "Built-in Torch", "Compact Size", "Fast Recharging"],
            in_box: &["Powerbank", "USB-C Cable"],
            rating: 4.4,
        },
        Draft {
            id: "ups-4",
            name: "Nano UPS",
            category: Category::Ups,
            price: 599,
            short_desc: "Ultra-compact backup for ONT devices.",
            description: "Small form factor UPS for fibre termination units or small cameras.",
            specs: &[("Capacity", "4400mAh"), ("Output", "12V DC"), ("Runtime", "3-4 Hours"), ("Size", "Compact")],
            features: &["Direct DC Plug", "Auto Switch", "Lightweight", "Wall Mountable"],
            in_box: &["Nano UPS", "Connector Set"],
            rating: 4.6,
        },
    ]
    .into_iter()
    .map(Draft::build)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_filter() {
        assert_eq!(products_in(Category::All).len(), 9);
        let ups = products_in(Category::Ups);
        assert_eq!(ups.len(), 4);
        assert!(ups.iter().all(|p| p.category == Category::Ups));
        assert_eq!(products_in(Category::Generators)[0].id, "gen-1");
    }

    #[test]
    fn test_find_product() {
        assert_eq!(find_product("pb-2").map(|p| p.price), Some(349));
        assert!(find_product("pb-9").is_none());
    }
}
