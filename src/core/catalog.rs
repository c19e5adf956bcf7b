//! Option lists offered by the wizard's select inputs.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
}

pub const CURRENCIES: &[Currency] = &[
    Currency { code: "USD", symbol: "$", name: "US Dollar" },
    Currency { code: "EUR", symbol: "€", name: "Euro" },
    Currency { code: "GBP", symbol: "£", name: "British Pound" },
    Currency { code: "JPY", symbol: "¥", name: "Japanese Yen" },
    Currency { code: "CAD", symbol: "C$", name: "Canadian Dollar" },
    Currency { code: "AUD", symbol: "A$", name: "Australian Dollar" },
    Currency { code: "CHF", symbol: "CHF", name: "Swiss Franc" },
    Currency { code: "CNY", symbol: "¥", name: "Chinese Yuan" },
    Currency { code: "INR", symbol: "₹", name: "Indian Rupee" },
];

pub fn currency_symbol(code: &str) -> &'static str {
    CURRENCIES
        .iter()
        .find(|c| c.code == code)
        .map(|c| c.symbol)
        .unwrap_or("$")
}

pub const REGIONS: &[&str] = &[
    "North America",
    "South America",
    "Europe",
    "Asia Pacific",
    "Middle East",
    "Africa",
    "Australia & Oceania",
];

pub const TIMEZONES: &[&str] = &[
    "GMT-12:00 (Baker Island)",
    "GMT-11:00 (Samoa)",
    "GMT-10:00 (Hawaii)",
    "GMT-09:00 (Alaska)",
    "GMT-08:00 (Pacific)",
    "GMT-07:00 (Mountain)",
    "GMT-06:00 (Central)",
    "GMT-05:00 (Eastern)",
    "GMT-04:00 (Atlantic)",
    "GMT-03:00 (Argentina)",
    "GMT-02:00 (South Georgia)",
    "GMT-01:00 (Cape Verde)",
    "GMT+00:00 (UTC)",
    "GMT+01:00 (Central European)",
    "GMT+02:00 (Eastern European)",
    "GMT+03:00 (Moscow)",
    "GMT+04:00 (Gulf)",
    "GMT+05:00 (Pakistan)",
    "GMT+05:30 (India)",
    "GMT+06:00 (Bangladesh)",
    "GMT+07:00 (Thailand)",
    "GMT+08:00 (China)",
    "GMT+09:00 (Japan)",
    "GMT+10:00 (Australia Eastern)",
    "GMT+11:00 (Solomon Islands)",
    "GMT+12:00 (New Zealand)",
];

pub const CATEGORY_OPTIONS: &[&str] = &[
    "Carhartt",
    "Ralph Lauren",
    "Stone Island",
    "Stussy",
    "Nike",
    "Burberry",
    "Patagonia",
    "Other",
];

pub const GRADES: &[&str] = &["A Grade", "B Grade", "C Grade", "Mix Grade"];

pub const SIZES: &[&str] = &[
    "XS", "S", "M", "L", "XL", "XXL", "XS–S", "S–M", "M–L", "L–XL", "XL–XXL", "Custom",
];

pub const COLORS: &[&str] = &[
    "Black",
    "White",
    "Red",
    "Blue",
    "Green",
    "Yellow",
    "Orange",
    "Purple",
    "Pink",
    "Gray",
    "Brown",
    "Multi-color",
    "Custom",
];
