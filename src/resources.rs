#![deny(clippy::all, clippy::pedantic)]

/// A REST collection a subcommand operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Subcommand name.
    pub name: &'static str,
    /// Path segment appended to the base URL.
    pub path: &'static str,
    /// Shape of the JSON payload accepted by create/update.
    pub payload: &'static str,
}

pub const BRANDS: ResourceDescriptor = ResourceDescriptor {
    name: "brands",
    path: "brands",
    payload: "{\n  name: string\n}",
};

pub const CARS: ResourceDescriptor = ResourceDescriptor {
    name: "cars",
    path: "cars",
    payload: "{\n  name: string,\n  brandId: string\n}",
};
