// Physical constants in SI units:
// - Distance: metres
// - Mass: kilograms
// - Time: seconds
// - Temperature: kelvin

/// Gravitational constant (m^3 kg^-1 s^-2)
pub const G: f64 = 6.674_30e-11;

/// Speed of light (m/s)
pub const C: f64 = 299_792_458.0;

pub const SOLAR_MASS: f64 = 1.988_47e30;
pub const SOLAR_RADIUS: f64 = 6.957e8;
pub const SOLAR_TEMPERATURE: f64 = 5778.0;

pub const EARTH_MASS: f64 = 5.972_2e24;
pub const EARTH_RADIUS: f64 = 6.371e6;

/// Astronomical unit (m)
pub const AU: f64 = 1.495_978_707e11;

/// Light year (m)
pub const LIGHT_YEAR: f64 = 9.460_730_472_580_8e15;

/// Cosmic microwave background temperature today (K)
pub const CMB_TEMPERATURE: f64 = 2.725;

/// Hawking temperature of one solar mass, scaled: T = coefficient * SOLAR_MASS / M
pub const HAWKING_COEFFICIENT: f64 = 6.169e-8;

/// Radius of the observable universe (m)
pub const UNIVERSE_RADIUS: f64 = 4.4e26;

/// Ordinary plus dark matter in the observable universe (kg)
pub const UNIVERSE_MASS: f64 = 1.5e53;

/// Default major radius of an asteroid field (m)
pub const ASTEROID_FIELD_SPACE: f64 = 3.15e11;

/// Bulk density of sparse particulate matter in an asteroid field (kg/m^3)
pub const ASTEROID_FIELD_DENSITY: f64 = 7e-8;

/// Thickness of an Oort cloud shell, measured from its base radius (m)
pub const OORT_CLOUD_SPACE: f64 = 7.5e15;

/// Gap between an Oort cloud's base radius and its inner edge (m)
pub const OORT_CLOUD_INNER_OFFSET: f64 = 3e15;

/// Total mass of an Oort cloud (kg)
pub const OORT_CLOUD_MASS: f64 = 3e25;

/// Radius of the region a star system claims (m); must exceed OORT_CLOUD_SPACE
pub const STAR_SYSTEM_SPACE: f64 = 1.5e16;
