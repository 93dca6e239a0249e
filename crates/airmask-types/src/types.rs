//! Core types for air-quality readings and mask recommendations.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Highest AQI value the engine distinguishes. Anything above saturates here.
pub const AQI_MAX: u16 = 500;

/// Clamp an arbitrary integer AQI into `0..=AQI_MAX`.
///
/// Providers occasionally emit negative placeholders or saturated sensor
/// values; neither is rejected.
///
/// ```
/// use airmask_types::clamp_aqi;
///
/// assert_eq!(clamp_aqi(-5), 0);
/// assert_eq!(clamp_aqi(42), 42);
/// assert_eq!(clamp_aqi(9999), 500);
/// ```
#[must_use]
pub fn clamp_aqi(aqi: i64) -> u16 {
    aqi.clamp(0, i64::from(AQI_MAX)) as u16
}

/// AQI severity band.
///
/// # Ordering
///
/// Bands are ordered by severity: `Good < Moderate < ... < Hazardous`, so
/// comparisons like `if band >= Band::Unhealthy { ... }` work directly.
///
/// # Display vs Serialization
///
/// `Display` returns the human-readable label ("Unhealthy for Sensitive Groups"),
/// while serde uses the variant name ("UnhealthySensitive").
///
/// ```
/// use airmask_types::Band;
///
/// assert_eq!(format!("{}", Band::UnhealthySensitive), "Unhealthy for Sensitive Groups");
/// assert!(Band::Hazardous > Band::VeryUnhealthy);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Band {
    /// 0-50.
    Good = 0,
    /// 51-100.
    Moderate = 1,
    /// 101-150.
    UnhealthySensitive = 2,
    /// 151-200.
    Unhealthy = 3,
    /// 201-300.
    VeryUnhealthy = 4,
    /// 301 and above.
    Hazardous = 5,
}

impl Band {
    /// All six bands in severity order.
    pub const ALL: [Band; 6] = [
        Band::Good,
        Band::Moderate,
        Band::UnhealthySensitive,
        Band::Unhealthy,
        Band::VeryUnhealthy,
        Band::Hazardous,
    ];

    /// Severity rank, 0 (Good) through 5 (Hazardous).
    #[must_use]
    pub fn severity_rank(self) -> u8 {
        self as u8
    }

    /// The authoritative AQI interval for this band.
    #[must_use]
    pub fn range(self) -> AqiRange {
        match self {
            Band::Good => AqiRange::bounded(0, 50),
            Band::Moderate => AqiRange::bounded(51, 100),
            Band::UnhealthySensitive => AqiRange::bounded(101, 150),
            Band::Unhealthy => AqiRange::bounded(151, 200),
            Band::VeryUnhealthy => AqiRange::bounded(201, 300),
            Band::Hazardous => AqiRange::open(301),
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Band::Good => "Good",
            Band::Moderate => "Moderate",
            Band::UnhealthySensitive => "Unhealthy for Sensitive Groups",
            Band::Unhealthy => "Unhealthy",
            Band::VeryUnhealthy => "Very Unhealthy",
            Band::Hazardous => "Hazardous",
        }
    }

    /// Gradient class token used by badge rendering.
    #[must_use]
    pub fn color_class(self) -> &'static str {
        match self {
            Band::Good => "from-green-400 to-green-600",
            Band::Moderate => "from-yellow-400 to-orange-500",
            Band::UnhealthySensitive => "from-orange-400 to-red-500",
            Band::Unhealthy => "from-red-400 to-red-600",
            Band::VeryUnhealthy => "from-purple-400 to-purple-600",
            Band::Hazardous => "from-purple-600 to-black",
        }
    }

    /// Solid chart color as a `#rrggbb` string.
    #[must_use]
    pub fn hex_color(self) -> &'static str {
        match self {
            Band::Good => "#10b981",
            Band::Moderate => "#f59e0b",
            Band::UnhealthySensitive => "#f97316",
            Band::Unhealthy => "#ef4444",
            Band::VeryUnhealthy => "#8b5cf6",
            Band::Hazardous => "#7c2d12",
        }
    }

    /// Face emoji shown next to the band label.
    pub fn emoji(self) -> &'static str {
        match self {
            Band::Good => "😊",
            Band::Moderate => "😐",
            Band::UnhealthySensitive => "😷",
            Band::Unhealthy => "😨",
            Band::VeryUnhealthy => "😰",
            Band::Hazardous => "☠️",
        }
    }

    /// One-sentence description of the air quality at this band.
    pub fn description(self) -> &'static str {
        match self {
            Band::Good => {
                "Air quality is satisfactory, and air pollution poses little or no risk."
            }
            Band::Moderate => {
                "Air quality is acceptable. However, there may be a risk for some people."
            }
            Band::UnhealthySensitive => {
                "Members of sensitive groups may experience health effects."
            }
            Band::Unhealthy => "Everyone may begin to experience health effects.",
            Band::VeryUnhealthy => {
                "Health alert: The risk of health effects is increased for everyone."
            }
            Band::Hazardous => {
                "Health warning of emergency conditions. Everyone is likely to be affected."
            }
        }
    }

    /// Typical health effects at this band.
    pub fn health_effects(self) -> &'static str {
        match self {
            Band::Good => "None for the general population",
            Band::Moderate => {
                "Unusually sensitive people may experience minor breathing discomfort"
            }
            Band::UnhealthySensitive => {
                "Breathing discomfort for sensitive groups, possible respiratory symptoms"
            }
            Band::Unhealthy => "Breathing difficulties, throat irritation, chest discomfort",
            Band::VeryUnhealthy => {
                "Serious aggravation of respiratory and cardiovascular diseases"
            }
            Band::Hazardous => "Serious risk of respiratory effects for everyone",
        }
    }

    /// Who is at risk at this band.
    pub fn sensitive_groups(self) -> &'static str {
        match self {
            Band::Good => "None",
            Band::Moderate => "People with respiratory or heart conditions",
            Band::UnhealthySensitive => {
                "Children, elderly, people with asthma, heart disease, or lung disease"
            }
            Band::Unhealthy => "Everyone, especially sensitive groups",
            Band::VeryUnhealthy => "Everyone should take precautions",
            Band::Hazardous => "Everyone is at risk",
        }
    }

    /// Static protective advice for this band, most important first.
    pub fn advice(self) -> &'static [&'static str] {
        match self {
            Band::Good => &[
                "Perfect for outdoor activities",
                "No mask needed",
                "Great for exercise",
            ],
            Band::Moderate => &[
                "Generally safe for outdoor activities",
                "Sensitive people should limit prolonged outdoor exertion",
                "Consider light mask for sensitive individuals",
            ],
            Band::UnhealthySensitive => &[
                "Sensitive groups should reduce outdoor activities",
                "Use N95 or KN95 masks",
                "Keep windows closed",
            ],
            Band::Unhealthy => &[
                "Everyone should limit outdoor activities",
                "Use N95 masks when outdoors",
                "Use air purifiers indoors",
            ],
            Band::VeryUnhealthy => &[
                "Avoid outdoor activities",
                "Use N95/N99 masks if going outside",
                "Stay indoors with air purifiers",
            ],
            Band::Hazardous => &[
                "Stay indoors",
                "Use N99 masks if must go outside",
                "Seek medical attention if experiencing symptoms",
            ],
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Closed AQI interval, or closed-lower/unbounded-upper for the top band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AqiRange {
    /// Inclusive lower bound.
    pub lower: u16,
    /// Inclusive upper bound, `None` when open-ended.
    pub upper: Option<u16>,
}

impl AqiRange {
    const fn bounded(lower: u16, upper: u16) -> Self {
        Self {
            lower,
            upper: Some(upper),
        }
    }

    const fn open(lower: u16) -> Self {
        Self { lower, upper: None }
    }

    /// Whether `aqi` falls inside this interval.
    #[must_use]
    pub fn contains(&self, aqi: u16) -> bool {
        aqi >= self.lower && self.upper.is_none_or(|upper| aqi <= upper)
    }
}

impl fmt::Display for AqiRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper {
            Some(upper) => write!(f, "{}-{}", self.lower, upper),
            None => write!(f, "{}+", self.lower),
        }
    }
}

/// A classified AQI: the band plus its interval and rank.
///
/// Tiers are derived views: computed fresh from a reading and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AqiTier {
    pub band: Band,
    pub range: AqiRange,
    pub severity_rank: u8,
}

impl AqiTier {
    /// Build the tier for a band.
    #[must_use]
    pub fn for_band(band: Band) -> Self {
        Self {
            band,
            range: band.range(),
            severity_rank: band.severity_rank(),
        }
    }

    /// Whether this tier is strictly more severe than `other`.
    #[must_use]
    pub fn is_worse_than(&self, other: &AqiTier) -> bool {
        self.severity_rank > other.severity_rank
    }

    pub fn label(&self) -> &'static str {
        self.band.label()
    }

    pub fn color_class(&self) -> &'static str {
        self.band.color_class()
    }
}

impl From<Band> for AqiTier {
    fn from(band: Band) -> Self {
        Self::for_band(band)
    }
}

/// The six tracked pollutants, in fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pollutant {
    #[cfg_attr(feature = "serde", serde(rename = "PM2.5"))]
    Pm25,
    #[cfg_attr(feature = "serde", serde(rename = "PM10"))]
    Pm10,
    #[cfg_attr(feature = "serde", serde(rename = "O3"))]
    O3,
    #[cfg_attr(feature = "serde", serde(rename = "NO2"))]
    No2,
    #[cfg_attr(feature = "serde", serde(rename = "SO2"))]
    So2,
    #[cfg_attr(feature = "serde", serde(rename = "CO"))]
    Co,
}

impl Pollutant {
    /// All pollutants in the fixed order used by charts and legends.
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::O3,
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::Co,
    ];

    /// Canonical key, e.g. `"PM2.5"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::O3 => "O3",
            Pollutant::No2 => "NO2",
            Pollutant::So2 => "SO2",
            Pollutant::Co => "CO",
        }
    }

    /// Long display name, e.g. "Fine Particulate Matter".
    pub fn full_name(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "Fine Particulate Matter",
            Pollutant::Pm10 => "Coarse Particulate Matter",
            Pollutant::O3 => "Ground-level Ozone",
            Pollutant::No2 => "Nitrogen Dioxide",
            Pollutant::So2 => "Sulfur Dioxide",
            Pollutant::Co => "Carbon Monoxide",
        }
    }

    /// What the pollutant is and where it comes from.
    pub fn description(self) -> &'static str {
        match self {
            Pollutant::Pm25 => {
                "Particles smaller than 2.5 micrometers that can penetrate deep into lungs"
            }
            Pollutant::Pm10 => {
                "Particles between 2.5 and 10 micrometers that affect the upper respiratory system"
            }
            Pollutant::O3 => "Secondary pollutant formed by chemical reactions in sunlight",
            Pollutant::No2 => "Reddish-brown gas with a sharp, biting odor",
            Pollutant::So2 => "Colorless gas with a sharp, irritating odor from sulfur compounds",
            Pollutant::Co => "Colorless, odorless gas that can be deadly in high concentrations",
        }
    }

    /// Position in [`Pollutant::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pollutant {
    type Err = Error;

    /// Parse a canonical pollutant name.
    ///
    /// Matching is case-insensitive and ignores `.` and `_`, so `PM2.5`,
    /// `pm25` and `pm2_5` all parse.
    ///
    /// ```
    /// use airmask_types::Pollutant;
    ///
    /// assert_eq!("PM2.5".parse::<Pollutant>(), Ok(Pollutant::Pm25));
    /// assert_eq!("pm2_5".parse::<Pollutant>(), Ok(Pollutant::Pm25));
    /// assert_eq!("co".parse::<Pollutant>(), Ok(Pollutant::Co));
    /// assert!("nh3".parse::<Pollutant>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '.' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "pm25" => Ok(Pollutant::Pm25),
            "pm10" => Ok(Pollutant::Pm10),
            "o3" => Ok(Pollutant::O3),
            "no2" => Ok(Pollutant::No2),
            "so2" => Ok(Pollutant::So2),
            "co" => Ok(Pollutant::Co),
            _ => Err(Error::InvalidInput(format!("unknown pollutant '{}'", s))),
        }
    }
}

/// Concentrations of all six pollutants in µg/m³.
///
/// Every pollutant is always present; absent values are zero. Values are
/// never negative or non-finite. CO is kept in µg/m³ like the rest: any
/// mg/m³ conversion happens once, at display time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "LevelsRepr", into = "LevelsRepr")
)]
pub struct PollutantLevels {
    values: [f64; 6],
}

impl PollutantLevels {
    /// All-zero levels.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Concentration of one pollutant.
    #[must_use]
    pub fn get(&self, pollutant: Pollutant) -> f64 {
        self.values[pollutant.index()]
    }

    /// Set one pollutant. Negative and non-finite values are stored as zero.
    pub fn set(&mut self, pollutant: Pollutant, value: f64) {
        self.values[pollutant.index()] = sanitize(value);
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, pollutant: Pollutant, value: f64) -> Self {
        self.set(pollutant, value);
        self
    }

    /// Iterate `(pollutant, value)` pairs in fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        Pollutant::ALL.iter().map(move |p| (*p, self.get(*p)))
    }

    /// Sum of all six concentrations.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct LevelsRepr {
    #[serde(rename = "PM2.5", default)]
    pm25: f64,
    #[serde(rename = "PM10", default)]
    pm10: f64,
    #[serde(rename = "O3", default)]
    o3: f64,
    #[serde(rename = "NO2", default)]
    no2: f64,
    #[serde(rename = "SO2", default)]
    so2: f64,
    #[serde(rename = "CO", default)]
    co: f64,
}

#[cfg(feature = "serde")]
impl From<LevelsRepr> for PollutantLevels {
    fn from(r: LevelsRepr) -> Self {
        PollutantLevels::zero()
            .with(Pollutant::Pm25, r.pm25)
            .with(Pollutant::Pm10, r.pm10)
            .with(Pollutant::O3, r.o3)
            .with(Pollutant::No2, r.no2)
            .with(Pollutant::So2, r.so2)
            .with(Pollutant::Co, r.co)
    }
}

#[cfg(feature = "serde")]
impl From<PollutantLevels> for LevelsRepr {
    fn from(l: PollutantLevels) -> Self {
        Self {
            pm25: l.get(Pollutant::Pm25),
            pm10: l.get(Pollutant::Pm10),
            o3: l.get(Pollutant::O3),
            no2: l.get(Pollutant::No2),
            so2: l.get(Pollutant::So2),
            co: l.get(Pollutant::Co),
        }
    }
}

/// One canonical air-quality reading for a place.
///
/// Immutable once built: a single query constructs one reading and threads
/// it through classification, recommendation and breakdown.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AqiReading {
    aqi: u16,
    location: String,
    pollutants: PollutantLevels,
    #[cfg_attr(
        feature = "serde",
        serde(
            with = "time::serde::rfc3339::option",
            skip_serializing_if = "Option::is_none"
        )
    )]
    observed_at: Option<time::OffsetDateTime>,
}

impl AqiReading {
    /// Create a reading, clamping `aqi` into `0..=500`.
    #[must_use]
    pub fn new(aqi: i64, location: impl Into<String>, pollutants: PollutantLevels) -> Self {
        Self {
            aqi: clamp_aqi(aqi),
            location: location.into(),
            pollutants,
            observed_at: None,
        }
    }

    /// Attach the observation timestamp.
    #[must_use]
    pub fn with_observed_at(mut self, observed_at: time::OffsetDateTime) -> Self {
        self.observed_at = Some(observed_at);
        self
    }

    pub fn aqi(&self) -> u16 {
        self.aqi
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn pollutants(&self) -> &PollutantLevels {
        &self.pollutants
    }

    /// When the reading was observed. `None` means unknown recency.
    pub fn observed_at(&self) -> Option<time::OffsetDateTime> {
        self.observed_at
    }
}

/// How long a mask lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Lifespan {
    SingleUse,
    Reusable,
    ReusableWithFilters,
}

impl Lifespan {
    /// Whether the mask can be worn more than once.
    #[must_use]
    pub fn is_reusable(self) -> bool {
        matches!(self, Lifespan::Reusable | Lifespan::ReusableWithFilters)
    }
}

impl fmt::Display for Lifespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifespan::SingleUse => write!(f, "Single Use"),
            Lifespan::Reusable => write!(f, "Reusable"),
            Lifespan::ReusableWithFilters => write!(f, "Reusable with Filters"),
        }
    }
}

/// A mask catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaskType {
    /// Stable short name, e.g. `"N95"`.
    pub id: String,
    /// Filtration efficiency, 0-100.
    pub protection_percent: u8,
    /// 1 (poor) to 5 (excellent).
    pub comfort: u8,
    /// 1 (poor) to 5 (excellent).
    pub breathability: u8,
    pub lifespan: Lifespan,
    /// Bands for which this mask is an appropriate primary choice.
    pub recommended_bands: Vec<Band>,
    /// Advisory contra-indications, e.g. "Exercise".
    #[cfg_attr(feature = "serde", serde(default))]
    pub unsuitable_for: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub layers: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub best_for: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub suitability: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pros: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cons: Vec<String>,
}

impl MaskType {
    /// Whether this mask is a primary choice for `band`.
    #[must_use]
    pub fn covers(&self, band: Band) -> bool {
        self.recommended_bands.contains(&band)
    }
}

/// Optional user context for a recommendation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UserConstraints {
    /// What the user will be doing, e.g. "Exercise".
    #[cfg_attr(feature = "serde", serde(default))]
    pub activity: Option<String>,
    /// Who will wear the mask, e.g. "Children".
    #[cfg_attr(feature = "serde", serde(default))]
    pub age_group: Option<String>,
}

impl UserConstraints {
    pub fn new(activity: Option<String>, age_group: Option<String>) -> Self {
        Self {
            activity,
            age_group,
        }
    }

    /// Supplied constraint values, skipping blank ones.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        [self.activity.as_deref(), self.age_group.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// True when no non-blank constraint is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values().next().is_none()
    }
}

/// A contra-indication that matches a supplied constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaskWarning {
    pub mask_id: String,
    /// The catalog's `unsuitable_for` entry that matched.
    pub contraindication: String,
    /// The user constraint value it matched against.
    pub constraint: String,
}

impl fmt::Display for MaskWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is not suited for '{}' (matches '{}')",
            self.mask_id, self.contraindication, self.constraint
        )
    }
}

/// Ranked mask recommendation for one tier.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Recommendation {
    pub band: Band,
    /// Best fit for the tier.
    pub primary: MaskType,
    /// Other acceptable masks, best first. May be empty.
    pub alternatives: Vec<MaskType>,
    /// Contra-indications matching the user's constraints. Never removes masks.
    pub warnings: Vec<MaskWarning>,
}

impl Recommendation {
    /// Primary followed by alternatives, in rank order.
    pub fn ranked(&self) -> impl Iterator<Item = &MaskType> {
        core::iter::once(&self.primary).chain(self.alternatives.iter())
    }
}

/// One slice of the pollutant breakdown chart.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BreakdownEntry {
    pub name: Pollutant,
    /// Concentration in µg/m³.
    pub value: f64,
    /// Share of the total, rounded to the nearest integer percent.
    pub percentage_of_total: u8,
}
