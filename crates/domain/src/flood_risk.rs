//! Flood-risk heuristic
//!
//! Combines the drain blockage classification with the weather outlook into
//! a qualitative [`RiskLevel`]. Rules are tried in order and the first one
//! that matches decides the verdict.

use crate::entities::{BlockageState, RiskLevel, RiskVerdict, VerdictDebug};
use crate::errors::DomainError;

/// Precipitation above this is heavy (mm/hr)
const HIGH_PRECIP_MM: f64 = 10.0;
/// Precipitation above this is moderate (mm/hr)
const MODERATE_PRECIP_MM: f64 = 5.0;
/// Humidity above this keeps fog on the ground (%)
const SATURATED_HUMIDITY: f64 = 85.0;

const BAD_WEATHER: [&str; 4] = ["Heavy rain", "Moderate rain", "Light rain", "Overcast clouds"];
const MILD_WEATHER: [&str; 3] = ["Drizzle", "Scattered clouds", "Haze"];
const FOGGY_WEATHER: [&str; 2] = ["Fog", "Mist"];
const DRY_WEATHER: [&str; 3] = ["Clear", "Sunny", "Few clouds"];
const LOW_VISIBILITY_WEATHER: [&str; 3] = ["Haze", "Fog", "Mist"];

/// Validated inputs of the heuristic
#[derive(Debug, Clone, PartialEq)]
pub struct RiskInputs {
    precip: f64,
    weather: String,
    blockage: BlockageState,
    confidence: f64,
    humidity: f64,
}

impl RiskInputs {
    /// Validate raw inputs
    ///
    /// `blockage_state` uses the classifier encoding: 0 = full,
    /// 1 = none, 2 = partial.
    pub fn new(
        precip: f64,
        weather: impl Into<String>,
        blockage_state: u8,
        confidence: f64,
        humidity: f64,
    ) -> Result<Self, DomainError> {
        if !precip.is_finite() || precip < 0.0 {
            return Err(DomainError::validation(format!(
                "precipitation must be a finite non-negative number, got {precip}"
            )));
        }
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(DomainError::validation(format!(
                "confidence must be within [0, 1], got {confidence}"
            )));
        }
        if !humidity.is_finite() || !(0.0..=100.0).contains(&humidity) {
            return Err(DomainError::validation(format!(
                "humidity must be within [0, 100], got {humidity}"
            )));
        }
        let blockage = BlockageState::from_class_index(blockage_state)?;

        Ok(Self {
            precip,
            weather: weather.into(),
            blockage,
            confidence,
            humidity,
        })
    }

    pub fn precip(&self) -> f64 {
        self.precip
    }

    pub fn weather(&self) -> &str {
        &self.weather
    }

    pub fn blockage(&self) -> BlockageState {
        self.blockage
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn humidity(&self) -> f64 {
        self.humidity
    }
}

/// Evaluate raw inputs
///
/// # Examples
///
/// ```
/// use domain::{RiskLevel, evaluate};
///
/// let verdict = evaluate(15.0, "Heavy rain", 0, 0.9, 50.0).unwrap();
/// assert_eq!(verdict.risk_label, RiskLevel::High);
/// ```
pub fn evaluate(
    precip: f64,
    weather: &str,
    blockage_state: u8,
    confidence: f64,
    humidity: f64,
) -> Result<RiskVerdict, DomainError> {
    let inputs = RiskInputs::new(precip, weather, blockage_state, confidence, humidity)?;
    Ok(evaluate_inputs(&inputs))
}

/// Evaluate validated inputs
pub fn evaluate_inputs(inputs: &RiskInputs) -> RiskVerdict {
    let conditions = Conditions::derive(inputs);
    RULES
        .iter()
        .find_map(|rule| rule(&conditions))
        .unwrap_or_else(|| fallback(inputs))
}

fn is_one_of(set: &[&str], weather: &str) -> bool {
    set.iter().any(|candidate| *candidate == weather)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrecipBand {
    None,
    Light,
    Moderate,
    High,
}

impl PrecipBand {
    fn of(precip: f64) -> Self {
        if precip > HIGH_PRECIP_MM {
            Self::High
        } else if precip > MODERATE_PRECIP_MM {
            Self::Moderate
        } else if precip > 0.0 {
            Self::Light
        } else {
            Self::None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WeatherClass {
    Bad,
    Mild,
    Foggy,
    Dry,
    Unknown,
}

impl WeatherClass {
    fn of(weather: &str) -> Self {
        if is_one_of(&BAD_WEATHER, weather) {
            Self::Bad
        } else if is_one_of(&MILD_WEATHER, weather) {
            Self::Mild
        } else if is_one_of(&FOGGY_WEATHER, weather) {
            Self::Foggy
        } else if is_one_of(&DRY_WEATHER, weather) {
            Self::Dry
        } else {
            Self::Unknown
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfidenceBand {
    VeryUncertain,
    Uncertain,
    Confident,
    VeryConfident,
}

impl ConfidenceBand {
    fn of(confidence: f64) -> Self {
        if confidence > 0.85 {
            Self::VeryConfident
        } else if confidence > 0.7 {
            Self::Confident
        } else if confidence > 0.5 {
            Self::Uncertain
        } else {
            Self::VeryUncertain
        }
    }

    const fn is_confident(self) -> bool {
        matches!(self, Self::Confident | Self::VeryConfident)
    }
}

/// Predicates derived once per evaluation
#[derive(Debug)]
struct Conditions<'a> {
    weather: &'a str,
    blockage: BlockageState,
    confidence: f64,
    precip: PrecipBand,
    sky: WeatherClass,
    certainty: ConfidenceBand,
    saturated: bool,
}

impl<'a> Conditions<'a> {
    fn derive(inputs: &'a RiskInputs) -> Self {
        let weather = inputs.weather.trim();
        Self {
            weather,
            blockage: inputs.blockage,
            confidence: inputs.confidence,
            precip: PrecipBand::of(inputs.precip),
            sky: WeatherClass::of(weather),
            certainty: ConfidenceBand::of(inputs.confidence),
            saturated: inputs.humidity > SATURATED_HUMIDITY,
        }
    }

    fn bad_weather(&self) -> bool {
        self.sky == WeatherClass::Bad
    }

    fn mild_weather(&self) -> bool {
        self.sky == WeatherClass::Mild
    }

    fn foggy(&self) -> bool {
        self.sky == WeatherClass::Foggy
    }

    fn dry(&self) -> bool {
        self.sky == WeatherClass::Dry
    }

    fn high_precip(&self) -> bool {
        self.precip == PrecipBand::High
    }

    fn moderate_precip(&self) -> bool {
        self.precip == PrecipBand::Moderate
    }

    fn light_precip(&self) -> bool {
        self.precip == PrecipBand::Light
    }

    fn no_precip(&self) -> bool {
        self.precip == PrecipBand::None
    }

    fn saturated_fog(&self) -> bool {
        self.foggy() && self.saturated
    }
}

type Rule = fn(&Conditions<'_>) -> Option<RiskVerdict>;

const RULES: [Rule; 4] = [post_rain_fog, full_blockage, partial_blockage, no_blockage];

fn verdict(level: RiskLevel, reason: &str) -> Option<RiskVerdict> {
    Some(RiskVerdict::new(level, reason))
}

/// Dry spell right after rain: a half-trusted partial blockage under dense fog
fn post_rain_fog(c: &Conditions<'_>) -> Option<RiskVerdict> {
    let wobbly = c.confidence > 0.6 && c.confidence < 0.75;
    if c.blockage == BlockageState::Partial && wobbly && c.no_precip() && c.saturated_fog() {
        return verdict(
            RiskLevel::Moderate,
            "Post-rain fog with high humidity over a possibly blocked drain.",
        );
    }
    None
}

fn full_blockage(c: &Conditions<'_>) -> Option<RiskVerdict> {
    if c.blockage != BlockageState::Full {
        return None;
    }

    match c.certainty {
        band if band.is_confident() => {
            let reason = match (c.high_precip(), c.bad_weather()) {
                (true, true) => "Heavy rain, bad weather, and severe blockage detected.",
                (true, false) => "Heavy rain with severe blockage detected.",
                (false, true) => "Bad weather with severe blockage detected.",
                (false, false) => "Severe blockage alone poses a flood risk.",
            };
            verdict(RiskLevel::High, reason)
        },
        ConfidenceBand::Uncertain => {
            if c.bad_weather() || c.moderate_precip() {
                verdict(
                    RiskLevel::Moderate,
                    "Probable blockage combined with rain or bad weather.",
                )
            } else {
                verdict(
                    RiskLevel::Moderate,
                    "Probable blockage detected, weather is not a factor.",
                )
            }
        },
        _ => {
            if is_one_of(&LOW_VISIBILITY_WEATHER, c.weather) {
                verdict(
                    RiskLevel::Moderate,
                    "Uncertain blockage in low-visibility conditions.",
                )
            } else {
                verdict(
                    RiskLevel::Low,
                    "Blockage detection is uncertain and weather is benign.",
                )
            }
        },
    }
}

fn partial_blockage(c: &Conditions<'_>) -> Option<RiskVerdict> {
    if c.blockage != BlockageState::Partial {
        return None;
    }

    if !c.certainty.is_confident() {
        return if c.saturated_fog() {
            verdict(
                RiskLevel::Moderate,
                "Possible partial blockage with dense fog and high humidity.",
            )
        } else {
            verdict(
                RiskLevel::Low,
                "Partial blockage detection is uncertain.",
            )
        };
    }

    if c.high_precip() && c.bad_weather() {
        verdict(
            RiskLevel::Moderate,
            "Heavy rain and bad weather with partial blockage.",
        )
    } else if c.moderate_precip() && c.mild_weather() {
        verdict(
            RiskLevel::Moderate,
            "Moderate precipitation and mild weather with partial blockage.",
        )
    } else if c.saturated_fog() {
        verdict(
            RiskLevel::Moderate,
            "Fog and high humidity with partial blockage.",
        )
    } else if c.mild_weather() || c.light_precip() {
        verdict(
            RiskLevel::Moderate,
            "Light rain or mild weather with partial blockage.",
        )
    } else if c.dry() && c.no_precip() {
        verdict(
            RiskLevel::Moderate,
            "Partial blockage may worsen before the next rain.",
        )
    } else if c.foggy() {
        verdict(RiskLevel::Moderate, "Fog with partial blockage.")
    } else {
        verdict(
            RiskLevel::Low,
            "Partial blockage with an unknown weather pattern.",
        )
    }
}

fn no_blockage(c: &Conditions<'_>) -> Option<RiskVerdict> {
    if c.blockage != BlockageState::None {
        return None;
    }

    if c.bad_weather() && (c.high_precip() || c.moderate_precip()) {
        verdict(
            RiskLevel::Low,
            "Drain is clear but significant rain is expected.",
        )
    } else {
        verdict(
            RiskLevel::Minimal,
            "No significant blockage, precipitation, or bad weather detected.",
        )
    }
}

fn fallback(inputs: &RiskInputs) -> RiskVerdict {
    RiskVerdict::new(RiskLevel::Minimal, "No rule matched the observed conditions.").with_debug(
        VerdictDebug {
            precip: inputs.precip,
            weather: inputs.weather.clone(),
            blockage_state: inputs.blockage.class_index(),
            confidence: inputs.confidence,
            humidity: inputs.humidity,
        },
    )
}
