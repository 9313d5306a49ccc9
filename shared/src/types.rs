//! Core domain types shared by the pipeline and the web boundary

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The twelve tropical zodiac signs.
///
/// Pure tag type: localized display names live in [`czech_name`], date
/// ranges in the enricher's sign table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Czech display name of a sign, as printed into generated documents.
pub fn czech_name(sign: ZodiacSign) -> &'static str {
    match sign {
        ZodiacSign::Aries => "Beran",
        ZodiacSign::Taurus => "Býk",
        ZodiacSign::Gemini => "Blíženec",
        ZodiacSign::Cancer => "Rak",
        ZodiacSign::Leo => "Lev",
        ZodiacSign::Virgo => "Panna",
        ZodiacSign::Libra => "Váhy",
        ZodiacSign::Scorpio => "Štír",
        ZodiacSign::Sagittarius => "Střelec",
        ZodiacSign::Capricorn => "Kozoroh",
        ZodiacSign::Aquarius => "Vodnář",
        ZodiacSign::Pisces => "Ryba",
    }
}

/// Which document variant to produce.
///
/// The wire values predate this service and are part of the public API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoroscopeVariant {
    #[default]
    #[serde(rename = "HoroscopeBasic")]
    Basic,
    #[serde(rename = "HoroscopeProfi")]
    Profi,
}

/// Outcome of one generated document section.
///
/// `title` stays empty until the fan-out coordinator attaches it from the
/// prompt catalog. A populated `error` means the section carries no usable
/// content and its token counts are zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionResult {
    pub key: String,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// State value threaded through one generation run.
///
/// Each stage takes the state by value and hands back the updated copy;
/// nothing here is shared across runs. `name` and `dob` stay exactly as the
/// user submitted them, `dob` parsing lands in `parsed_date` instead.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineState {
    // user inputs
    pub name: String,
    pub dob: String,
    #[serde(rename = "horoscope_type")]
    pub variant: HoroscopeVariant,

    // derived during the run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zodiac: Option<ZodiacSign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub astro_number: Option<u32>,
    pub sections: Vec<SectionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
}

impl PipelineState {
    pub fn new(name: impl Into<String>, dob: impl Into<String>, variant: HoroscopeVariant) -> Self {
        Self {
            name: name.into(),
            dob: dob.into(),
            variant,
            ..Self::default()
        }
    }
}
