//! # Domain Types
//!
//! Core domain types used throughout Etiquetas.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   PriceInput    │   │ FormattedPrices │   │   LabelStyle    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  raw_price      │──►│  final_price    │   │  5 × Rgb        │       │
//! │  │  tax_rate       │   │  price_excl_tax │   │  scale          │       │
//! │  │  unit, quantity │   │  price_per_unit │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │      Unit       │   │ BarcodeRequest  │       │
//! │  │  General  21%   │   │  None           │   │  symbology      │       │
//! │  │  Reduced 10.5%  │   │  Kilogram       │   │  data           │       │
//! │  │  Exempt         │   │  Liter          │   │  module w/h     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Province, Rating, LogRecord: telemetry fields for the CSV event log   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Selector types parse from the labels shown in the form (`"21%"`,
//! `"Kilogramos"`, `"Muy mala"`) as well as short ASCII spellings, and
//! serialize back to the form label.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ValidationError};
use crate::PROVINCE_PLACEHOLDER;

// =============================================================================
// Tax Rate
// =============================================================================

/// IVA rate applied to the final consumer price.
///
/// ## Rates (Ley 23.349)
/// - 21%: general consumption
/// - 10.5%: agricultural products, meat, bread, fruit and vegetables
/// - Exempt: books, leaflets, newspapers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TaxRate {
    /// 21% general rate.
    #[default]
    General,
    /// 10.5% reduced rate.
    Reduced,
    /// No IVA.
    Exempt,
}

impl TaxRate {
    /// Divisor that backs the pre-tax price out of a tax-inclusive price.
    pub const fn divisor(&self) -> f64 {
        match self {
            TaxRate::General => 1.21,
            TaxRate::Reduced => 1.105,
            TaxRate::Exempt => 1.0,
        }
    }

    /// Label shown in the form selector.
    pub const fn label(&self) -> &'static str {
        match self {
            TaxRate::General => "21%",
            TaxRate::Reduced => "10.5%",
            TaxRate::Exempt => "Exento",
        }
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaxRate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "21" | "21%" | "general" => Ok(TaxRate::General),
            "10.5" | "10,5" | "10.5%" | "10,5%" | "reduced" | "reducido" => Ok(TaxRate::Reduced),
            "0" | "0%" | "exento" | "exempt" => Ok(TaxRate::Exempt),
            _ => Err(CoreError::unknown("tax rate", s)),
        }
    }
}

impl TryFrom<String> for TaxRate {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaxRate> for String {
    fn from(rate: TaxRate) -> Self {
        rate.label().to_string()
    }
}

// =============================================================================
// Unit
// =============================================================================

/// Measurement unit for the per-unit price line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Unit {
    /// No per-unit price.
    #[default]
    None,
    /// Price per kilogram.
    Kilogram,
    /// Price per litre.
    Liter,
}

impl Unit {
    /// Label shown in the form selector.
    pub const fn label(&self) -> &'static str {
        match self {
            Unit::None => "Sin unidades",
            Unit::Kilogram => "Kilogramos",
            Unit::Liter => "Litros",
        }
    }

    /// Caption drawn before the per-unit price, if the unit has one.
    pub const fn per_unit_caption(&self) -> Option<&'static str> {
        match self {
            Unit::None => None,
            Unit::Kilogram => Some("Precio al consumidor por kilogramo"),
            Unit::Liter => Some("Precio al consumidor por litro"),
        }
    }

    /// Whether a quantity must accompany this unit.
    pub const fn needs_quantity(&self) -> bool {
        !matches!(self, Unit::None)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" | "sin unidades" => Ok(Unit::None),
            "kg" | "kilogram" | "kilogramos" => Ok(Unit::Kilogram),
            "l" | "liter" | "litre" | "litros" => Ok(Unit::Liter),
            _ => Err(CoreError::unknown("unit", s)),
        }
    }
}

impl TryFrom<String> for Unit {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.label().to_string()
    }
}

// =============================================================================
// Price Input / Output
// =============================================================================

/// Raw price fields as typed into the form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInput {
    /// Final consumer price as typed, e.g. `"$1.234,50"`.
    pub raw_price: String,

    /// IVA rate included in the final price.
    #[serde(default)]
    pub tax_rate: TaxRate,

    /// Unit for the per-unit line.
    #[serde(default)]
    pub unit: Unit,

    /// Quantity in `unit`; required iff `unit` is not `None`.
    #[serde(default)]
    pub quantity: Option<f64>,
}

impl PriceInput {
    /// Creates an input without a per-unit price.
    pub fn new(raw_price: impl Into<String>, tax_rate: TaxRate) -> Self {
        PriceInput {
            raw_price: raw_price.into(),
            tax_rate,
            unit: Unit::None,
            quantity: None,
        }
    }

    /// Adds a unit and the quantity the final price covers.
    pub fn with_unit(mut self, unit: Unit, quantity: f64) -> Self {
        self.unit = unit;
        self.quantity = Some(quantity);
        self
    }
}

/// Numeric result of the price computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub final_price: f64,
    pub price_excl_tax: f64,
    /// Defined only when a unit was selected.
    pub price_per_unit: Option<f64>,
}

/// Display strings for the three label prices (`"12.345,60"` style).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedPrices {
    pub final_price: String,
    pub price_excl_tax: String,
    /// `None` when no unit was selected; never displayed in that case.
    pub price_per_unit: Option<String>,
}

// =============================================================================
// Colours and Style
// =============================================================================

/// An RGB colour, written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
    pub const WHITE: Rgb = Rgb([255, 255, 255]);

    /// Creates a colour from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb([r, g, b])
    }

    /// Parses `#RRGGBB` or `#RGB` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "color".to_string(),
            reason: reason.to_string(),
        };

        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid("expected hexadecimal digits"));
        }

        let expanded: String = match hex.len() {
            6 => hex.to_string(),
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(invalid("expected #RRGGBB or #RGB")),
        };

        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid("bad channel"))
        };

        Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
    }

    /// Red component.
    pub const fn r(&self) -> u8 {
        self.0[0]
    }

    /// Green component.
    pub const fn g(&self) -> u8 {
        self.0[1]
    }

    /// Blue component.
    pub const fn b(&self) -> u8 {
        self.0[2]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0[0], self.0[1], self.0[2])
    }
}

impl FromStr for Rgb {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

/// Colours and size of a price label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelStyle {
    pub text_color: Rgb,
    pub top_background: Rgb,
    pub bottom_background: Rgb,
    pub inner_border: Rgb,
    pub outer_border: Rgb,
    /// Uniform scale applied to the 720×300 canvas, in `[0.1, 3.0]`.
    pub scale: f64,
}

impl Default for LabelStyle {
    /// Black on light grey above, white below, black inner border.
    fn default() -> Self {
        LabelStyle {
            text_color: Rgb::BLACK,
            top_background: Rgb::new(0xF5, 0xF5, 0xF5),
            bottom_background: Rgb::WHITE,
            inner_border: Rgb::BLACK,
            outer_border: Rgb::WHITE,
            scale: 1.0,
        }
    }
}

/// The five colour slots of a label, addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorSlot {
    Text,
    TopBackground,
    BottomBackground,
    InnerBorder,
    OuterBorder,
}

impl LabelStyle {
    /// Replaces one colour.
    pub fn set_color(&mut self, slot: ColorSlot, color: Rgb) {
        match slot {
            ColorSlot::Text => self.text_color = color,
            ColorSlot::TopBackground => self.top_background = color,
            ColorSlot::BottomBackground => self.bottom_background = color,
            ColorSlot::InnerBorder => self.inner_border = color,
            ColorSlot::OuterBorder => self.outer_border = color,
        }
    }
}

// =============================================================================
// Province
// =============================================================================

/// The 24 jurisdictions offered in the province selector.
pub const PROVINCES: [&str; 24] = [
    "Buenos Aires",
    "CABA",
    "Catamarca",
    "Chaco",
    "Chubut",
    "Córdoba",
    "Corrientes",
    "Entre Ríos",
    "Formosa",
    "Jujuy",
    "La Pampa",
    "La Rioja",
    "Mendoza",
    "Misiones",
    "Neuquén",
    "Río Negro",
    "Salta",
    "San Juan",
    "San Luis",
    "Santa Cruz",
    "Santa Fe",
    "Santiago del Estero",
    "Tierra del Fuego",
    "Tucumán",
];

/// A selected province, stored under its canonical spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Province(&'static str);

impl Province {
    /// Resolves a selector value (case-insensitive) to a province.
    ///
    /// The placeholder `-` (or an empty value) means nothing was selected.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        let value = value.trim();
        if value.is_empty() || value == PROVINCE_PLACEHOLDER {
            return Err(CoreError::ProvinceNotSelected);
        }

        let wanted = value.to_lowercase();
        PROVINCES
            .iter()
            .find(|name| name.to_lowercase() == wanted)
            .map(|name| Province(*name))
            .ok_or_else(|| CoreError::unknown("province", value))
    }

    /// Canonical province name.
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl FromStr for Province {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Province::parse(s)
    }
}

impl TryFrom<String> for Province {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Province::parse(&value)
    }
}

impl From<Province> for String {
    fn from(province: Province) -> Self {
        province.0.to_string()
    }
}

// =============================================================================
// Rating
// =============================================================================

/// Answer to "¿Cómo calificaría el funcionamiento de la calculadora?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Poor,
    VeryPoor,
}

impl Rating {
    /// All options in the order the form lists them.
    pub const ALL: [Rating; 5] = [
        Rating::Excellent,
        Rating::Good,
        Rating::Fair,
        Rating::Poor,
        Rating::VeryPoor,
    ];

    /// Label written to the form and to the log.
    pub const fn label(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excelente",
            Rating::Good => "Buena",
            Rating::Fair => "Regular",
            Rating::Poor => "Mala",
            Rating::VeryPoor => "Muy mala",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Rating {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Rating::ALL
            .into_iter()
            .find(|r| r.label().to_lowercase() == wanted)
            .ok_or_else(|| CoreError::unknown("rating", s))
    }
}

impl TryFrom<String> for Rating {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rating> for String {
    fn from(rating: Rating) -> Self {
        rating.label().to_string()
    }
}

// =============================================================================
// Barcode Request
// =============================================================================

/// Barcode encoding scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Symbology {
    #[default]
    Code128,
    Ean13,
    Code39,
}

impl Symbology {
    /// Lowercase scheme name.
    pub const fn name(&self) -> &'static str {
        match self {
            Symbology::Code128 => "code128",
            Symbology::Ean13 => "ean13",
            Symbology::Code39 => "code39",
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Symbology {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "code128" => Ok(Symbology::Code128),
            "ean13" => Ok(Symbology::Ean13),
            "code39" => Ok(Symbology::Code39),
            _ => Err(CoreError::unknown("symbology", s)),
        }
    }
}

impl TryFrom<String> for Symbology {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Symbology> for String {
    fn from(symbology: Symbology) -> Self {
        symbology.name().to_string()
    }
}

/// Everything needed to draw one barcode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BarcodeRequest {
    pub symbology: Symbology,
    pub data: String,
    /// Print the human-readable text under the bars.
    pub show_text: bool,
    /// Narrowest bar width in millimetres.
    pub module_width: f64,
    /// Bar height in millimetres.
    pub module_height: f64,
}

impl Default for BarcodeRequest {
    fn default() -> Self {
        BarcodeRequest {
            symbology: Symbology::Code128,
            data: "PRUEBASCAME".to_string(),
            show_text: false,
            module_width: 0.4,
            module_height: 20.0,
        }
    }
}

impl BarcodeRequest {
    /// Download name, `codigo_<data>.png`, with unsafe characters replaced.
    pub fn file_name(&self) -> String {
        let stem: String = self
            .data
            .trim()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("codigo_{}.png", stem)
    }
}

// =============================================================================
// Log Record
// =============================================================================

/// One row of a telemetry log: date, time and the recorded value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// `dd/mm/yy`
    pub date: String,
    /// `HH:MM:SS`
    pub time: String,
    /// Province name or rating label.
    pub field: String,
}

impl LogRecord {
    /// Builds a record stamped with `at` in its own time zone.
    pub fn new<Tz>(at: &DateTime<Tz>, field: impl Into<String>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        LogRecord {
            date: at.format("%d/%m/%y").to_string(),
            time: at.format("%H:%M:%S").to_string(),
            field: field.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_tax_rate_parsing() {
        assert_eq!("21%".parse::<TaxRate>().unwrap(), TaxRate::General);
        assert_eq!("10,5".parse::<TaxRate>().unwrap(), TaxRate::Reduced);
        assert_eq!("10.5%".parse::<TaxRate>().unwrap(), TaxRate::Reduced);
        assert_eq!("Exento".parse::<TaxRate>().unwrap(), TaxRate::Exempt);
        assert!("27%".parse::<TaxRate>().is_err());
    }

    #[test]
    fn test_tax_rate_divisors() {
        assert_eq!(TaxRate::General.divisor(), 1.21);
        assert_eq!(TaxRate::Reduced.divisor(), 1.105);
        assert_eq!(TaxRate::Exempt.divisor(), 1.0);
    }

    #[test]
    fn test_unit_parsing_and_captions() {
        assert_eq!("Kilogramos".parse::<Unit>().unwrap(), Unit::Kilogram);
        assert_eq!("litros".parse::<Unit>().unwrap(), Unit::Liter);
        assert_eq!("Sin unidades".parse::<Unit>().unwrap(), Unit::None);
        assert_eq!(Unit::None.per_unit_caption(), None);
        assert_eq!(
            Unit::Liter.per_unit_caption(),
            Some("Precio al consumidor por litro")
        );
        assert!(Unit::Kilogram.needs_quantity());
    }

    #[test]
    fn test_rgb_parsing() {
        assert_eq!(Rgb::from_hex("#F5F5F5").unwrap(), Rgb::new(245, 245, 245));
        assert_eq!(Rgb::from_hex("000000").unwrap(), Rgb::BLACK);
        assert_eq!(Rgb::from_hex("#fff").unwrap(), Rgb::WHITE);
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#GGGGGG").is_err());
        assert_eq!(Rgb::new(0xAB, 0x01, 0xFF).to_string(), "#AB01FF");
    }

    #[test]
    fn test_label_style_default() {
        let style = LabelStyle::default();
        assert_eq!(style.text_color, Rgb::BLACK);
        assert_eq!(style.top_background, Rgb::new(0xF5, 0xF5, 0xF5));
        assert_eq!(style.outer_border, Rgb::WHITE);
        assert_eq!(style.scale, 1.0);
    }

    #[test]
    fn test_label_style_from_partial_json() {
        let style: LabelStyle =
            serde_json::from_str(r##"{"textColor": "#FF0000", "scale": 2.0}"##).unwrap();
        assert_eq!(style.text_color, Rgb::new(255, 0, 0));
        assert_eq!(style.scale, 2.0);
        assert_eq!(style.bottom_background, Rgb::WHITE);
    }

    #[test]
    fn test_province_parsing() {
        assert_eq!(Province::parse("córdoba").unwrap().name(), "Córdoba");
        assert_eq!(Province::parse("CABA").unwrap().name(), "CABA");
        assert_eq!(Province::parse("-"), Err(CoreError::ProvinceNotSelected));
        assert!(matches!(
            Province::parse("Atlantis"),
            Err(CoreError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_rating_labels() {
        assert_eq!("Muy mala".parse::<Rating>().unwrap(), Rating::VeryPoor);
        assert_eq!("excelente".parse::<Rating>().unwrap(), Rating::Excellent);
        assert!("Genial".parse::<Rating>().is_err());
        assert_eq!(Rating::Good.to_string(), "Buena");
    }

    #[test]
    fn test_symbology_parsing() {
        assert_eq!("EAN-13".parse::<Symbology>().unwrap(), Symbology::Ean13);
        assert_eq!("code39".parse::<Symbology>().unwrap(), Symbology::Code39);
        assert!("qr".parse::<Symbology>().is_err());
    }

    #[test]
    fn test_barcode_file_name() {
        let request = BarcodeRequest::default();
        assert_eq!(request.file_name(), "codigo_PRUEBASCAME.png");

        let request = BarcodeRequest {
            data: "A/B C".to_string(),
            ..BarcodeRequest::default()
        };
        assert_eq!(request.file_name(), "codigo_A_B_C.png");
    }

    #[test]
    fn test_log_record_format() {
        let offset = FixedOffset::west_opt(3 * 3600).unwrap();
        let at = offset.with_ymd_and_hms(2025, 3, 7, 9, 5, 1).unwrap();
        let record = LogRecord::new(&at, "Salta");
        assert_eq!(record.date, "07/03/25");
        assert_eq!(record.time, "09:05:01");
        assert_eq!(record.field, "Salta");
    }

    #[test]
    fn test_selectors_serialize_as_labels() {
        let json = serde_json::to_string(&PriceInput::new("$10", TaxRate::Reduced)).unwrap();
        assert!(json.contains("\"taxRate\":\"10.5%\""));
        assert!(json.contains("\"unit\":\"Sin unidades\""));
    }
}
