//! # Command Line Interface
//!
//! `clap` definitions for the `etiquetas` binary.
//!
//! ```text
//! etiquetas [--config <path>] <command>
//!
//!   label      render a price label and save it
//!   barcode    render a barcode and save it
//!   rate       rate the tool
//!   session    JSON-lines form session on stdin/stdout
//!   provinces  list the selectable provinces
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use etiquetas_core::{
    BarcodeRequest, LabelStyle, PriceInput, Rating, Rgb, Symbology, TaxRate, Unit, PROVINCE_PLACEHOLDER,
};

use crate::commands::label::{LabelForm, LABEL_FILE_NAME};

#[derive(Parser, Debug, Clone)]
#[command(name = "etiquetas", author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render a price label and save it as PNG
    Label(LabelArgs),
    /// Render a barcode and save it as PNG
    Barcode(BarcodeArgs),
    /// Rate the tool
    Rate {
        /// Excelente, Buena, Regular, Mala or "Muy mala"
        #[arg(long)]
        rating: Rating,
    },
    /// Run a JSON-lines form session on stdin/stdout
    Session,
    /// List the selectable provinces
    Provinces,
}

#[derive(Args, Debug, Clone)]
pub struct LabelArgs {
    /// Product name, wrapped over several lines
    #[arg(long, default_value = "")]
    pub product: String,

    /// Province where the label is used
    #[arg(long, default_value = PROVINCE_PLACEHOLDER)]
    pub province: String,

    /// Final price, e.g. "$1.234,50"
    #[arg(long, default_value = "")]
    pub price: String,

    /// VAT rate: 21%, 10.5% or Exento
    #[arg(long, default_value = "21%")]
    pub iva: TaxRate,

    /// Sin unidades, Kilogramos or Litros
    #[arg(long, default_value = "Sin unidades")]
    pub unit: Unit,

    /// Content quantity in the chosen unit
    #[arg(long)]
    pub quantity: Option<f64>,

    #[arg(long)]
    pub text_color: Option<Rgb>,

    #[arg(long)]
    pub top_background: Option<Rgb>,

    #[arg(long)]
    pub bottom_background: Option<Rgb>,

    #[arg(long)]
    pub inner_border: Option<Rgb>,

    #[arg(long)]
    pub outer_border: Option<Rgb>,

    /// Size factor between 0.1 and 3
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    #[arg(long, default_value = LABEL_FILE_NAME)]
    pub output: PathBuf,
}

impl LabelArgs {
    /// Builds the form, keeping default colours for the unset ones.
    pub fn to_form(&self) -> LabelForm {
        let defaults = LabelStyle::default();
        let style = LabelStyle {
            text_color: self.text_color.unwrap_or(defaults.text_color),
            top_background: self.top_background.unwrap_or(defaults.top_background),
            bottom_background: self.bottom_background.unwrap_or(defaults.bottom_background),
            inner_border: self.inner_border.unwrap_or(defaults.inner_border),
            outer_border: self.outer_border.unwrap_or(defaults.outer_border),
            scale: self.scale,
        };

        LabelForm {
            product_name: self.product.clone(),
            province: self.province.clone(),
            price: PriceInput {
                raw_price: self.price.clone(),
                tax_rate: self.iva,
                unit: self.unit,
                quantity: self.quantity,
            },
            style,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct BarcodeArgs {
    /// code128, ean13 or code39
    #[arg(long, default_value = "code128")]
    pub format: Symbology,

    #[arg(long, default_value = "PRUEBASCAME")]
    pub data: String,

    /// Print the encoded text under the bars
    #[arg(long, default_value_t = false)]
    pub show_text: bool,

    /// Narrowest bar width in mm (0.1 to 1.0)
    #[arg(long, default_value_t = 0.4)]
    pub module_width: f64,

    /// Bar height in mm (10 to 50)
    #[arg(long, default_value_t = 20.0)]
    pub module_height: f64,

    /// Output file (defaults to codigo_<data>.png)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl BarcodeArgs {
    pub fn to_request(&self) -> BarcodeRequest {
        BarcodeRequest {
            symbology: self.format,
            data: self.data.clone(),
            show_text: self.show_text,
            module_width: self.module_width,
            module_height: self.module_height,
        }
    }

    /// Where the PNG goes.
    pub fn output_path(&self, request: &BarcodeRequest) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(request.file_name()))
    }
}
