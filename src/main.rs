//! # skulabel CLI
//!
//! Command-line interface for SKU generation, barcode encoding and label
//! printing.
//!
//! ## Usage
//!
//! ```bash
//! # Print the Code 128 module string for a SKU
//! skulabel encode PE/PJ02-2399-AGZKO
//!
//! # Save it as a PNG instead
//! skulabel encode --png sku.png PE/PJ02-2399-AGZKO
//!
//! # Generate a new SKU (manufacturer codes come from the config file)
//! skulabel --config labels.json sku --category Pendant --manufacturer "Pj Gems" \
//!     --price-code 2399 --mrp 2399
//!
//! # Write a label sheet for existing SKUs
//! skulabel print --format qr --template thermal --out labels.html PE/PJ02-2399-AGZKO
//!
//! # Write a QR label sheet from stored payloads
//! skulabel print-qr --out qr.html '{"sku":"PE/PJ02-2399-AGZKO","mrp":"2399.00"}'
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use skulabel::{
    Config, SkuGenerator, SkuRequest, SkulabelError, code128,
    label::{BarcodeFormat, PrintTemplate},
    print::{self, HtmlFileSurface},
    raster,
};

/// skulabel - product SKUs, barcodes and labels
#[derive(Parser, Debug)]
#[command(name = "skulabel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a string as Code 128
    Encode {
        /// Data to encode
        data: String,

        /// Save a rendered image instead of printing the module string
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,

        /// Pixels per module
        #[arg(long)]
        module_width: Option<u32>,

        /// Bar height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Omit the text under the bars
        #[arg(long)]
        no_text: bool,
    },

    /// Generate a new SKU with its QR payload and Code 128 symbol
    Sku {
        #[arg(long)]
        category: String,

        #[arg(long)]
        manufacturer: String,

        /// Price code (printed as four digits)
        #[arg(long)]
        price_code: u32,

        /// Retail price
        #[arg(long)]
        mrp: f64,

        /// Design number
        #[arg(long)]
        design_code: Option<u32>,

        /// Extra data for the QR payload
        #[arg(long, default_value = "")]
        extra: String,
    },

    /// Write a label sheet for existing SKUs
    Print {
        /// SKUs to print
        #[arg(required = true)]
        skus: Vec<String>,

        /// Symbol format: qr, code128, cipher
        #[arg(long)]
        format: Option<BarcodeFormat>,

        /// Template: standard, compact, modern, minimal, detailed, thermal
        #[arg(long)]
        template: Option<PrintTemplate>,

        /// Sheet title
        #[arg(long, default_value = print::DEFAULT_TITLE)]
        title: String,

        /// Output HTML file
        #[arg(long, default_value = "labels.html")]
        out: PathBuf,
    },

    /// Write a QR label sheet from stored JSON payloads
    PrintQr {
        /// JSON payloads
        #[arg(required = true)]
        payloads: Vec<String>,

        /// Symbol format: qr, code128, cipher
        #[arg(long, default_value = "qr")]
        format: BarcodeFormat,

        #[arg(long)]
        template: Option<PrintTemplate>,

        #[arg(long, default_value = "Print QR Codes")]
        title: String,

        #[arg(long, default_value = "qr-labels.html")]
        out: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skulabel=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SkulabelError> {
    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Encode {
            data,
            png,
            module_width,
            height,
            no_text,
        } => {
            let symbol = code128::encode(&data)?;
            match png {
                Some(path) => {
                    let mut style = config.barcode;
                    if let Some(w) = module_width {
                        style.module_width = w;
                    }
                    if let Some(h) = height {
                        style.height = h;
                    }
                    if no_text {
                        style.show_text = false;
                    }
                    let img = raster::symbol_image(&symbol, Some(data.as_str()), &style)?;
                    img.save(&path)
                        .map_err(|e| SkulabelError::Image(format!("Failed to save PNG: {}", e)))?;
                    println!("Saved to {}", path.display());
                }
                None => println!("{}", symbol),
            }
        }
        Commands::Sku {
            category,
            manufacturer,
            price_code,
            mrp,
            design_code,
            extra,
        } => {
            let mut request =
                SkuRequest::new(category, manufacturer, price_code, mrp).additional_data(extra);
            if let Some(code) = design_code {
                request = request.design_code(code);
            }
            let barcodes = SkuGenerator::new().generate(&request, &config.manufacturers)?;
            println!("{}", serde_json::to_string_pretty(&barcodes)?);
        }
        Commands::Print {
            skus,
            format,
            template,
            title,
            out,
        } => {
            let barcodes = skus
                .iter()
                .map(|sku| skulabel::ProductBarcodes::quick(sku))
                .collect::<Result<Vec<_>, _>>()?;
            let mut surface = HtmlFileSurface::new(&out);
            let job = print::print_labels(
                &barcodes,
                format.unwrap_or(config.format),
                template.unwrap_or(config.template),
                &title,
                &config.label,
                &mut surface,
            )?;
            println!("Wrote {} label(s) to {}", job.label_count, out.display());
        }
        Commands::PrintQr {
            payloads,
            format,
            template,
            title,
            out,
        } => {
            let mut surface = HtmlFileSurface::new(&out);
            let job = print::print_qr_codes(
                &payloads,
                format,
                &title,
                template.unwrap_or(config.template),
                &mut surface,
            )?;
            println!("Wrote {} label(s) to {}", job.label_count, out.display());
        }
    }

    Ok(())
}
