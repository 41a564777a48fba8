// inline-mailer: prepare an HTML email body from the command line
//
// Reads an HTML file, applies an optional stylesheet and image mode, hands the
// message to the logging transport and prints the final HTML on stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use inline_mailer::{
    EmailMessage, ImageMode, LogTransport, MailConfig, OutgoingMail, Transport, TransportError,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Inline CSS and resolve images of an HTML email body
#[derive(Debug, Parser)]
#[command(name = "inline-mailer", version)]
struct Args {
    /// HTML body to prepare
    html_file: PathBuf,

    /// Stylesheet to inline into the body
    #[arg(long = "css", value_name = "FILE")]
    css_file: Option<PathBuf>,

    /// Place the stylesheet in the head instead of inlining it
    #[arg(long, requires = "css_file")]
    head_css: bool,

    /// How resolved images are carried: base64 or attachment
    #[arg(long, value_name = "MODE")]
    images: Option<ImageMode>,

    /// Recipient address, may be repeated
    #[arg(long, value_name = "ADDR")]
    to: Vec<String>,

    /// JSON configuration file
    #[arg(long = "config", value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// Also log the full prepared body
    #[arg(long)]
    full: bool,
}

/// Logs the mail, then prints the final HTML on stdout
struct StdoutTransport(LogTransport);

impl Transport for StdoutTransport {
    fn send_mail(&self, mail: &OutgoingMail<'_>) -> Result<(), TransportError> {
        self.0.send_mail(mail)?;
        println!("{}", mail.body);
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = match &args.config_file {
        Some(path) => MailConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => {
            // Relative image sources resolve next to the HTML file
            let mut builder = MailConfig::builder();
            if let Some(dir) = args.html_file.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                builder = builder.base_dir(dir);
            }
            builder.build()?
        }
    };

    let html = std::fs::read_to_string(&args.html_file)
        .with_context(|| format!("Failed to read {}", args.html_file.display()))?;

    let mut message = EmailMessage::new(&config);
    message.set_body(html).as_html();
    for to in &args.to {
        message.add_to(to, None);
    }

    if let Some(css_file) = &args.css_file {
        let css = std::fs::read_to_string(css_file)
            .with_context(|| format!("Failed to read {}", css_file.display()))?;
        if args.head_css {
            message.with_head_stylesheet(css);
        } else {
            message.with_stylesheet(css);
        }
    }

    if let Some(mode) = args.images {
        message.embed_images(mode);
    }

    let transport = if args.full {
        LogTransport::full()
    } else {
        LogTransport::new()
    };
    message.send(&StdoutTransport(transport))?;

    Ok(())
}
