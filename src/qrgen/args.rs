use clap::{Args, Parser, Subcommand, ValueEnum};
use qrgen::model::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "qr")]
#[command(version)]
#[command(about = "Generate QR codes for URLs, text, WiFi, contacts, email and SMS", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode a web address
    Url {
        /// The URL (http:// or https://)
        url: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Encode free text
    Text {
        /// The text to encode
        text: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Encode WiFi network credentials
    Wifi {
        /// Network name
        #[arg(short, long)]
        ssid: String,

        /// Network password (not needed for nopass)
        #[arg(short, long)]
        password: Option<String>,

        /// Security type: WPA, WPA2, WPA3, WEP or nopass
        #[arg(short = 't', long, default_value = "WPA")]
        security: String,

        /// The network does not broadcast its SSID
        #[arg(long)]
        hidden: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Encode a contact card (vCard 3.0)
    Vcard {
        /// Full name
        #[arg(short, long)]
        name: String,

        /// Phone number
        #[arg(short, long)]
        phone: Option<String>,

        /// Email address
        #[arg(short, long)]
        email: Option<String>,

        /// Organization
        #[arg(long, visible_alias = "organization")]
        org: Option<String>,

        /// Job title
        #[arg(short, long)]
        title: Option<String>,

        /// Website
        #[arg(short, long)]
        url: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Encode an email (mailto:)
    Email {
        /// Recipient address
        address: String,

        /// Subject line
        #[arg(short, long)]
        subject: Option<String>,

        /// Message body
        #[arg(short, long)]
        body: Option<String>,

        /// Comma-separated CC recipients
        #[arg(long)]
        cc: Option<String>,

        /// Comma-separated BCC recipients
        #[arg(long)]
        bcc: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Encode an SMS (sms:)
    Sms {
        /// Recipient phone number
        phone: String,

        /// Message text
        #[arg(short, long)]
        message: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show, clear or replay past generations
    History {
        /// Show only the most recent N entries
        #[arg(short, long)]
        limit: Option<usize>,

        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// Remove every history entry
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Regenerate a QR code from a history entry
    Replay {
        /// Entry index as shown by `qr history`
        index: usize,

        /// Write to a different file
        #[arg(short, long)]
        output: Option<String>,

        /// Force the output format
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output file (.png or .svg)
    #[arg(short, long)]
    pub output: String,

    /// Force the output format regardless of the file extension
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Png,
    Svg,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Svg => OutputFormat::Svg,
        }
    }
}
